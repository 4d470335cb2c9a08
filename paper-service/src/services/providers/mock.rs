//! Mock provider implementation for testing.

use super::{GenerationOptions, ProviderError, TextProvider};
use crate::prompts::PromptPair;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock text provider that returns a fixed outcome and records every call.
pub struct MockTextProvider {
    outcome: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_call: Mutex<Option<(PromptPair, GenerationOptions)>>,
}

impl MockTextProvider {
    /// Provider that always answers with `text`.
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// Provider that always fails with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, ProviderError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent call.
    pub fn last_prompt(&self) -> Option<PromptPair> {
        self.last_call
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|(prompt, _)| prompt.clone()))
    }

    /// Options passed to the most recent call.
    pub fn last_options(&self) -> Option<GenerationOptions> {
        self.last_call
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|(_, options)| options.clone()))
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &PromptPair,
        options: &GenerationOptions,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last_call) = self.last_call.lock() {
            *last_call = Some((prompt.clone(), options.clone()));
        }

        self.outcome.clone()
    }
}
