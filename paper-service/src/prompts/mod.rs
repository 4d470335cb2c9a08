//! Prompt templates for question paper generation.
//!
//! A `PaperTemplate` bundles the model identifier, the static instruction
//! block and the request template. The request template is rendered with
//! minijinja; `subject`, `chapter` and `duration` are the only variables.

use crate::config::PaperSettings;
use crate::services::GenerationOptions;
use anyhow::Context;
use minijinja::{context, Environment, UndefinedBehavior};
use service_core::error::AppError;
use std::fs;
use std::path::Path;

/// Built-in instruction block (Class 6 CBSE formatting rules).
pub const DEFAULT_INSTRUCTION_BLOCK: &str = include_str!("instruction.md");

/// Built-in request template.
pub const DEFAULT_REQUEST_TEMPLATE: &str = include_str!("request.jinja");

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Paper duration in minutes when the caller gives none.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// The two text blocks sent to the provider, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub instruction_block: String,
    pub request_block: String,
}

pub struct PaperTemplate {
    model: String,
    search_grounding: bool,
    instruction_block: String,
    request_template: String,
    env: Environment<'static>,
}

impl PaperTemplate {
    pub fn new(
        model: impl Into<String>,
        instruction_block: impl Into<String>,
        request_template: impl Into<String>,
    ) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        Self {
            model: model.into(),
            search_grounding: true,
            instruction_block: instruction_block.into(),
            request_template: request_template.into(),
            env,
        }
    }

    /// The Class 6 CBSE predicted paper on the default model.
    pub fn class_six_cbse() -> Self {
        Self::new(
            DEFAULT_MODEL,
            DEFAULT_INSTRUCTION_BLOCK,
            DEFAULT_REQUEST_TEMPLATE,
        )
    }

    pub fn with_search_grounding(mut self, enabled: bool) -> Self {
        self.search_grounding = enabled;
        self
    }

    /// Build the template from configuration, reading override files if set.
    ///
    /// The request template is test-rendered so a broken override fails at
    /// startup rather than on the first request.
    pub fn from_settings(settings: &PaperSettings) -> Result<Self, AppError> {
        let instruction_block = match &settings.instruction_file {
            Some(path) => read_template(path)?,
            None => DEFAULT_INSTRUCTION_BLOCK.to_string(),
        };
        let request_template = match &settings.request_template_file {
            Some(path) => read_template(path)?,
            None => DEFAULT_REQUEST_TEMPLATE.to_string(),
        };

        let template = Self::new(settings.model.clone(), instruction_block, request_template)
            .with_search_grounding(settings.search_grounding);

        template
            .build("Science", "Chapter 1", DEFAULT_DURATION_MINUTES)
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid request template: {}", e))
            })?;

        Ok(template)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn search_grounding(&self) -> bool {
        self.search_grounding
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            search_grounding: self.search_grounding,
        }
    }

    /// Render the prompt pair for one request.
    pub fn build(
        &self,
        subject: &str,
        chapter: &str,
        duration: u32,
    ) -> Result<PromptPair, minijinja::Error> {
        let request_block = self.env.render_str(
            &self.request_template,
            context! { subject, chapter, duration },
        )?;

        Ok(PromptPair {
            instruction_block: self.instruction_block.clone(),
            request_block,
        })
    }
}

impl Default for PaperTemplate {
    fn default() -> Self {
        Self::class_six_cbse()
    }
}

fn read_template(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt template {}", path.display()))
        .map_err(AppError::ConfigError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_block_names_subject_chapter_and_duration() {
        let prompt = PaperTemplate::default()
            .build("Science", "Food: Where Does It Come From?", 90)
            .unwrap();

        assert!(prompt.request_block.contains("Subject: Science"));
        assert!(prompt
            .request_block
            .contains("Chapter: Food: Where Does It Come From?"));
        assert!(prompt.request_block.contains("Time Duration: 90 minutes"));
        assert!(prompt.request_block.contains("Use Google Search"));
    }

    #[test]
    fn instruction_block_is_passed_verbatim() {
        let prompt = PaperTemplate::default().build("Maths", "Fractions", 60).unwrap();

        assert_eq!(prompt.instruction_block, DEFAULT_INSTRUCTION_BLOCK);
    }

    #[test]
    fn template_syntax_in_values_is_not_evaluated() {
        let prompt = PaperTemplate::default()
            .build("{{ chapter }}", "Fractions", 60)
            .unwrap();

        assert!(prompt.request_block.contains("Subject: {{ chapter }}"));
    }

    #[test]
    fn undefined_variables_fail_to_render() {
        let template = PaperTemplate::new(DEFAULT_MODEL, "rules", "Grade {{ grade }}");

        assert!(template.build("Maths", "Fractions", 60).is_err());
    }

    #[test]
    fn options_carry_model_and_search_flag() {
        let template = PaperTemplate::new("gemini-2.0-flash", "rules", "{{ subject }}")
            .with_search_grounding(false);

        assert_eq!(
            template.options(),
            GenerationOptions {
                model: "gemini-2.0-flash".to_string(),
                search_grounding: false,
            }
        );
    }

    #[test]
    fn from_settings_rejects_broken_override() {
        let path = std::env::temp_dir().join(format!(
            "paper-service-broken-{}.jinja",
            std::process::id()
        ));
        fs::write(&path, "Class {{ grade }} paper").unwrap();

        let settings = PaperSettings {
            model: DEFAULT_MODEL.to_string(),
            search_grounding: true,
            instruction_file: None,
            request_template_file: Some(path.clone()),
        };
        let result = PaperTemplate::from_settings(&settings);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn from_settings_reports_missing_file() {
        let settings = PaperSettings {
            model: DEFAULT_MODEL.to_string(),
            search_grounding: true,
            instruction_file: Some("/nonexistent/instruction.md".into()),
            request_template_file: None,
        };

        assert!(matches!(
            PaperTemplate::from_settings(&settings),
            Err(AppError::ConfigError(_))
        ));
    }
}
