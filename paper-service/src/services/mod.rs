pub mod providers;

pub use providers::gemini::{GeminiConfig, GeminiTextProvider};
pub use providers::mock::MockTextProvider;
pub use providers::{GenerationOptions, ProviderError, TextProvider};
