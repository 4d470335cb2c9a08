use crate::prompts::DEFAULT_MODEL;
use crate::services::providers::gemini::GEMINI_API_BASE;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PaperConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub paper: PaperSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub api_base: String,
    pub timeout_secs: Option<u64>,
}

impl GeminiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone)]
pub struct PaperSettings {
    /// Model identifier (e.g., gemini-2.5-flash)
    pub model: String,
    /// Whether the model may use Google Search while generating
    pub search_grounding: bool,
    /// Replaces the built-in instruction block
    pub instruction_file: Option<PathBuf>,
    /// Replaces the built-in request template
    pub request_template_file: Option<PathBuf>,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            search_grounding: true,
            instruction_file: None,
            request_template_file: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    /// Empty or containing `*` means any origin.
    pub allowed_origins: Vec<String>,
}

impl PaperConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PaperConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), false)?,
                timeout_secs: optional_env("GEMINI_TIMEOUT_SECS")
                    .map(|value| parse_value("GEMINI_TIMEOUT_SECS", &value))
                    .transpose()?,
            },
            paper: PaperSettings {
                model: get_env("PAPER_MODEL", Some(DEFAULT_MODEL), false)?,
                search_grounding: parse_bool(
                    "PAPER_SEARCH_GROUNDING",
                    &get_env("PAPER_SEARCH_GROUNDING", Some("true"), false)?,
                )?,
                instruction_file: optional_env("PAPER_INSTRUCTION_FILE").map(PathBuf::from),
                request_template_file: optional_env("PAPER_REQUEST_TEMPLATE_FILE")
                    .map(PathBuf::from),
            },
            cors: CorsSettings {
                allowed_origins: parse_list(&get_env("CORS_ALLOWED_ORIGINS", Some("*"), false)?),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value {:?}: {}", key, value, e))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got {:?}",
            key,
            other
        ))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default_outside_prod() {
        let value = get_env("PAPER_SERVICE_TEST_UNSET_KEY", Some("fallback"), false).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_requires_value_in_prod() {
        let result = get_env("PAPER_SERVICE_TEST_UNSET_KEY", Some("fallback"), true);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let result = get_env("PAPER_SERVICE_TEST_UNSET_KEY", None, false);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn parses_boolean_spellings() {
        assert!(parse_bool("K", "TRUE").unwrap());
        assert!(parse_bool("K", " on ").unwrap());
        assert!(!parse_bool("K", "0").unwrap());
        assert!(parse_bool("K", "maybe").is_err());
    }

    #[test]
    fn parses_timeout_seconds() {
        assert_eq!(parse_value::<u64>("K", " 30 ").unwrap(), 30);
        assert!(parse_value::<u64>("K", "soon").is_err());
    }

    #[test]
    fn parses_origin_list() {
        assert_eq!(
            parse_list("http://localhost:5173, https://papers.example.com,,"),
            vec!["http://localhost:5173", "https://papers.example.com"]
        );
        assert!(parse_list("").is_empty());
    }
}
