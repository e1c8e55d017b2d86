//! AI configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default sampling temperature for recipe generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),
}

/// Which backend answers chat requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Groq's OpenAI-compatible endpoint.
    Groq,
    /// OpenAI itself.
    OpenAi,
    /// Canned responses, no network.
    Fake,
}

impl ProviderKind {
    /// Read `NUTRIFIT_AI_PROVIDER`, defaulting to Groq.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("NUTRIFIT_AI_PROVIDER") {
            Ok(value) => value.parse(),
            Err(_) => Ok(ProviderKind::Groq),
        }
    }

    fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Fake => "NUTRIFIT_FAKE_API_KEY",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Fake => "http://localhost",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "llama3-70b-8192",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Fake => "fake-model",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(ProviderKind::Groq),
            "openai" => Ok(ProviderKind::OpenAi),
            "fake" => Ok(ProviderKind::Fake),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Fake => "fake",
        };
        f.write_str(name)
    }
}

/// AI client configuration.
#[derive(Clone)]
pub struct AiConfig {
    pub provider: ProviderKind,
    /// Secret for the provider. Never logged.
    pub api_key: String,
    /// Model identifier (e.g., "llama3-70b-8192").
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Sampling temperature applied when a request doesn't set one.
    pub temperature: f32,
    /// Completion token cap applied when a request doesn't set one.
    pub max_tokens: Option<u32>,
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AiConfig {
    /// Load configuration for the given provider from environment variables.
    ///
    /// Required:
    /// - `GROQ_API_KEY` (or `OPENAI_API_KEY` for the OpenAI provider)
    ///
    /// Optional:
    /// - `NUTRIFIT_AI_MODEL`: Model name (default: "llama3-70b-8192")
    /// - `NUTRIFIT_AI_BASE_URL`: API base URL (default: "https://api.groq.com/openai/v1")
    /// - `NUTRIFIT_AI_TEMPERATURE`: Sampling temperature (default: 0.8)
    /// - `NUTRIFIT_AI_MAX_TOKENS`: Completion token cap (default: unset)
    pub fn from_env_for(provider: ProviderKind) -> Result<Self, ConfigError> {
        let key_var = provider.api_key_var();
        let api_key = match provider {
            ProviderKind::Fake => env::var(key_var).unwrap_or_default(),
            _ => env::var(key_var).map_err(|_| ConfigError::MissingEnvVar(key_var.to_string()))?,
        };

        let model = env::var("NUTRIFIT_AI_MODEL")
            .unwrap_or_else(|_| provider.default_model().to_string());

        let base_url = env::var("NUTRIFIT_AI_BASE_URL")
            .unwrap_or_else(|_| provider.default_base_url().to_string());

        let temperature = parse_setting(
            "NUTRIFIT_AI_TEMPERATURE",
            env::var("NUTRIFIT_AI_TEMPERATURE").ok(),
        )
        .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = parse_setting(
            "NUTRIFIT_AI_MAX_TOKENS",
            env::var("NUTRIFIT_AI_MAX_TOKENS").ok(),
        );

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
        })
    }
}

/// Parse an optional setting. Unparseable values are logged and ignored.
fn parse_setting<T: FromStr>(var: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var, value = %raw, "Ignoring malformed setting, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("groq".parse::<ProviderKind>().unwrap(), ProviderKind::Groq);
        assert_eq!(" OpenAI ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("fake".parse::<ProviderKind>().unwrap(), ProviderKind::Fake);
        assert!(matches!(
            "claude".parse::<ProviderKind>(),
            Err(ConfigError::UnknownProvider(p)) if p == "claude"
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = AiConfig {
            provider: ProviderKind::Groq,
            api_key: "gsk_secret".to_string(),
            model: "llama3-70b-8192".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(
            parse_setting::<f32>("NUTRIFIT_AI_TEMPERATURE", Some(" 0.5 ".to_string())),
            Some(0.5)
        );
        assert_eq!(
            parse_setting::<u32>("NUTRIFIT_AI_MAX_TOKENS", Some("2048".to_string())),
            Some(2048)
        );
        assert_eq!(parse_setting::<u32>("NUTRIFIT_AI_MAX_TOKENS", None), None);
    }

    #[test]
    fn test_malformed_setting_falls_back() {
        assert_eq!(
            parse_setting::<f32>("NUTRIFIT_AI_TEMPERATURE", Some("warm".to_string())),
            None
        );
        assert_eq!(
            parse_setting::<u32>("NUTRIFIT_AI_MAX_TOKENS", Some("-5".to_string())),
            None
        );
        assert_eq!(
            parse_setting::<u32>("NUTRIFIT_AI_MAX_TOKENS", Some("1e3".to_string())),
            None
        );
    }
}
