use std::fmt;

use serde::{Deserialize, Serialize};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Which backend request/response shape to speak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Gemini-style `generateContent` API.
    #[default]
    Gemini,
    /// OpenAI-compatible `chat/completions` API.
    OpenAi,
}

impl Provider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_BASE_URL,
            Provider::OpenAi => OPENAI_BASE_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_MODEL,
            Provider::OpenAi => OPENAI_MODEL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => f.write_str("gemini"),
            Provider::OpenAi => f.write_str("openai"),
        }
    }
}

/// The persisted provider configuration record.
///
/// `base_url` and `model` start out as the provider's defaults but are kept as
/// typed by the user afterwards. An empty `api_key` puts every workflow in
/// sample mode.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            api_key: String::new(),
            model: provider.default_model().to_string(),
        }
    }
}

impl ProviderConfig {
    /// Returns a copy switched to `provider`, with that provider's default
    /// endpoint and model. The credential is carried over untouched.
    pub fn with_provider(&self, provider: Provider) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            api_key: self.api_key.clone(),
            model: provider.default_model().to_string(),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The credential with everything but its last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), tail)
    }
}

// Hand-written so the credential never reaches a log line.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.masked_api_key())
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_gemini_without_credential() {
        let config = ProviderConfig::default();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.base_url, GEMINI_BASE_URL);
        assert_eq!(config.model, GEMINI_MODEL);
        assert!(!config.has_credential());
    }

    #[test]
    fn test_switching_provider_resets_endpoint_but_keeps_key() {
        let config = ProviderConfig {
            api_key: "AIza-secret".to_string(),
            model: "gemini-custom".to_string(),
            ..ProviderConfig::default()
        };
        let switched = config.with_provider(Provider::OpenAi);
        assert_eq!(switched.provider, Provider::OpenAi);
        assert_eq!(switched.base_url, OPENAI_BASE_URL);
        assert_eq!(switched.model, OPENAI_MODEL);
        assert_eq!(switched.api_key, "AIza-secret");
    }

    #[test]
    fn test_reselecting_same_provider_restores_defaults() {
        let config = ProviderConfig {
            base_url: "http://localhost:9000".to_string(),
            ..ProviderConfig::default()
        };
        let switched = config.with_provider(Provider::Gemini);
        assert_eq!(switched.base_url, GEMINI_BASE_URL);
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let value = serde_json::to_value(ProviderConfig::default()).unwrap();
        assert_eq!(value["provider"], "gemini");
        assert_eq!(value["baseUrl"], GEMINI_BASE_URL);
        assert_eq!(value["apiKey"], "");
        assert_eq!(value["model"], GEMINI_MODEL);

        let openai: Provider = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(openai, Provider::OpenAi);
    }

    #[test]
    fn test_debug_output_masks_credential() {
        let config = ProviderConfig {
            api_key: "sk-abcdef123456".to_string(),
            ..ProviderConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-abcdef"));
        assert!(debug.contains("3456"));
    }

    #[test]
    fn test_whitespace_key_is_not_a_credential() {
        let config = ProviderConfig {
            api_key: "   ".to_string(),
            ..ProviderConfig::default()
        };
        assert!(!config.has_credential());
    }
}
