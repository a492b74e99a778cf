use std::fmt;

use serde::Serialize;

use crate::config::ProviderConfig;

use super::error::ProviderError;
use super::{gemini, ollama, openai};

/// Provider identity. Unknown names survive resolution as `Other` so the
/// error can name them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Ollama,
    Other(String),
}

impl ProviderKind {
    pub fn parse(name: &str) -> Self {
        match name {
            "openai" => Self::OpenAi,
            "gemini" => Self::Gemini,
            "ollama" => Self::Ollama,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
            Self::Other(name) => name,
        }
    }

    /// Hosted providers need a credential; the local one does not.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAi | Self::Gemini)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider call ready for the transport.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub payload: RequestPayload,
}

/// Provider-shaped request body. Serializes to the bare provider JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    OpenAi(openai::ChatRequest),
    Gemini(gemini::GenerateContentRequest),
    Ollama(ollama::GenerateRequest),
}

/// Build the endpoint, headers and payload for `prompt`.
pub fn build_request(
    config: &ProviderConfig,
    prompt: &str,
) -> Result<ProviderRequest, ProviderError> {
    match &config.provider {
        ProviderKind::OpenAi => Ok(openai::build_request(config, prompt)),
        ProviderKind::Gemini => Ok(gemini::build_request(config, prompt)),
        ProviderKind::Ollama => Ok(ollama::build_request(config, prompt)),
        ProviderKind::Other(name) => Err(ProviderError::UnsupportedProvider(name.clone())),
    }
}

/// Pull the generated text out of a provider response.
///
/// Error statuses win over the body: a 4xx/5xx is never parsed as success.
pub fn decode_response(
    provider: &ProviderKind,
    status: u16,
    body: &str,
) -> Result<String, ProviderError> {
    if status >= 400 {
        return Err(ProviderError::HttpStatus {
            status,
            body: body.to_string(),
        });
    }

    match provider {
        ProviderKind::OpenAi => openai::decode_response(body),
        ProviderKind::Gemini => gemini::decode_response(body),
        ProviderKind::Ollama => ollama::decode_response(body),
        ProviderKind::Other(name) => Err(ProviderError::UnsupportedProvider(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: ProviderKind) -> ProviderConfig {
        ProviderConfig {
            provider,
            endpoint: "http://127.0.0.1:9/api".into(),
            api_key: Some("key".into()),
            model: "model-x".into(),
        }
    }

    #[test]
    fn test_parse_round_trips_known_names() {
        for name in ["openai", "gemini", "ollama"] {
            assert_eq!(ProviderKind::parse(name).as_str(), name);
        }
        assert_eq!(
            ProviderKind::parse("OpenAI"),
            ProviderKind::Other("OpenAI".into())
        );
    }

    #[test]
    fn test_build_request_rejects_unknown_provider() {
        let err = build_request(&config(ProviderKind::Other("claude".into())), "ls").unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedProvider(name) if name == "claude"));
    }

    #[test]
    fn test_decode_error_status_wins_over_valid_body() {
        let body = r#"{"choices":[{"message":{"content":"ls -la"}}]}"#;
        let err = decode_response(&ProviderKind::OpenAi, 500, body).unwrap_err();
        match err {
            ProviderError::HttpStatus { status, body: raw } => {
                assert_eq!(status, 500);
                assert_eq!(raw, body);
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_status_400_is_http_error() {
        let err = decode_response(&ProviderKind::Ollama, 400, r#"{"response":"pwd"}"#).unwrap_err();
        assert!(matches!(err, ProviderError::HttpStatus { status: 400, .. }));
    }

    #[test]
    fn test_decode_status_399_is_parsed() {
        let text = decode_response(&ProviderKind::Ollama, 399, r#"{"response":"pwd"}"#).unwrap();
        assert_eq!(text, "pwd");
    }

    #[test]
    fn test_decode_rejects_unknown_provider() {
        let err = decode_response(&ProviderKind::Other("x".into()), 200, "{}").unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedProvider(_)));
    }

    #[test]
    fn test_payload_serializes_without_variant_tag() {
        let request = build_request(&config(ProviderKind::Ollama), "show disk usage").unwrap();
        let value = serde_json::to_value(&request.payload).unwrap();
        assert_eq!(value["model"], "model-x");
        assert_eq!(value["stream"], false);
        assert!(value.get("Ollama").is_none());
    }
}
