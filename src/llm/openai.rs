use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::error::ProviderError;
use super::prompt::COMMAND_INSTRUCTION;
use super::provider::{ProviderRequest, RequestPayload};

const MAX_TOKENS: u32 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatMessageResponse>,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

pub(super) fn build_request(config: &ProviderConfig, prompt: &str) -> ProviderRequest {
    let payload = ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: COMMAND_INSTRUCTION.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            },
        ],
        max_tokens: MAX_TOKENS,
    };

    let headers = config
        .api_key
        .as_ref()
        .map(|key| vec![("Authorization".to_string(), format!("Bearer {key}"))])
        .unwrap_or_default();

    ProviderRequest {
        endpoint: config.endpoint.clone(),
        headers,
        payload: RequestPayload::OpenAi(payload),
    }
}

pub(super) fn decode_response(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|source| ProviderError::Malformed {
            provider: "openai",
            source,
        })?;

    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ProviderKind;

    fn config(api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            provider: ProviderKind::OpenAi,
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            api_key: api_key.map(String::from),
            model: "gpt-3.5-turbo".into(),
        }
    }

    #[test]
    fn test_build_request_shapes_chat_payload() {
        let request = build_request(&config(Some("sk-test")), "list hidden files");
        assert_eq!(request.endpoint, "https://api.openai.com/v1/chat/completions");
        assert_eq!(
            request.headers,
            vec![("Authorization".to_string(), "Bearer sk-test".to_string())]
        );

        let value = serde_json::to_value(&request.payload).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 100);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], COMMAND_INSTRUCTION);
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "list hidden files");
    }

    #[test]
    fn test_build_request_without_key_sends_no_auth_header() {
        let request = build_request(&config(None), "pwd");
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_decode_first_choice_content() {
        let body = r#"{"choices":[{"message":{"content":"ls -la"}}]}"#;
        assert_eq!(decode_response(body).unwrap(), "ls -la");
    }

    #[test]
    fn test_decode_uses_only_first_choice() {
        let body = r#"{"id":"x","choices":[
            {"index":0,"message":{"role":"assistant","content":"df -h"}},
            {"index":1,"message":{"role":"assistant","content":"du -sh"}}
        ]}"#;
        assert_eq!(decode_response(body).unwrap(), "df -h");
    }

    #[test]
    fn test_decode_empty_choices_is_empty_text() {
        assert_eq!(decode_response(r#"{"choices":[]}"#).unwrap(), "");
        assert_eq!(decode_response("{}").unwrap(), "");
    }

    #[test]
    fn test_decode_invalid_json_is_malformed() {
        let err = decode_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { provider: "openai", .. }));
    }
}
