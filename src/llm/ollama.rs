use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::error::ProviderError;
use super::prompt::build_inline_prompt;
use super::provider::{ProviderRequest, RequestPayload};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

pub(super) fn build_request(config: &ProviderConfig, prompt: &str) -> ProviderRequest {
    ProviderRequest {
        endpoint: config.endpoint.clone(),
        headers: Vec::new(),
        payload: RequestPayload::Ollama(GenerateRequest {
            model: config.model.clone(),
            prompt: build_inline_prompt(prompt),
            stream: false,
        }),
    }
}

pub(super) fn decode_response(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|source| ProviderError::Malformed {
            provider: "ollama",
            source,
        })?;
    Ok(parsed.response)
}
