use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::error::ProviderError;
use super::prompt::build_inline_prompt;
use super::provider::{ProviderRequest, RequestPayload};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// The key travels in the query string; no auth header is sent.
pub(super) fn build_request(config: &ProviderConfig, prompt: &str) -> ProviderRequest {
    let base = config.endpoint.trim_end_matches('/');
    let api_key = config.api_key.as_deref().unwrap_or_default();
    let endpoint = format!("{base}/{}:generateContent?key={api_key}", config.model);

    let payload = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: build_inline_prompt(prompt),
            }],
        }],
    };

    ProviderRequest {
        endpoint,
        headers: Vec::new(),
        payload: RequestPayload::Gemini(payload),
    }
}

pub(super) fn decode_response(body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|source| ProviderError::Malformed {
            provider: "gemini",
            source,
        })?;

    Ok(parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_default())
}
