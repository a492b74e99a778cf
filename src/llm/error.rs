/// Failure while building, sending or decoding a provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
    /// The URL is stripped: Gemini carries its key in the query string.
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("API error ({status}): {body}")]
    HttpStatus { status: u16, body: String },
    #[error("could not parse {provider} response: {source}")]
    Malformed {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// What the interactive shell sees from a translation attempt.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("could not reach the AI provider (check your connection or API key): {0}")]
    ConnectionFailed(#[source] ProviderError),
    #[error("the AI provider did not produce a valid command")]
    NoCommandExtracted { raw: String },
}

impl TranslateError {
    /// Raw provider text, when the provider did answer.
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::NoCommandExtracted { raw } => Some(raw),
            Self::ConnectionFailed(_) => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.without_url())
    }
}

impl From<ProviderError> for TranslateError {
    fn from(error: ProviderError) -> Self {
        Self::ConnectionFailed(error)
    }
}
