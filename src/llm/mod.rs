mod error;
mod gemini;
mod ollama;
mod openai;
mod prompt;
mod provider;
mod sanitize;
mod transport;
mod translator;

pub use error::{ProviderError, TranslateError};
pub use provider::{build_request, decode_response, ProviderKind, ProviderRequest, RequestPayload};
pub use sanitize::{sanitize_command, REPL_PROMPT};
pub use transport::{HttpTransport, RawResponse, Transport, REQUEST_TIMEOUT};
pub use translator::{Translation, Translator};
