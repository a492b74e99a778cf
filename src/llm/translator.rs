use std::sync::Arc;

use crate::config::{Config, ProviderConfig, SettingsSource};

use super::error::{ProviderError, TranslateError};
use super::provider::{build_request, decode_response};
use super::sanitize::sanitize_command;
use super::transport::{HttpTransport, Transport};

/// A successful translation. `raw` is always kept so callers can show what
/// the provider actually said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub raw: String,
    pub command: String,
}

/// Turns natural-language requests into shell commands, one provider call
/// per request. Settings are re-read on every call.
pub struct Translator {
    settings: Arc<dyn SettingsSource>,
    transport: Arc<dyn Transport>,
}

impl Translator {
    pub fn new(
        settings: impl SettingsSource + 'static,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            transport: Arc::new(transport),
        }
    }

    /// Environment variables over the config file, real HTTP transport.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self::new(config.settings(), HttpTransport::new()?))
    }

    /// The provider descriptor the next call would use.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::resolve(self.settings.as_ref())
    }

    pub async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        let raw = self.request_text(text).await.map_err(|e| {
            tracing::warn!("Provider call failed: {e}");
            TranslateError::from(e)
        })?;

        let command = sanitize_command(&raw);
        if command.is_empty() {
            tracing::debug!(raw = %raw, "No command extracted from provider text");
            return Err(TranslateError::NoCommandExtracted { raw });
        }

        tracing::debug!(command = %command, "Translated request");
        Ok(Translation { raw, command })
    }

    async fn request_text(&self, text: &str) -> Result<String, ProviderError> {
        let config = self.provider_config();
        tracing::debug!(
            provider = %config.provider,
            model = %config.model,
            "Sending translation request"
        );

        let request = build_request(&config, text)?;
        let response = self.transport.send(&request).await?;
        decode_response(&config.provider, response.status, &response.body)
    }
}
