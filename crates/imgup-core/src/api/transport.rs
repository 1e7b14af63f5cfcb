//! Curl-backed messages transport.

use super::{error_message, MessagesRequest, MessagesResponse, MessagesTransport};
use crate::config::{ApiKey, ImgupConfig};
use crate::control::CancelToken;
use crate::error::RewriteError;
use anyhow::Result;
use std::time::Duration;
use url::Url;

/// Posts to `{api_base_url}/v1/messages` with libcurl's easy interface.
///
/// Blocks the current thread; call from `spawn_blocking` if used from async code.
#[derive(Debug)]
pub struct CurlTransport {
    endpoint: Url,
    api_key: ApiKey,
    api_version: String,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl CurlTransport {
    pub fn new(cfg: &ImgupConfig, api_key: ApiKey) -> Result<Self> {
        Ok(Self {
            endpoint: cfg.messages_url()?,
            api_key,
            api_version: cfg.api_version.clone(),
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.request_timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl MessagesTransport for CurlTransport {
    fn send(
        &self,
        request: &MessagesRequest,
        cancel: &CancelToken,
    ) -> Result<MessagesResponse, RewriteError> {
        let body = serde_json::to_vec(request)?;
        let mut response: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(self.endpoint.as_str())?;
        easy.post(true)?;
        easy.post_fields_copy(&body)?;
        if let Some(d) = self.connect_timeout {
            easy.connect_timeout(d)?;
        }
        if let Some(d) = self.timeout {
            easy.timeout(d)?;
        }
        // Progress callback doubles as the cancellation check.
        easy.progress(true)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("x-api-key: {}", self.api_key.expose()))?;
        list.append(&format!("anthropic-version: {}", self.api_version))?;
        list.append("content-type: application/json")?;
        // No 100-continue round trip for small JSON bodies.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        tracing::debug!(endpoint = %self.endpoint, bytes = body.len(), "sending messages request");

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
            transfer.perform()
        };
        if let Err(e) = performed {
            if e.is_aborted_by_callback() && cancel.is_cancelled() {
                return Err(RewriteError::Cancelled);
            }
            return Err(e.into());
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(RewriteError::Http {
                status: code,
                message: error_message(&response),
            });
        }

        Ok(serde_json::from_slice(&response)?)
    }
}
