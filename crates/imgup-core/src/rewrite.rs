//! Rewrite client: one messages call per URL, first content block's text back.

use crate::api::{Message, MessagesRequest, MessagesTransport, Role};
use crate::config::RewriteSettings;
use crate::control::CancelToken;
use crate::error::RewriteError;

pub struct RewriteClient<T> {
    transport: T,
    settings: RewriteSettings,
}

impl<T: MessagesTransport> RewriteClient<T> {
    pub fn new(transport: T, settings: RewriteSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &RewriteSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request for `url`: fixed model, instruction and token limit, with the
    /// URL verbatim as the single user message.
    pub fn build_request(&self, url: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            system: self.settings.system_prompt.clone(),
            messages: vec![Message {
                role: Role::User,
                content: url.to_string(),
            }],
        }
    }

    /// Returns the model's text for `url` unmodified. No validation is applied
    /// to the result; an empty text block is returned as an empty string.
    pub fn rewrite(&self, url: &str, cancel: &CancelToken) -> Result<String, RewriteError> {
        let request = self.build_request(url);
        let response = self.transport.send(&request, cancel)?;
        response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or(RewriteError::EmptyResponse)
    }
}
