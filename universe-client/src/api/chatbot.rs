//! Help chatbot

use shared::client::{ChatReply, ChatRequest};
use shared::error::ErrorCode;

use super::Api;
use crate::{ClientError, ClientResult};

impl Api {
    /// `POST chatbot/chat`; returns the bot's answer text
    pub async fn chat(&self, message: &str) -> ClientResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::Rejected {
                status: 400,
                message: ErrorCode::RequiredField.message().to_string(),
            });
        }
        let request = ChatRequest {
            message: message.to_string(),
        };
        let value = self.http.post("chatbot/chat", &Self::body(&request)?).await?;
        let reply: ChatReply = Self::accept(value)?.into_flat()?;
        Ok(reply.response)
    }
}
