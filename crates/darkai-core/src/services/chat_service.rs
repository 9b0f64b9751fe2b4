//! Chat service - canned replies first, then the text model.

use std::sync::Arc;

use crate::domain::chat::{
    EMPTY_REPLY_FALLBACK, build_prompt, clean_markdown, detect_canned_reply, is_code_request,
};
use crate::domain::{ChatReply, ChatRequest, ReplySource};
use crate::ports::{CoreError, TextGenerationPort};

/// Service answering single chat messages.
pub struct ChatService {
    text: Arc<dyn TextGenerationPort>,
}

impl ChatService {
    pub fn new(text: Arc<dyn TextGenerationPort>) -> Self {
        Self { text }
    }

    /// Answer one message.
    ///
    /// Identity questions are answered locally; everything else goes to the
    /// text model. Conversational replies are stripped of markdown, code
    /// replies are returned as generated.
    pub async fn reply(&self, request: &ChatRequest) -> Result<ChatReply, CoreError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(CoreError::Validation("Message is required.".to_string()));
        }

        if let Some((intent, canned)) = detect_canned_reply(message) {
            tracing::debug!(target: "darkai.chat", %intent, "answered with canned reply");
            return Ok(ChatReply {
                bot_response: canned.to_string(),
                source: ReplySource::Canned(intent),
            });
        }

        let is_code = request.code_mode || is_code_request(message);
        let prompt = build_prompt(message, is_code);
        let generated = self.text.generate(&prompt).await.map_err(|e| {
            tracing::warn!(target: "darkai.chat", error = %e, "text generation failed");
            CoreError::from(e)
        })?;

        let bot_response = if generated.trim().is_empty() {
            EMPTY_REPLY_FALLBACK.to_string()
        } else if is_code {
            generated
        } else {
            clean_markdown(&generated)
        };

        Ok(ChatReply {
            bot_response,
            source: if is_code {
                ReplySource::Code
            } else {
                ReplySource::Conversation
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Intent;
    use crate::testing::FakeTextModel;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            code_mode: false,
        }
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let model = Arc::new(FakeTextModel::replying("unused"));
        let service = ChatService::new(model.clone());

        let err = service.reply(&request("   ")).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m == "Message is required."));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn canned_reply_skips_the_model() {
        let model = Arc::new(FakeTextModel::replying("unused"));
        let service = ChatService::new(model.clone());

        let reply = service.reply(&request("Who built you?")).await.unwrap();
        assert_eq!(reply.source, ReplySource::Canned(Intent::Creator));
        assert!(reply.bot_response.contains("Bhavya"));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn conversation_reply_is_cleaned() {
        let model = Arc::new(FakeTextModel::replying("  **Dark** is *here*\n   next line"));
        let service = ChatService::new(model.clone());

        let reply = service.reply(&request("say hi")).await.unwrap();
        assert_eq!(reply.bot_response, "Dark is here\nnext line");
        assert_eq!(reply.source, ReplySource::Conversation);
        assert!(model.prompts()[0].contains("Question: say hi"));
    }

    #[tokio::test]
    async fn code_reply_is_verbatim() {
        let raw = "```python\n    print('**hi**')\n```";
        let model = Arc::new(FakeTextModel::replying(raw));
        let service = ChatService::new(model.clone());

        let reply = service
            .reply(&request("write a python hello world"))
            .await
            .unwrap();
        assert_eq!(reply.bot_response, raw);
        assert_eq!(reply.source, ReplySource::Code);
        assert!(model.prompts()[0].starts_with("You are a coding assistant."));
    }

    #[tokio::test]
    async fn code_mode_forces_code_prompt() {
        let model = Arc::new(FakeTextModel::replying("x = 1"));
        let service = ChatService::new(model.clone());

        let reply = service
            .reply(&ChatRequest {
                message: "reverse a list".into(),
                code_mode: true,
            })
            .await
            .unwrap();
        assert_eq!(reply.source, ReplySource::Code);
        assert!(model.prompts()[0].contains("Request: reverse a list"));
    }

    #[tokio::test]
    async fn empty_generation_uses_fallback() {
        let service = ChatService::new(Arc::new(FakeTextModel::replying("")));
        let reply = service.reply(&request("hello there")).await.unwrap();
        assert_eq!(reply.bot_response, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn vendor_failure_is_external() {
        let service = ChatService::new(Arc::new(FakeTextModel::failing()));
        let err = service.reply(&request("hello there")).await.unwrap_err();
        assert!(matches!(err, CoreError::ExternalService(_)));
    }
}
