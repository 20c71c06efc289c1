//! Bedrock Converse API client
//!
//! Translates between the crate's conversation types and the
//! `aws-sdk-bedrockruntime` request/response shapes.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{
    ContentBlock as BedrockContent, ConversationRole, ConverseOutput, ImageBlock, ImageFormat,
    ImageSource, Message,
};
use tracing::{error, info};

use super::InferenceService;
use crate::core::models::{ContentBlock, ConversationMessage, ModelReply, ReplyBlock, Role};
use crate::errors::{HandlerError, Result};

pub struct BedrockInference {
    client: BedrockClient,
}

impl BedrockInference {
    #[must_use]
    pub fn new(client: BedrockClient) -> Self {
        Self { client }
    }

    /// Builds a client from the ambient AWS configuration, pinned to `region`.
    pub async fn for_region(region: &str) -> Self {
        let shared_config = aws_config::from_env()
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(BedrockClient::new(&shared_config))
    }
}

fn to_bedrock_content(block: ContentBlock) -> Result<BedrockContent> {
    match block {
        ContentBlock::Text(text) => Ok(BedrockContent::Text(text)),
        ContentBlock::Image(image) => {
            let image_block = ImageBlock::builder()
                .format(ImageFormat::from(image.format.as_str()))
                .source(ImageSource::Bytes(Blob::new(image.bytes)))
                .build()
                .map_err(|e| HandlerError::Inference(format!("Invalid image block: {e}")))?;
            Ok(BedrockContent::Image(image_block))
        }
    }
}

/// Converts a domain message into the Bedrock request shape, moving the
/// image bytes into the request.
pub fn to_bedrock_message(message: ConversationMessage) -> Result<Message> {
    let role = match message.role {
        Role::User => ConversationRole::User,
    };
    let content = message
        .content
        .into_iter()
        .map(to_bedrock_content)
        .collect::<Result<Vec<_>>>()?;

    Message::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|e| HandlerError::Inference(format!("Invalid message: {e}")))
}

/// Extracts the reply message from a Converse response.
pub fn to_model_reply(output: &ConverseOutput) -> Result<ModelReply> {
    let message = output
        .as_message()
        .map_err(|_| HandlerError::Inference("Response did not contain a message".to_string()))?;

    let content = message
        .content()
        .iter()
        .map(|block| match block {
            BedrockContent::Text(text) => ReplyBlock::Text(text.clone()),
            _ => ReplyBlock::Other,
        })
        .collect();

    Ok(ModelReply { content })
}

#[async_trait]
impl InferenceService for BedrockInference {
    async fn converse(
        &self,
        model_id: &str,
        messages: Vec<ConversationMessage>,
    ) -> Result<ModelReply> {
        let messages = messages
            .into_iter()
            .map(to_bedrock_message)
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .client
            .converse()
            .model_id(model_id)
            .set_messages(Some(messages))
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                error!("Bedrock converse failed: {}", detail);
                HandlerError::Inference(detail)
            })?;

        if let Some(usage) = response.usage() {
            info!(
                input_tokens = usage.input_tokens(),
                output_tokens = usage.output_tokens(),
                stop_reason = response.stop_reason().as_str(),
                "Bedrock converse completed"
            );
        }

        let output = response
            .output()
            .ok_or_else(|| HandlerError::Inference("Response had no output".to_string()))?;
        to_model_reply(output)
    }
}
