//! Client modules for external service interactions
//!
//! The handler only sees the two traits below; the AWS-backed
//! implementations are built once at cold start and the in-memory mocks
//! stand in for them in tests.

pub mod bedrock_client;
pub mod mock;
pub mod s3_client;

pub use bedrock_client::BedrockInference;
pub use mock::{MockInference, MockObjectStore};
pub use s3_client::S3ObjectStore;

use async_trait::async_trait;

use crate::core::models::{ConversationMessage, ModelReply};
use crate::errors::Result;

/// Byte-blob storage addressed by bucket and key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetches the whole object. An absent key must surface as
    /// `HandlerError::NotFound` carrying that key.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

/// Hosted multimodal model accepting a conversation and returning a reply.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Takes ownership of the messages so image bytes move into the request
    /// instead of being copied.
    async fn converse(
        &self,
        model_id: &str,
        messages: Vec<ConversationMessage>,
    ) -> Result<ModelReply>;
}
