//! Image understanding request handler.
//!
//! One linear pass per invocation:
//! - deserialize the event and normalise the object keys
//! - fetch every image from object storage, in key order
//! - check that images and a user message are present
//! - send one user turn to the model and return the first text block
//!
//! Every failure is folded into an `InvocationResponse`; the handler itself
//! never returns an error to the Lambda runtime.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::clients::{InferenceService, ObjectStore};
use crate::core::models::{ConversationMessage, ImagePart, InvocationRequest, InvocationResponse};
use crate::errors::{HandlerError, Result};

/// Holds the process-wide clients. Build once at cold start and share the
/// reference across invocations.
pub struct ImageHandler<S, I> {
    store: S,
    inference: I,
    model_id: String,
}

impl<S, I> ImageHandler<S, I>
where
    S: ObjectStore,
    I: InferenceService,
{
    pub fn new(store: S, inference: I, model_id: impl Into<String>) -> Self {
        Self {
            store,
            inference,
            model_id: model_id.into(),
        }
    }

    /// Handles one invocation payload and maps the outcome to a status code and
    /// JSON-encoded body.
    #[tracing::instrument(level = "info", skip(self, payload))]
    pub async fn handle(&self, payload: Value) -> InvocationResponse {
        match self.process(payload).await {
            Ok(reply) => {
                info!(status_code = 200, "Image understanding request completed");
                InvocationResponse::ok(&reply)
            }
            Err(e) => {
                let status_code = e.status_code();
                if status_code >= 500 {
                    error!(status_code, "Request failed: {}", e);
                } else {
                    warn!(status_code, "Request rejected: {}", e);
                }
                InvocationResponse::new(status_code, &e.response_body())
            }
        }
    }

    async fn process(&self, payload: Value) -> Result<String> {
        let request: InvocationRequest = serde_json::from_value(payload)?;

        #[cfg(feature = "debug-logs")]
        info!("Parsed invocation request: {:?}", request);

        let bucket = request.bucket().to_string();
        let keys = request.s3.object.keys.normalize();
        if keys.is_empty() {
            return Err(HandlerError::NoValidKeys);
        }
        info!(bucket = %bucket, key_count = keys.len(), "Fetching images");

        let images = self.fetch_images(&bucket, &keys).await?;

        let user_message = request.user_message();
        if images.is_empty() || user_message.is_empty() {
            return Err(HandlerError::MissingContent);
        }

        let messages = vec![ConversationMessage::user_turn(images, user_message)];
        let reply = self.inference.converse(&self.model_id, messages).await?;

        reply.first_text().map(str::to_string).ok_or_else(|| {
            HandlerError::Inference("Model reply did not start with a text block".to_string())
        })
    }

    /// Fetches sequentially; the first failure aborts and drops what was read.
    async fn fetch_images(&self, bucket: &str, keys: &[String]) -> Result<Vec<ImagePart>> {
        let mut images = Vec::with_capacity(keys.len());
        for key in keys {
            let bytes = self.store.get_object(bucket, key).await?;
            info!(key = %key, size = bytes.len(), "Fetched image");
            images.push(ImagePart::from_key(key, bytes));
        }
        Ok(images)
    }
}
