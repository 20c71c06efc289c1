use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::debug;

use super::ObjectStore;
use crate::errors::{HandlerError, Result};

pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    #[must_use]
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Builds a client from the ambient AWS configuration (region, credentials).
    pub async fn from_env() -> Self {
        let shared_config = aws_config::load_from_env().await;
        Self::new(S3Client::new(&shared_config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    HandlerError::NotFound(key.to_string())
                } else {
                    HandlerError::Storage(format!(
                        "Failed to get s3://{bucket}/{key}: {}",
                        DisplayErrorContext(&e)
                    ))
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| HandlerError::Storage(format!("Failed to read body of {key}: {e}")))?
            .into_bytes();

        debug!(bucket, key, size = bytes.len(), "Fetched object");
        Ok(bytes.to_vec())
    }
}
