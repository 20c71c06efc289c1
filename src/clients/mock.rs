//! In-memory stand-ins for object storage and the inference service.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{InferenceService, ObjectStore};
use crate::core::models::{ConversationMessage, ModelReply};
use crate::errors::{HandlerError, Result};

#[derive(Clone, Default)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
    failing_keys: Arc<Mutex<HashSet<String>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_object(self, bucket: &str, key: &str, content: Vec<u8>) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), content);
        self
    }

    /// Makes fetching `key` fail with a generic storage error.
    #[must_use]
    pub fn with_failure(self, key: &str) -> Self {
        self.failing_keys.lock().unwrap().insert(key.to_string());
        self
    }

    /// Keys passed to `get_object`, in call order.
    #[must_use]
    pub fn requested_keys(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(key.to_string());

        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(HandlerError::Storage(format!("simulated outage reading {key}")));
        }

        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| HandlerError::NotFound(key.to_string()))
    }
}

#[derive(Clone)]
pub struct MockInference {
    reply: Arc<std::result::Result<ModelReply, String>>,
    calls: Arc<Mutex<Vec<(String, Vec<ConversationMessage>)>>>,
}

impl MockInference {
    #[must_use]
    pub fn replying(text: &str) -> Self {
        Self::with_reply(ModelReply::text(text))
    }

    #[must_use]
    pub fn with_reply(reply: ModelReply) -> Self {
        Self {
            reply: Arc::new(Ok(reply)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            reply: Arc::new(Err(message.to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every `(model_id, messages)` pair received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Vec<ConversationMessage>)> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceService for MockInference {
    async fn converse(
        &self,
        model_id: &str,
        messages: Vec<ConversationMessage>,
    ) -> Result<ModelReply> {
        self.calls
            .lock()
            .unwrap()
            .push((model_id.to_string(), messages));

        match self.reply.as_ref() {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(HandlerError::Inference(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_store_reports_missing_keys() {
        let store = MockObjectStore::new().with_object("b", "a.png", vec![1]);

        assert_eq!(store.get_object("b", "a.png").await.unwrap(), vec![1]);
        let err = store.get_object("b", "missing.png").await.unwrap_err();
        assert!(matches!(err, HandlerError::NotFound(ref k) if k == "missing.png"));
        assert_eq!(store.requested_keys(), vec!["a.png", "missing.png"]);
    }

    #[tokio::test]
    async fn mock_store_scopes_objects_by_bucket() {
        let store = MockObjectStore::new().with_object("b", "a.png", vec![1]);
        assert!(store.get_object("other", "a.png").await.is_err());
    }
}
