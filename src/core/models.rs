use serde::{Deserialize, Serialize};

/// Event consumed by the handler, as mapped by the upstream gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub s3: S3Location,
    /// Absent and `null` are both accepted and treated as an empty message.
    #[serde(default)]
    pub user_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Location {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRef {
    pub keys: ObjectKeys,
}

/// Gateways send either a bare key or a list of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectKeys {
    One(String),
    Many(Vec<String>),
}

impl ObjectKeys {
    /// Coerces to a list and drops blank entries, preserving order and the
    /// original spelling of the surviving keys.
    #[must_use]
    pub fn normalize(&self) -> Vec<String> {
        let keys = match self {
            ObjectKeys::One(key) => std::slice::from_ref(key),
            ObjectKeys::Many(keys) => keys.as_slice(),
        };
        keys.iter()
            .filter(|k| !k.trim().is_empty())
            .cloned()
            .collect()
    }
}

impl InvocationRequest {
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    #[must_use]
    pub fn user_message(&self) -> &str {
        self.user_message.as_deref().unwrap_or("")
    }
}

/// Format label for an object key: everything after the last `.`.
///
/// No case folding is applied, and a key without a `.` is returned whole.
#[must_use]
pub fn image_format(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub format: String,
    pub bytes: Vec<u8>,
}

impl ImagePart {
    #[must_use]
    pub fn from_key(key: &str, bytes: Vec<u8>) -> Self {
        Self {
            format: image_format(key).to_string(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Image(ImagePart),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl ConversationMessage {
    /// Single user turn: the images in order, then the prompt text.
    #[must_use]
    pub fn user_turn(images: Vec<ImagePart>, text: &str) -> Self {
        let mut content: Vec<ContentBlock> = images.into_iter().map(ContentBlock::Image).collect();
        content.push(ContentBlock::Text(text.to_string()));
        Self {
            role: Role::User,
            content,
        }
    }
}

/// One block of the model's reply. Only text is consumed; anything else the
/// service returns is kept as an opaque marker so positions are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBlock {
    Text(String),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelReply {
    pub content: Vec<ReplyBlock>,
}

impl ModelReply {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self {
            content: vec![ReplyBlock::Text(text.to_string())],
        }
    }

    /// Text of the first content block, if that block is text.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        match self.content.first() {
            Some(ReplyBlock::Text(text)) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    /// Builds a response whose body is `message` encoded as a JSON string.
    #[must_use]
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::from(message).to_string(),
        }
    }

    #[must_use]
    pub fn ok(message: &str) -> Self {
        Self::new(200, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_suffix_after_last_dot() {
        assert_eq!(image_format("photo.JPG"), "JPG");
        assert_eq!(image_format("dir/archive.tar.png"), "png");
        assert_eq!(image_format("noext"), "noext");
        assert_eq!(image_format("trailing."), "");
    }

    #[test]
    fn single_key_is_coerced_to_list() {
        assert_eq!(
            ObjectKeys::One("a.png".into()).normalize(),
            vec!["a.png".to_string()]
        );
        assert!(ObjectKeys::One("   ".into()).normalize().is_empty());
    }

    #[test]
    fn blank_keys_are_dropped_but_others_kept_verbatim() {
        let keys = ObjectKeys::Many(vec![
            String::new(),
            " a.png ".into(),
            "\t\n".into(),
            "b.png".into(),
        ]);
        assert_eq!(keys.normalize(), vec![" a.png ".to_string(), "b.png".to_string()]);
    }

    #[test]
    fn response_body_is_json_encoded() {
        let resp = InvocationResponse::ok("say \"hi\"");
        assert_eq!(resp.body, "\"say \\\"hi\\\"\"");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["statusCode"], 200);
    }

    #[test]
    fn null_or_absent_user_message_reads_as_empty() {
        let base = serde_json::json!({
            "s3": { "bucket": { "name": "b" }, "object": { "keys": "a.png" } }
        });
        let absent: InvocationRequest = serde_json::from_value(base.clone()).unwrap();
        assert_eq!(absent.user_message(), "");

        let mut with_null = base;
        with_null["user_message"] = serde_json::Value::Null;
        let null: InvocationRequest = serde_json::from_value(with_null).unwrap();
        assert_eq!(null.user_message, None);
        assert_eq!(null.user_message(), "");
    }

    #[test]
    fn first_text_ignores_non_text_first_block() {
        let reply = ModelReply {
            content: vec![ReplyBlock::Other, ReplyBlock::Text("late".into())],
        };
        assert_eq!(reply.first_text(), None);
        assert_eq!(ModelReply::default().first_text(), None);
        assert_eq!(ModelReply::text("hello").first_text(), Some("hello"));
    }
}
