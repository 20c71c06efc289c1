/// Model every request is sent to. Callers cannot choose a different one.
pub const MODEL_ID: &str = "anthropic.claude-3-5-sonnet-20240620-v1:0";

/// Region the Bedrock client is pinned to.
pub const BEDROCK_REGION: &str = "us-east-1";

/// Fixed process settings. Nothing is read from the environment; the S3
/// client picks up the ambient AWS configuration on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_id: String,
    pub bedrock_region: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_id: MODEL_ID.to_string(),
            bedrock_region: BEDROCK_REGION.to_string(),
        }
    }
}
