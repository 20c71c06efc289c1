use thiserror::Error;

/// Body returned when no usable object key survives normalisation.
pub const NO_VALID_KEYS_MESSAGE: &str = "No valid image keys provided";

/// Body returned when images or the user message are missing.
pub const MISSING_CONTENT_MESSAGE: &str =
    "Please upload image file(s) and enter a message to proceed.";

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("No valid image keys provided")]
    NoValidKeys,

    #[error("Please upload image file(s) and enter a message to proceed.")]
    MissingContent,

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Failed to read from object storage: {0}")]
    Storage(String),

    #[error("Failed to invoke the inference service: {0}")]
    Inference(String),

    #[error("Malformed invocation request: {0}")]
    MalformedRequest(String),
}

impl HandlerError {
    /// HTTP-style status code reported to the caller.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::NoValidKeys | HandlerError::MissingContent => 400,
            HandlerError::NotFound(_) => 404,
            HandlerError::Storage(_)
            | HandlerError::Inference(_)
            | HandlerError::MalformedRequest(_) => 500,
        }
    }

    /// Text placed in the response body. Unexpected failures are prefixed so the
    /// caller can tell them apart from validation messages.
    #[must_use]
    pub fn response_body(&self) -> String {
        match self.status_code() {
            500 => format!("An error occurred: {self}"),
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(error: serde_json::Error) -> Self {
        HandlerError::MalformedRequest(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HandlerError>;
