//! Image understanding - a Lambda that answers questions about images stored in S3.
//!
//! Given a bucket, one or more object keys, and a user message, the handler
//! downloads the images, sends them with the message to a Bedrock-hosted
//! vision-language model through the Converse API, and returns the model's
//! text reply.
//!
//! # Architecture
//!
//! - AWS Lambda for serverless execution (`lambda_runtime`)
//! - S3 for image storage (`aws-sdk-s3`)
//! - Bedrock Converse for multimodal inference (`aws-sdk-bedrockruntime`)
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use image_understanding::clients::{MockInference, MockObjectStore};
//! use image_understanding::core::config::MODEL_ID;
//! use image_understanding::handler::ImageHandler;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     image_understanding::setup_logging();
//!
//!     let store = MockObjectStore::new().with_object("photos", "cat.png", vec![0x89, 0x50]);
//!     let handler = ImageHandler::new(store, MockInference::replying("A cat."), MODEL_ID);
//!
//!     let response = handler
//!         .handle(json!({
//!             "s3": { "bucket": { "name": "photos" }, "object": { "keys": "cat.png" } },
//!             "user_message": "What is in this picture?"
//!         }))
//!         .await;
//!     println!("{} {}", response.status_code, response.body);
//! }
//! ```

pub mod clients;
pub mod core;
pub mod errors;
pub mod handler;

pub use errors::HandlerError;
pub use handler::ImageHandler;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to `CloudWatch` Logs; the level comes from `RUST_LOG` and
/// defaults to `info`. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// image_understanding::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
