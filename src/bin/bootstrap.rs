// Lambda bootstrap entry point for the image understanding function

use image_understanding::clients::{BedrockInference, S3ObjectStore};
use image_understanding::core::config::AppConfig;
use image_understanding::ImageHandler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    image_understanding::setup_logging();

    let config = AppConfig::default();
    info!(
        model_id = %config.model_id,
        bedrock_region = %config.bedrock_region,
        "Initialising clients"
    );

    // Clients live for the whole process and are shared by every invocation.
    let store = S3ObjectStore::from_env().await;
    let inference = BedrockInference::for_region(&config.bedrock_region).await;
    let handler = ImageHandler::new(store, inference, config.model_id);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        info!(request_id = %event.context.request_id, "Received invocation");
        Ok::<_, Error>(handler.handle(event.payload).await)
    }))
    .await
}
