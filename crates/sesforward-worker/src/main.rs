use lambda_runtime::{Error, run, service_fn};
use sesforward_worker::handler;
use sesforward_worker::utils::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("Starting SES forwarder Lambda function");

    // Run the Lambda runtime
    run(service_fn(handler)).await
}
