/// Lambda event handlers
pub mod forward;

pub use forward::ForwardContext;

use lambda_runtime::{Error, LambdaEvent as RuntimeEvent};
use serde_json::Value;
use sesforward_core::error::ForwardError;
use sesforward_core::models::SesEvent;
use tracing::{error, info};

/// Main Lambda handler - forwards every record of an SES receipt event
///
/// Configuration and AWS clients are rebuilt on every invocation.
pub async fn handler(event: RuntimeEvent<Value>) -> Result<Value, Error> {
    info!(request_id = %event.context.request_id, "Received Lambda event");

    let ctx = ForwardContext::from_env().await.map_err(|e| {
        error!("Failed to initialize forwarding context: {}", e);
        e
    })?;

    Ok(process_event(&ctx, event.payload).await?)
}

/// Forwards the records of `payload` and echoes it back on success
pub async fn process_event(ctx: &ForwardContext, payload: Value) -> Result<Value, ForwardError> {
    let ses_event: SesEvent = serde_json::from_value(payload.clone()).map_err(|e| {
        error!("Failed to parse SES event: {}", e);
        e
    })?;

    forward::handle(ctx, &ses_event).await?;

    Ok(payload)
}
