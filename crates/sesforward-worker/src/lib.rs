/// SES Forwarder Worker - mail forwarding Lambda
///
/// This module contains the invocation handler and the per-record
/// forwarding sequence.
pub mod handlers;

// Re-export commonly used items
pub use handlers::{ForwardContext, handler, process_event};
pub use sesforward_core::*;
