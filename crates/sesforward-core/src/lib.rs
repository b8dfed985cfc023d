/// SES Forwarder Core - Shared library for the SES mail forwarder
///
/// This crate contains the configuration model, SES event types, the MIME
/// header rewriter and the storage/sender service traits used by the
/// forwarding Lambda.
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use email::{MailEnvelope, RewriteError, rewrite_mail};
pub use error::ForwardError;
pub use models::MailConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
