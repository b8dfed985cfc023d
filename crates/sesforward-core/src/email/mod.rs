/// Email processing modules
pub mod encoding;
pub mod envelope;
pub mod rewriter;

pub use envelope::{HeaderField, MailEnvelope};
pub use rewriter::rewrite_mail;

use thiserror::Error;

/// Failures of the header rewrite transform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("Mail parse error: {0}")]
    Parse(String),

    #[error("Could not update {header}: {reason}")]
    HeaderWrite { header: String, reason: String },

    #[error("Could not encode updated mail: {0}")]
    Encode(String),
}
