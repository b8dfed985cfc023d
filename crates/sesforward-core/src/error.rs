/// Error types for the SES forwarder
use crate::email::RewriteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Session init error: {0}")]
    SessionInit(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Transform error: {0}")]
    Transform(#[from] RewriteError),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Storage delete error: {0}")]
    StorageDelete(String),
}

impl ForwardError {
    /// Determines if an error is retriable by the invoking harness
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::SessionInit(_) => true,
            Self::Config(_) => false,
            Self::InvalidEvent(_) => false,
            Self::StorageRead(_) => true,
            Self::Transform(_) => false,
            Self::Dispatch(_) => true, // Throttling and transient SES failures
            Self::StorageDelete(_) => true,
        }
    }

    /// Short name of the step that failed, used as a structured log field
    pub fn step(&self) -> &'static str {
        match self {
            Self::SessionInit(_) => "session_init",
            Self::Config(_) => "config",
            Self::InvalidEvent(_) => "event",
            Self::StorageRead(_) => "fetch",
            Self::Transform(_) => "transform",
            Self::Dispatch(_) => "send",
            Self::StorageDelete(_) => "delete",
        }
    }
}

impl From<serde_json::Error> for ForwardError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidEvent(format!("not an SES receipt event: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_errors() {
        assert!(ForwardError::StorageRead("test".to_string()).is_retriable());
        assert!(ForwardError::Dispatch("test".to_string()).is_retriable());
        assert!(!ForwardError::Config("test".to_string()).is_retriable());
        assert!(
            !ForwardError::Transform(RewriteError::Parse("bad".to_string())).is_retriable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = ForwardError::Transform(RewriteError::Parse("empty message".to_string()));
        assert_eq!(
            err.to_string(),
            "Transform error: Mail parse error: empty message"
        );

        let err = ForwardError::Transform(RewriteError::HeaderWrite {
            header: "From".to_string(),
            reason: "value contains a line break".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Transform error: Could not update From: value contains a line break"
        );
    }

    #[test]
    fn test_error_step() {
        assert_eq!(ForwardError::StorageRead("x".to_string()).step(), "fetch");
        assert_eq!(ForwardError::StorageDelete("x".to_string()).step(), "delete");
        assert_eq!(ForwardError::Dispatch("x".to_string()).step(), "send");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ForwardError::from(err), ForwardError::InvalidEvent(_)));
    }
}
