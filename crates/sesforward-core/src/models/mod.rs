/// Data models for the SES forwarder
pub mod config;
pub mod events;

// Re-export commonly used types
pub use config::*;
pub use events::*;
