/// AWS service clients and configuration loading
pub mod config;
pub mod s3;
pub mod ses;

// Re-export service traits
pub use config::EnvConfigProvider;
pub use s3::{S3StorageService, StorageService};
pub use ses::{EmailSender, SesEmailSender};
