/// Configuration service - loads config from environment variables
use crate::constants::{
    ENV_BOUNCE_PATH, ENV_FORWARD_AS_EMAIL, ENV_FORWARD_AS_NAME, ENV_FORWARD_TO_EMAIL,
    ENV_FORWARD_TO_NAME, ENV_MAIL_BUCKET, SES_CONFIGURATION_SET,
};
use crate::error::ForwardError;
use crate::models::MailConfig;

/// Environment variable-based configuration provider
pub struct EnvConfigProvider {
    config: MailConfig,
}

impl EnvConfigProvider {
    pub fn new() -> Result<Self, ForwardError> {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn with_lookup<F>(lookup: F) -> Result<Self, ForwardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| ForwardError::Config(format!("Missing {} env var", name)))
        };
        // Display names may be left unset
        let optional = |name: &str| lookup(name).unwrap_or_default();

        let config = MailConfig {
            mail_bucket: require(ENV_MAIL_BUCKET)?.trim().to_string(),
            bounce_path: require(ENV_BOUNCE_PATH)?.trim().to_string(),
            forward_as_name: optional(ENV_FORWARD_AS_NAME).trim().to_string(),
            forward_as_mail: require(ENV_FORWARD_AS_EMAIL)?.trim().to_string(),
            forward_to_name: optional(ENV_FORWARD_TO_NAME).trim().to_string(),
            forward_to_mail: require(ENV_FORWARD_TO_EMAIL)?.trim().to_string(),
            configuration_set: SES_CONFIGURATION_SET.to_string(),
        };

        config
            .validate()
            .map_err(|e| ForwardError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::debug!(bucket = %config.mail_bucket, "Configuration validated successfully");

        Ok(Self { config })
    }

    pub fn into_config(self) -> MailConfig {
        self.config
    }
}
