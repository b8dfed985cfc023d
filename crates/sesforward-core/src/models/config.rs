/// Configuration models
use crate::constants::SES_CONFIGURATION_SET;
use serde::{Deserialize, Serialize};

/// Forwarding configuration, immutable for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MailConfig {
    /// Bucket the SES receipt rule writes raw messages to
    pub mail_bucket: String,
    /// Address bounces of the forwarded message are routed to
    pub bounce_path: String,
    pub forward_as_name: String,
    /// Verified SES identity the message is sent as
    pub forward_as_mail: String,
    pub forward_to_name: String,
    pub forward_to_mail: String,
    #[serde(default = "default_configuration_set")]
    pub configuration_set: String,
}

fn default_configuration_set() -> String {
    SES_CONFIGURATION_SET.to_string()
}

impl MailConfig {
    /// Validates configuration is valid
    pub fn validate(&self) -> Result<(), String> {
        if self.mail_bucket.trim().is_empty() {
            return Err("Mail bucket not configured".to_string());
        }

        for (field, address) in [
            ("bounce path", &self.bounce_path),
            ("forward-as address", &self.forward_as_mail),
            ("forward-to address", &self.forward_to_mail),
        ] {
            if !looks_like_address(address) {
                return Err(format!("Invalid {}: '{}'", field, address));
            }
        }

        if self.configuration_set.is_empty() {
            return Err("SES configuration set not configured".to_string());
        }

        Ok(())
    }
}

fn looks_like_address(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !address.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
        }
        None => false,
    }
}
