/// SES email sending service
use crate::error::ForwardError;
use async_trait::async_trait;

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Submits a complete MIME message; envelope addresses are taken from its headers
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        configuration_set: &str,
    ) -> Result<String, ForwardError>;
}

pub struct SesEmailSender {
    client: aws_sdk_ses::Client,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        configuration_set: &str,
    ) -> Result<String, ForwardError> {
        use aws_sdk_ses::primitives::Blob;

        let raw_message = aws_sdk_ses::types::RawMessage::builder()
            .data(Blob::new(raw_email))
            .build()
            .map_err(|e| ForwardError::Dispatch(format!("Failed to build raw message: {}", e)))?;

        let response = self
            .client
            .send_raw_email()
            .raw_message(raw_message)
            .configuration_set_name(configuration_set)
            .send()
            .await
            .map_err(|e| ForwardError::Dispatch(format!("SES send_raw_email failed: {}", e)))?;

        let message_id = response.message_id;

        tracing::info!(
            configuration_set = %configuration_set,
            "Sent email via SES: {}",
            message_id
        );
        Ok(message_id)
    }
}
