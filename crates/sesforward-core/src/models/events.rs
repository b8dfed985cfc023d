/// AWS Lambda event types
use crate::constants::EMAIL_KEY_PREFIX;
use crate::error::ForwardError;
use serde::Deserialize;

/// SES event from a receipt rule Lambda action
#[derive(Debug, Clone, Deserialize)]
pub struct SesEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SesEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesEventRecord {
    #[serde(rename = "eventSource", default)]
    pub event_source: String,
    #[serde(rename = "eventVersion", default)]
    pub event_version: String,
    pub ses: SesPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesPayload {
    pub mail: SesMail,
    #[serde(default)]
    pub receipt: Option<SesReceipt>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesMail {
    /// SES-assigned id, not the RFC 5322 Message-ID
    #[serde(rename = "messageId")]
    pub message_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: Vec<String>,
    #[serde(rename = "commonHeaders")]
    pub common_headers: CommonHeaders,
}

/// Subset of the message headers SES extracts for the notification
#[derive(Debug, Clone, Deserialize)]
pub struct CommonHeaders {
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub from: Vec<String>,
    #[serde(default)]
    pub to: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesReceipt {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(rename = "spamVerdict")]
    pub spam_verdict: Option<Verdict>,
    #[serde(rename = "virusVerdict")]
    pub virus_verdict: Option<Verdict>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Verdict {
    pub status: String,
}

impl SesEventRecord {
    /// Storage key of the raw message: `emails/<message-id>` with the
    /// angle brackets of the Message-ID header trimmed off.
    pub fn object_key(&self) -> Result<String, ForwardError> {
        let raw_id = self
            .ses
            .mail
            .common_headers
            .message_id
            .as_deref()
            .ok_or_else(|| {
                ForwardError::InvalidEvent(format!(
                    "record {} has no commonHeaders.messageId",
                    self.ses.mail.message_id
                ))
            })?;

        let message_id = raw_id.trim().trim_matches(|c| c == '<' || c == '>');
        if message_id.is_empty() {
            return Err(ForwardError::InvalidEvent(format!(
                "record {} has an empty Message-ID",
                self.ses.mail.message_id
            )));
        }

        Ok(format!("{}{}", EMAIL_KEY_PREFIX, message_id))
    }
}
