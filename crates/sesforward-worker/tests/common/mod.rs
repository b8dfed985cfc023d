//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use serde_json::{Value, json};
use sesforward_core::constants::SES_CONFIGURATION_SET;
use sesforward_core::models::MailConfig;
use sesforward_worker::ForwardContext;
use std::path::PathBuf;
use std::sync::Arc;

pub mod mock_aws;

use mock_aws::{MockS3, MockSES};

pub const BUCKET: &str = "inbound-mail";

/// Get path to test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load a test email fixture
pub fn load_email_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join("emails").join(name);
    std::fs::read(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {:?}", path))
}

/// Forwarding configuration used across the suites
pub fn test_config() -> MailConfig {
    MailConfig {
        mail_bucket: BUCKET.to_string(),
        bounce_path: "bounce@company.com".to_string(),
        forward_as_name: "Relay".to_string(),
        forward_as_mail: "relay@company.com".to_string(),
        forward_to_name: "Bob".to_string(),
        forward_to_mail: "bob@company.com".to_string(),
        configuration_set: SES_CONFIGURATION_SET.to_string(),
    }
}

pub fn context(s3: &MockS3, ses: &MockSES) -> ForwardContext {
    ForwardContext::new(Arc::new(s3.clone()), Arc::new(ses.clone()), test_config())
}

/// Generate a unique Message-ID header value, angle brackets included
pub fn generate_message_id() -> String {
    format!("<test-{}@mail.ext.com>", uuid::Uuid::new_v4())
}

/// Storage key the forwarder derives for `message_id`
pub fn object_key(message_id: &str) -> String {
    format!("emails/{}", message_id.trim_matches(|c| c == '<' || c == '>'))
}

/// SES receipt event with one record per Message-ID
pub fn ses_event(message_ids: &[&str]) -> Value {
    let records: Vec<Value> = message_ids
        .iter()
        .enumerate()
        .map(|(i, message_id)| {
            json!({
                "eventSource": "aws:ses",
                "eventVersion": "1.0",
                "ses": {
                    "mail": {
                        "timestamp": "2025-11-01T12:00:00.000Z",
                        "source": "alice@ext.com",
                        "messageId": format!("ses-record-{}", i),
                        "destination": ["ops@company.com"],
                        "commonHeaders": {
                            "from": ["alice@ext.com"],
                            "to": ["ops@company.com"],
                            "messageId": message_id,
                            "subject": "Hello"
                        }
                    },
                    "receipt": {
                        "timestamp": "2025-11-01T12:00:00.000Z",
                        "recipients": ["ops@company.com"],
                        "spamVerdict": {"status": "PASS"},
                        "virusVerdict": {"status": "PASS"},
                        "action": {"type": "Lambda", "invocationType": "Event"}
                    }
                }
            })
        })
        .collect();

    json!({ "Records": records })
}
