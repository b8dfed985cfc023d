/// Mock AWS services for integration testing
use async_trait::async_trait;
use sesforward_core::error::ForwardError;
use sesforward_core::services::{EmailSender, StorageService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Storage calls in the order they were made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Download(String),
    Delete(String),
}

/// Mock S3 client for testing
#[derive(Clone)]
pub struct MockS3 {
    bucket: String,
    pub objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    pub calls: Arc<Mutex<Vec<StorageCall>>>,
    fail_delete: bool,
}

impl MockS3 {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_delete: false,
        }
    }

    /// A bucket whose delete calls are denied
    pub fn failing_delete(bucket: &str) -> Self {
        Self {
            fail_delete: true,
            ..Self::new(bucket)
        }
    }

    pub fn put_object(&self, key: &str, data: Vec<u8>) {
        self.objects.lock().unwrap().insert(key.to_string(), data);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn delete_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StorageCall::Delete(_)))
            .count()
    }

    fn check_bucket(&self, bucket: &str) -> Result<(), String> {
        if bucket == self.bucket {
            Ok(())
        } else {
            Err(format!("NoSuchBucket: {}", bucket))
        }
    }
}

#[async_trait]
impl StorageService for MockS3 {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ForwardError> {
        self.calls
            .lock()
            .unwrap()
            .push(StorageCall::Download(key.to_string()));
        self.check_bucket(bucket).map_err(ForwardError::StorageRead)?;

        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ForwardError::StorageRead(format!("NoSuchKey: s3://{}/{}", bucket, key)))
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), ForwardError> {
        self.calls
            .lock()
            .unwrap()
            .push(StorageCall::Delete(key.to_string()));
        self.check_bucket(bucket).map_err(ForwardError::StorageDelete)?;

        if self.fail_delete {
            return Err(ForwardError::StorageDelete(format!(
                "AccessDenied: s3://{}/{}",
                bucket, key
            )));
        }

        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Message accepted by the mock sender
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub raw: Vec<u8>,
    pub configuration_set: String,
    pub message_id: String,
}

/// Mock SES client for testing
#[derive(Clone)]
pub struct MockSES {
    pub sent_emails: Arc<Mutex<Vec<SentEmail>>>,
    reject: bool,
}

impl MockSES {
    pub fn new() -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            reject: false,
        }
    }

    /// A sender that rejects every message
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    pub fn get_sent_count(&self) -> usize {
        self.sent_emails.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent_emails.lock().unwrap().clone()
    }
}

impl Default for MockSES {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for MockSES {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        configuration_set: &str,
    ) -> Result<String, ForwardError> {
        if self.reject {
            return Err(ForwardError::Dispatch(
                "MessageRejected: Email address is not verified".to_string(),
            ));
        }

        let message_id = format!("ses-{}", uuid::Uuid::new_v4());
        self.sent_emails.lock().unwrap().push(SentEmail {
            raw: raw_email.to_vec(),
            configuration_set: configuration_set.to_string(),
            message_id: message_id.clone(),
        });
        Ok(message_id)
    }
}
