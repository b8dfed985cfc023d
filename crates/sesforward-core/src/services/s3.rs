/// S3 storage service
use crate::error::ForwardError;
use crate::utils::logging::sanitize_s3_key_for_log;
use async_trait::async_trait;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Fetches an object body; a missing or unreadable object is a `StorageRead` error
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ForwardError>;
    async fn delete(&self, bucket: &str, key: &str) -> Result<(), ForwardError>;
}

/// S3 storage service implementation
pub struct S3StorageService {
    client: aws_sdk_s3::Client,
}

impl S3StorageService {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ForwardError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                ForwardError::StorageRead(format!(
                    "S3 get_object s3://{}/{} failed: {}",
                    bucket, key, e
                ))
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| {
                ForwardError::StorageRead(format!(
                    "Failed to read body of s3://{}/{}: {}",
                    bucket, key, e
                ))
            })?
            .into_bytes()
            .to_vec();

        tracing::info!(
            "Downloaded from s3://{}/{} ({} bytes)",
            bucket,
            sanitize_s3_key_for_log(key),
            data.len()
        );
        Ok(data)
    }

    async fn delete(&self, bucket: &str, key: &str) -> Result<(), ForwardError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                ForwardError::StorageDelete(format!(
                    "S3 delete_object s3://{}/{} failed: {}",
                    bucket, key, e
                ))
            })?;

        tracing::info!("Deleted s3://{}/{}", bucket, sanitize_s3_key_for_log(key));
        Ok(())
    }
}
