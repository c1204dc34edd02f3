use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use thiserror::Error;

use crate::config::StorageConfig;

/// Presigned-URL issuance and prefix listing against one bucket. Object
/// contents are never read here.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    bucket: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to presign {key}: {message}")]
    Presign { key: String, message: String },

    #[error("failed to list prefix {prefix}: {message}")]
    List { prefix: String, message: String },
}

impl StorageClient {
    /// Credentials and region come from the standard AWS environment.
    pub async fn new(config: &StorageConfig) -> Self {
        let aws_config = aws_config::load_from_env().await;
        Self {
            client: Client::new(&aws_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Time-limited GET URL for a single key.
    pub async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigning_config = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| StorageError::Presign { key: key.to_string(), message: e.to_string() })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| StorageError::Presign { key: key.to_string(), message: e.to_string() })?;

        Ok(presigned.uri().to_string())
    }

    /// Keys under a prefix, first page only (the bucket layout keeps prefixes
    /// well under the listing page size).
    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| StorageError::List { prefix: prefix.to_string(), message: e.to_string() })?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect())
    }
}
