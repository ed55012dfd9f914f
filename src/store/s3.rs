use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::ObjectStore;
use crate::error::{ReportError, Result};

/// S3-backed [`ObjectStore`].
///
/// Uses the ambient AWS configuration (env vars, instance profile, etc.)
/// already loaded by `aws_config::load_from_env`.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, container: &str, key: &str) -> Result<Bytes> {
        debug!(container, key, "Fetching object");

        let resp = self
            .client
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    ReportError::SourceNotFound(format!("s3://{container}/{key}"))
                } else {
                    ReportError::Storage(service_error.to_string())
                }
            })?;

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| ReportError::Storage(e.to_string()))?;

        Ok(body.into_bytes())
    }

    async fn store(&self, container: &str, key: &str, body: Vec<u8>) -> Result<()> {
        debug!(container, key, bytes = body.len(), "Storing object");

        self.client
            .put_object()
            .bucket(container)
            .key(key)
            .body(body.into())
            .content_type("text/plain")
            .send()
            .await
            .map_err(|e| ReportError::Storage(e.into_service_error().to_string()))?;

        Ok(())
    }
}
