//! Document archive: optimized resume artifacts written to object storage.

use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;

#[derive(Clone)]
pub struct DocumentArchive {
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl DocumentArchive {
    pub fn new(s3: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { s3, bucket }
    }

    /// Archives an optimization report as a JSON artifact.
    /// Returns the object key it was written under.
    pub async fn store_optimization<T: Serialize>(
        &self,
        user_id: &str,
        record_id: &str,
        report: &T,
    ) -> Result<String, AppError> {
        let key = format!("optimizations/{user_id}/{record_id}.json");
        let body = serde_json::to_vec(report)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("artifact serialization failed: {e}")))?;

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| AppError::Archive(format!("S3 upload failed: {e}")))?;

        info!("Archived optimization to s3://{}/{}", self.bucket, key);
        Ok(key)
    }
}
