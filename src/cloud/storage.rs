// ABOUTME: Object-storage operations trait.
// ABOUTME: Pre-signed URL generation for credential-free artifact uploads.

use async_trait::async_trait;
use std::time::Duration;

/// HTTP method a pre-signed URL is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignMethod {
    Get,
    Put,
}

impl PresignMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresignMethod::Get => "GET",
            PresignMethod::Put => "PUT",
        }
    }
}

/// Object-storage operations the engine depends on.
#[async_trait]
pub trait StorageOps: Send + Sync {
    /// Generate a time-boxed, method-scoped URL for one object key.
    async fn presigned_url(
        &self,
        bucket: &str,
        key: &str,
        method: PresignMethod,
        ttl: Duration,
    ) -> Result<String, StorageError>;
}

/// Errors from object-storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("bucket not found: {0}")]
    BucketNotFound(String),

    #[error("object storage service error: {0}")]
    Service(String),
}
