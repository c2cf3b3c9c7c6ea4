use async_trait::async_trait;
use crate::domain::{
    error::{NotificationError, StorageError},
    models::BackupNotification,
};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Succeeds when `key` exists in `bucket`; a missing key is a `NotFound` service fault.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    async fn copy_object(&self, source_bucket: &str, key: &str, destination_bucket: &str) -> Result<(), StorageError>;
}

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, topic_arn: &str, notification: &BackupNotification) -> Result<(), NotificationError>;
}
