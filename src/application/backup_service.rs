use std::sync::Arc;
use tracing::{debug, error, info, warn};
use crate::{
    application::notification::compose_notification,
    config::BackupSettings,
    domain::{
        error::{BackupError, FaultKind, StorageError},
        models::{BackupRecord, EventRecord, ObjectPresence, ProcessingOutcome},
        ports::{NotificationPublisher, ObjectStore},
    },
};

/// Copies newly created objects into the backup bucket, one record at a time.
pub struct BackupService {
    object_store: Arc<dyn ObjectStore>,
    publisher: Arc<dyn NotificationPublisher>,
    settings: BackupSettings,
}

impl BackupService {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        publisher: Arc<dyn NotificationPublisher>,
        settings: BackupSettings,
    ) -> Self {
        Self {
            object_store,
            publisher,
            settings,
        }
    }

    /// Processes a batch of event records.
    ///
    /// Returns an error only when the backup bucket is not configured or a
    /// transient storage fault was hit. In the latter case the remaining
    /// records are left unprocessed so the whole batch can be redelivered.
    /// Records that completed before the fault are seen again on redelivery.
    pub async fn process_records(&self, records: &[EventRecord]) -> Result<ProcessingOutcome, BackupError> {
        info!("Received event with {} records", records.len());

        let backup_bucket = self.settings.backup_bucket.as_deref().ok_or_else(|| {
            error!("BACKUP_BUCKET environment variable not set");
            BackupError::MissingBackupBucket
        })?;

        let mut outcome = ProcessingOutcome::default();

        for (i, record) in records.iter().enumerate() {
            debug!("Processing record {} of {}", i + 1, records.len());

            match self.process_record(record, backup_bucket).await {
                Ok(()) => outcome.processed += 1,
                Err(BackupError::Storage(err)) => {
                    outcome.errors += 1;
                    match &err {
                        StorageError::Service(fault) => {
                            error!(code = %fault.code, "AWS ClientError [{}]: {}", fault.code, fault.message);
                        }
                        StorageError::Transport(_) => {
                            error!("Unexpected error processing record: {}", err);
                        }
                    }
                    if err.is_transient() {
                        warn!(
                            "Transient fault, aborting remaining {} records for redelivery",
                            records.len() - i - 1
                        );
                        return Err(BackupError::Storage(err));
                    }
                }
                Err(e) => {
                    error!("Unexpected error processing record: {}", e);
                    outcome.errors += 1;
                }
            }
        }

        info!(
            processed = outcome.processed,
            errors = outcome.errors,
            "Backup processing complete"
        );
        Ok(outcome)
    }

    async fn process_record(&self, record: &EventRecord, backup_bucket: &str) -> Result<(), BackupError> {
        let record = BackupRecord::try_from(record)?;
        info!(
            "Processing: s3://{}/{} ({} bytes)",
            record.source_bucket, record.object_key, record.object_size
        );

        if self.object_exists_in_backup(&record.object_key, backup_bucket).await? == ObjectPresence::Found {
            info!("skip_copy: Object already exists in backup: {}", record.object_key);
            return Ok(());
        }

        self.object_store
            .copy_object(&record.source_bucket, &record.object_key, backup_bucket)
            .await?;
        info!("Copied to: s3://{}/{}", backup_bucket, record.object_key);

        self.send_notification(&record, backup_bucket).await;

        info!(event = "copied", key = %record.object_key, "copied");
        Ok(())
    }

    /// Existence of the key in the backup bucket is the only idempotency signal.
    pub async fn object_exists_in_backup(&self, key: &str, backup_bucket: &str) -> Result<ObjectPresence, StorageError> {
        match self.object_store.head_object(backup_bucket, key).await {
            Ok(()) => Ok(ObjectPresence::Found),
            Err(StorageError::Service(fault)) if fault.kind == FaultKind::NotFound => {
                debug!("Key not present in backup bucket: {}", key);
                Ok(ObjectPresence::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Best effort: failures are logged and never reach the caller.
    pub async fn send_notification(&self, record: &BackupRecord, backup_bucket: &str) {
        let Some(topic_arn) = self.settings.sns_topic_arn.as_deref() else {
            warn!("SNS_TOPIC_ARN not configured, skipping notification");
            return;
        };

        let notification = compose_notification(record, backup_bucket);
        match self.publisher.publish(topic_arn, &notification).await {
            Ok(()) => info!("SNS notification sent successfully"),
            Err(e) => error!("Failed to send SNS notification: {}", e),
        }
    }
}
