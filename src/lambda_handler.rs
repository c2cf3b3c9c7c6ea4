use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use lambda_runtime::{Error, LambdaEvent};
use tracing::{debug, instrument};
use crate::{
    application::backup_service::BackupService,
    domain::models::{BackupResponse, EventRecord},
};

impl From<&S3EventRecord> for EventRecord {
    fn from(record: &S3EventRecord) -> Self {
        Self {
            source_bucket: record.s3.bucket.name.clone(),
            object_key: record.s3.object.key.clone(),
            object_size: record.s3.object.size,
        }
    }
}

pub fn event_records(event: &S3Event) -> Vec<EventRecord> {
    event.records.iter().map(EventRecord::from).collect()
}

/// Runs one S3 event through the backup service and builds the invocation response.
pub async fn process_s3_event(service: &BackupService, event: &S3Event) -> Result<BackupResponse, Error> {
    let records = event_records(event);
    let outcome = service.process_records(&records).await?;
    Ok(BackupResponse::from(outcome))
}

#[instrument(skip(service, event), fields(request_id = %event.context.request_id))]
pub async fn handler(service: &BackupService, event: LambdaEvent<S3Event>) -> Result<BackupResponse, Error> {
    debug!("Received S3 event with {} records", event.payload.records.len());
    process_s3_event(service, &event.payload).await
}
