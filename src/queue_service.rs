use std::sync::Arc;
use aws_lambda_events::event::s3::S3Event;
use aws_sdk_sqs::{error::DisplayErrorContext, Client as SqsClient};
use tracing::{debug, error, info, warn};
use crate::{
    application::backup_service::BackupService,
    domain::{error::BackupError, models::BackupResponse},
    lambda_handler::event_records,
};

/// What to do with a queue message once its event has been handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Disposition {
    Delete,
    Retain,
}

/// Long-polls an SQS queue fed by S3 event notifications.
pub struct QueueService {
    service: Arc<BackupService>,
    sqs_client: SqsClient,
    queue_url: String,
}

impl QueueService {
    pub fn new(service: Arc<BackupService>, sqs_client: SqsClient, queue_url: String) -> Self {
        Self { service, sqs_client, queue_url }
    }

    pub async fn run(&self) -> Result<(), BackupError> {
        info!("Starting queue service, polling SQS queue: {}", self.queue_url);

        let mut poll_count: u64 = 0;
        loop {
            poll_count += 1;
            debug!("Polling SQS queue (attempt {})", poll_count);

            let response = self.sqs_client
                .receive_message()
                .queue_url(&self.queue_url)
                .max_number_of_messages(10)
                .wait_time_seconds(20)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to receive messages from SQS: {}", DisplayErrorContext(&e));
                    BackupError::Queue(DisplayErrorContext(&e).to_string())
                })?;

            let messages = response.messages.unwrap_or_default();
            if messages.is_empty() {
                debug!("No messages received from SQS");
                continue;
            }
            info!("Received {} messages from SQS", messages.len());

            for (i, message) in messages.iter().enumerate() {
                let Some(body) = message.body() else {
                    warn!("Received message without body");
                    continue;
                };

                if handle_message(&self.service, body).await == Disposition::Retain {
                    info!("Leaving message {} on the queue for redelivery", i + 1);
                    continue;
                }

                if let Some(receipt_handle) = message.receipt_handle() {
                    debug!("Deleting processed message from queue");
                    self.sqs_client
                        .delete_message()
                        .queue_url(&self.queue_url)
                        .receipt_handle(receipt_handle)
                        .send()
                        .await
                        .map_err(|e| {
                            error!("Failed to delete message from SQS: {}", DisplayErrorContext(&e));
                            BackupError::Queue(DisplayErrorContext(&e).to_string())
                        })?;
                }
            }
        }
    }
}

/// Runs one message body through the backup service.
///
/// Unparseable bodies (including the `s3:TestEvent` probe) are dropped; aborted
/// batches stay on the queue so the visibility timeout redelivers them.
pub async fn handle_message(service: &BackupService, body: &str) -> Disposition {
    let event: S3Event = match serde_json::from_str(body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Discarding message that is not an S3 event: {}", e);
            debug!("Discarded message body: {}", body);
            return Disposition::Delete;
        }
    };

    match service.process_records(&event_records(&event)).await {
        Ok(outcome) => {
            let response = BackupResponse::from(outcome);
            info!("Message processed with status {}: {}", response.status_code, response.body);
            Disposition::Delete
        }
        Err(e) => {
            error!("Message processing aborted: {}", e);
            Disposition::Retain
        }
    }
}
