use async_trait::async_trait;
use aws_sdk_sns::{error::DisplayErrorContext, types::MessageAttributeValue, Client};
use tracing::debug;
use crate::domain::{
    error::NotificationError,
    models::BackupNotification,
    ports::NotificationPublisher,
};

pub struct SnsAdapter {
    client: Client,
}

impl SnsAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationPublisher for SnsAdapter {
    async fn publish(&self, topic_arn: &str, notification: &BackupNotification) -> Result<(), NotificationError> {
        let event_type = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(&notification.event_type)
            .build()
            .map_err(|e| NotificationError::Message(e.to_string()))?;

        debug!("Publishing notification to {}: {}", topic_arn, notification.subject);
        let output = self.client
            .publish()
            .topic_arn(topic_arn)
            .subject(&notification.subject)
            .message(&notification.body)
            .message_attributes("event_type", event_type)
            .send()
            .await
            .map_err(|e| NotificationError::Publish(DisplayErrorContext(&e).to_string()))?;

        debug!("SNS message id: {:?}", output.message_id());
        Ok(())
    }
}
