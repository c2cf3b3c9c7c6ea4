use std::sync::Arc;
use aws_lambda_events::event::s3::S3Event;
use file_backup::{
    application::backup_service::BackupService,
    config::{LogFormat, RuntimeMode, Settings},
    infrastructure::{aws, s3_adapter::S3Adapter, sns_adapter::SnsAdapter},
    lambda_handler::handler,
    queue_service::QueueService,
};
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::from_default_env()
        .add_directive("file_backup=debug".parse()?)
        .add_directive("aws_sdk=warn".parse()?)
        .add_directive("aws_smithy=warn".parse()?);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);
    match LogFormat::from_env() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    info!("Starting file backup handler");
    let settings = Settings::from_env()?;
    debug!("Settings: {:?}", settings);

    let aws_config = aws::load_config(settings.endpoint_url.as_deref()).await;
    let s3_client = aws::s3_client(&aws_config, settings.endpoint_url.is_some());
    let sns_client = aws_sdk_sns::Client::new(&aws_config);
    debug!("AWS clients initialized");

    let service = Arc::new(BackupService::new(
        Arc::new(S3Adapter::new(s3_client)),
        Arc::new(SnsAdapter::new(sns_client)),
        settings.backup.clone(),
    ));

    match (settings.runtime, settings.queue_url) {
        (RuntimeMode::Queue, Some(queue_url)) => {
            let sqs_client = aws_sdk_sqs::Client::new(&aws_config);
            QueueService::new(service, sqs_client, queue_url).run().await?;
            Ok(())
        }
        _ => {
            info!("Running as Lambda function");
            let func = service_fn(move |event: LambdaEvent<S3Event>| {
                let service = service.clone();

                async move { handler(&service, event).await }
            });
            run(func).await
        }
    }
}
