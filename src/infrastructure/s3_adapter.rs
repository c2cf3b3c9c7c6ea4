use async_trait::async_trait;
use aws_sdk_s3::{
    config::http::HttpResponse,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    Client,
};
use tracing::debug;
use crate::domain::{
    error::{StorageError, StorageFault},
    ports::ObjectStore,
};

pub struct S3Adapter {
    client: Client,
}

impl S3Adapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Adapter {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        debug!("HeadObject s3://{}/{}", bucket, key);
        self.client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn copy_object(&self, source_bucket: &str, key: &str, destination_bucket: &str) -> Result<(), StorageError> {
        debug!("CopyObject s3://{}/{} -> s3://{}/{}", source_bucket, key, destination_bucket, key);
        self.client
            .copy_object()
            .copy_source(copy_source(source_bucket, key))
            .bucket(destination_bucket)
            .key(key)
            .send()
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

/// `x-amz-copy-source` value; the key must be URL-encoded, `/` separators kept.
fn copy_source(bucket: &str, key: &str) -> String {
    let encoded_key = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", bucket, encoded_key)
}

fn storage_error<E>(err: SdkError<E, HttpResponse>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match err.as_service_error() {
        Some(service_err) => {
            let status = err.raw_response().map(|response| response.status().as_u16());
            StorageError::Service(fault_from_metadata(service_err.code(), status, service_err.message()))
        }
        None => StorageError::Transport(DisplayErrorContext(&err).to_string()),
    }
}

/// Bodiless responses (HEAD) carry no error code, so the HTTP status stands in for it.
fn fault_from_metadata(code: Option<&str>, status: Option<u16>, message: Option<&str>) -> StorageFault {
    let code = match (code, status) {
        (Some(code), _) => code.to_string(),
        (None, Some(status)) => status.to_string(),
        (None, None) => "Unknown".to_string(),
    };
    let message = message.unwrap_or("no error message returned").to_string();
    StorageFault::new(code, message)
}
