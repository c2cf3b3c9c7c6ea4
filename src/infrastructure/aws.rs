use aws_config::SdkConfig;
use tracing::debug;

pub async fn load_config(endpoint_url: Option<&str>) -> SdkConfig {
    debug!("Loading AWS configuration");
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(endpoint_url) = endpoint_url {
        builder = builder.endpoint_url(endpoint_url);
    }
    let config = builder.load().await;
    debug!("AWS region: {:?}", config.region());
    config
}

/// Custom endpoints (LocalStack) need path-style bucket addressing.
pub fn s3_client(config: &SdkConfig, custom_endpoint: bool) -> aws_sdk_s3::Client {
    let s3_config = aws_sdk_s3::config::Builder::from(config)
        .force_path_style(custom_endpoint)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}
