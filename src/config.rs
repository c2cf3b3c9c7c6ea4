use tracing::{debug, info, warn};
use crate::domain::error::BackupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Lambda,
    Queue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read before the subscriber exists, so it cannot go through [`Settings`].
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Destination and notification target used by every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupSettings {
    /// Checked per invocation; `None` fails the invocation before any record is touched.
    pub backup_bucket: Option<String>,
    pub sns_topic_arn: Option<String>,
}

impl BackupSettings {
    pub fn new(backup_bucket: impl Into<String>, sns_topic_arn: Option<String>) -> Self {
        Self {
            backup_bucket: Some(backup_bucket.into()),
            sns_topic_arn,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backup: BackupSettings,
    pub runtime: RuntimeMode,
    pub queue_url: Option<String>,
    pub endpoint_url: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, BackupError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BackupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let backup_bucket = var("BACKUP_BUCKET");
        if backup_bucket.is_none() {
            warn!("BACKUP_BUCKET environment variable not set, every invocation will fail");
        }
        let sns_topic_arn = var("SNS_TOPIC_ARN");
        debug!("Backup bucket: {:?}, SNS topic: {:?}", backup_bucket, sns_topic_arn);

        let runtime = match var("BACKUP_RUNTIME").as_deref() {
            None | Some("lambda") => RuntimeMode::Lambda,
            Some("queue") => RuntimeMode::Queue,
            Some(other) => {
                return Err(BackupError::Config(format!(
                    "unknown BACKUP_RUNTIME '{}', expected 'lambda' or 'queue'",
                    other
                )))
            }
        };

        let queue_url = var("SQS_QUEUE_URL");
        if runtime == RuntimeMode::Queue && queue_url.is_none() {
            return Err(BackupError::Config(
                "SQS_QUEUE_URL environment variable is required in queue mode".to_string(),
            ));
        }

        let endpoint_url = var("AWS_ENDPOINT_URL");
        if let Some(endpoint) = &endpoint_url {
            info!("Using custom AWS endpoint: {}", endpoint);
        }

        Ok(Self {
            backup: BackupSettings { backup_bucket, sns_topic_arn },
            runtime,
            queue_url,
            endpoint_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, BackupError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_lambda_without_notifications() {
        let settings = settings(&[("BACKUP_BUCKET", "test-backup-bucket")]).unwrap();
        assert_eq!(settings.runtime, RuntimeMode::Lambda);
        assert_eq!(settings.backup.backup_bucket.as_deref(), Some("test-backup-bucket"));
        assert_eq!(settings.backup.sns_topic_arn, None);
        assert_eq!(settings.endpoint_url, None);
    }

    #[test]
    fn empty_values_are_unset() {
        let settings = settings(&[("BACKUP_BUCKET", ""), ("SNS_TOPIC_ARN", "")]).unwrap();
        assert_eq!(settings.backup, BackupSettings::default());
    }

    #[test]
    fn queue_mode_requires_queue_url() {
        let err = settings(&[("BACKUP_BUCKET", "b"), ("BACKUP_RUNTIME", "queue")]).unwrap_err();
        assert!(matches!(err, BackupError::Config(_)));

        let settings = settings(&[
            ("BACKUP_BUCKET", "b"),
            ("BACKUP_RUNTIME", "queue"),
            ("SQS_QUEUE_URL", "http://localhost:4566/000000000000/backup-events"),
        ])
        .unwrap();
        assert_eq!(settings.runtime, RuntimeMode::Queue);
    }

    #[test]
    fn rejects_unknown_runtime() {
        assert!(settings(&[("BACKUP_RUNTIME", "cron")]).is_err());
    }
}
