use thiserror::Error;

/// Category of a fault reported by the storage service.
///
/// Service codes are only ever compared as strings inside [`FaultKind::from_code`];
/// everything else branches on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    NotFound,
    ServiceUnavailable,
    SlowDown,
    InternalError,
    AccessDenied,
    Other,
}

impl FaultKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "404" | "NotFound" | "NoSuchKey" => FaultKind::NotFound,
            "503" | "ServiceUnavailable" => FaultKind::ServiceUnavailable,
            "SlowDown" => FaultKind::SlowDown,
            "500" | "InternalError" => FaultKind::InternalError,
            "403" | "AccessDenied" => FaultKind::AccessDenied,
            _ => FaultKind::Other,
        }
    }

    /// Faults worth a redelivery of the whole batch.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FaultKind::ServiceUnavailable | FaultKind::SlowDown | FaultKind::InternalError
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}]: {message}")]
pub struct StorageFault {
    pub kind: FaultKind,
    pub code: String,
    pub message: String,
}

impl StorageFault {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind: FaultKind::from_code(&code),
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("AWS ClientError {0}")]
    Service(StorageFault),
    #[error("Storage request failed: {0}")]
    Transport(String),
}

impl StorageError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Service(fault) if fault.kind.is_transient())
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Publish failed: {0}")]
    Publish(String),
    #[error("Invalid notification message: {0}")]
    Message(String),
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("BACKUP_BUCKET environment variable is required")]
    MissingBackupBucket,
    #[error("Malformed event record: {0}")]
    MalformedRecord(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Queue error: {0}")]
    Queue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_service_codes_to_fault_kinds() {
        assert_eq!(FaultKind::from_code("404"), FaultKind::NotFound);
        assert_eq!(FaultKind::from_code("NoSuchKey"), FaultKind::NotFound);
        assert_eq!(FaultKind::from_code("ServiceUnavailable"), FaultKind::ServiceUnavailable);
        assert_eq!(FaultKind::from_code("SlowDown"), FaultKind::SlowDown);
        assert_eq!(FaultKind::from_code("InternalError"), FaultKind::InternalError);
        assert_eq!(FaultKind::from_code("AccessDenied"), FaultKind::AccessDenied);
        assert_eq!(FaultKind::from_code("NoSuchBucket"), FaultKind::Other);
    }

    #[test]
    fn only_allow_listed_kinds_are_transient() {
        assert!(FaultKind::ServiceUnavailable.is_transient());
        assert!(FaultKind::SlowDown.is_transient());
        assert!(FaultKind::InternalError.is_transient());
        assert!(!FaultKind::NotFound.is_transient());
        assert!(!FaultKind::AccessDenied.is_transient());
        assert!(!FaultKind::Other.is_transient());
    }

    #[test]
    fn transport_errors_are_never_transient() {
        let err = StorageError::Transport("dispatch failure".to_string());
        assert!(!err.is_transient());

        let err = StorageError::Service(StorageFault::new("SlowDown", "Please reduce your request rate."));
        assert!(err.is_transient());
    }

    #[test]
    fn missing_bucket_error_names_the_variable() {
        assert!(BackupError::MissingBackupBucket.to_string().contains("BACKUP_BUCKET"));
    }
}
