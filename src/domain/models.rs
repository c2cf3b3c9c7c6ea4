use serde::{Deserialize, Serialize};
use crate::domain::error::BackupError;

/// A record as delivered by the trigger, key still form-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub source_bucket: Option<String>,
    pub object_key: Option<String>,
    pub object_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub source_bucket: String,
    pub object_key: String,
    pub object_size: u64,
}

impl TryFrom<&EventRecord> for BackupRecord {
    type Error = BackupError;

    fn try_from(record: &EventRecord) -> Result<Self, Self::Error> {
        let source_bucket = record
            .source_bucket
            .clone()
            .ok_or_else(|| BackupError::MalformedRecord("missing bucket name".to_string()))?;
        let encoded_key = record
            .object_key
            .as_deref()
            .ok_or_else(|| BackupError::MalformedRecord("missing object key".to_string()))?;

        Ok(Self {
            source_bucket,
            object_key: decode_object_key(encoded_key),
            object_size: record.object_size.unwrap_or(0).max(0) as u64,
        })
    }
}

/// Decodes an event key with form-encoding rules: `+` is a space, `%XX` a byte.
pub fn decode_object_key(encoded: &str) -> String {
    let spaced = encoded.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectPresence {
    Found,
    NotFound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingOutcome {
    pub processed: u32,
    pub errors: u32,
}

impl ProcessingOutcome {
    pub fn status_code(&self) -> u16 {
        if self.errors == 0 { 200 } else { 207 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseBody {
    pub message: String,
    pub processed: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackupResponse {
    pub status_code: u16,
    pub body: String,
}

impl From<ProcessingOutcome> for BackupResponse {
    fn from(outcome: ProcessingOutcome) -> Self {
        let body = ResponseBody {
            message: "Backup processing complete".to_string(),
            processed: outcome.processed,
            errors: outcome.errors,
        };
        Self {
            status_code: outcome.status_code(),
            body: serde_json::json!(body).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupNotification {
    pub subject: String,
    pub body: String,
    pub event_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_as_space() {
        assert_eq!(decode_object_key("folder/my+file+name.pdf"), "folder/my file name.pdf");
    }

    #[test]
    fn decodes_percent_escapes_after_plus() {
        assert_eq!(decode_object_key("a%2Bb%20c.txt"), "a+b c.txt");
        assert_eq!(decode_object_key("caf%C3%A9.txt"), "café.txt");
    }

    #[test]
    fn invalid_utf8_is_replaced_instead_of_rejected() {
        assert_eq!(decode_object_key("bad%FF.txt"), "bad\u{FFFD}.txt");
    }

    #[test]
    fn record_without_size_defaults_to_zero() {
        let record = EventRecord {
            source_bucket: Some("src".to_string()),
            object_key: Some("docs/report+2024.pdf".to_string()),
            object_size: None,
        };
        let backup = BackupRecord::try_from(&record).unwrap();
        assert_eq!(backup.object_key, "docs/report 2024.pdf");
        assert_eq!(backup.object_size, 0);
    }

    #[test]
    fn record_without_key_is_malformed() {
        let record = EventRecord {
            source_bucket: Some("src".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            BackupRecord::try_from(&record),
            Err(BackupError::MalformedRecord(_))
        ));
    }

    #[test]
    fn response_carries_counts_and_status() {
        let response = BackupResponse::from(ProcessingOutcome { processed: 2, errors: 1 });
        assert_eq!(response.status_code, 207);

        let body: ResponseBody = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body.message, "Backup processing complete");
        assert_eq!(body.processed, 2);
        assert_eq!(body.errors, 1);

        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["statusCode"], 207);
        assert!(wire["body"].is_string());
    }
}
