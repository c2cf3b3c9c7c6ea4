use crate::{application::size_format::format_size, domain::models::{BackupNotification, BackupRecord}};

pub const EVENT_TYPE: &str = "file_backup";

pub fn compose_notification(record: &BackupRecord, backup_bucket: &str) -> BackupNotification {
    let body = format!(
        "File Backed Up Successfully\n\
         \n\
         Source: s3://{source}/{key}\n\
         Backup: s3://{backup}/{key}\n\
         Size: {size}\n\
         \n\
         This is an automated notification from your Personal File Backup system.\n",
        source = record.source_bucket,
        backup = backup_bucket,
        key = record.object_key,
        size = format_size(record.object_size),
    );

    BackupNotification {
        subject: format!("File Backed Up: {}", record.object_key),
        body,
        event_type: EVENT_TYPE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_subject_body_and_event_type() {
        let record = BackupRecord {
            source_bucket: "photos".to_string(),
            object_key: "2024/beach day.jpg".to_string(),
            object_size: 1536,
        };
        let notification = compose_notification(&record, "photos-backup");

        assert_eq!(notification.subject, "File Backed Up: 2024/beach day.jpg");
        assert_eq!(notification.event_type, "file_backup");
        assert!(notification.body.starts_with("File Backed Up Successfully\n\n"));
        assert!(notification.body.contains("Source: s3://photos/2024/beach day.jpg\n"));
        assert!(notification.body.contains("Backup: s3://photos-backup/2024/beach day.jpg\n"));
        assert!(notification.body.contains("Size: 1.5 KB\n"));
        assert!(notification.body.ends_with("Personal File Backup system.\n"));
    }
}
