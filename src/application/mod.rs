pub mod backup_service;
pub mod notification;
pub mod size_format;
