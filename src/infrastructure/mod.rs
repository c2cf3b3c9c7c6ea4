pub mod aws;
pub mod s3_adapter;
pub mod sns_adapter;
