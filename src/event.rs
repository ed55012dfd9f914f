//! Upload notification parsing.
//!
//! The triggered pipeline is driven by an S3-style notification document:
//! a `Records` array where each record names the bucket and key of a newly
//! stored object.

use serde::Deserialize;

use crate::error::{ReportError, Result};

#[derive(Debug, Deserialize)]
struct UploadNotification {
    #[serde(rename = "Records")]
    records: Vec<UploadRecord>,
}

#[derive(Debug, Deserialize)]
struct UploadRecord {
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: BucketRef,
    object: ObjectRef,
}

#[derive(Debug, Deserialize)]
struct BucketRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectRef {
    key: String,
}

/// The uploaded object a single invocation works on.
#[derive(Debug, Clone)]
pub struct SourceObject {
    pub bucket: String,
    pub key: String,
}

/// Extracts the source object from a notification document.
///
/// Only the first record is used; one invocation processes one file.
pub fn parse_notification(bytes: &[u8]) -> Result<SourceObject> {
    let notification: UploadNotification = serde_json::from_slice(bytes)
        .map_err(|e| ReportError::Parse(format!("invalid notification JSON: {e}")))?;

    let record = notification
        .records
        .into_iter()
        .next()
        .ok_or_else(|| ReportError::Parse("notification contains no records".to_string()))?;

    Ok(SourceObject {
        bucket: record.s3.bucket.name,
        key: record.s3.object.key,
    })
}
