use crate::error::{ReportError, Result};

/// Environment variable naming the bucket that reports are written to.
pub const DESTINATION_BUCKET_VAR: &str = "DESTINATION_BUCKET";

/// Process configuration for the triggered pipeline.
///
/// Loaded before any source object is touched, so a misconfigured process
/// fails without performing I/O.
#[derive(Debug, Clone)]
pub struct Settings {
    pub destination_bucket: String,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(DESTINATION_BUCKET_VAR).ok())
    }

    fn from_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(bucket) if !bucket.trim().is_empty() => Ok(Self {
                destination_bucket: bucket,
            }),
            _ => Err(ReportError::Configuration(format!(
                "{DESTINATION_BUCKET_VAR} is not set"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_configuration_error() {
        let err = Settings::from_value(None).unwrap_err();
        assert!(matches!(err, ReportError::Configuration(_)));
    }

    #[test]
    fn test_blank_value_is_configuration_error() {
        let err = Settings::from_value(Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, ReportError::Configuration(_)));
    }

    #[test]
    fn test_value_is_accepted() {
        let settings = Settings::from_value(Some("reports-bucket".to_string())).unwrap();
        assert_eq!(settings.destination_bucket, "reports-bucket");
    }
}
