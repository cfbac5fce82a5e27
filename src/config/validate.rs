//! Configuration validation.

use crate::config::{AnalysisSettings, Config};
use crate::error::{Error, Result};

/// Validate a loaded configuration file.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.defaults.resolution == 0 {
        return Err(Error::ConfigValidation {
            message: "defaults.resolution must be at least 1".to_string(),
        });
    }

    if !config.defaults.threshold.is_finite() {
        return Err(Error::ConfigValidation {
            message: format!(
                "defaults.threshold must be finite, got {}",
                config.defaults.threshold
            ),
        });
    }

    if config.extraction.workers == 0 {
        return Err(Error::ConfigValidation {
            message: "extraction.workers must be at least 1".to_string(),
        });
    }

    if config.extraction.job_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "extraction.job_timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate fully-resolved run settings.
///
/// CLI value parsers reject most bad values up front; this catches
/// combinations that only exist after merging with the config file.
pub fn validate_settings(settings: &AnalysisSettings) -> Result<()> {
    if settings.resolution == 0 {
        return Err(Error::ConfigValidation {
            message: "resolution must be at least 1".to_string(),
        });
    }

    if !settings.threshold.is_finite() {
        return Err(Error::ConfigValidation {
            message: format!("threshold must be finite, got {}", settings.threshold),
        });
    }

    if settings.workers == 0 {
        return Err(Error::ConfigValidation {
            message: "workers must be at least 1".to_string(),
        });
    }

    if settings.job_timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "job timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}
