use crate::error::ConfigError;
use crate::models::photo::DEFAULT_JPEG_QUALITY;
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

/// Largest photo body the HTTP service accepts (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub addr: String,
    pub db_path: String,
    pub jpeg_quality: u8,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jpeg_quality: u8 = try_load(&lookup, "SNACKTACULAR_JPEG_QUALITY", DEFAULT_JPEG_QUALITY)?;
        if !(1..=100).contains(&jpeg_quality) {
            return Err(ConfigError::Invalid {
                key: "SNACKTACULAR_JPEG_QUALITY",
                value: jpeg_quality.to_string(),
                reason: "expected 1-100".into(),
            });
        }

        let max_upload_bytes: usize =
            try_load(&lookup, "SNACKTACULAR_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        if max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "SNACKTACULAR_MAX_UPLOAD_BYTES",
                value: max_upload_bytes.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            addr: try_load(&lookup, "SNACKTACULAR_ADDR", "127.0.0.1:3000".to_string())?,
            db_path: try_load(&lookup, "SNACKTACULAR_DB", "snacktacular.db".to_string())?,
            jpeg_quality,
            max_upload_bytes,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
