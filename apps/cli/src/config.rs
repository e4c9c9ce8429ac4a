use chrono::NaiveDate;
use chrono_tz::Tz;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub owner_id: String,
    pub as_of: Option<NaiveDate>,
    pub timezone: Option<Tz>,
    pub large_flow_threshold: Option<f64>,
    pub import_path: Option<PathBuf>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = get("FS_DB_PATH").unwrap_or_else(|| "./db/app.db".into());
        let owner_id = get("FS_OWNER_ID").ok_or(ConfigError::Missing("FS_OWNER_ID"))?;
        let as_of = get("FS_AS_OF")
            .map(|v| {
                NaiveDate::parse_from_str(&v, "%Y-%m-%d").map_err(|_| ConfigError::Invalid {
                    key: "FS_AS_OF",
                    value: v,
                })
            })
            .transpose()?;
        let timezone = get("FS_TIMEZONE")
            .map(|v| {
                v.parse::<Tz>().map_err(|_| ConfigError::Invalid {
                    key: "FS_TIMEZONE",
                    value: v,
                })
            })
            .transpose()?;
        let large_flow_threshold = get("FS_LARGE_FLOW_THRESHOLD")
            .map(|v| match v.parse::<f64>() {
                Ok(t) if t.is_finite() && t > 0.0 => Ok(t),
                _ => Err(ConfigError::Invalid {
                    key: "FS_LARGE_FLOW_THRESHOLD",
                    value: v,
                }),
            })
            .transpose()?;
        let import_path = get("FS_IMPORT_PATH").map(PathBuf::from);
        let log_format = get("FS_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Ok(Self {
            db_path,
            owner_id,
            as_of,
            timezone,
            large_flow_threshold,
            import_path,
            log_format,
        })
    }
}
