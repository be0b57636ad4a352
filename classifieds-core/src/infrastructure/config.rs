use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATA_FILE: &str = "classifieds.json";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "compact" | "text" => Ok(LogFormat::Compact),
            other => Err(anyhow::anyhow!("unknown log format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Reads `CLASSIFIEDS_DATA`, `CLASSIFIEDS_LOG` and `CLASSIFIEDS_LOG_FORMAT`,
    /// after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_file = match lookup("CLASSIFIEDS_DATA") {
            Some(path) if path.trim().is_empty() => {
                return Err(anyhow::anyhow!("CLASSIFIEDS_DATA must not be empty"));
            }
            Some(path) => PathBuf::from(path.trim()),
            None => PathBuf::from(DEFAULT_DATA_FILE),
        };
        let log_filter = lookup("CLASSIFIEDS_LOG")
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        let log_format = match lookup("CLASSIFIEDS_LOG_FORMAT") {
            Some(format) if !format.trim().is_empty() => format.parse()?,
            _ => LogFormat::default(),
        };

        Ok(Self {
            data_file,
            log_filter,
            log_format,
        })
    }
}
