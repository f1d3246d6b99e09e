use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// "json" or "text"
    pub format: String,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub output: OutputConfig,
    /// Print the collector's own Prometheus counters on exit
    #[serde(default)]
    pub self_metrics: bool,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            output: OutputConfig {
                format: lookup("OUTPUT_FORMAT")
                    .unwrap_or_else(|| "json".to_string())
                    .to_lowercase(),
                pretty: parse_bool("OUTPUT_PRETTY", lookup("OUTPUT_PRETTY"))?,
            },
            self_metrics: parse_bool("SELF_METRICS", lookup("SELF_METRICS"))?,
        };

        if config.output.format != "json" && config.output.format != "text" {
            return Err(crate::Error::Config(format!(
                "OUTPUT_FORMAT must be 'json' or 'text', got '{}'",
                config.output.format
            )));
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: Option<String>) -> crate::Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(crate::Error::Config(format!(
            "{} must be a boolean, got '{}'",
            key, v
        ))),
    }
}
