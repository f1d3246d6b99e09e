pub mod config;
pub mod datapoint;
pub mod dimension;
pub mod labels;
pub mod manifest;
pub mod metrics;
pub mod pipeline;
pub mod sinks;

use thiserror::Error;

pub use datapoint::{Datapoint, MetricType};
pub use dimension::Dimension;
pub use labels::{ClassifiedLabels, DefaultLabelClassifier, LabelClassifier};
pub use manifest::parse_jobs;
pub use metrics::jobs::{datapoints_for_job, dimension_for_job};
pub use pipeline::JobPipeline;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
