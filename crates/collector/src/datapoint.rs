use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Dimension map attached to a datapoint. Shared read-only between all
/// datapoints produced for the same resource.
pub type Dimensions = Arc<BTreeMap<String, String>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Gauge,
    Counter,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricType::Gauge => write!(f, "gauge"),
            MetricType::Counter => write!(f, "counter"),
        }
    }
}

/// A single numeric sample ready for ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Datapoint {
    pub metric: String,
    pub dimensions: Dimensions,
    pub value: i64,
    #[serde(rename = "metricType")]
    pub metric_type: MetricType,
    pub timestamp: DateTime<Utc>,
}

impl Datapoint {
    /// Creates a datapoint stamped with the current wall-clock time.
    pub fn new(
        metric: impl Into<String>,
        dimensions: Dimensions,
        value: i64,
        metric_type: MetricType,
    ) -> Self {
        Self {
            metric: metric.into(),
            dimensions,
            value,
            metric_type,
            timestamp: Utc::now(),
        }
    }
}
