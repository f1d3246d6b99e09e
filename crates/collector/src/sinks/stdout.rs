use async_trait::async_trait;
use std::collections::BTreeMap;

use super::Sink;
use crate::{config::OutputConfig, Datapoint, Dimension, Error, Result};

#[derive(Debug)]
pub struct StdoutSink {
    name: String,
    format: String, // "json" or "text"
    pretty: bool,   // For JSON output
}

impl StdoutSink {
    pub fn new(name_override: Option<String>, config: &OutputConfig) -> Result<Self> {
        let name = name_override.unwrap_or_else(|| "stdout".to_string());
        let format = config.format.to_lowercase();

        if format != "json" && format != "text" {
            return Err(Error::Config(format!(
                "Invalid format for stdout sink: {}. Must be 'json' or 'text'",
                config.format
            )));
        }

        Ok(StdoutSink {
            name,
            format,
            pretty: config.pretty,
        })
    }

    /// Renders one output line per datapoint.
    pub fn render_datapoints(&self, datapoints: &[Datapoint]) -> Result<Vec<String>> {
        datapoints
            .iter()
            .map(|dp| match self.format.as_str() {
                "json" => self.to_json(dp),
                _ => Ok(format!(
                    "{}{{{}}} {} {} {}",
                    dp.metric,
                    join_pairs(&dp.dimensions),
                    dp.value,
                    dp.metric_type,
                    dp.timestamp.to_rfc3339()
                )),
            })
            .collect()
    }

    pub fn render_dimension(&self, dimension: &Dimension) -> Result<String> {
        match self.format.as_str() {
            "json" => self.to_json(dimension),
            _ => Ok(format!(
                "dimension {}={} properties={{{}}} tags=[{}]",
                dimension.name,
                dimension.value,
                join_pairs(&dimension.properties),
                dimension.tags.iter().cloned().collect::<Vec<_>>().join(",")
            )),
        }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}

fn join_pairs(map: &BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl Sink for StdoutSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_datapoints(&self, datapoints: &[Datapoint]) -> Result<()> {
        for line in self.render_datapoints(datapoints)? {
            println!("{}", line);
        }
        Ok(())
    }

    async fn send_dimension(&self, dimension: &Dimension) -> Result<()> {
        println!("{}", self.render_dimension(dimension)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datapoint::MetricType;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn create_test_config(format: &str, pretty: bool) -> OutputConfig {
        OutputConfig {
            format: format.to_string(),
            pretty,
        }
    }

    fn test_datapoint() -> Datapoint {
        let mut dims = BTreeMap::new();
        dims.insert("kubernetes_name".to_string(), "job1".to_string());
        dims.insert("kubernetes_namespace".to_string(), "ns1".to_string());
        Datapoint {
            metric: "kubernetes.job.succeeded".to_string(),
            dimensions: Arc::new(dims),
            value: 2,
            metric_type: MetricType::Counter,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn test_dimension() -> Dimension {
        let mut properties = BTreeMap::new();
        properties.insert("kubernetes_workload".to_string(), "Job".to_string());
        properties.insert("cronJob".to_string(), "cj1".to_string());
        Dimension {
            name: "kubernetes_uid".to_string(),
            value: "abc-123".to_string(),
            properties,
            tags: BTreeSet::from(["canary".to_string(), "nightly".to_string()]),
        }
    }

    #[test]
    fn test_stdout_sink_invalid_format() {
        let config = create_test_config("xml", false);
        assert!(matches!(StdoutSink::new(None, &config), Err(Error::Config(_))));
    }

    #[test]
    fn test_stdout_sink_format_is_case_insensitive() {
        let sink = StdoutSink::new(None, &create_test_config("TEXT", false)).unwrap();
        assert_eq!(sink.format, "text");
        assert_eq!(sink.name(), "stdout");
    }

    #[test]
    fn test_render_datapoints_text() {
        let sink = StdoutSink::new(Some("test_sink".to_string()), &create_test_config("text", false)).unwrap();
        let lines = sink.render_datapoints(&[test_datapoint()]).unwrap();

        assert_eq!(
            lines,
            vec![
                "kubernetes.job.succeeded{kubernetes_name=\"job1\",kubernetes_namespace=\"ns1\"} 2 counter 2024-01-02T03:04:05+00:00"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_render_datapoints_json() {
        let sink = StdoutSink::new(None, &create_test_config("json", false)).unwrap();
        let lines = sink.render_datapoints(&[test_datapoint(), test_datapoint()]).unwrap();

        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["metric"], "kubernetes.job.succeeded");
        assert_eq!(parsed["metricType"], "counter");
        assert_eq!(parsed["dimensions"]["kubernetes_namespace"], "ns1");
    }

    #[test]
    fn test_render_dimension_text() {
        let sink = StdoutSink::new(None, &create_test_config("text", false)).unwrap();
        let line = sink.render_dimension(&test_dimension()).unwrap();

        assert_eq!(
            line,
            "dimension kubernetes_uid=abc-123 properties={cronJob=\"cj1\",kubernetes_workload=\"Job\"} tags=[canary,nightly]"
        );
    }

    #[test]
    fn test_render_dimension_pretty_json() {
        let sink = StdoutSink::new(None, &create_test_config("json", true)).unwrap();
        let rendered = sink.render_dimension(&test_dimension()).unwrap();

        assert!(rendered.contains('\n'));
        let parsed: Dimension = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, test_dimension());
    }

    #[tokio::test]
    async fn test_stdout_sink_send() {
        let sink = StdoutSink::new(None, &create_test_config("json", false)).unwrap();
        assert!(sink.send_datapoints(&[test_datapoint()]).await.is_ok());
        assert!(sink.send_dimension(&test_dimension()).await.is_ok());
    }
}
