//! Job conversion
//!
//! Turns a `batch/v1` Job snapshot into the datapoints and dimension record
//! consumed by the ingestion pipeline. Metric names, dimension keys and
//! property keys here are relied upon by dashboards and alert rules and must
//! not change.

use chrono::SecondsFormat;
use k8s_openapi::api::batch::v1::Job;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    datapoint::{Datapoint, Dimensions, MetricType},
    dimension::Dimension,
    labels::{lowercase_first_char, LabelClassifier},
    Error, Result,
};

pub const JOB_COMPLETIONS: &str = "kubernetes.job.completions";
pub const JOB_PARALLELISM: &str = "kubernetes.job.parallelism";
pub const JOB_ACTIVE: &str = "kubernetes.job.active";
pub const JOB_FAILED: &str = "kubernetes.job.failed";
pub const JOB_SUCCEEDED: &str = "kubernetes.job.succeeded";

/// Dimension key identifying a Job, used for both datapoints and the
/// dimension record.
pub const UID_DIMENSION: &str = "kubernetes_uid";

/// Formatted creation time of a Job without a creation timestamp.
const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// Produces the five Job datapoints, in a fixed order, sharing one
/// dimension map.
///
/// Fails with [`Error::InvalidInput`] when `spec.completions` or
/// `spec.parallelism` is unset; nothing is emitted in that case.
pub fn datapoints_for_job(job: &Job) -> Result<Vec<Datapoint>> {
    let spec = job
        .spec
        .as_ref()
        .ok_or_else(|| invalid_input(job, "spec"))?;
    let completions = spec
        .completions
        .ok_or_else(|| invalid_input(job, "spec.completions"))?;
    let parallelism = spec
        .parallelism
        .ok_or_else(|| invalid_input(job, "spec.parallelism"))?;

    let status = job.status.as_ref();
    let active = status.and_then(|s| s.active).unwrap_or(0);
    let failed = status.and_then(|s| s.failed).unwrap_or(0);
    let succeeded = status.and_then(|s| s.succeeded).unwrap_or(0);

    let dimensions = job_dimensions(job);

    Ok(vec![
        Datapoint::new(JOB_COMPLETIONS, dimensions.clone(), i64::from(completions), MetricType::Gauge),
        Datapoint::new(JOB_PARALLELISM, dimensions.clone(), i64::from(parallelism), MetricType::Gauge),
        Datapoint::new(JOB_ACTIVE, dimensions.clone(), i64::from(active), MetricType::Gauge),
        Datapoint::new(JOB_FAILED, dimensions.clone(), i64::from(failed), MetricType::Counter),
        Datapoint::new(JOB_SUCCEEDED, dimensions, i64::from(succeeded), MetricType::Counter),
    ])
}

/// Builds the `kubernetes_uid` dimension record for a Job, enriched with
/// workload and owner properties.
pub fn dimension_for_job(job: &Job, classifier: &dyn LabelClassifier) -> Dimension {
    let meta = &job.metadata;
    let labels = meta.labels.clone().unwrap_or_default();
    let classified = classifier.classify(&labels);
    let mut props = classified.properties;

    props.insert("kubernetes_workload".to_string(), "Job".to_string());
    props.insert("kubernetes_workload_name".to_string(), name(job).to_string());
    props.insert("job_creation_timestamp".to_string(), creation_timestamp(job));

    for owner in meta.owner_references.iter().flatten() {
        let key = lowercase_first_char(&owner.kind);
        props.insert(key.clone(), owner.name.clone());
        props.insert(format!("{}_uid", key), owner.uid.clone());
    }

    Dimension {
        name: UID_DIMENSION.to_string(),
        value: uid(job).to_string(),
        properties: props,
        tags: classified.tags,
    }
}

fn job_dimensions(job: &Job) -> Dimensions {
    let mut dims = BTreeMap::new();
    dims.insert("metric_source".to_string(), "kubernetes".to_string());
    dims.insert("kubernetes_namespace".to_string(), namespace(job).to_string());
    dims.insert(UID_DIMENSION.to_string(), uid(job).to_string());
    dims.insert("kubernetes_name".to_string(), name(job).to_string());
    Arc::new(dims)
}

fn name(job: &Job) -> &str {
    job.metadata.name.as_deref().unwrap_or_default()
}

fn namespace(job: &Job) -> &str {
    job.metadata.namespace.as_deref().unwrap_or_default()
}

fn uid(job: &Job) -> &str {
    job.metadata.uid.as_deref().unwrap_or_default()
}

fn creation_timestamp(job: &Job) -> String {
    job.metadata
        .creation_timestamp
        .as_ref()
        .map(|t| t.0.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| ZERO_TIMESTAMP.to_string())
}

fn invalid_input(job: &Job, field: &str) -> Error {
    Error::InvalidInput(format!(
        "job {}/{} has no {}",
        namespace(job),
        name(job),
        field
    ))
}
