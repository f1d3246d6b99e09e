pub mod jobs;

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

lazy_static! {
    pub static ref JOBS_PROCESSED_TOTAL: IntCounter = IntCounter::new(
        "kube_job_metrics_jobs_processed_total",
        "Total number of jobs converted and sent to a sink."
    )
    .expect("valid metric definition");
    pub static ref JOBS_REJECTED_TOTAL: IntCounter = IntCounter::new(
        "kube_job_metrics_jobs_rejected_total",
        "Total number of jobs rejected as invalid input."
    )
    .expect("valid metric definition");
    pub static ref DATAPOINTS_EMITTED_TOTAL: IntCounter = IntCounter::new(
        "kube_job_metrics_datapoints_emitted_total",
        "Total number of datapoints sent to a sink."
    )
    .expect("valid metric definition");
    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        for counter in [
            &*JOBS_PROCESSED_TOTAL,
            &*JOBS_REJECTED_TOTAL,
            &*DATAPOINTS_EMITTED_TOTAL,
        ] {
            registry
                .register(Box::new(counter.clone()))
                .expect("metric registered once");
        }
        registry
    };
}

/// Forces registration of the self-observability counters.
pub fn register_metrics() {
    lazy_static::initialize(&REGISTRY);
}

/// Renders all registered counters in the Prometheus text format.
pub fn gather_metrics() -> crate::Result<String> {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
