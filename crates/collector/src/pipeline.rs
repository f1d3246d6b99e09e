use std::sync::Arc;

use k8s_openapi::api::batch::v1::Job;
use tracing::{debug, warn};

use crate::{
    labels::LabelClassifier,
    metrics::{self, jobs::{datapoints_for_job, dimension_for_job}},
    sinks::Sink,
    Error, Result,
};

/// Converts Job snapshots and forwards the results to a sink.
pub struct JobPipeline {
    classifier: Arc<dyn LabelClassifier>,
    sink: Arc<dyn Sink>,
}

impl JobPipeline {
    pub fn new(classifier: Arc<dyn LabelClassifier>, sink: Arc<dyn Sink>) -> Self {
        metrics::register_metrics();
        Self { classifier, sink }
    }

    /// Runs both extractors for one Job. A Job rejected as invalid input
    /// sends nothing to the sink.
    pub async fn process(&self, job: &Job) -> Result<()> {
        let namespace = job.metadata.namespace.as_deref().unwrap_or_default();
        let name = job.metadata.name.as_deref().unwrap_or_default();

        let datapoints = match datapoints_for_job(job) {
            Ok(datapoints) => datapoints,
            Err(e @ Error::InvalidInput(_)) => {
                warn!("Rejecting Job {}/{}: {}", namespace, name, e);
                metrics::JOBS_REJECTED_TOTAL.inc();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let dimension = dimension_for_job(job, self.classifier.as_ref());

        debug!(
            "Sending {} datapoints and dimension {}={} for Job {}/{} to sink '{}'",
            datapoints.len(),
            dimension.name,
            dimension.value,
            namespace,
            name,
            self.sink.name()
        );

        self.sink.send_datapoints(&datapoints).await?;
        metrics::DATAPOINTS_EMITTED_TOTAL.inc_by(datapoints.len() as u64);
        self.sink.send_dimension(&dimension).await?;
        metrics::JOBS_PROCESSED_TOTAL.inc();

        Ok(())
    }
}
