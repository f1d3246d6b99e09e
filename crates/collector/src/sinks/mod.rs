pub mod stdout;

use async_trait::async_trait;

use crate::{Datapoint, Dimension, Result};

pub use stdout::StdoutSink;

/// Destination for converted Job records.
#[async_trait]
pub trait Sink: Send + Sync {
    fn name(&self) -> &str;
    async fn send_datapoints(&self, datapoints: &[Datapoint]) -> Result<()>;
    async fn send_dimension(&self, dimension: &Dimension) -> Result<()>;
}
