use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kube_job_metrics::{
    config::Config,
    metrics::gather_metrics,
    parse_jobs,
    sinks::StdoutSink,
    DefaultLabelClassifier, JobPipeline,
};

/// Convert Kubernetes Job manifests into metric datapoints and dimension records
#[derive(Parser, Debug)]
#[command(name = "kube-job-metrics", version)]
struct Args {
    /// Job manifest files (YAML or JSON). Reads stdin when empty or "-"
    files: Vec<PathBuf>,

    /// Output format: json or text
    #[arg(long)]
    format: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the collector's own counters to stderr on exit
    #[arg(long)]
    self_metrics: bool,
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for records
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Load configuration, command line flags take precedence
    let mut config = Config::load()?;
    if let Some(format) = args.format {
        config.output.format = format;
    }
    config.output.pretty |= args.pretty;
    config.self_metrics |= args.self_metrics;

    let sink = Arc::new(StdoutSink::new(None, &config.output)?);
    let pipeline = JobPipeline::new(Arc::new(DefaultLabelClassifier), sink);

    let inputs = if args.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.files
    };

    let mut failures = 0usize;
    let mut processed = 0usize;
    for path in &inputs {
        let content = match read_input(path) {
            Ok(content) => content,
            Err(e) => {
                error!("{:#}", e);
                failures += 1;
                continue;
            }
        };

        for (index, job) in parse_jobs(&content).into_iter().enumerate() {
            let result = match job {
                Ok(job) => pipeline.process(&job).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => processed += 1,
                Err(e) => {
                    error!("{} document {}: {}", path.display(), index, e);
                    failures += 1;
                }
            }
        }
    }

    info!("Processed {} job(s), {} failure(s)", processed, failures);

    if config.self_metrics {
        eprint!("{}", gather_metrics()?);
    }

    if failures > 0 {
        anyhow::bail!("{} input(s) could not be converted", failures);
    }

    Ok(())
}
