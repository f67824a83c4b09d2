use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wraith::config::{Config, OutputFormat};
use wraith::services::{AnalysisPipeline, AnalysisRunner, JsonSink, ReportSink, TextSink};
use wraith::sources::{JsonFileSource, MarketDataSource, SyntheticSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wraith=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let pipeline = AnalysisPipeline::new(&config);
    let sink: Box<dyn ReportSink> = match config.output_format {
        OutputFormat::Text => Box::new(TextSink::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonSink::new(std::io::stdout())),
    };
    let period = Duration::from_secs(config.refresh_interval_secs);

    match config.snapshot_path.clone() {
        Some(path) => {
            info!("Analysing snapshots from {}", path.display());
            run(pipeline, JsonFileSource::new(path), sink, period).await
        }
        None => {
            info!("No SNAPSHOT_PATH set, using synthetic market data");
            let source = SyntheticSource::new(config.synthetic_seed, 50_000.0);
            run(pipeline, source, sink, period).await
        }
    }
}

async fn run<S, K>(
    pipeline: AnalysisPipeline,
    source: S,
    sink: K,
    period: Duration,
) -> anyhow::Result<()>
where
    S: MarketDataSource,
    K: ReportSink,
{
    info!(
        "Starting analysis with {} every {}s",
        source.name(),
        period.as_secs()
    );
    let mut runner = AnalysisRunner::new(pipeline, source, sink);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };
    let cycles = runner.run(period, shutdown).await;
    info!("Completed {} analysis cycles", cycles);
    Ok(())
}
