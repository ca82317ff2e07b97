use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use event_pipeline_rs::config::{GeneratorConfig, PipelineConfig};
use event_pipeline_rs::generator::{Generate, run_generator};
use event_pipeline_rs::transport::{StreamConsumer, memory_stream};
use event_pipeline_rs::{
    Article, Decode, LogFormat, Order, Pipeline, Record, setup_logging, split_messages,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "event-pipeline",
    about = "Generates order and news events and summarizes them batch by batch"
)]
struct Cli {
    /// Log output format: pretty or json
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Runs a generator and a pipeline connected by an in-memory stream
    Run(RunArgs),
    /// Processes a file of newline-delimited JSON messages as a single batch
    Process(ProcessArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Order,
    Article,
}

#[derive(Args)]
struct PipelineArgs {
    /// Number of metrics snapshots to keep
    #[arg(long, env = "PIPELINE_LEDGER_CAPACITY", default_value_t = event_pipeline_rs::config::DEFAULT_LEDGER_CAPACITY)]
    ledger_capacity: usize,

    /// Number of records whose last known state is kept
    #[arg(long, env = "PIPELINE_STORE_CAPACITY", default_value_t = event_pipeline_rs::config::DEFAULT_STORE_CAPACITY)]
    store_capacity: usize,

    /// Upper bound on the processing of a single record, in milliseconds
    #[arg(long, env = "PIPELINE_RECORD_TIMEOUT_MS", default_value_t = 5_000)]
    record_timeout_ms: u64,
}

impl PipelineArgs {
    fn config(&self) -> Result<PipelineConfig> {
        let config = PipelineConfig {
            ledger_capacity: self.ledger_capacity,
            store_capacity: self.store_capacity,
            record_timeout: Duration::from_millis(self.record_timeout_ms),
        };
        config.validate().map_err(|msg| anyhow!(msg))?;
        Ok(config)
    }
}

#[derive(Args)]
struct RunArgs {
    #[arg(long, value_enum)]
    kind: Kind,

    /// Stream topic, defaults to `orders` or `news`
    #[arg(long, env = "PIPELINE_TOPIC")]
    topic: Option<String>,

    /// Seconds between two generator firings
    #[arg(long, env = "PIPELINE_INTERVAL_SECS", default_value_t = 10)]
    interval_secs: u64,

    /// Fewest records per firing, defaults to the kind's own
    #[arg(long)]
    min_records: Option<usize>,

    /// Most records per firing, defaults to the kind's own
    #[arg(long)]
    max_records: Option<usize>,

    /// Most messages handed to the pipeline at once
    #[arg(long, env = "PIPELINE_MAX_BATCH", default_value_t = 64)]
    max_batch: usize,

    /// Stops after this many firings instead of running until Ctrl-C
    #[arg(long)]
    firings: Option<u64>,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Args)]
struct ProcessArgs {
    #[arg(long, value_enum)]
    kind: Kind,

    /// Input file, `-` for stdin
    input: PathBuf,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_format)?;

    match cli.command {
        Command::Run(args) => match args.kind {
            Kind::Order => run::<Order>(args, "orders").await,
            Kind::Article => run::<Article>(args, "news").await,
        },
        Command::Process(args) => match args.kind {
            Kind::Order => process::<Order>(args).await,
            Kind::Article => process::<Article>(args).await,
        },
    }
}

async fn run<R: Generate + Decode>(args: RunArgs, default_topic: &str) -> Result<()> {
    let pipeline = Pipeline::<R>::new(args.pipeline.config()?);

    let defaults = GeneratorConfig::for_kind::<R>();
    let generator_config = GeneratorConfig {
        interval: Duration::from_secs(args.interval_secs),
        min_records: args.min_records.unwrap_or(defaults.min_records),
        max_records: args.max_records.unwrap_or(defaults.max_records),
    };
    generator_config.validate().map_err(|msg| anyhow!(msg))?;

    let topic = args.topic.unwrap_or_else(|| default_topic.to_string());
    let capacity = generator_config.max_records.max(args.max_batch) * 4;
    let (producer, mut consumer) = memory_stream(topic, capacity, args.max_batch);
    info!(topic = producer.topic(), kind = R::KIND, "starting generator and pipeline");

    let firings = args.firings;
    let generator = tokio::spawn(async move {
        // the producer is dropped with this task, which closes the stream
        run_generator::<R>(&generator_config, &producer, firings).await
    });

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for Ctrl-C")?;
            info!("received Ctrl-C, shutting down");
            generator.abort();
        }
        batches = consume(&pipeline, &mut consumer) => {
            info!(batches, "stream closed");
        }
    }

    match generator.await {
        Ok(result) => {
            let fired = result?;
            info!(fired, "generator finished");
        }
        Err(err) if err.is_cancelled() => {}
        Err(err) => return Err(err.into()),
    }

    info!(
        processed = pipeline.ledger().len(),
        stored = pipeline.store().len(),
        "pipeline stopped"
    );
    Ok(())
}

async fn consume<R: Generate + Decode>(pipeline: &Pipeline<R>, consumer: &mut StreamConsumer) -> u64 {
    let mut batches = 0;
    while let Some(batch) = consumer.next_batch().await {
        let bodies: Vec<&str> = batch.iter().map(|message| message.body.as_str()).collect();
        let report = pipeline.process_batch(&bodies).await;
        if !report.is_clean() {
            warn!("batch with failures: {report}");
        }
        batches += 1;
    }
    batches
}

async fn process<R: Record + Decode>(args: ProcessArgs) -> Result<()> {
    let pipeline = Pipeline::<R>::new(args.pipeline.config()?);
    let input = read_input(&args.input)?;

    let messages = split_messages(&input);
    let report = pipeline.process_batch(&messages).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut input = Vec::new();
        std::io::stdin()
            .read_to_end(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
