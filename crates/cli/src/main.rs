#![deny(warnings)]

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use ringtrail_core::config::{
    resolve_capacity, DemoConfig, Env, OutputFormat, RandomFill, StdEnv, DEFAULT_OUTPUT_FORMAT,
};
use ringtrail_core::RingBuffer;
use std::fmt::Write as _;
use tracing_subscriber::EnvFilter;

/// Upper bound (exclusive) for `--random` values.
const RANDOM_VALUE_UPPER: i64 = 100;

#[derive(Parser, Debug)]
#[command(name = "ringtrail")]
#[command(about = "Keep the most recent values in a fixed-capacity ring buffer")]
struct Args {
    /// Values saved in order, oldest first
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,

    /// Buffer capacity (falls back to RINGTRAIL_CAPACITY, then 8)
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of random values saved after the explicit ones
    #[arg(long, default_value_t = 0)]
    random: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = DEFAULT_OUTPUT_FORMAT)]
    format: String,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let cfg = build_config(args, &env)?;

    tracing::info!(
        capacity = cfg.capacity.get(),
        format = %cfg.format,
        "config loaded"
    );

    let buffer = fill(&cfg)?;
    println!("{}", render(&buffer, cfg.format)?);

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: Args, env: &impl Env) -> anyhow::Result<DemoConfig> {
    let capacity = resolve_capacity(args.capacity, env)?;
    let format = args.format.parse::<OutputFormat>()?;

    Ok(DemoConfig {
        capacity,
        format,
        values: args.values,
        random: RandomFill {
            count: args.random,
            seed: args.seed,
        },
    })
}

fn random_values(fill: RandomFill) -> Vec<i64> {
    let mut rng = match fill.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    (0..fill.count)
        .map(|_| rng.random_range(0..RANDOM_VALUE_UPPER))
        .collect()
}

fn fill(cfg: &DemoConfig) -> anyhow::Result<RingBuffer<i64>> {
    let mut buffer =
        RingBuffer::new(cfg.capacity.get()).context("failed to allocate ring buffer")?;

    let mut saved = 0usize;
    let mut evictions = 0usize;
    for value in cfg
        .values
        .iter()
        .copied()
        .chain(random_values(cfg.random))
    {
        saved += 1;
        if let Some(evicted) = buffer.save(value) {
            evictions += 1;
            tracing::debug!(evicted, "evicted oldest value");
        }
    }

    tracing::info!(saved, retained = buffer.len(), evictions, "buffer filled");
    Ok(buffer)
}

fn render(buffer: &RingBuffer<i64>, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => render_text(buffer),
        OutputFormat::Json => buffer
            .snapshot()
            .to_json()
            .context("failed to render snapshot"),
    }
}

fn render_text(buffer: &RingBuffer<i64>) -> anyhow::Result<String> {
    let mut out = String::new();
    let mut cursor = buffer.cursor();
    let mut index = 0usize;
    while cursor.advance(buffer) {
        let value = cursor.current(buffer)?;
        writeln!(out, "{index}: {value}")?;
        index += 1;
    }
    write!(
        out,
        "{} of {} slots used",
        buffer.len(),
        buffer.capacity()
    )?;
    Ok(out)
}
