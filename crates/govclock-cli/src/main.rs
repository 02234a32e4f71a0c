//! govclock
//!
//! Inspect referenda timing for a configured network: block durations,
//! threshold curves, period progress, vote-lock expiry and the treasury
//! spend countdown.
//!
//! Usage:
//!   govclock blocks   <n>                                  [--network <name>]
//!   govclock curve    --track <id|name> [--at <fraction>] [--points <k>]
//!   govclock progress --track <id|name> --period <kind> [--end-at <rfc3339>]
//!   govclock unlock   --current-block <b> --vote-end-block <b> --conviction <0-6>
//!   govclock spend    --current-block <b>
//!
//! Global flags: --config <path> (network registry JSON), --json.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use govclock_blocktime::{format_duration, BlockTimeConverter, FormattedDuration};
use govclock_core::types::PeriodKind;
use govclock_core::{NetworkConfig, NetworkRegistry};
use govclock_curve::{evaluate, CurveOutcome};
use govclock_referenda::{
    estimate_unlock, spend_period_status, Conviction, PeriodProgressCalculator,
    ThresholdSeriesBuilder,
};

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "govclock",
    version,
    about = "govclock — referenda curves and block-time conversions"
)]
struct Args {
    /// Network registry JSON. Defaults to the bundled Polkadot/Kusama registry.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Network to use.
    #[arg(long, global = true, default_value = "polkadot")]
    network: String,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a block count to days, hours and minutes.
    Blocks {
        blocks: u64,
    },

    /// Evaluate a track's approval and support curves.
    Curve {
        /// Track id or name.
        #[arg(long)]
        track: String,
        /// Elapsed fraction of the decision period (0.0–1.0). Prints a table when omitted.
        #[arg(long)]
        at: Option<f64>,
        /// Table resolution when --at is omitted.
        #[arg(long, default_value_t = 10)]
        points: usize,
    },

    /// Progress through a referendum period.
    Progress {
        #[arg(long)]
        track: String,
        #[arg(long, value_enum)]
        period: PeriodArg,
        /// End of the period (RFC 3339). Progress is zero when unknown.
        #[arg(long)]
        end_at: Option<DateTime<Utc>>,
    },

    /// Estimate when a conviction vote lock expires.
    Unlock {
        #[arg(long)]
        current_block: u64,
        /// Block at which the referendum the vote was cast on ended.
        #[arg(long)]
        vote_end_block: u64,
        /// Conviction level, 0–6.
        #[arg(long)]
        conviction: u8,
    },

    /// Treasury spend-period countdown.
    Spend {
        #[arg(long)]
        current_block: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PeriodArg {
    Prepare,
    Decision,
    Confirm,
}

impl From<PeriodArg> for PeriodKind {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Prepare => PeriodKind::Prepare,
            PeriodArg::Decision => PeriodKind::Decision,
            PeriodArg::Confirm => PeriodKind::Confirm,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurvePoint {
    elapsed_fraction: f64,
    approval: CurveOutcome,
    support: CurveOutcome,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,govclock=info")),
        )
        .init();

    let args = Args::parse();

    let registry = match &args.config {
        Some(path) => NetworkRegistry::load(path)
            .with_context(|| format!("loading network registry {}", path.display()))?,
        None => NetworkRegistry::builtin().context("loading bundled network registry")?,
    };
    let network = registry.network(&args.network)?;
    let converter = BlockTimeConverter::new(&network.time_config())?;
    debug!(network = %network.name, block_time_ms = network.block_time_ms, "network resolved");

    match args.command {
        Command::Blocks { blocks } => cmd_blocks(&converter, blocks, args.json),
        Command::Curve { track, at, points } => {
            cmd_curve(network, &converter, &track, at, points, args.json)
        }
        Command::Progress {
            track,
            period,
            end_at,
        } => cmd_progress(network, &converter, &track, period.into(), end_at, args.json),
        Command::Unlock {
            current_block,
            vote_end_block,
            conviction,
        } => cmd_unlock(
            network,
            &converter,
            current_block,
            vote_end_block,
            conviction,
            args.json,
        ),
        Command::Spend { current_block } => cmd_spend(network, &converter, current_block, args.json),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_blocks(converter: &BlockTimeConverter, blocks: u64, json: bool) -> anyhow::Result<()> {
    let raw = converter.blocks_to_duration(blocks);
    let result = FormattedDuration {
        formatted: format_duration(&raw),
        raw,
    };
    emit(json, &result, || {
        format!(
            "{} blocks on {} ≈ {} ({} s)",
            blocks,
            converter.network(),
            result.formatted,
            result.raw.total_seconds
        )
    })
}

fn cmd_curve(
    network: &NetworkConfig,
    converter: &BlockTimeConverter,
    track: &str,
    at: Option<f64>,
    points: usize,
    json: bool,
) -> anyhow::Result<()> {
    let track = network.track(track)?;
    info!(track = %track.name, "evaluating curves");

    if let Some(x) = at {
        let point = CurvePoint {
            elapsed_fraction: x,
            approval: evaluate(&track.periods.min_approval, x),
            support: evaluate(&track.periods.min_support, x),
        };
        return emit(json, &point, || {
            format!(
                "{} at {:.1}% of decision: approval {} / support {}",
                track.name,
                x * 100.0,
                describe(&point.approval),
                describe(&point.support)
            )
        });
    }

    let series = ThresholdSeriesBuilder::new(&track.periods, converter).curve_series(points);
    emit(json, &series, || {
        let mut out = format!("{:>10}  {:>9}  {:>9}\n", "hour", "approval", "support");
        for p in &series {
            out.push_str(&format!(
                "{:>10.1}  {:>8.2}%  {:>8.2}%\n",
                p.hour_offset, p.approval, p.support
            ));
        }
        out.trim_end().to_string()
    })
}

fn cmd_progress(
    network: &NetworkConfig,
    converter: &BlockTimeConverter,
    track: &str,
    period: PeriodKind,
    end_at: Option<DateTime<Utc>>,
    json: bool,
) -> anyhow::Result<()> {
    let track = network.track(track)?;
    let calc = PeriodProgressCalculator::new(converter.clone());
    let progress = calc.progress(period, &track.periods, end_at, Utc::now());
    emit(json, &progress, || {
        format!(
            "{} {} period: {} ({:.1}%)",
            track.name,
            period,
            progress.label(),
            progress.percent
        )
    })
}

fn cmd_unlock(
    network: &NetworkConfig,
    converter: &BlockTimeConverter,
    current_block: u64,
    vote_end_block: u64,
    conviction: u8,
    json: bool,
) -> anyhow::Result<()> {
    let conviction = Conviction::from_level(conviction)?;
    let lock = estimate_unlock(
        converter,
        current_block,
        vote_end_block,
        conviction,
        network.vote_locking_period()?,
        Utc::now(),
    )?;
    emit(json, &lock, || match &lock.remaining {
        Some(remaining) => format!(
            "{} lock expires at block {} ({}, in {})",
            lock.conviction,
            lock.unlock_block,
            lock.unlock_at.to_rfc3339(),
            format_duration(remaining)
        ),
        None => format!(
            "{} lock expired at block {} ({})",
            lock.conviction,
            lock.unlock_block,
            lock.unlock_at.to_rfc3339()
        ),
    })
}

fn cmd_spend(
    network: &NetworkConfig,
    converter: &BlockTimeConverter,
    current_block: u64,
    json: bool,
) -> anyhow::Result<()> {
    let status = spend_period_status(converter, current_block, network.spend_period()?, Utc::now())?;
    emit(json, &status, || {
        format!(
            "spend period {:.1}% elapsed, next payout in {} ({})",
            status.percent,
            format_duration(&status.remaining),
            status.next_payout_at.to_rfc3339()
        )
    })
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn emit<T, F>(json: bool, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", human());
    }
    Ok(())
}

fn describe(outcome: &CurveOutcome) -> String {
    match outcome {
        CurveOutcome::Exact(v) => format!("{:.2}%", v * 100.0),
        CurveOutcome::Degraded { fallback, reason } => {
            format!("{:.2}% (degraded: {})", fallback * 100.0, reason)
        }
    }
}
