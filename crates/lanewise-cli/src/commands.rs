//! Subcommand handlers.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use lanewise_core::simd::Lane;
use lanewise_core::{best_target, supported_targets, LanewiseConfig, Order, SortKey, Sorter, Target};
use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

// =============================================================================
// targets
// =============================================================================

/// One row of the `targets` listing.
#[derive(Debug, Serialize)]
pub struct TargetReport {
    pub target: Target,
    pub vector_bytes: Option<usize>,
    pub compiled: bool,
    pub detected: bool,
    pub enabled: bool,
}

/// Every target, best first, with its build and runtime status.
pub fn target_reports() -> Vec<TargetReport> {
    let supported = supported_targets();
    Target::ALL
        .into_iter()
        .map(|target| TargetReport {
            target,
            vector_bytes: target.vector_bytes(),
            compiled: target.is_compiled(),
            detected: target.is_detected(),
            enabled: supported.contains(target),
        })
        .collect()
}

pub fn targets(json: bool) -> Result<()> {
    let reports = target_reports();

    if json {
        let out = serde_json::json!({
            "best": best_target(),
            "targets": reports,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Target", "Width", "Compiled", "Detected", "Enabled"]);
    for report in &reports {
        let width = report
            .vector_bytes
            .map_or_else(|| "1 lane".to_string(), |bytes| format!("{} bits", bytes * 8));
        table.add_row(vec![
            Cell::new(report.target.name()),
            Cell::new(width),
            flag(report.compiled),
            flag(report.detected),
            flag(report.enabled),
        ]);
    }

    println!("{table}");
    println!("{} {}", "Best target:".bold(), best_target().name().green());
    Ok(())
}

fn flag(on: bool) -> Cell {
    if on {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    }
}

// =============================================================================
// sort
// =============================================================================

/// Key type to generate and sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyType {
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    #[value(alias = "ascending")]
    Asc,
    #[value(alias = "descending")]
    Desc,
}

impl From<OrderArg> for Order {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => Order::Ascending,
            OrderArg::Desc => Order::Descending,
        }
    }
}

/// Shape of the generated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pattern {
    /// Uniformly random keys
    Random,
    /// Sixteen distinct values
    FewDistinct,
    /// Already in ascending order
    Sorted,
    /// Descending order
    Reversed,
    /// One repeated value
    AllEqual,
}

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    /// Key type
    #[arg(short = 't', long = "type", value_enum, default_value_t = KeyType::I32)]
    pub key_type: KeyType,

    /// Sort order
    #[arg(short, long, value_enum, default_value_t = OrderArg::Asc)]
    pub order: OrderArg,

    /// Number of keys
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    pub len: usize,

    /// Input pattern
    #[arg(short, long, value_enum, default_value_t = Pattern::Random)]
    pub pattern: Pattern,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Timed repetitions; the fastest is reported
    #[arg(short, long, default_value_t = 3)]
    pub runs: u32,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one `sort` invocation.
#[derive(Debug, Serialize)]
pub struct SortReport {
    pub key_type: &'static str,
    pub order: Order,
    pub len: usize,
    pub pattern: Pattern,
    pub target: Target,
    pub best_ms: f64,
    pub mkeys_per_sec: f64,
    pub verified: bool,
}

pub fn sort(args: &SortArgs) -> Result<()> {
    let report = match args.key_type {
        KeyType::I16 => run::<i16>(args),
        KeyType::U16 => run::<u16>(args),
        KeyType::I32 => run::<i32>(args),
        KeyType::U32 => run::<u32>(args),
        KeyType::I64 => run::<i64>(args),
        KeyType::U64 => run::<u64>(args),
        KeyType::F32 => run::<f32>(args),
        KeyType::F64 => run::<f64>(args),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Sorted {} {} keys ({:?}, {}) on {}",
            report.len,
            report.key_type,
            report.pattern,
            report.order,
            report.target.name().green()
        );
        println!(
            "  best of {}: {:.3} ms ({:.1} Mkeys/s)",
            args.runs.max(1),
            report.best_ms,
            report.mkeys_per_sec
        );
        let status = if report.verified {
            "ok".green()
        } else {
            "MISMATCH".red()
        };
        println!("  verified: {status}");
    }

    if !report.verified {
        bail!(
            "{} on {} did not match the reference order",
            report.key_type,
            report.target
        );
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)] // Reason: throughput display only
fn run<T>(args: &SortArgs) -> SortReport
where
    T: SortKey,
    Standard: rand::distributions::Distribution<T>,
{
    let keys: Vec<T> = generate(args.len, args.pattern, args.seed);
    let order = Order::from(args.order);
    let mut sorter = Sorter::with_capacity::<T>(args.len);

    let mut sorted = Vec::with_capacity(keys.len());
    let mut best = Duration::MAX;
    for _ in 0..args.runs.max(1) {
        sorted.clone_from(&keys);
        let start = Instant::now();
        sorter.sort(&mut sorted, order);
        best = best.min(start.elapsed());
    }

    let target = T::routine(order)
        .resolved_target()
        .unwrap_or_else(best_target);
    let secs = best.as_secs_f64();
    tracing::debug!(key = T::NAME, %order, len = args.len, %target, secs, "sort finished");

    SortReport {
        key_type: T::NAME,
        order,
        len: args.len,
        pattern: args.pattern,
        target,
        best_ms: secs * 1e3,
        mkeys_per_sec: if secs > 0.0 {
            args.len as f64 / secs / 1e6
        } else {
            0.0
        },
        verified: sorted == reference(&keys, order),
    }
}

/// Generates `len` keys in `pattern`, deterministic in `seed`.
pub fn generate<T>(len: usize, pattern: Pattern, seed: u64) -> Vec<T>
where
    T: Lane,
    Standard: rand::distributions::Distribution<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    match pattern {
        Pattern::Random => (0..len).map(|_| rng.gen()).collect(),
        Pattern::FewDistinct => (0..len)
            .map(|_| T::ZERO.offset(rng.gen_range(0..16)))
            .collect(),
        Pattern::Sorted => reference(&generate(len, Pattern::Random, seed), Order::Ascending),
        Pattern::Reversed => reference(&generate(len, Pattern::Random, seed), Order::Descending),
        Pattern::AllEqual => vec![T::ZERO.offset(7); len],
    }
}

/// `keys` sorted in `order` by the standard library.
fn reference<T: Lane>(keys: &[T], order: Order) -> Vec<T> {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    if order == Order::Descending {
        sorted.reverse();
    }
    sorted
}

// =============================================================================
// config
// =============================================================================

pub fn config(config: &LanewiseConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(key_type: KeyType, pattern: Pattern, len: usize) -> SortArgs {
        SortArgs {
            key_type,
            order: OrderArg::Desc,
            len,
            pattern,
            seed: 7,
            runs: 1,
            json: false,
        }
    }

    #[test]
    fn test_generate_patterns() {
        let sorted: Vec<i32> = generate(500, Pattern::Sorted, 1);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        let reversed: Vec<u64> = generate(500, Pattern::Reversed, 1);
        assert!(reversed.windows(2).all(|w| w[0] >= w[1]));

        let few: Vec<u16> = generate(1000, Pattern::FewDistinct, 1);
        assert!(few.iter().all(|k| *k < 16));

        let equal: Vec<f32> = generate(10, Pattern::AllEqual, 1);
        assert!(equal.iter().all(|k| *k == equal[0]));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a: Vec<f64> = generate(64, Pattern::Random, 99);
        let b: Vec<f64> = generate(64, Pattern::Random, 99);
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_verifies_every_pattern() {
        for pattern in Pattern::value_variants() {
            let report = run::<i16>(&args(KeyType::I16, *pattern, 3000));
            assert!(report.verified, "{pattern:?}");
            assert_eq!(report.order, Order::Descending);
            assert_eq!(report.key_type, "i16");
        }
    }

    #[test]
    fn test_run_reports_resolved_target() {
        let report = run::<f32>(&args(KeyType::F32, Pattern::Random, 10_000));
        assert!(report.verified);
        assert_eq!(report.target, best_target());
        assert!(report.best_ms >= 0.0);
    }

    #[test]
    fn test_target_reports_cover_all_targets() {
        let reports = target_reports();
        assert_eq!(reports.len(), Target::ALL.len());
        let scalar = reports.last().unwrap();
        assert_eq!(scalar.target, Target::Scalar);
        assert!(scalar.compiled && scalar.detected && scalar.enabled);
        assert!(reports.iter().all(|r| !r.enabled || (r.compiled && r.detected)));
    }

    #[test]
    fn test_order_arg_conversion() {
        assert_eq!(Order::from(OrderArg::Asc), Order::Ascending);
        assert_eq!(Order::from(OrderArg::Desc), Order::Descending);
    }
}
