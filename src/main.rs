use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use robust_kernels::{parse_values, Aggregator, Params, DEFAULT_TRIM_RATIO};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Robust averages of numeric sample files")]
struct Args {
	/// Input files, numbers separated by whitespace or commas
	#[arg(required = true)]
	input_files: Vec<PathBuf>,

	/// Aggregator to apply to each file
	#[arg(short, long, value_enum, default_value_t = Aggregator::Trimmed)]
	aggregator: Aggregator,

	/// Fraction trimmed from each end, clamped to [0, 0.5]
	#[arg(short = 'r', long, default_value_t = DEFAULT_TRIM_RATIO)]
	trim_ratio: f64,

	/// Inputs are already sorted ascending (not verified)
	#[arg(long)]
	assume_sorted: bool,

	/// Weights file shared by all inputs
	#[arg(short, long)]
	weights: Option<PathBuf>,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let args: Args = Args::parse();
	let results = run(&args)?;
	write_results(&mut io::stdout().lock(), &results)?;

	Ok(())
}

/// Aggregates every input file, returning results in input order.
fn run(args: &Args) -> Result<Vec<(PathBuf, f64)>> {
	let params = Params {
		trim_ratio: args.trim_ratio,
		assume_sorted: args.assume_sorted,
	};

	let weights = match &args.weights {
		Some(path) => Some(read_values(path)?),
		None => None,
	};
	if weights.is_some() && !args.aggregator.uses_weights() {
		warn!(aggregator = %args.aggregator, "weights are ignored by this aggregator");
	}

	info!("Aggregating {} file(s) with {}...", args.input_files.len(), args.aggregator);
	let results = args
		.input_files
		.par_iter()
		.map(|path| {
			let values = read_values(path)?;
			args.aggregator
				.apply(&values, weights.as_deref(), &params)
				.with_context(|| format!("aggregating {}", path.display()))
		})
		.collect::<Result<Vec<f64>>>()?;

	Ok(args.input_files.iter().cloned().zip(results).collect())
}

fn write_results<W: Write>(out: &mut W, results: &[(PathBuf, f64)]) -> io::Result<()> {
	for (path, result) in results {
		writeln!(out, "{}\t{}", path.display(), result)?;
	}
	Ok(())
}

fn read_values(path: &Path) -> Result<Vec<f64>> {
	let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
	parse_values(&text).with_context(|| format!("parsing {}", path.display()))
}
