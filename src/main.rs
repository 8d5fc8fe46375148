//! zeta-grover command-line interface.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use console::style;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use zeta_grover::backend::{Backend, BackendSpec};
use zeta_grover::execution::Counts;
use zeta_grover::grover::{BuilderConfig, GroverBuilder};
use zeta_grover::parser::parse_marked_set;
use zeta_grover::zeta::{zero_indices, InfluenceConfig, InfluenceMap, RIEMANN_ZEROS};

/// Build Grover search circuits and score their measurement results
#[derive(Parser)]
#[command(name = "zeta-grover")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Grover circuit
    #[command(group(ArgGroup::new("source").required(true).args(["marked", "zeros", "influence"])))]
    Build {
        /// Register size
        #[arg(short, long)]
        qubits: usize,

        /// Marked states, e.g. "0..50, 64, 100-103"
        #[arg(short, long)]
        marked: Option<String>,

        /// Mark the ground state and the first K Riemann zeros
        #[arg(long, value_name = "K")]
        zeros: Option<usize>,

        /// Mark influence-map cells at or above this normalized weight
        /// (defaults to the config file's influence threshold)
        #[arg(long, value_name = "THRESHOLD", num_args = 0..=1)]
        influence: Option<Option<f64>>,

        /// JSON file with "builder" and "influence" settings
        #[arg(short, long, env = "ZETA_GROVER_CONFIG")]
        config: Option<PathBuf>,

        /// JSON target description to check the circuit against
        #[arg(short, long)]
        backend: Option<PathBuf>,

        /// Print the circuit as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Show the Riemann zero table and the states it marks
    Zeros {
        /// Register size
        #[arg(short, long, default_value = "6")]
        qubits: usize,

        /// Number of zeros to use
        #[arg(short, long, default_value = "10")]
        count: usize,
    },

    /// Score a measurement histogram against a marked set
    Analyze {
        /// JSON histogram, bit-string to count
        #[arg(long)]
        counts: PathBuf,

        /// Marked states, e.g. "0..50"
        #[arg(short, long)]
        marked: String,

        /// Number of outcomes to list
        #[arg(short, long, default_value = "8")]
        top: usize,

        /// Also write the full histogram as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    builder: BuilderConfig,
    influence: InfluenceConfig,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Resolves the marked set from whichever source flag was given.
fn marked_states(
    qubits: usize,
    marked: Option<&str>,
    zeros: Option<usize>,
    influence: Option<Option<f64>>,
    influence_config: &InfluenceConfig,
) -> Result<BTreeSet<u64>> {
    if let Some(expr) = marked {
        return Ok(parse_marked_set(expr)?);
    }
    if let Some(count) = zeros {
        return Ok(zero_indices(qubits, count));
    }
    match influence {
        Some(threshold) => {
            let config = InfluenceConfig {
                threshold: threshold.unwrap_or(influence_config.threshold),
                ..influence_config.clone()
            };
            Ok(InfluenceMap::marked_states(qubits, &config)?)
        }
        None => Ok(BTreeSet::new()),
    }
}

fn run_build(
    qubits: usize,
    marked: Option<&str>,
    zeros: Option<usize>,
    influence: Option<Option<f64>>,
    config: Option<&Path>,
    backend: Option<&Path>,
    json: bool,
) -> Result<()> {
    let file_config: FileConfig = match config {
        Some(path) => read_json(path)?,
        None => FileConfig::default(),
    };

    let marked = marked_states(qubits, marked, zeros, influence, &file_config.influence)?;

    let target: Option<Backend> = match backend {
        Some(path) => Some(read_json::<BackendSpec>(path)?.into()),
        None => None,
    };

    let mut builder = GroverBuilder::with_config(file_config.builder);
    if let Some(target) = &target {
        builder = builder.with_backend(target);
    }
    let grover = builder.build(qubits, marked)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grover.circuit)?);
        return Ok(());
    }

    let circuit = &grover.circuit;
    println!(
        "{} Grover circuit: {} qubits, {} marked states, {} iterations",
        style("✓").green().bold(),
        circuit.num_qubits(),
        grover.marked.len(),
        grover.iterations
    );
    let preview: Vec<String> = grover.marked.iter().take(8).map(u64::to_string).collect();
    println!("  Marked: [{}]", preview.join(", "));
    println!("  Gates:  {}", circuit.gate_count());
    for (name, count) in circuit.count_ops() {
        println!("    {:<8} {}", name, count);
    }

    if let Some(target) = &target {
        let report = target.check(circuit);
        if report.is_native() {
            println!("  Runs natively on {}", style(&target.name).cyan());
        } else {
            let missing: Vec<&str> = report.missing_gates.iter().map(String::as_str).collect();
            println!(
                "  {} {} needs rewriting: missing gates [{}], {} uncoupled pairs",
                style("!").yellow().bold(),
                style(&target.name).cyan(),
                missing.join(", "),
                report.uncoupled_pairs.len()
            );
        }
    }
    Ok(())
}

fn run_zeros(qubits: usize, count: usize) -> Result<()> {
    println!("{}", style("Riemann zeta zeros").bold());
    for (k, zero) in RIEMANN_ZEROS.iter().take(count).enumerate() {
        println!("  rho_{:<2} = {} + {}i", k + 1, zero.re, zero.im);
    }
    let marked: Vec<String> = zero_indices(qubits, count)
        .iter()
        .map(u64::to_string)
        .collect();
    println!("Marked states for {} qubits: [{}]", qubits, marked.join(", "));
    Ok(())
}

fn run_analyze(counts: &Path, marked: &str, top: usize, csv: Option<&Path>) -> Result<()> {
    let counts: Counts = read_json(counts)?;
    let marked = parse_marked_set(marked)?;
    let total = counts.total();

    println!("{}", style("Results").bold());
    for (state, count) in counts.top(top) {
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        println!("  |{}⟩: {} ({:.1}%)", state, count, percentage);
    }
    println!(
        "{} Success rate: {:.1}% ({} of {} shots)",
        style("→").cyan().bold(),
        counts.success_rate(&marked) * 100.0,
        counts.success_count(&marked),
        total
    );

    if let Some(path) = csv {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        counts.write_csv(file)?;
        println!("  Histogram written to {}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Build {
            qubits,
            marked,
            zeros,
            influence,
            config,
            backend,
            json,
        } => run_build(
            qubits,
            marked.as_deref(),
            zeros,
            influence,
            config.as_deref(),
            backend.as_deref(),
            json,
        ),
        Commands::Zeros { qubits, count } => run_zeros(qubits, count),
        Commands::Analyze {
            counts,
            marked,
            top,
            csv,
        } => run_analyze(&counts, &marked, top, csv.as_deref()),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_a_source() {
        assert!(Cli::try_parse_from(["zeta-grover", "build", "-q", "4"]).is_err());
        assert!(
            Cli::try_parse_from(["zeta-grover", "build", "-q", "4", "-m", "1", "--zeros", "3"])
                .is_err()
        );
    }

    #[test]
    fn test_influence_threshold_is_optional() {
        let cli = Cli::try_parse_from(["zeta-grover", "build", "-q", "4", "--influence"]).unwrap();
        match cli.command {
            Commands::Build { influence, .. } => assert_eq!(influence, Some(None)),
            _ => panic!("Expected Build command"),
        }

        let cli =
            Cli::try_parse_from(["zeta-grover", "build", "-q", "4", "--influence", "0.8"]).unwrap();
        match cli.command {
            Commands::Build { influence, .. } => assert_eq!(influence, Some(Some(0.8))),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_influence_threshold_from_config_file() {
        let file_config: FileConfig =
            serde_json::from_str(r#"{"influence": {"threshold": 0.99}}"#).unwrap();
        let map = InfluenceMap::generate(4, &file_config.influence).unwrap();

        let from_file = marked_states(4, None, None, Some(None), &file_config.influence).unwrap();
        assert_eq!(from_file, map.marked(0.99));
        assert_ne!(from_file, map.marked(0.5));

        let overridden =
            marked_states(4, None, None, Some(Some(0.5)), &file_config.influence).unwrap();
        assert_eq!(overridden, map.marked(0.5));
    }
}
