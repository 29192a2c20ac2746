//! Pancake Sorting Characterization
//!
//! Measures an IDA* pancake sorter across a range of goal depths: how often
//! it finds a solution within the goal, how long that takes, and what the
//! combined search-plus-execution time would be for a machine flipping at a
//! given speed.
//!
//! ```text
//! pancake 200 0.15 --min-depth 16 --max-depth 22 --stack-size 18 -m report.md
//! ```
//!
//! Ctrl-C stops sampling after the current trial; completed depths are still
//! reported.

mod puzzle;
mod solver;

use std::error::Error;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use solvebench::prelude::*;
use solvebench::{console, Characterization, ConfigError};

use puzzle::ScrambledStacks;
use solver::PancakeSolver;

/// Pancake sorter depth characterization
#[derive(Parser, Debug)]
#[command(name = "pancake")]
#[command(version, about = "Characterize an IDA* pancake sorter across goal depths")]
struct Args {
    /// Trials per goal depth
    #[arg(required_unless_present = "config")]
    iterations: Option<usize>,

    /// Seconds to execute one flip, for composite time estimates
    #[arg(required_unless_present = "config")]
    seconds_per_move: Option<f64>,

    /// Load settings from a TOML or YAML file; other flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// First goal depth (inclusive)
    #[arg(long)]
    min_depth: Option<u32>,

    /// Last goal depth (inclusive)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Per-trial solver timeout in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Randomizer seed; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Reference completion time in seconds to compare estimates against
    #[arg(long)]
    reference_time: Option<f64>,

    /// Pancakes per stack
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(2..=256))]
    stack_size: u16,

    /// Write one CSV row per trial to this file
    #[arg(short = 'f', long)]
    full_csv: Option<String>,

    /// Write one CSV row per goal depth to this file
    #[arg(short = 's', long)]
    summary_csv: Option<String>,

    /// Write the markdown report to this file
    #[arg(short = 'm', long)]
    markdown: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    console::init();

    match run(&args) {
        Ok(report) if report.is_partial() => ExitCode::from(130),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<CharacterizationReport, Box<dyn Error>> {
    let config = build_config(args)?;
    config.validate()?;

    let seed = config.random_seed.unwrap_or_default();
    let stacks = ScrambledStacks::new(args.stack_size as usize, seed);
    println!(
        "Sampling {} pancake stacks, seed {seed}\n",
        stacks.stack_size()
    );

    let stop = StopFlag::new();
    spawn_interrupt_listener(stop.clone())?;

    let mut characterization =
        Characterization::new(config.clone(), PancakeSolver::new(), stacks).with_stop(stop);
    let report = characterization.run()?;
    println!(
        "\nSearch expanded {} nodes over {} trials",
        characterization.solver().nodes_expanded(),
        report.total_trials()
    );
    write_reports(&config, &report)?;

    println!();
    print!("{}", MarkdownReport::to_string(&report));
    Ok(report)
}

/// Merges the optional config file with command-line overrides.
fn build_config(args: &Args) -> Result<CharacterizationConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => CharacterizationConfig::load(path)?,
        None => CharacterizationConfig::new(
            args.iterations.unwrap_or_default(),
            args.seconds_per_move.unwrap_or_default(),
        ),
    };

    if let Some(iterations) = args.iterations {
        config = config.with_iteration_count(iterations);
    }
    if let Some(seconds) = args.seconds_per_move {
        config = config.with_seconds_per_move(seconds);
    }

    let min_depth = args.min_depth.unwrap_or(config.min_depth);
    let max_depth = args.max_depth.unwrap_or(config.max_depth);
    config = config.with_depth_range(min_depth, max_depth);

    if let Some(seconds) = args.timeout {
        config = config.with_timeout_seconds(seconds);
    }
    if let Some(seconds) = args.reference_time {
        config = config.with_reference_time_seconds(seconds);
    }

    let seed = args
        .seed
        .or(config.random_seed)
        .unwrap_or_else(rand::random);
    config = config.with_random_seed(seed);

    let mut output = config.output.clone();
    if let Some(path) = &args.full_csv {
        output = output.with_full_csv(path);
    }
    if let Some(path) = &args.summary_csv {
        output = output.with_summary_csv(path);
    }
    if let Some(path) = &args.markdown {
        output = output.with_markdown(path);
    }

    Ok(config.with_output(output))
}

fn write_reports(config: &CharacterizationConfig, report: &CharacterizationReport) -> io::Result<()> {
    if let Some(path) = &config.output.full_csv {
        CsvExporter::full_to_file(report, path)?;
        println!("Wrote trial data to {path}");
    }
    if let Some(path) = &config.output.summary_csv {
        CsvExporter::summary_to_file(report, path)?;
        println!("Wrote summary to {path}");
    }
    if let Some(path) = &config.output.markdown {
        MarkdownReport::to_file(report, path)?;
        println!("Wrote report to {path}");
    }
    Ok(())
}

/// Raises `stop` on the first Ctrl-C and exits the process on the second.
fn spawn_interrupt_listener(stop: StopFlag) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            if runtime.block_on(relay_interrupts(tokio::signal::ctrl_c, stop)) {
                eprintln!("\nSecond interrupt received, exiting");
                std::process::exit(130);
            }
        })?;

    Ok(())
}

/// Waits for up to two signals from `next_signal`.
///
/// The first raises `stop`; returns true once a second signal arrives, false
/// if the signal source fails first.
async fn relay_interrupts<F, Fut>(mut next_signal: F, stop: StopFlag) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if next_signal().await.is_err() {
        return false;
    }
    eprintln!("\nInterrupt received, stopping after the current trial (Ctrl-C again to quit)");
    stop.request_stop();

    next_signal().await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvebench::ShouldStop;

    #[test]
    fn test_positional_arguments() {
        let args = Args::parse_from(["pancake", "50", "0.2", "--seed", "9"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.iteration_count, 50);
        assert_eq!(config.seconds_per_move, 0.2);
        assert_eq!(config.min_depth, 19);
        assert_eq!(config.max_depth, 25);
        assert_eq!(config.random_seed, Some(9));
        assert!(config.output.is_empty());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "pancake",
            "10",
            "0.5",
            "--min-depth",
            "12",
            "--max-depth",
            "14",
            "--timeout",
            "0.25",
            "--reference-time",
            "3.13",
            "-f",
            "trials.csv",
            "-m",
            "report.md",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.depths(), 12..=14);
        assert_eq!(config.timeout_seconds, 0.25);
        assert_eq!(config.reference_time_seconds, Some(3.13));
        assert_eq!(config.output.full_csv.as_deref(), Some("trials.csv"));
        assert_eq!(config.output.summary_csv, None);
        assert_eq!(config.output.markdown.as_deref(), Some("report.md"));
        assert!(config.random_seed.is_some());
    }

    #[test]
    fn test_positionals_required_without_config() {
        assert!(Args::try_parse_from(["pancake", "10"]).is_err());
        assert!(Args::try_parse_from(["pancake", "--config", "bench.toml"]).is_ok());
    }

    #[test]
    fn test_stack_size_range() {
        assert!(Args::try_parse_from(["pancake", "1", "1", "--stack-size", "1"]).is_err());
        assert!(Args::try_parse_from(["pancake", "1", "1", "--stack-size", "257"]).is_err());
    }

    fn signals(results: Vec<io::Result<()>>) -> impl FnMut() -> std::future::Ready<io::Result<()>> {
        let mut results = results.into_iter();
        move || {
            std::future::ready(
                results
                    .next()
                    .unwrap_or_else(|| Err(io::Error::other("signal source closed"))),
            )
        }
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_first_interrupt_raises_stop() {
        let stop = StopFlag::new();
        let forced = block_on(relay_interrupts(signals(vec![Ok(())]), stop.clone()));

        assert!(!forced);
        assert!(stop.should_stop());
    }

    #[test]
    fn test_second_interrupt_forces_exit() {
        let stop = StopFlag::new();
        let forced = block_on(relay_interrupts(signals(vec![Ok(()), Ok(())]), stop.clone()));

        assert!(forced);
        assert!(stop.should_stop());
    }

    #[test]
    fn test_failed_signal_source_leaves_stop_lowered() {
        let stop = StopFlag::new();
        let source = signals(vec![Err(io::Error::other("no handler"))]);
        let forced = block_on(relay_interrupts(source, stop.clone()));

        assert!(!forced);
        assert!(!stop.should_stop());
    }

    #[test]
    fn test_small_run_end_to_end() {
        let config = CharacterizationConfig::new(3, 0.1)
            .with_depth_range(4, 6)
            .with_random_seed(5);
        let stacks = ScrambledStacks::new(6, 5);

        let report = characterize(&config, PancakeSolver::new(), stacks, StopFlag::new()).unwrap();

        assert_eq!(report.depth_count(), 3);
        assert!(!report.is_partial());
        for depth in &report.depth_results {
            assert_eq!(depth.sample_count(), 3);
            assert_eq!(depth.timeout_count, 0);
        }
    }
}
