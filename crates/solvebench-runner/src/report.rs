//! Report generation for characterization results.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::result::{CharacterizationReport, CompositeTime, DepthResult, RunCompletion};

/// CSV exporter for characterization reports.
///
/// Two layouts are available: a full export with one row per trial, and a
/// summary with one row per goal depth. Times are in milliseconds.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use solvebench_runner::{CharacterizationReport, CsvExporter, RunCompletion};
///
/// let report = CharacterizationReport::new(
///     Vec::new(),
///     Duration::ZERO,
///     RunCompletion::Complete,
///     10,
///     Duration::from_secs(1),
///     0.5,
/// );
/// let csv = CsvExporter::summary_to_string(&report);
/// assert!(csv.starts_with("goal_depth,time_min_ms"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Header of the per-trial export.
    pub const FULL_HEADER: &'static str =
        "goal_depth,trial,elapsed_ms,solution_length,hit_goal,timed_out";

    /// Header of the per-depth export.
    pub const SUMMARY_HEADER: &'static str = "goal_depth,time_min_ms,time_max_ms,time_median_ms,time_mean_ms,time_stddev_ms,moves_min,moves_max,moves_median,moves_mean,moves_stddev,goal_hit_rate,timeouts,combined_mean_ms,combined_worst_case_ms";

    /// Exports every trial, one row each.
    ///
    /// Timed-out trials leave `solution_length` empty.
    pub fn full_to_string(report: &CharacterizationReport) -> String {
        let mut output = String::new();
        writeln!(output, "{}", Self::FULL_HEADER).unwrap();

        for depth in &report.depth_results {
            for (trial, sample) in depth.samples.iter().enumerate() {
                let length = sample
                    .solution_length()
                    .map(|l| l.to_string())
                    .unwrap_or_default();
                writeln!(
                    output,
                    "{},{},{:.3},{},{},{}",
                    sample.goal_depth,
                    trial,
                    sample.elapsed_seconds() * 1000.0,
                    length,
                    sample.hit_goal(),
                    sample.is_timed_out(),
                )
                .unwrap();
            }
        }

        output
    }

    /// Exports one summary row per goal depth.
    ///
    /// Move columns and composite columns are empty for a depth where every
    /// trial timed out.
    pub fn summary_to_string(report: &CharacterizationReport) -> String {
        let mut output = String::new();
        writeln!(output, "{}", Self::SUMMARY_HEADER).unwrap();

        for (depth, composite) in report.depth_results.iter().zip(&report.composite_times) {
            let t = depth.time_stats.scaled(1000.0);
            let moves = match &depth.move_stats {
                Some(m) => format!(
                    "{:.3},{:.3},{:.3},{:.3},{:.3}",
                    m.min, m.max, m.median, m.mean, m.stddev
                ),
                None => ",,,,".to_string(),
            };
            writeln!(
                output,
                "{},{:.3},{:.3},{:.3},{:.3},{:.3},{},{:.4},{},{},{}",
                depth.goal_depth,
                t.min,
                t.max,
                t.median,
                t.mean,
                t.stddev,
                moves,
                depth.goal_hit_rate,
                depth.timeout_count,
                optional_ms(composite.combined_mean),
                optional_ms(composite.combined_worst_case),
            )
            .unwrap();
        }

        output
    }

    /// Writes the per-trial export to a file.
    pub fn full_to_file(report: &CharacterizationReport, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::full_to_string(report))
    }

    /// Writes the per-depth export to a file.
    pub fn summary_to_file(
        report: &CharacterizationReport,
        path: impl AsRef<Path>,
    ) -> io::Result<()> {
        fs::write(path, Self::summary_to_string(report))
    }

    /// Writes the per-depth export to a writer.
    pub fn write_summary<W: Write>(report: &CharacterizationReport, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::summary_to_string(report).as_bytes())
    }
}

fn optional_ms(seconds: Option<f64>) -> String {
    seconds
        .map(|s| format!("{:.3}", s * 1000.0))
        .unwrap_or_default()
}

/// Markdown report generator.
///
/// Generates a human-readable report: run metadata, a per-depth table of
/// measured statistics, and a separate table of composite time estimates.
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report string.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use solvebench_core::Sample;
    /// use solvebench_runner::{CharacterizationReport, DepthResult, MarkdownReport, RunCompletion};
    ///
    /// let ms = Duration::from_millis;
    /// let depth = DepthResult::from_samples(20, vec![Sample::solved(20, ms(12), 19)], ms(12)).unwrap();
    /// let report = CharacterizationReport::new(
    ///     vec![depth],
    ///     ms(12),
    ///     RunCompletion::Complete,
    ///     1,
    ///     Duration::from_secs(1),
    ///     0.5,
    /// );
    ///
    /// let md = MarkdownReport::to_string(&report);
    /// assert!(md.contains("## Measurements"));
    /// assert!(md.contains("| 20 |"));
    /// ```
    pub fn to_string(report: &CharacterizationReport) -> String {
        let mut output = String::new();

        writeln!(output, "# Solver Characterization").unwrap();
        writeln!(output).unwrap();

        if let RunCompletion::Interrupted {
            goal_depth,
            completed_trials,
        } = report.completion
        {
            writeln!(
                output,
                "> **Partial run**: interrupted at goal depth {} after {} of {} trials; \
                 only fully sampled depths are shown.",
                goal_depth, completed_trials, report.iteration_count
            )
            .unwrap();
            writeln!(output).unwrap();
        }

        writeln!(output, "- **Trials per depth**: {}", report.iteration_count).unwrap();
        writeln!(
            output,
            "- **Timeout**: {:.0} ms",
            report.timeout.as_secs_f64() * 1000.0
        )
        .unwrap();
        writeln!(
            output,
            "- **Time per move**: {:.0} ms",
            report.seconds_per_move * 1000.0
        )
        .unwrap();
        writeln!(
            output,
            "- **Total duration**: {:.1} s",
            report.total_duration.as_secs_f64()
        )
        .unwrap();
        writeln!(output).unwrap();

        if report.depth_results.is_empty() {
            writeln!(output, "*No depths completed.*").unwrap();
            return output;
        }

        writeln!(output, "## Measurements").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "| Depth | Mean Time (ms) | Max Time (ms) | Mean Moves | Max Moves | Goal Hit | Timeouts |"
        )
        .unwrap();
        writeln!(
            output,
            "|-------|----------------|---------------|------------|-----------|----------|----------|"
        )
        .unwrap();
        for depth in &report.depth_results {
            write_measurement_row(&mut output, depth);
        }
        writeln!(output).unwrap();

        writeln!(output, "## Composite Time").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "*Derived estimates, not measurements*: mean moves x {:.0} ms + mean solve time \
             (worst case uses maxima).",
            report.seconds_per_move * 1000.0
        )
        .unwrap();
        writeln!(output).unwrap();

        match report.reference_time_seconds {
            Some(reference) => {
                writeln!(
                    output,
                    "| Depth | Combined Mean (ms) | Combined Worst (ms) | Beats {:.0} ms |",
                    reference * 1000.0
                )
                .unwrap();
                writeln!(
                    output,
                    "|-------|--------------------|---------------------|------------|"
                )
                .unwrap();
            }
            None => {
                writeln!(output, "| Depth | Combined Mean (ms) | Combined Worst (ms) |").unwrap();
                writeln!(output, "|-------|--------------------|---------------------|").unwrap();
            }
        }
        for composite in &report.composite_times {
            write_composite_row(&mut output, report, composite);
        }

        if let Some(fastest) = report.fastest_depth() {
            if let Some(mean) = fastest.combined_mean {
                writeln!(output).unwrap();
                writeln!(
                    output,
                    "Fastest projected depth: **{}** ({:.2} ms).",
                    fastest.goal_depth,
                    mean * 1000.0
                )
                .unwrap();
            }
        }

        output
    }

    /// Writes the Markdown report to a file.
    pub fn to_file(report: &CharacterizationReport, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(report))
    }

    /// Writes the Markdown report to a writer.
    pub fn write<W: Write>(report: &CharacterizationReport, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(report).as_bytes())
    }
}

fn write_measurement_row(output: &mut String, depth: &DepthResult) {
    let (mean_moves, max_moves) = match &depth.move_stats {
        Some(m) => (format!("{:.2}", m.mean), format!("{:.0}", m.max)),
        None => ("N/A".to_string(), "N/A".to_string()),
    };
    writeln!(
        output,
        "| {} | {:.2} | {:.2} | {} | {} | {:.1}% | {} |",
        depth.goal_depth,
        depth.time_stats.mean * 1000.0,
        depth.time_stats.max * 1000.0,
        mean_moves,
        max_moves,
        depth.goal_hit_rate * 100.0,
        depth.timeout_count,
    )
    .unwrap();
}

fn write_composite_row(
    output: &mut String,
    report: &CharacterizationReport,
    composite: &CompositeTime,
) {
    let ms = |v: Option<f64>| {
        v.map(|s| format!("{:.2}", s * 1000.0))
            .unwrap_or_else(|| "N/A".to_string())
    };
    let mean = ms(composite.combined_mean);
    let worst = ms(composite.combined_worst_case);

    if report.reference_time_seconds.is_some() {
        let beats = match report.beats_reference(composite) {
            Some(true) => "yes",
            Some(false) => "no",
            None => "N/A",
        };
        writeln!(
            output,
            "| {} | {} | {} | {} |",
            composite.goal_depth, mean, worst, beats
        )
        .unwrap();
    } else {
        writeln!(output, "| {} | {} | {} |", composite.goal_depth, mean, worst).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvebench_core::Sample;
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sample_report(completion: RunCompletion) -> CharacterizationReport {
        let d20 = DepthResult::from_samples(
            20,
            vec![Sample::solved(20, ms(10), 19), Sample::timed_out(20, ms(1000))],
            ms(1010),
        )
        .unwrap();
        let d21 = DepthResult::from_samples(21, vec![Sample::timed_out(21, ms(1000))], ms(1000))
            .unwrap();
        CharacterizationReport::new(
            vec![d20, d21],
            ms(2010),
            completion,
            2,
            Duration::from_secs(1),
            0.5,
        )
    }

    #[test]
    fn test_full_csv() {
        let csv = CsvExporter::full_to_string(&sample_report(RunCompletion::Complete));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CsvExporter::FULL_HEADER);
        assert_eq!(lines[1], "20,0,10.000,19,true,false");
        assert_eq!(lines[2], "20,1,1000.000,,false,true");
        assert_eq!(lines[3], "21,0,1000.000,,false,true");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_summary_csv() {
        let csv = CsvExporter::summary_to_string(&sample_report(RunCompletion::Complete));
        let lines: Vec<&str> = csv.lines().collect();
        let columns = CsvExporter::SUMMARY_HEADER.split(',').count();
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.split(',').count(), columns);
        }
        assert!(lines[1].starts_with("20,10.000,1000.000,505.000,505.000,495.000,19.000"));
        assert!(lines[1].ends_with(",0.5000,1,10005.000,10500.000"));
        assert!(lines[2].ends_with(",,,,,0.0000,1,,"));
    }

    #[test]
    fn test_markdown_sections() {
        let md = MarkdownReport::to_string(&sample_report(RunCompletion::Complete));
        assert!(md.contains("# Solver Characterization"));
        assert!(md.contains("- **Trials per depth**: 2"));
        assert!(md.contains("| 20 | 505.00 | 1000.00 | 19.00 | 19 | 50.0% | 1 |"));
        assert!(md.contains("| 21 | 1000.00 | 1000.00 | N/A | N/A | 0.0% | 1 |"));
        assert!(md.contains("Derived estimates"));
        assert!(md.contains("| 20 | 10005.00 | 10500.00 |"));
        assert!(md.contains("Fastest projected depth: **20**"));
        assert!(!md.contains("Partial run"));
    }

    #[test]
    fn test_markdown_partial_and_reference() {
        let report = sample_report(RunCompletion::Interrupted {
            goal_depth: 22,
            completed_trials: 1,
        })
        .with_reference_time_seconds(Some(3.13));
        let md = MarkdownReport::to_string(&report);
        assert!(md.contains("**Partial run**: interrupted at goal depth 22 after 1 of 2 trials"));
        assert!(md.contains("Beats 3130 ms"));
        assert!(md.contains("| 20 | 10005.00 | 10500.00 | no |"));
        assert!(md.contains("| 21 | N/A | N/A | N/A |"));
    }

    #[test]
    fn test_markdown_empty() {
        let report = CharacterizationReport::new(
            Vec::new(),
            Duration::ZERO,
            RunCompletion::Interrupted {
                goal_depth: 19,
                completed_trials: 0,
            },
            10,
            Duration::from_secs(1),
            0.5,
        );
        let md = MarkdownReport::to_string(&report);
        assert!(md.contains("*No depths completed.*"));
    }

    #[test]
    fn test_write_to_writer() {
        let report = sample_report(RunCompletion::Complete);
        let mut buf = Vec::new();
        MarkdownReport::write(&report, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), MarkdownReport::to_string(&report));

        let mut buf = Vec::new();
        CsvExporter::write_summary(&report, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("goal_depth"));
    }
}
