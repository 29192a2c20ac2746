//! Colored console output for characterization runs.
//!
//! Provides a custom `tracing` layer that renders runner events.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (run and depth start/end)
//! - **WARN**: Interruption
//! - **DEBUG**: Per-trial progress with running means
//!
//! Set `RUST_LOG=solvebench_runner=debug` to see per-trial progress.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(
                "solvebench_runner=info"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            )
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(BenchConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "solvebench".bright_cyan().bold(),
        format!("v{VERSION} - solver depth characterization").bright_white()
    );
    let _ = writeln!(stdout);
    let _ = stdout.flush();
}

/// A tracing layer that formats runner events with colors.
pub struct BenchConsoleLayer;

impl<S: Subscriber> Layer<S> for BenchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("solvebench") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    goal_depth: Option<u64>,
    min_depth: Option<u64>,
    max_depth: Option<u64>,
    iteration_count: Option<u64>,
    timeout_ms: Option<u64>,
    trial: Option<u64>,
    trial_count: Option<u64>,
    mean_time_ms: Option<f64>,
    mean_moves: Option<f64>,
    goal_hit_pct: Option<f64>,
    timeouts: Option<u64>,
    duration_ms: Option<u64>,
    time_summary: Option<String>,
    move_summary: Option<String>,
    depth_count: Option<u64>,
    partial: Option<bool>,
    completed: Option<u64>,
    requested: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "time_summary" => self.time_summary = Some(s.trim_matches('"').to_string()),
            "move_summary" => self.move_summary = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "goal_depth" => self.goal_depth = Some(value),
            "min_depth" => self.min_depth = Some(value),
            "max_depth" => self.max_depth = Some(value),
            "iteration_count" => self.iteration_count = Some(value),
            "timeout_ms" => self.timeout_ms = Some(value),
            "trial" => self.trial = Some(value),
            "trial_count" => self.trial_count = Some(value),
            "timeouts" => self.timeouts = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "depth_count" => self.depth_count = Some(value),
            "completed" => self.completed = Some(value),
            "requested" => self.requested = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "mean_time_ms" => self.mean_time_ms = Some(value),
            "mean_moves" => self.mean_moves = Some(value),
            "goal_hit_pct" => self.goal_hit_pct = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "partial" {
            self.partial = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "time_summary" => self.time_summary = Some(value.to_string()),
            "move_summary" => self.move_summary = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "characterize_start" => format_characterize_start(v),
        "depth_start" => format_depth_start(v),
        "progress" => format_progress(v),
        "depth_end" => format_depth_end(v),
        "interrupted" => format_interrupted(v),
        "characterize_end" => format_characterize_end(v),
        _ => String::new(),
    }
}

fn format_characterize_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} goal depths {}..={}, {} trials per depth, timeout ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Run]".bright_cyan(),
        v.min_depth.unwrap_or(0).to_string().bright_yellow(),
        v.max_depth.unwrap_or(0).to_string().bright_yellow(),
        v.iteration_count
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_yellow(),
        format_duration_ms(v.timeout_ms.unwrap_or(0)).yellow()
    )
}

fn format_depth_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} characterizing goal depth {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        depth_tag(v),
        v.goal_depth.unwrap_or(0).to_string().white().bold()
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let trial = v.trial.unwrap_or(0);
    let total = v.trial_count.unwrap_or(0);
    let mean_moves = match v.mean_moves {
        Some(m) if m.is_finite() => format!("{m:.2}"),
        _ => "N/A".to_string(),
    };

    format!(
        "    {} {:>7}/{} | mean time {} | mean moves {} | goal hit {} | timeouts {}",
        "->".bright_blue(),
        trial.to_formatted_string(&Locale::en).white(),
        total.to_formatted_string(&Locale::en),
        format!("{:.3}ms", v.mean_time_ms.unwrap_or(0.0)).yellow(),
        mean_moves.bright_magenta(),
        format_hit_pct(v.goal_hit_pct.unwrap_or(0.0)),
        v.timeouts.unwrap_or(0).to_formatted_string(&Locale::en)
    )
}

fn format_depth_end(v: &EventVisitor) -> String {
    let timeouts = v.timeouts.unwrap_or(0);
    let timeouts_str = timeouts.to_formatted_string(&Locale::en);
    let timeouts_colored = if timeouts > 0 {
        timeouts_str.bright_red().to_string()
    } else {
        timeouts_str.white().to_string()
    };

    format!(
        "{} {} {} done in {}: goal hit {}, timeouts {}\n    solve time:  {}\n    solve moves: {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        depth_tag(v),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_hit_pct(v.goal_hit_pct.unwrap_or(0.0)),
        timeouts_colored,
        v.time_summary.as_deref().unwrap_or("N/A"),
        v.move_summary.as_deref().unwrap_or("N/A")
    )
}

fn format_interrupted(v: &EventVisitor) -> String {
    format!(
        "{} {} {} interrupted after {} of {} trials; reporting completed depths only",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        depth_tag(v),
        v.completed.unwrap_or(0).to_formatted_string(&Locale::en).bright_red(),
        v.requested.unwrap_or(0).to_formatted_string(&Locale::en)
    )
}

fn format_characterize_end(v: &EventVisitor) -> String {
    let status = if v.partial.unwrap_or(false) {
        "PARTIAL".bright_red().bold().to_string()
    } else {
        "COMPLETE".bright_green().bold().to_string()
    };

    format!(
        "{} {} {} {}: {} depths in {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Run]".bright_cyan(),
        status,
        v.depth_count.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn depth_tag(v: &EventVisitor) -> String {
    format!("[Depth {}]", v.goal_depth.unwrap_or(0))
        .bright_cyan()
        .to_string()
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_hit_pct(pct: f64) -> String {
    let text = format!("{:.1}%", pct);
    if pct >= 99.95 {
        text.bright_green().to_string()
    } else if pct > 0.0 {
        text.yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}
