//! Colorful console output for planner events.
//!
//! Provides a `tracing` layer that formats the structured events emitted by
//! `pdplan-solver` (estimates, commits, search summaries) as colored lines.
//!
//! A host calls [`init`] once at startup, before creating a planner:
//!
//! ```no_run
//! use pdplan_config::PlannerConfig;
//! use pdplan_core::{GraphTopology, Task, Vehicle};
//! use pdplan_solver::RoutingPlanner;
//!
//! pdplan_console::init();
//!
//! let mut builder = GraphTopology::builder();
//! let depot = builder.add_city("Depot");
//! let market = builder.add_city("Market");
//! builder.add_road(depot, market, 12.0);
//! let topology = builder.build().unwrap();
//!
//! let config = PlannerConfig::load_or_default("planner.toml");
//! let fleet = vec![Vehicle::new("truck", 8, 1.0, depot)];
//! let mut planner = RoutingPlanner::new(topology, fleet, &config).unwrap();
//!
//! // logs "[Estimate] task 1 on truck: marginal cost 12.00"
//! let task = Task::new(1, depot, market, 3);
//! planner
//!     .estimate_marginal_cost(task, config.timeouts.bid_budget())
//!     .unwrap();
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "pdplan_solver=info,pdplan_config=warn";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter. If another global subscriber is already
/// installed, it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlannerConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats planner events with colors.
pub struct PlannerConsoleLayer;

impl<S: Subscriber> Layer<S> for PlannerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("pdplan_") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    task: Option<String>,
    vehicle: Option<String>,
    marginal_cost: Option<f64>,
    best_cost: Option<f64>,
    total_cost: Option<f64>,
    steps: Option<u64>,
    improvements: Option<u64>,
    duration_ms: Option<u64>,
    tasks: Option<u64>,
    vehicles: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = Some(value.to_string());
        match field.name() {
            "event" => self.event = value,
            "message" => self.message = value,
            "task" => self.task = value,
            "vehicle" => self.vehicle = value,
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "steps" => self.steps = Some(value),
            "improvements" => self.improvements = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "tasks" => self.tasks = Some(value),
            "vehicles" => self.vehicles = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "marginal_cost" => self.marginal_cost = Some(value),
            "best_cost" => self.best_cost = Some(value),
            "total_cost" => self.total_cost = Some(value),
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "estimate" => format_estimate(v),
        "commit" => format_commit(v),
        "local_search_end" => format_search_end(v),
        "finalize" => format_finalize(v),
        _ if level <= Level::WARN => format_warning(level, v),
        _ => String::new(),
    }
}

fn prefix(level: Level, component: &str) -> String {
    let level = match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => "WARN ".yellow().to_string(),
        _ => "INFO ".bright_green().to_string(),
    };
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        level,
        format!("[{}]", component).bright_cyan()
    )
}

fn format_estimate(v: &EventVisitor) -> String {
    format!(
        "{} task {} on {}: marginal cost {}",
        prefix(Level::INFO, "Estimate"),
        v.task.as_deref().unwrap_or("?").white().bold(),
        v.vehicle.as_deref().unwrap_or("?").yellow(),
        format_cost(v.marginal_cost.unwrap_or(f64::NAN)).bright_magenta()
    )
}

fn format_commit(v: &EventVisitor) -> String {
    format!(
        "{} task {} assigned to {}",
        prefix(Level::INFO, "Commit"),
        v.task.as_deref().unwrap_or("?").white().bold(),
        v.vehicle.as_deref().unwrap_or("?").yellow()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    format!(
        "{} ended: time spent ({}), best cost ({}), steps ({}), improvements ({})",
        prefix(Level::INFO, "LocalSearch"),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_cost(v.best_cost.unwrap_or(f64::NAN)).bright_magenta().bold(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.improvements.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_finalize(v: &EventVisitor) -> String {
    format!(
        "{} {} tasks on {} vehicles, total cost ({})",
        prefix(Level::INFO, "Planner"),
        v.tasks.unwrap_or(0).to_formatted_string(&Locale::en).white().bold(),
        v.vehicles.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_cost(v.total_cost.unwrap_or(f64::NAN)).bright_green().bold()
    )
}

fn format_warning(level: Level, v: &EventVisitor) -> String {
    let what = v.event.as_deref().unwrap_or("warning");
    match &v.message {
        Some(message) => format!("{} {}: {}", prefix(level, "Planner"), what, message),
        None => format!("{} {}", prefix(level, "Planner"), what),
    }
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

fn format_cost(cost: f64) -> String {
    if cost.is_finite() {
        format!("{:.2}", cost)
    } else {
        "N/A".to_string()
    }
}
