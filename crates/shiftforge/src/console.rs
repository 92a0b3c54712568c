//! Colorful console output for engine events.
//!
//! Provides a custom `tracing` layer that formats solve, analysis and
//! simulation events with colors. Enabled with the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVES: [&str; 3] = [
    "shiftforge=info",
    "shiftforge_solver=info",
    "shiftforge_analysis=info",
];

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// directives are honored on top of the defaults.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in DEFAULT_DIRECTIVES {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        // Another subscriber may already be installed by the host application.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EngineConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats engine events with colors.
pub struct EngineConsoleLayer;

impl<S: Subscriber> Layer<S> for EngineConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("shiftforge") {
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

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    objective: Option<String>,
    roster: Option<String>,
    variables: Option<u64>,
    constraints: Option<u64>,
    workers: Option<u64>,
    seed: Option<u64>,
    time_limit_ms: Option<u64>,
    nodes: Option<u64>,
    duration_ms: Option<u64>,
    assignments: Option<u64>,
    conflicts: Option<u64>,
    recommendations: Option<u64>,
    changes: Option<u64>,
    shortfall: Option<bool>,
    success: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "status" => self.status = Some(s.trim_matches('"').to_string()),
            "objective" => self.objective = Some(s),
            "roster" => self.roster = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "roster" => self.roster = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "workers" => self.workers = Some(value),
            "seed" => self.seed = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "nodes" => self.nodes = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "assignments" => self.assignments = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "recommendations" => self.recommendations = Some(value),
            "changes" => self.changes = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "objective" {
            self.objective = Some(value.to_string());
        } else {
            self.record_u64(field, value.max(0) as u64);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "shortfall" => self.shortfall = Some(value),
            "success" => self.success = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "roster_generated" => format_roster(v),
        "analysis_end" => format_analysis(v),
        "simulation_end" => format_simulation(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} variables ({}), constraints ({}), workers ({}), seed ({}), time limit ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        count(v.variables).bright_yellow(),
        count(v.constraints).bright_yellow(),
        count(v.workers).bright_yellow(),
        v.seed.unwrap_or(0).bright_magenta(),
        format_duration_ms(v.time_limit_ms.unwrap_or(0)).yellow()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let objective = v
        .objective
        .as_deref()
        .map(|s| s.trim_start_matches("Some(").trim_end_matches(')'))
        .unwrap_or("None");
    let status = if status == "OPTIMAL" || status == "FEASIBLE" {
        status.bright_green().bold().to_string()
    } else {
        status.bright_red().bold().to_string()
    };

    format!(
        "{} {} {} Solving ended: status ({}), objective ({}), nodes ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        status,
        objective.white().bold(),
        count(v.nodes).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_roster(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} with {} assignments",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Roster]".bright_cyan(),
        v.roster.as_deref().unwrap_or("roster").white().bold(),
        count(v.assignments).bright_yellow()
    )
}

fn format_analysis(v: &EventVisitor) -> String {
    let verdict = if v.shortfall.unwrap_or(false) {
        "staffing shortfall".bright_red().bold().to_string()
    } else {
        "no staffing shortfall".bright_green().to_string()
    };
    format!(
        "{} {} {} {}: conflicts ({}), recommendations ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Analysis]".bright_cyan(),
        verdict,
        count(v.conflicts).bright_yellow(),
        count(v.recommendations).bright_yellow()
    )
}

fn format_simulation(v: &EventVisitor) -> String {
    let verdict = if v.success.unwrap_or(false) {
        "gaps closed".bright_green().bold().to_string()
    } else {
        "gaps remain".bright_red().bold().to_string()
    };
    format!(
        "{} {} {} {} after {} change(s)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Simulation]".bright_cyan(),
        verdict,
        count(v.changes).bright_yellow()
    )
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("incumbent".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }
}
