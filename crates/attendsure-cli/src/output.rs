//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use attendsure_domain::{CallOutcome, CallSnapshot, CallStatus, LaunchResponse};
use attendsure_poller::PollReport;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of a launch.
    pub fn format_launch(&self, response: &LaunchResponse) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
            OutputFormat::Quiet => Ok(join_ids(response)),
            OutputFormat::Table => {
                if response.call_ids.is_empty() {
                    return Ok(self.warning("No calls were created."));
                }
                Ok(self.success(&format!(
                    "Launched {} call(s): {}",
                    response.call_ids.len(),
                    join_ids(response).replace('\n', ", ")
                )))
            }
        }
    }

    /// Format a full view of one call.
    pub fn format_snapshot(&self, snapshot: &CallSnapshot) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
            OutputFormat::Quiet => Ok(format!("{} {}", snapshot.call_id(), snapshot.status())),
            OutputFormat::Table => Ok(self.format_snapshot_table(snapshot)),
        }
    }

    /// Format one streamed update while watching.
    ///
    /// Quiet mode only reports calls that reached a terminal status; an empty
    /// string means nothing should be printed.
    pub fn format_update(&self, snapshot: &CallSnapshot) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(snapshot)?),
            OutputFormat::Quiet if snapshot.terminal => {
                Ok(format!("{} {}", snapshot.call_id(), snapshot.status()))
            }
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => {
                let mut line = format!(
                    "[call {}] {}",
                    snapshot.call_id(),
                    self.status(snapshot.status())
                );
                if let Some(reason) = &snapshot.call.fail_reason {
                    line.push_str(&format!(" ({})", reason));
                }
                if snapshot.terminal {
                    if let Some(outcome) = snapshot.outcome.as_ref().filter(|o| !o.is_empty()) {
                        line.push_str(&format!(" - {}", outcome.success_label()));
                        if let Some(reason) = &outcome.reason {
                            line.push_str(&format!(": {}", reason));
                        }
                    }
                }
                Ok(line)
            }
        }
    }

    /// Format an extracted outcome.
    pub fn format_outcome(&self, outcome: Option<&CallOutcome>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcome)?),
            OutputFormat::Quiet => Ok(match outcome.and_then(|o| o.call_success) {
                Some(success) => success.to_string(),
                None => "unknown".to_string(),
            }),
            OutputFormat::Table => match outcome {
                None => Ok(self.warning("No structured data (payload absent or not JSON).")),
                Some(outcome) if outcome.is_empty() => {
                    Ok(self.warning("Payload parsed but carried no recognizable fields."))
                }
                Some(outcome) => {
                    let mut builder = Builder::default();
                    builder.push_record(["Field", "Value"]);
                    push_outcome_rows(&mut builder, outcome);
                    Ok(self.render(builder))
                }
            },
        }
    }

    /// Format final session reports after watching.
    pub fn format_reports(&self, reports: &[PollReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = reports
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "call_id": r.call_id,
                            "state": r.state.as_str(),
                            "snapshot": r.latest_snapshot,
                            "fetch_attempts": r.metrics.fetch_attempts,
                            "fetch_failures": r.metrics.fetch_failures,
                            "elapsed_secs": r.metrics.elapsed.as_secs_f64(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => {
                if reports.is_empty() {
                    return Ok(self.colorize("No calls tracked.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Call", "Tracking", "Status", "Result", "Fetches"]);
                for report in reports {
                    let snapshot = report.latest_snapshot.as_ref();
                    let status = snapshot
                        .map(|s| s.status().to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let result = snapshot
                        .and_then(|s| s.outcome.as_ref())
                        .map(|o| o.success_label())
                        .unwrap_or("-");
                    let fetches = format!(
                        "{} ({} failed)",
                        report.metrics.fetch_attempts, report.metrics.fetch_failures
                    );
                    builder.push_record([
                        report.call_id.to_string(),
                        report.state.to_string(),
                        status,
                        result.to_string(),
                        fetches,
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    fn format_snapshot_table(&self, snapshot: &CallSnapshot) -> String {
        let call = &snapshot.call;
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Call", &call.id.to_string()]);
        builder.push_record(["Status", &call.status.to_string()]);

        if let Some(patient) = &snapshot.patient {
            if let Some(name) = &patient.name {
                builder.push_record(["Patient", name]);
            }
            if let Some(phone) = &patient.phone {
                builder.push_record(["Phone", phone]);
            }
            if let (Some(date), Some(time)) = (&patient.appointment_date, &patient.appointment_time) {
                builder.push_record(["Appointment", &format!("{} {}", date, time)]);
            }
        }
        if let Some(at) = &call.scheduled_at {
            builder.push_record(["Scheduled", at]);
        }
        if let Some(at) = &call.started_at {
            builder.push_record(["Started", at]);
        }
        if let Some(at) = &call.ended_at {
            builder.push_record(["Ended", at]);
        }
        if let Some(duration) = call.duration() {
            builder.push_record(["Duration", &format!("{}s", duration.as_secs())]);
        }
        if let Some(reason) = &call.fail_reason {
            builder.push_record(["Failure", reason]);
        }
        if let Some(summary) = &snapshot.summary {
            builder.push_record(["Summary", summary]);
        }
        if let Some(outcome) = &snapshot.outcome {
            push_outcome_rows(&mut builder, outcome);
        }

        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn status(&self, status: &CallStatus) -> String {
        let color = match status {
            CallStatus::Completed => "green",
            CallStatus::Failed => "red",
            CallStatus::InProgress => "cyan",
            CallStatus::Queued => "yellow",
            CallStatus::Other(_) => "magenta",
        };
        self.colorize(status.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn push_outcome_rows(builder: &mut Builder, outcome: &CallOutcome) {
    builder.push_record(["Result", outcome.success_label()]);
    if let Some(response) = &outcome.patient_response {
        builder.push_record(["Patient response", response]);
    }
    if let Some(reason) = &outcome.reason {
        builder.push_record(["Reason", reason]);
    }
    for (i, question) in outcome.questions.iter().enumerate() {
        builder.push_record([format!("Question {}", i + 1), question.clone()]);
    }
}

fn join_ids(response: &LaunchResponse) -> String {
    response
        .call_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
