//! `lessonaid ask` — Ask for assistance on one learning unit.

use clap::Args;
use lessonaid_config::AppConfig;
use lessonaid_controller::{AskOutcome, AssistanceController, WidgetProps};
use lessonaid_core::context::Sequence;
use lessonaid_core::state::Phase;
use serde_json::Value;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Course identifier (e.g. course-v1:edX+DemoX+Demo_Course)
    #[arg(long)]
    pub course_id: Option<String>,

    /// Unit identifier
    #[arg(long)]
    pub unit_id: Option<String>,

    /// Identifier of the sequence containing the unit
    #[arg(long)]
    pub sequence_id: Option<String>,

    /// Display name of the sequence
    #[arg(long)]
    pub sequence_name: Option<String>,

    /// Assistance endpoint (overrides config)
    #[arg(long, env = "LESSONAID_ASK_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request message, also sent as the query
    #[arg(short, long)]
    pub message: Option<String>,

    /// Extra context fields as key=value (value parsed as JSON when possible)
    #[arg(long = "extra", value_parser = parse_extra)]
    pub extra: Vec<(String, Value)>,

    /// Print the response view as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    fn into_props(self, config: &AppConfig) -> WidgetProps {
        let mut props = WidgetProps::from_config(config);
        props.course_id = self.course_id;
        props.unit_id = self.unit_id;
        props.api_endpoint = self.endpoint;

        if self.sequence_id.is_some() || self.sequence_name.is_some() {
            props.sequence = Some(Sequence {
                id: self.sequence_id,
                display_name: self.sequence_name,
                ..Sequence::default()
            });
        }

        if let Some(message) = self.message {
            props.request_message = message;
        }

        for (key, value) in self.extra {
            props.extra.insert(key, value);
        }

        props
    }
}

/// Parse `key=value`; the value is JSON if it parses, otherwise a string.
pub fn parse_extra(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub async fn run(args: AskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let json = args.json;
    let controller = AssistanceController::with_http(args.into_props(&config), &config)?;
    tracing::debug!(endpoint = %controller.endpoint(), "Asking for assistance");

    let view = controller.request_view();
    eprintln!("  {}", view.message);
    eprint!("  [{}] ...", view.button_text);
    let outcome = controller.ask().await;
    eprint!("\r{}\r", " ".repeat(view.button_text.len() + 10));

    let response = controller.response_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if !response.error.is_empty() {
        eprintln!("  [Error] {}", response.error);
    } else {
        println!("{}", response.response);
    }

    if let Some(info) = controller.debug_info() {
        eprintln!();
        eprintln!("  Debug info (diagnostics enabled):");
        for line in serde_json::to_string_pretty(&info)?.lines() {
            eprintln!("    {line}");
        }
    }

    if !answered(outcome) {
        std::process::exit(1);
    }
    Ok(())
}

/// Whether the ask ended with an answer on screen.
fn answered(outcome: AskOutcome) -> bool {
    outcome == AskOutcome::Applied(Phase::Answered)
}
