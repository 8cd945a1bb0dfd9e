// ABOUTME: CLI system-check command - records externally observed check results
// and reports how far the candidate can proceed

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::{OutputFormat, SystemCheckArgs};
use crate::sequencer::{PermissionStatus, StepSequencer, SystemCheck, SystemCheckStep};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckLine {
    check: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Build the check state from `--granted` and `--denied` values
pub fn record_results(args: &SystemCheckArgs) -> Result<SystemCheck> {
    let mut check = SystemCheck::new();

    for slug in args.granted.iter().filter(|s| !s.trim().is_empty()) {
        check.record(parse_check(slug)?, PermissionStatus::Granted);
    }

    for entry in &args.denied {
        let (slug, reason) = match entry.split_once(':') {
            Some((slug, reason)) => (slug, reason.trim().to_string()),
            None => (entry.as_str(), String::new()),
        };
        check.record(parse_check(slug)?, PermissionStatus::Denied(reason));
    }

    Ok(check)
}

fn parse_check(slug: &str) -> Result<SystemCheckStep> {
    SystemCheckStep::from_slug(slug).ok_or_else(|| {
        let known: Vec<&str> = SystemCheckStep::all().iter().map(|c| c.slug()).collect();
        anyhow!("Unknown check '{slug}' (expected one of: {})", known.join(", "))
    })
}

pub fn execute(args: &SystemCheckArgs, format: OutputFormat) -> Result<()> {
    let mut sequencer = StepSequencer::new(record_results(args)?);
    while sequencer.advance() {}

    let lines: Vec<CheckLine> = SystemCheckStep::all()
        .iter()
        .map(|c| {
            let status = sequencer.gate().status(*c);
            CheckLine {
                check: c.slug(),
                status: match status {
                    PermissionStatus::Pending => "pending",
                    PermissionStatus::Granted => "granted",
                    PermissionStatus::Denied(_) => "denied",
                },
                reason: status.denial_reason().filter(|r| !r.is_empty()).map(ToString::to_string),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "checks": lines,
                "currentStep": sequencer.current_step(),
                "progress": sequencer.progress(),
                "complete": sequencer.is_complete(),
            })
        ),
        OutputFormat::Text => {
            for line in &lines {
                match &line.reason {
                    Some(reason) => println!("{:<12} {} ({reason})", line.check, line.status),
                    None => println!("{:<12} {}", line.check, line.status),
                }
            }
            println!();
            if sequencer.is_complete() {
                println!("All checks passed");
            } else {
                println!(
                    "Blocked at step {} of {}: {} ({:.0}%)",
                    sequencer.current_step(),
                    sequencer.total_steps(),
                    sequencer.current_title(),
                    sequencer.progress()
                );
            }
        }
    }
    Ok(())
}
