// ABOUTME: CLI draft commands - show, set, validate, save, reset, steps, sync-totals
//
// Every command loads the draft the same way the TUI does and writes
// through the same form, so both surfaces see identical state.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::{OutputFormat, ResetArgs, SetArgs, ValidateArgs};
use crate::models::AssessmentDraft;
use crate::sequencer::StepSequencer;
use crate::storage::KeyValueStore;
use crate::wizard::{AssessmentForm, DraftField, DraftUpdate, FieldError, WizardStep};

type Form = AssessmentForm<Box<dyn KeyValueStore>>;

/// Completion of one wizard step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub number: usize,
    pub title: &'static str,
    pub complete: bool,
    pub requirement: &'static str,
}

impl StepReport {
    fn for_draft(draft: &AssessmentDraft, step: WizardStep) -> Self {
        Self {
            number: step.number(),
            title: step.title(),
            complete: draft.validate_step(step.number()),
            requirement: step.requirement(),
        }
    }
}

/// Everything `show` reports about the draft
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary<'a> {
    pub key: &'a str,
    pub draft: &'a AssessmentDraft,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

pub fn step_reports(draft: &AssessmentDraft) -> Vec<StepReport> {
    WizardStep::all()
        .iter()
        .map(|step| StepReport::for_draft(draft, *step))
        .collect()
}

/// Furthest step the sequencer reaches when advancing from the start
pub fn reachable_step(draft: &AssessmentDraft) -> StepSequencer<AssessmentDraft> {
    let mut sequencer = StepSequencer::new(draft.clone());
    while sequencer.advance() {}
    sequencer
}

/// Parse a CLI value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Build an update for the named field from raw CLI text.
/// Text that parses as a JSON scalar but fits only as a string (e.g. `123`
/// for `jobRole`) is taken verbatim.
pub fn parse_update(name: &str, raw: &str) -> Result<DraftUpdate, FieldError> {
    let field: DraftField = name.parse()?;
    let value = parse_value(raw);
    if value.is_string() {
        return DraftUpdate::from_json(field, value);
    }

    DraftUpdate::from_json(field, value).or_else(|err| {
        DraftUpdate::from_json(field, Value::String(raw.to_string())).map_err(|_| err)
    })
}

pub fn show(form: &Form, format: OutputFormat) -> Result<()> {
    let draft = form.draft();
    let summary = DraftSummary {
        key: form.key(),
        draft,
        complete: form.is_complete(),
        load_error: form.load_error().map(ToString::to_string),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            if let Some(e) = &summary.load_error {
                println!("warning: saved draft could not be restored ({e}); showing defaults");
            }
            println!("Job role:     {}", display_or_dash(&draft.job_role));
            println!("Skills:       {}", display_or_dash(&draft.skills.join(", ")));
            println!("Experience:   {}", draft.experience_range);
            println!("Difficulty:   {}", draft.difficulty);
            println!("Topics:       {}", draft.topics.len());
            for topic in &draft.topics {
                let kinds: Vec<String> = topic
                    .question_types
                    .enabled()
                    .map(|(kind, cfg)| format!("{} x{}", kind.label(), cfg.count))
                    .collect();
                println!("  - {} ({})", topic.name, display_or_dash(&kinds.join(", ")));
            }
            println!("Candidates:   {}", draft.candidates.len());
            for candidate in &draft.candidates {
                println!("  - {candidate}");
            }
            println!(
                "Totals:       {} questions, {} min",
                draft.total_questions, draft.estimated_duration
            );
            println!("Complete:     {}", if summary.complete { "yes" } else { "no" });
        }
    }
    Ok(())
}

pub fn set(form: &mut Form, args: SetArgs, format: OutputFormat) -> Result<()> {
    let update = parse_update(&args.field, &args.value)
        .with_context(|| format!("Cannot set '{}'", args.field))?;
    let field = update.field();

    form.update_field(update)
        .with_context(|| format!("Failed to persist '{field}'"))?;
    info!("Set draft field {} from CLI", field);

    match format {
        OutputFormat::Json => {
            let value = serde_json::to_value(form.draft())?;
            let updated = value.get(field.as_str()).cloned().unwrap_or(Value::Null);
            println!("{}", serde_json::json!({ "field": field.as_str(), "value": updated }));
        }
        OutputFormat::Text => println!("Updated {field}"),
    }
    Ok(())
}

pub fn validate(form: &Form, args: &ValidateArgs, format: OutputFormat) -> Result<()> {
    let reports = match args.step {
        Some(number) => {
            let Some(step) = WizardStep::from_number(number) else {
                bail!("No step {number}; steps are 1-{}", WizardStep::total());
            };
            vec![StepReport::for_draft(form.draft(), step)]
        }
        None => step_reports(form.draft()),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => print_reports(&reports),
    }

    let incomplete: Vec<String> = reports
        .iter()
        .filter(|r| !r.complete)
        .map(|r| r.number.to_string())
        .collect();
    if !incomplete.is_empty() {
        bail!("Incomplete step(s): {}", incomplete.join(", "));
    }
    Ok(())
}

pub fn save(form: &mut Form, format: OutputFormat) -> Result<()> {
    let receipt = form.save_draft().context("Failed to save draft")?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "key": receipt.key,
                "savedAt": receipt.saved_at.to_rfc3339(),
                "bytes": receipt.bytes,
            })
        ),
        OutputFormat::Text => println!(
            "Saved draft '{}' ({} bytes) at {}",
            receipt.key,
            receipt.bytes,
            receipt.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
    }
    Ok(())
}

pub fn reset(form: &mut Form, args: &ResetArgs, format: OutputFormat) -> Result<()> {
    if !args.yes {
        bail!("Refusing to discard the draft without --yes");
    }
    form.reset_form().context("Failed to reset draft")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "reset": true, "key": form.key() })),
        OutputFormat::Text => println!("Draft '{}' discarded", form.key()),
    }
    Ok(())
}

pub fn steps(form: &Form, format: OutputFormat) -> Result<()> {
    let reports = step_reports(form.draft());
    let sequencer = reachable_step(form.draft());

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "steps": reports,
                "reachableStep": sequencer.current_step(),
                "progress": sequencer.progress(),
            })
        ),
        OutputFormat::Text => {
            print_reports(&reports);
            println!();
            println!(
                "Reachable: step {} of {} ({:.0}%)",
                sequencer.current_step(),
                sequencer.total_steps(),
                sequencer.progress()
            );
        }
    }
    Ok(())
}

pub fn sync_totals(form: &mut Form, format: OutputFormat) -> Result<()> {
    form.sync_derived_totals().context("Failed to persist totals")?;
    let draft = form.draft();

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "totalQuestions": draft.total_questions,
                "estimatedDuration": draft.estimated_duration,
            })
        ),
        OutputFormat::Text => println!(
            "{} questions, about {} minutes",
            draft.total_questions, draft.estimated_duration
        ),
    }
    Ok(())
}

fn print_reports(reports: &[StepReport]) {
    for report in reports {
        let mark = if report.complete { "\u{2713}" } else { "\u{2717}" };
        if report.complete {
            println!("{mark} {}. {}", report.number, report.title);
        } else {
            println!("{mark} {}. {:<12} {}", report.number, report.title, report.requirement);
        }
    }
}

fn display_or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Topic, TopicQuestionKind};
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn form() -> Form {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        AssessmentForm::load(store, "assessmentDraft")
    }

    #[test]
    fn test_parse_value_falls_back_to_string() {
        assert_eq!(parse_value("[\"a\",\"b\"]"), serde_json::json!(["a", "b"]));
        assert_eq!(parse_value("Data Engineer"), Value::String("Data Engineer".into()));
        assert_eq!(parse_value("\"quoted\""), Value::String("quoted".into()));
    }

    #[test]
    fn test_set_writes_through() {
        let mut form = form();
        let args = SetArgs {
            field: "skills".into(),
            value: "[\"SQL\",\"Python\"]".into(),
        };
        set(&mut form, args, OutputFormat::Text).unwrap();

        assert_eq!(form.draft().skills, vec!["SQL", "Python"]);
        let raw = form.store().get("assessmentDraft").unwrap().unwrap();
        assert!(raw.contains("Python"));
    }

    #[test]
    fn test_set_rejects_unknown_and_mistyped() {
        let mut form = form();
        let unknown = SetArgs {
            field: "salary".into(),
            value: "1".into(),
        };
        assert!(set(&mut form, unknown, OutputFormat::Text).is_err());

        let mistyped = SetArgs {
            field: "skills".into(),
            value: "42".into(),
        };
        assert!(set(&mut form, mistyped, OutputFormat::Text).is_err());
        assert!(form.draft().skills.is_empty());
    }

    #[test]
    fn test_set_takes_json_scalars_as_text_for_string_fields() {
        let mut form = form();
        for raw in ["123", "true", "null"] {
            let args = SetArgs {
                field: "jobRole".into(),
                value: raw.into(),
            };
            set(&mut form, args, OutputFormat::Text).unwrap();
            assert_eq!(form.draft().job_role, raw);
        }

        assert_eq!(
            parse_update("totalQuestions", "12").unwrap(),
            DraftUpdate::TotalQuestions(12)
        );
        assert!(parse_update("totalQuestions", "many").is_err());
    }

    #[test]
    fn test_validate_reports_failure() {
        let form = form();
        assert!(validate(&form, &ValidateArgs { step: Some(1) }, OutputFormat::Text).is_err());
        assert!(validate(&form, &ValidateArgs { step: Some(3) }, OutputFormat::Text).is_ok());
        assert!(validate(&form, &ValidateArgs { step: Some(9) }, OutputFormat::Text).is_err());
    }

    #[test]
    fn test_reset_needs_yes() {
        let mut form = form();
        form.update_field(DraftUpdate::JobRole("Chef".into())).unwrap();

        assert!(reset(&mut form, &ResetArgs { yes: false }, OutputFormat::Text).is_err());
        assert_eq!(form.draft().job_role, "Chef");

        reset(&mut form, &ResetArgs { yes: true }, OutputFormat::Text).unwrap();
        assert_eq!(form.draft(), &AssessmentDraft::default());
        assert!(!form.store().contains("assessmentDraft").unwrap());
    }

    #[test]
    fn test_reachable_step_stops_at_first_gap() {
        let mut draft = AssessmentDraft::default();
        draft.job_role = "Chef".into();
        assert_eq!(reachable_step(&draft).current_step(), 2);

        draft.skills = vec!["a".into(), "b".into()];
        draft.topics = vec![Topic::new("t").with_type(TopicQuestionKind::Coding, 2)];
        assert_eq!(reachable_step(&draft).current_step(), 5);
    }

    #[test]
    fn test_step_reports_cover_all_steps() {
        let reports = step_reports(&AssessmentDraft::default());
        let complete: Vec<bool> = reports.iter().map(|r| r.complete).collect();
        assert_eq!(complete, vec![false, false, true, false, false]);
    }
}
