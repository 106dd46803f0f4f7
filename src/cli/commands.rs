use crate::api::client::HttpCareerApi;
use crate::career::career_model::{CareerDraft, CareerStatus};
use crate::cli::config::{AppConfig, Cli, resolve_base_url, resolve_draft_dir, resolve_session};
use crate::draft::draft_store::DraftStore;
use crate::draft::store::FileStore;
use crate::trace::logger::TraceLogger;
use crate::validate::step_validator::{StepCheck, StepValidator};
use crate::validate::schema::ValidationSchema;
use crate::wizard::controller::WizardController;
use crate::wizard::wizard_model::{NotificationKind, STEPS, WizardEvent, WizardMode};

// ============================================================================
// Wizard setup
// ============================================================================

/// Mount a wizard over the file-backed draft for `record`.
pub fn open_wizard(record: Option<&str>, cli: &Cli, config: &AppConfig) -> WizardController {
    let (mode, career) = match record {
        Some(id) => (
            WizardMode::Edit,
            Some(CareerDraft {
                id: Some(id.to_string()),
                ..CareerDraft::default()
            }),
        ),
        None => (WizardMode::Add, None),
    };

    let store = FileStore::new(resolve_draft_dir(cli, config));
    let api = HttpCareerApi::new(&resolve_base_url(cli, config));
    let tracer = match &config.storage.trace_file {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let mut wizard = WizardController::new(
        mode,
        career,
        resolve_session(cli, config),
        Box::new(store),
        Box::new(api),
    )
    .with_settings(config.wizard.clone())
    .with_tracer(tracer);
    wizard.mount();
    wizard
}

pub fn parse_status(value: &str) -> Result<CareerStatus, String> {
    match value.to_ascii_lowercase().as_str() {
        "active" | "publish" => Ok(CareerStatus::Active),
        "inactive" | "draft" | "unpublished" => Ok(CareerStatus::Inactive),
        other => Err(format!(
            "unknown status '{}' (expected active or inactive)",
            other
        )),
    }
}

// ============================================================================
// inspect subcommand
// ============================================================================

pub fn cmd_inspect(
    record: Option<&str>,
    cli: &Cli,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let wizard = open_wizard(record, cli, config);
    let values = wizard.values();

    println!("Draft key: {}", wizard.storage_key());
    println!(
        "Step: {} ({})",
        wizard.current_step().index(),
        wizard.current_step().title()
    );
    println!(
        "Job title: {}",
        if values.job_title.is_empty() { "(none)" } else { values.job_title.as_str() }
    );
    println!(
        "Questions: {} pre-screen, {} interview",
        values.cv_questions.len(),
        values.ai_question_total()
    );

    let validator = StepValidator::new(ValidationSchema::new(wizard.settings().min_ai_questions));
    let mut form = wizard.form().clone();
    for step in STEPS {
        let check = validator.validate_step(&mut form, step);
        let state = match &check {
            StepCheck::Valid => "valid".to_string(),
            StepCheck::SalaryRange => "invalid (salary range)".to_string(),
            StepCheck::Invalid { fields, .. } => {
                let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
                format!("invalid ({})", names.join(", "))
            }
        };
        println!(
            "  [{}] {} - {}{}",
            step.index(),
            step.title(),
            state,
            if wizard.is_step_empty(step) { ", empty" } else { "" }
        );
    }

    if cli.verbose > 1 {
        println!("{}", serde_json::to_string_pretty(values)?);
    }
    Ok(())
}

// ============================================================================
// validate subcommand
// ============================================================================

/// Validate all steps and return whether the draft could be published.
pub fn cmd_validate(
    record: Option<&str>,
    cli: &Cli,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut wizard = open_wizard(record, cli, config);

    if wizard.validate_all_steps() {
        println!("All steps valid");
        return Ok(true);
    }

    println!(
        "Stopped at step {} ({})",
        wizard.current_step().index(),
        wizard.current_step().title()
    );
    for (field, message) in wizard.form().errors() {
        println!("  {}: {}", field.name(), message);
    }
    Ok(false)
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Request the final save, confirm it, then wait out the redirect delay.
pub fn cmd_submit(
    record: Option<&str>,
    status: &str,
    cli: &Cli,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let status = parse_status(status)?;
    let mut wizard = open_wizard(record, cli, config);

    if !wizard.request_final_save(status) {
        report_events(&wizard.take_events(), cli.verbose);
        return Ok(false);
    }

    if cli.verbose > 0 {
        eprintln!(
            "Submitting {} as {}...",
            wizard.storage_key(),
            status.as_str()
        );
    }

    let outcome = wizard.confirm_save(status);
    report_events(&wizard.take_events(), cli.verbose);
    outcome?;

    std::thread::sleep(std::time::Duration::from_millis(
        wizard.settings().redirect_delay_ms,
    ));
    wizard.tick();
    report_events(&wizard.take_events(), cli.verbose);
    wizard.unmount();
    Ok(true)
}

// ============================================================================
// clear subcommand
// ============================================================================

pub fn cmd_clear(
    record: Option<&str>,
    cli: &Cli,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(resolve_draft_dir(cli, config));
    let drafts = DraftStore::new(Box::new(store), record);
    drafts.clear()?;
    println!("Cleared {}", drafts.key());
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn report_events(events: &[WizardEvent], verbose: u8) {
    for event in events {
        match event {
            WizardEvent::Notify(n) => match &n.kind {
                NotificationKind::StepError(step) => {
                    eprintln!("[step {}] {}", step.index(), n.message)
                }
                NotificationKind::Failure => eprintln!("Error: {}", n.message),
                NotificationKind::Success => println!("{}", n.message),
            },
            WizardEvent::Redirect { route } => println!("Redirect: {}", route),
            other if verbose > 1 => eprintln!("  {:?}", other),
            _ => {}
        }
    }
}
