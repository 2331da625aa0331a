use crate::config::{load_settings, ConfigError, Settings};
use crate::form::{FormSnapshot, StandardRules};
use crate::shared::ids::{RandomShortIds, ShortIdGenerator};
use crate::spec::ExperimentSpec;
use crate::wizard::{
    ExperimentWizard, FormMode, WizardError, WizardNavError, WizardStep, ALL_WIZARD_STEPS,
};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FLAG: &str = "--config";

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

/// Pull a global `--config <path>` (or `--config=<path>`) out of `args`.
pub fn split_config_arg(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>), String> {
    let mut config = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == CONFIG_FLAG {
            let path = iter
                .next()
                .ok_or_else(|| format!("{CONFIG_FLAG} requires a path"))?;
            config = Some(PathBuf::from(path));
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }
    Ok((config, rest))
}

pub fn load_cli_settings(config: Option<&Path>) -> Result<Settings, String> {
    load_settings(config).map_err(map_config_err)
}

pub fn read_draft(path: &Path) -> Result<FormSnapshot, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read draft {}: {e}", path.display()))?;
    serde_yaml::from_str(&raw).map_err(|e| format!("invalid draft {}: {e}", path.display()))
}

pub fn read_spec(path: &Path) -> Result<ExperimentSpec, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read spec {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid spec {}: {e}", path.display()))
}

pub fn open_wizard(mode: FormMode, settings: &Settings) -> Result<ExperimentWizard, String> {
    open_wizard_with_ids(mode, settings, &RandomShortIds)
}

pub fn open_wizard_with_ids(
    mode: FormMode,
    settings: &Settings,
    ids: &dyn ShortIdGenerator,
) -> Result<ExperimentWizard, String> {
    ExperimentWizard::open(
        mode,
        settings.wizard_options(),
        Box::new(StandardRules),
        ids,
        settings.event_log(),
    )
    .map_err(|e| e.to_string())
}

/// Load a draft into a create-mode wizard. A draft without a namespace keeps
/// the configured default.
pub fn open_draft_wizard(path: &Path, settings: &Settings) -> Result<ExperimentWizard, String> {
    let mut draft = read_draft(path)?;
    let mut wizard = open_wizard(FormMode::Create, settings)?;
    if draft.namespace.trim().is_empty() {
        draft.namespace = wizard.form().namespace().to_string();
    }
    wizard
        .form_mut()
        .load_snapshot(draft)
        .map_err(|e| e.to_string())?;
    Ok(wizard)
}

/// Press "Next step" until the wizard sits on its last step.
pub fn walk_to_final_step(wizard: &mut ExperimentWizard) -> Result<(), String> {
    while !wizard.step().is_final() {
        match wizard.next() {
            Ok(_) => {}
            Err(WizardError::Navigation(WizardNavError::Blocked { step })) => {
                return Err(blocked_report(wizard, step));
            }
            Err(err) => return Err(err.to_string()),
        }
    }
    Ok(())
}

pub fn blocked_report(wizard: &ExperimentWizard, step: WizardStep) -> String {
    let mut lines = vec![format!("step {step} has invalid fields:")];
    lines.extend(step_issue_lines(wizard, step));
    lines.join("\n")
}

pub fn step_issue_lines(wizard: &ExperimentWizard, step: WizardStep) -> Vec<String> {
    let form = wizard.form();
    match step {
        WizardStep::BasicInfo => form
            .basic_info_issues()
            .iter()
            .map(|issue| format!("  - {issue}"))
            .collect(),
        WizardStep::EnvironmentVariables => form
            .envs()
            .all_issues()
            .into_iter()
            .map(|(index, issue)| entry_issue_line("env", index, issue))
            .collect(),
        WizardStep::ResourceSpecs => form
            .specs()
            .all_issues()
            .into_iter()
            .map(|(index, issue)| entry_issue_line("spec", index, issue))
            .collect(),
    }
}

fn entry_issue_line(
    kind: &str,
    index: Option<usize>,
    issue: &impl std::fmt::Display,
) -> String {
    match index {
        Some(index) => format!("  - {kind} entry {index}: {issue}"),
        None => format!("  - {issue}"),
    }
}

/// Per-step validation summary. The second value is true when some step
/// would stop the wizard.
pub fn validation_report(wizard: &ExperimentWizard) -> (String, bool) {
    let mut lines = Vec::new();
    let mut blocked_any = false;
    for step in ALL_WIZARD_STEPS {
        let issues = step_issue_lines(wizard, step);
        let blocked = wizard.is_step_blocked(step);
        blocked_any |= blocked;
        if issues.is_empty() {
            lines.push(format!("{step}: ok"));
            continue;
        }
        let note = if blocked { "" } else { " (not blocking)" };
        lines.push(format!("{step}: {} issue(s){note}", issues.len()));
        lines.extend(issues);
    }
    (lines.join("\n"), blocked_any)
}
