use crate::api::{ExperimentApi, HttpExperimentApi};
use crate::app::command_support::{open_draft_wizard, open_wizard, read_spec, walk_to_final_step};
use crate::config::Settings;
use crate::shared::ids::ExperimentId;
use crate::wizard::{CollectingNotifier, ExperimentWizard, FormMode, SubmitOutcome};
use std::path::Path;

pub fn cmd_create(args: &[String], settings: &Settings) -> Result<String, String> {
    let [path] = args else {
        return Err("usage: expform create <draft.yaml>".to_string());
    };
    let wizard = open_draft_wizard(Path::new(path), settings)?;
    let api = HttpExperimentApi::from_settings(settings);
    submit_wizard(wizard, &api)
}

pub fn cmd_update(args: &[String], settings: &Settings) -> Result<String, String> {
    let [id, path] = args else {
        return Err("usage: expform update <id> <spec.json>".to_string());
    };
    let id = ExperimentId::parse(id)?;
    let target = read_spec(Path::new(path))?;
    let wizard = open_wizard(FormMode::Update { id, target }, settings)?;
    let api = HttpExperimentApi::from_settings(settings);
    submit_wizard(wizard, &api)
}

pub fn cmd_clone(args: &[String], settings: &Settings) -> Result<String, String> {
    let [path] = args else {
        return Err("usage: expform clone <spec.json>".to_string());
    };
    let source = read_spec(Path::new(path))?;
    let wizard = open_wizard(FormMode::Clone { source }, settings)?;
    let api = HttpExperimentApi::from_settings(settings);
    submit_wizard(wizard, &api)
}

/// Walk to the last step and press "Submit" once. Notices become the output
/// lines; a failed submission is returned as the error.
pub fn submit_wizard(
    mut wizard: ExperimentWizard,
    api: &dyn ExperimentApi,
) -> Result<String, String> {
    walk_to_final_step(&mut wizard)?;
    let notifier = CollectingNotifier::new();
    let outcome = wizard
        .submit(api, &notifier)
        .map_err(|e| e.to_string())?;

    let mut lines: Vec<String> = notifier
        .take()
        .iter()
        .map(|notice| notice.message().to_string())
        .collect();
    match outcome {
        SubmitOutcome::Submitted(submitted) => {
            lines.push(format!("name={}", wizard.form().experiment_name()));
            if let Some(id) = submitted.experiment_id {
                lines.push(format!("experiment_id={id}"));
            }
            if let Some(status) = submitted.status {
                lines.push(format!("status={status}"));
            }
            Ok(lines.join("\n"))
        }
        SubmitOutcome::Failed(message) => {
            if lines.is_empty() {
                lines.push(message);
            }
            Err(lines.join("\n"))
        }
    }
}
