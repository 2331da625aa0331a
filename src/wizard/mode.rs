use super::error::WizardError;
use crate::form::ExperimentForm;
use crate::shared::ids::{ExperimentId, ShortIdGenerator};
use crate::spec::{decode_spec, ExperimentSpec};

/// How the wizard was opened. Update and clone both start from an existing
/// spec; update keeps its name fixed, clone derives a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update {
        id: ExperimentId,
        target: ExperimentSpec,
    },
    Clone {
        source: ExperimentSpec,
    },
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Create => "create",
            FormMode::Update { .. } => "update",
            FormMode::Clone { .. } => "clone",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Experiment creation succeeds",
            FormMode::Update { .. } => "Modification succeeds!",
            FormMode::Clone { .. } => "Create a new experiment!",
        }
    }
}

pub fn clone_name(source_name: &str, suffix: &str) -> String {
    format!("{source_name}-{suffix}").to_lowercase()
}

/// Fill a freshly reset form for `mode`. The spec is decoded before anything
/// is written, so on error the form is still blank.
pub(crate) fn initialize_form(
    form: &mut ExperimentForm,
    mode: &FormMode,
    ids: &dyn ShortIdGenerator,
    suffix_len: usize,
) -> Result<(), WizardError> {
    match mode {
        FormMode::Create => Ok(()),
        FormMode::Update { target, .. } => {
            let decoded = decode_spec(target)?;
            form.lock_name(target.meta.name.clone());
            form.apply_decoded(decoded);
            Ok(())
        }
        FormMode::Clone { source } => {
            let decoded = decode_spec(source)?;
            let suffix = ids.short_id(suffix_len)?;
            form.unlock_name(clone_name(&source.meta.name, &suffix));
            form.apply_decoded(decoded);
            Ok(())
        }
    }
}
