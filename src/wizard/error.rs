use super::navigation::{WizardNavError, WizardStep};
use crate::form::FormError;
use crate::shared::ids::IdError;
use crate::spec::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("cannot load experiment into the form: {0}")]
    Decode(#[from] DecodeError),
    #[error("cannot derive clone name: {0}")]
    ShortId(#[from] IdError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Navigation(#[from] WizardNavError),
    #[error("submit is only available on the resource_specs step, wizard is on {step}")]
    NotOnFinalStep { step: WizardStep },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no submission is in flight")]
    NoSubmissionInFlight,
    #[error("wizard is closed")]
    Closed,
}
