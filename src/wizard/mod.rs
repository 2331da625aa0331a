//! The three-step experiment dialog: basic info, environment variables,
//! resource specs. Navigation is a small state machine; the session ties it
//! to the form, the submission guard and the host signals.

pub mod error;
pub mod mode;
pub mod navigation;
pub mod notify;
pub mod session;

pub use error::WizardError;
pub use mode::{clone_name, FormMode};
pub use navigation::{
    wizard_transition, NavState, WizardAction, WizardNavEffect, WizardNavError, WizardStep,
    WizardTransition, ALL_WIZARD_STEPS,
};
pub use notify::{retry_message, CollectingNotifier, Notice, Notifier};
pub use session::{
    ExperimentWizard, HostSignal, OkOutcome, SubmissionRequest, SubmitOutcome, WizardOptions,
};
