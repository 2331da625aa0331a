use super::error::WizardError;
use super::mode::{initialize_form, FormMode};
use super::navigation::{
    wizard_transition, NavState, WizardAction, WizardNavEffect, WizardNavError, WizardStep,
    ALL_WIZARD_STEPS,
};
use super::notify::{retry_message, Notifier};
use crate::api::{ApiError, ExperimentApi, SubmittedExperiment};
use crate::config::DEFAULT_CLONE_SUFFIX_LENGTH;
use crate::form::{ExperimentForm, FormOptions, ListKind, ValidationRules};
use crate::shared::ids::{ExperimentId, ShortIdGenerator};
use crate::shared::logging::EventLog;
use crate::spec::{encode_form, ExperimentSpec};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOptions {
    pub form: FormOptions,
    pub clone_suffix_length: usize,
    pub gate_basic_info: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            form: FormOptions::default(),
            clone_suffix_length: DEFAULT_CLONE_SUFFIX_LENGTH,
            gate_basic_info: false,
        }
    }
}

/// Signals for whatever hosts the wizard (a list page, the CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    ModalVisibilityChanged(bool),
    RefreshList(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    Create(ExperimentSpec),
    Update {
        id: ExperimentId,
        spec: ExperimentSpec,
    },
}

impl SubmissionRequest {
    pub fn spec(&self) -> &ExperimentSpec {
        match self {
            SubmissionRequest::Create(spec) | SubmissionRequest::Update { spec, .. } => spec,
        }
    }

    pub fn dispatch(&self, api: &dyn ExperimentApi) -> Result<SubmittedExperiment, ApiError> {
        match self {
            SubmissionRequest::Create(spec) => api.create_experiment(spec),
            SubmissionRequest::Update { id, spec } => api.update_experiment(id, spec),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(SubmittedExperiment),
    /// The request failed; the wizard stays open on the last step.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OkOutcome {
    Advanced(WizardStep),
    Submitted(SubmitOutcome),
}

/// One open experiment dialog: mode, form, current step and the submission
/// guard. Host-facing signals queue up until `drain_signals`.
#[derive(Debug)]
pub struct ExperimentWizard {
    mode: FormMode,
    form: ExperimentForm,
    nav: NavState,
    options: WizardOptions,
    visible: bool,
    in_flight: bool,
    signals: Vec<HostSignal>,
    log: EventLog,
}

impl ExperimentWizard {
    pub fn open(
        mode: FormMode,
        options: WizardOptions,
        rules: Box<dyn ValidationRules>,
        ids: &dyn ShortIdGenerator,
        log: EventLog,
    ) -> Result<Self, WizardError> {
        let form = ExperimentForm::new(rules, options.form.clone());
        let mut wizard = Self {
            mode,
            form,
            nav: NavState::first(),
            options,
            visible: false,
            in_flight: false,
            signals: Vec::new(),
            log,
        };
        wizard.restart(ids)?;
        Ok(wizard)
    }

    /// Reset the form and step, re-apply the mode and show the dialog.
    pub fn restart(&mut self, ids: &dyn ShortIdGenerator) -> Result<(), WizardError> {
        self.nav = NavState::first();
        self.in_flight = false;
        self.form.reset();
        if let Err(err) = initialize_form(
            &mut self.form,
            &self.mode,
            ids,
            self.options.clone_suffix_length,
        ) {
            self.log.error(
                "wizard.decode_failed",
                &[
                    ("mode", Value::from(self.mode.as_str())),
                    ("error", Value::from(err.to_string())),
                ],
            );
            return Err(err);
        }
        self.set_visible(true);
        self.log.info(
            "wizard.opened",
            &[
                ("mode", Value::from(self.mode.as_str())),
                ("name", Value::from(self.form.experiment_name())),
            ],
        );
        Ok(())
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &ExperimentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ExperimentForm {
        &mut self.form
    }

    pub fn step(&self) -> WizardStep {
        self.nav.step
    }

    pub fn ok_text(&self) -> &'static str {
        self.nav.ok_text()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Whether `step` currently refuses to let the user move on.
    pub fn is_step_blocked(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::BasicInfo => {
                self.options.gate_basic_info && !self.form.basic_info_issues().is_empty()
            }
            WizardStep::EnvironmentVariables => self.form.is_list_invalid(ListKind::Envs),
            WizardStep::ResourceSpecs => self.form.is_list_invalid(ListKind::Specs),
        }
    }

    /// Move forward one step. On the last step this only reports that a
    /// submission is due; use `submit` or `begin_submit` for that.
    pub fn next(&mut self) -> Result<WizardNavEffect, WizardError> {
        self.ensure_visible()?;
        let step = self.nav.step;
        let blocked = self.is_step_blocked(step);
        match wizard_transition(&mut self.nav, WizardAction::Next, blocked) {
            Ok(transition) => {
                if let WizardNavEffect::OpenStep(next) = transition.effect {
                    self.log.info(
                        "wizard.step_advanced",
                        &[
                            ("from", Value::from(step.as_str())),
                            ("to", Value::from(next.as_str())),
                        ],
                    );
                }
                Ok(transition.effect)
            }
            Err(err) => {
                self.log.warn(
                    "wizard.step_blocked",
                    &[("step", Value::from(step.as_str()))],
                );
                Err(err.into())
            }
        }
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_visible()?;
        wizard_transition(&mut self.nav, WizardAction::Back, false)?;
        Ok(self.nav.step)
    }

    /// Validate every step, encode the form and mark a request as in flight.
    /// The caller sends the request and reports back through `finish_submit`.
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, WizardError> {
        self.ensure_visible()?;
        if self.in_flight {
            return Err(WizardError::SubmissionInFlight);
        }
        if !self.nav.step.is_final() {
            return Err(WizardError::NotOnFinalStep {
                step: self.nav.step,
            });
        }
        if let Some(step) = ALL_WIZARD_STEPS
            .into_iter()
            .find(|step| self.is_step_blocked(*step))
        {
            self.log.warn(
                "wizard.step_blocked",
                &[("step", Value::from(step.as_str()))],
            );
            return Err(WizardNavError::Blocked { step }.into());
        }

        let spec = encode_form(&self.form);
        let request = match &self.mode {
            FormMode::Create | FormMode::Clone { .. } => SubmissionRequest::Create(spec),
            FormMode::Update { id, .. } => SubmissionRequest::Update {
                id: id.clone(),
                spec,
            },
        };
        self.in_flight = true;
        self.log.info(
            "wizard.submit_started",
            &[
                ("mode", Value::from(self.mode.as_str())),
                ("name", Value::from(request.spec().meta.name.as_str())),
            ],
        );
        Ok(request)
    }

    pub fn finish_submit(
        &mut self,
        outcome: Result<SubmittedExperiment, ApiError>,
        notifier: &dyn Notifier,
    ) -> Result<SubmitOutcome, WizardError> {
        if !self.in_flight {
            return Err(WizardError::NoSubmissionInFlight);
        }
        self.in_flight = false;

        match outcome {
            Ok(submitted) => {
                self.signals.push(HostSignal::RefreshList(true));
                notifier.success(self.mode.success_message());
                self.log.info(
                    "wizard.submit_succeeded",
                    &[
                        ("mode", Value::from(self.mode.as_str())),
                        (
                            "experiment_id",
                            submitted
                                .experiment_id
                                .clone()
                                .map(Value::from)
                                .unwrap_or(Value::Null),
                        ),
                    ],
                );
                self.set_visible(false);
                Ok(SubmitOutcome::Submitted(submitted))
            }
            Err(err) => {
                let message = retry_message(&err);
                notifier.error(&message);
                self.log.error(
                    "wizard.submit_failed",
                    &[
                        ("mode", Value::from(self.mode.as_str())),
                        ("error", Value::from(err.to_string())),
                    ],
                );
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    pub fn submit(
        &mut self,
        api: &dyn ExperimentApi,
        notifier: &dyn Notifier,
    ) -> Result<SubmitOutcome, WizardError> {
        let request = self.begin_submit()?;
        let outcome = request.dispatch(api);
        self.finish_submit(outcome, notifier)
    }

    /// The primary button: advance, or submit on the last step.
    pub fn handle_ok(
        &mut self,
        api: &dyn ExperimentApi,
        notifier: &dyn Notifier,
    ) -> Result<OkOutcome, WizardError> {
        if self.nav.step.is_final() {
            return self.submit(api, notifier).map(OkOutcome::Submitted);
        }
        self.next()?;
        Ok(OkOutcome::Advanced(self.nav.step))
    }

    pub fn close(&mut self) {
        if !self.visible {
            return;
        }
        self.set_visible(false);
        self.log.info(
            "wizard.closed",
            &[("mode", Value::from(self.mode.as_str()))],
        );
    }

    pub fn drain_signals(&mut self) -> Vec<HostSignal> {
        std::mem::take(&mut self.signals)
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.signals.push(HostSignal::ModalVisibilityChanged(visible));
    }

    fn ensure_visible(&self) -> Result<(), WizardError> {
        if self.visible {
            Ok(())
        } else {
            Err(WizardError::Closed)
        }
    }
}
