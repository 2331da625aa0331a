const NEXT_STEP_TEXT: &str = "Next step";
const SUBMIT_TEXT: &str = "Submit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BasicInfo,
    EnvironmentVariables,
    ResourceSpecs,
}

pub const ALL_WIZARD_STEPS: [WizardStep; 3] = [
    WizardStep::BasicInfo,
    WizardStep::EnvironmentVariables,
    WizardStep::ResourceSpecs,
];

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            WizardStep::BasicInfo => 0,
            WizardStep::EnvironmentVariables => 1,
            WizardStep::ResourceSpecs => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        ALL_WIZARD_STEPS.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "basic_info",
            WizardStep::EnvironmentVariables => "environment_variables",
            WizardStep::ResourceSpecs => "resource_specs",
        }
    }

    /// Label of the primary button while this step is shown.
    pub fn ok_text(self) -> &'static str {
        match self {
            WizardStep::ResourceSpecs => SUBMIT_TEXT,
            WizardStep::BasicInfo | WizardStep::EnvironmentVariables => NEXT_STEP_TEXT,
        }
    }

    pub fn is_final(self) -> bool {
        self == WizardStep::ResourceSpecs
    }

    fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Back,
    Close,
}

impl WizardAction {
    fn as_str(self) -> &'static str {
        match self {
            WizardAction::Next => "next",
            WizardAction::Back => "back",
            WizardAction::Close => "close",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub step: WizardStep,
}

impl NavState {
    pub fn first() -> Self {
        Self {
            step: WizardStep::BasicInfo,
        }
    }

    pub fn ok_text(&self) -> &'static str {
        self.step.ok_text()
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNavEffect {
    None,
    OpenStep(WizardStep),
    Submit,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTransition {
    pub effect: WizardNavEffect,
    pub feedback: Option<String>,
}

impl WizardTransition {
    fn effect(effect: WizardNavEffect) -> Self {
        Self {
            effect,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardNavError {
    Blocked {
        step: WizardStep,
    },
    InvalidTransition {
        step: WizardStep,
        action: WizardAction,
    },
}

impl std::fmt::Display for WizardNavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardNavError::Blocked { step } => {
                write!(f, "step {} has invalid fields", step.as_str())
            }
            WizardNavError::InvalidTransition { step, action } => {
                write!(
                    f,
                    "invalid wizard transition: step={} action={}",
                    step.as_str(),
                    action.as_str()
                )
            }
        }
    }
}

impl std::error::Error for WizardNavError {}

/// Apply `action` to `state`. `blocked` is the validity gate of the current
/// step; only `Next` consults it. `Next` on the last step asks for submission
/// and leaves the step unchanged.
pub fn wizard_transition(
    state: &mut NavState,
    action: WizardAction,
    blocked: bool,
) -> Result<WizardTransition, WizardNavError> {
    match action {
        WizardAction::Next => {
            if blocked {
                return Err(WizardNavError::Blocked { step: state.step });
            }
            match state.step.next() {
                Some(step) => {
                    state.step = step;
                    Ok(WizardTransition::effect(WizardNavEffect::OpenStep(step)))
                }
                None => Ok(WizardTransition::effect(WizardNavEffect::Submit)),
            }
        }
        WizardAction::Back => match state.step.prev() {
            Some(step) => {
                state.step = step;
                Ok(WizardTransition {
                    effect: WizardNavEffect::OpenStep(step),
                    feedback: Some(format!("Returned to {}.", step.as_str())),
                })
            }
            None => Err(WizardNavError::InvalidTransition {
                step: state.step,
                action,
            }),
        },
        WizardAction::Close => Ok(WizardTransition::effect(WizardNavEffect::Close)),
    }
}
