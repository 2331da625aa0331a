use expform::api::{ApiError, ExperimentApi, SubmittedExperiment};
use expform::form::{EnvVar, ListKind, SpecEntryValues, StandardRules};
use expform::shared::ids::{ExperimentId, IdError, RandomShortIds, ShortIdGenerator};
use expform::shared::logging::EventLog;
use expform::spec::{ExperimentSpec, Replicas, SpecEnvironment, SpecMeta, SpecResource, Specs};
use expform::wizard::{
    CollectingNotifier, ExperimentWizard, FormMode, HostSignal, Notice, OkOutcome,
    SubmitOutcome, WizardError, WizardNavError, WizardOptions, WizardStep,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use tempfile::tempdir;

struct FixedIds(&'static str);

impl ShortIdGenerator for FixedIds {
    fn short_id(&self, len: usize) -> Result<String, IdError> {
        Ok(self.0.chars().take(len).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ApiCall {
    Create(ExperimentSpec),
    Update(String, ExperimentSpec),
}

struct FakeApi {
    calls: RefCell<Vec<ApiCall>>,
    failure: Option<ApiError>,
}

impl FakeApi {
    fn ok() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failure: None,
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failure: Some(ApiError::Rejected {
                status: 500,
                message: message.to_string(),
            }),
        }
    }

    fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn respond(&self) -> Result<SubmittedExperiment, ApiError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(SubmittedExperiment {
                experiment_id: Some("experiment_1_0001".to_string()),
                status: Some("Accepted".to_string()),
            }),
        }
    }
}

impl ExperimentApi for FakeApi {
    fn create_experiment(&self, spec: &ExperimentSpec) -> Result<SubmittedExperiment, ApiError> {
        self.calls.borrow_mut().push(ApiCall::Create(spec.clone()));
        self.respond()
    }

    fn update_experiment(
        &self,
        id: &ExperimentId,
        spec: &ExperimentSpec,
    ) -> Result<SubmittedExperiment, ApiError> {
        self.calls
            .borrow_mut()
            .push(ApiCall::Update(id.to_string(), spec.clone()));
        self.respond()
    }
}

fn open(mode: FormMode) -> ExperimentWizard {
    open_with(mode, WizardOptions::default())
}

fn open_with(mode: FormMode, options: WizardOptions) -> ExperimentWizard {
    ExperimentWizard::open(
        mode,
        options,
        Box::new(StandardRules),
        &FixedIds("x7k2p9qa"),
        EventLog::disabled(),
    )
    .expect("open wizard")
}

fn mnist_spec() -> ExperimentSpec {
    let mut spec = Specs::new();
    spec.insert(
        "Worker".to_string(),
        SpecResource {
            replicas: Replicas::Text("2".to_string()),
            resources: "cpu=4,memory=8G".to_string(),
        },
    );
    let mut env_vars = BTreeMap::new();
    env_vars.insert("ENV_1".to_string(), "ENV1".to_string());
    ExperimentSpec {
        meta: SpecMeta {
            name: "mnist-job".to_string(),
            namespace: "default".to_string(),
            framework: "Tensorflow".to_string(),
            cmd: "python train.py".to_string(),
            description: Some("mnist".to_string()),
            env_vars,
        },
        environment: SpecEnvironment {
            image: "mnist:latest".to_string(),
        },
        spec,
    }
}

fn fill_valid_create_form(wizard: &mut ExperimentWizard) {
    let form = wizard.form_mut();
    form.set_experiment_name("tf-mnist").expect("set name");
    form.set_description("demo");
    form.set_cmd("python train.py");
    form.set_image("mnist:latest");
    form.append_env_entry(EnvVar::new("ENV_1", "ENV1"));
    form.append_spec_entry(SpecEntryValues {
        name: "Worker".to_string(),
        replicas: 2,
        cpus: 4,
        memory: "8".to_string(),
        unit: "G".to_string(),
    });
}

fn walk_to_last_step(wizard: &mut ExperimentWizard) {
    while !wizard.step().is_final() {
        wizard.next().expect("advance");
    }
}

#[test]
fn basic_info_step_does_not_gate_by_default() {
    let mut wizard = open(FormMode::Create);
    assert!(!wizard.form().basic_info_issues().is_empty());
    assert!(!wizard.is_step_blocked(WizardStep::BasicInfo));

    wizard.next().expect("basic info passes with empty fields");
    assert_eq!(wizard.step(), WizardStep::EnvironmentVariables);
}

#[test]
fn basic_info_gate_can_be_enabled() {
    let mut wizard = open_with(
        FormMode::Create,
        WizardOptions {
            gate_basic_info: true,
            ..WizardOptions::default()
        },
    );
    let err = wizard.next().expect_err("gated");
    assert!(matches!(
        err,
        WizardError::Navigation(WizardNavError::Blocked {
            step: WizardStep::BasicInfo
        })
    ));
    assert_eq!(wizard.step(), WizardStep::BasicInfo);
}

#[test]
fn gated_basic_info_does_not_require_a_description() {
    let mut target = mnist_spec();
    target.meta.description = None;
    let mut wizard = open_with(
        FormMode::Update {
            id: ExperimentId::parse("experiment_1_0001").expect("id"),
            target,
        },
        WizardOptions {
            gate_basic_info: true,
            ..WizardOptions::default()
        },
    );

    assert_eq!(wizard.form().description(), "");
    assert!(wizard.form().basic_info_issues().is_empty());
    wizard.next().expect("description is optional");
    assert_eq!(wizard.step(), WizardStep::EnvironmentVariables);
}

#[test]
fn opening_a_spec_with_many_env_vars_starts_on_the_first_page() {
    let mut source = mnist_spec();
    for i in 2..=6 {
        source
            .meta
            .env_vars
            .insert(format!("ENV_{i}"), format!("ENV{i}"));
    }
    let wizard = open(FormMode::Clone { source });

    assert_eq!(wizard.form().envs().len(), 6);
    assert_eq!(wizard.form().pager(ListKind::Envs).current(), 1);
    assert_eq!(wizard.form().pager(ListKind::Specs).current(), 1);
}

#[test]
fn invalid_env_list_blocks_the_second_step() {
    let mut wizard = open(FormMode::Create);
    wizard.next().expect("advance");
    wizard
        .form_mut()
        .append_env_entry(EnvVar::new("ENV_1", "a"));
    wizard
        .form_mut()
        .append_env_entry(EnvVar::new("ENV_1", "b"));

    assert!(wizard.next().is_err());
    assert_eq!(wizard.step(), WizardStep::EnvironmentVariables);

    wizard
        .form_mut()
        .remove_entry(expform::form::ListKind::Envs, 1)
        .expect("remove duplicate");
    wizard.next().expect("advance");
    assert_eq!(wizard.ok_text(), "Submit");
}

#[test]
fn create_submit_notifies_and_signals_host() {
    let api = FakeApi::ok();
    let notifier = CollectingNotifier::new();
    let mut wizard = open(FormMode::Create);
    fill_valid_create_form(&mut wizard);
    walk_to_last_step(&mut wizard);

    let outcome = wizard.submit(&api, &notifier).expect("submit");
    assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
    assert_eq!(
        notifier.notices(),
        vec![Notice::Success("Experiment creation succeeds".to_string())]
    );
    assert_eq!(
        wizard.drain_signals(),
        vec![
            HostSignal::ModalVisibilityChanged(true),
            HostSignal::RefreshList(true),
            HostSignal::ModalVisibilityChanged(false),
        ]
    );
    assert!(!wizard.is_visible());

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    let ApiCall::Create(spec) = &calls[0] else {
        panic!("expected create call, got {calls:?}");
    };
    assert_eq!(spec.meta.name, "tf-mnist");
    assert_eq!(spec.spec["Worker"].resources, "cpu=4,memory=8G");
}

#[test]
fn failed_submit_keeps_the_dialog_open_for_retry() {
    let api = FakeApi::failing("namespace quota exceeded");
    let notifier = CollectingNotifier::new();
    let mut wizard = open(FormMode::Create);
    fill_valid_create_form(&mut wizard);
    walk_to_last_step(&mut wizard);
    wizard.drain_signals();

    let outcome = wizard.submit(&api, &notifier).expect("submit");
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("namespace quota exceeded, please try again".to_string())
    );
    assert_eq!(
        notifier.take(),
        vec![Notice::Error(
            "namespace quota exceeded, please try again".to_string()
        )]
    );
    assert!(wizard.is_visible());
    assert!(!wizard.is_submitting());
    assert_eq!(wizard.step(), WizardStep::ResourceSpecs);
    assert!(wizard.drain_signals().is_empty());

    let retry = FakeApi::ok();
    wizard.submit(&retry, &notifier).expect("retry");
    assert_eq!(retry.calls().len(), 1);
}

#[test]
fn second_submit_while_in_flight_is_refused() {
    let notifier = CollectingNotifier::new();
    let mut wizard = open(FormMode::Create);
    fill_valid_create_form(&mut wizard);
    walk_to_last_step(&mut wizard);

    let request = wizard.begin_submit().expect("begin");
    assert!(wizard.is_submitting());
    assert!(matches!(
        wizard.begin_submit(),
        Err(WizardError::SubmissionInFlight)
    ));

    let api = FakeApi::ok();
    let outcome = request.dispatch(&api);
    wizard
        .finish_submit(outcome, &notifier)
        .expect("finish");
    assert!(matches!(
        wizard.finish_submit(Ok(SubmittedExperiment::default()), &notifier),
        Err(WizardError::NoSubmissionInFlight)
    ));
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn submit_is_only_offered_on_the_last_step() {
    let api = FakeApi::ok();
    let notifier = CollectingNotifier::new();
    let mut wizard = open(FormMode::Create);
    fill_valid_create_form(&mut wizard);

    assert!(matches!(
        wizard.submit(&api, &notifier),
        Err(WizardError::NotOnFinalStep {
            step: WizardStep::BasicInfo
        })
    ));
    assert_eq!(
        wizard.handle_ok(&api, &notifier).expect("ok"),
        OkOutcome::Advanced(WizardStep::EnvironmentVariables)
    );
    assert_eq!(wizard.back().expect("back"), WizardStep::BasicInfo);
    assert!(api.calls().is_empty());
}

#[test]
fn update_mode_locks_the_name_and_patches_by_id() {
    let api = FakeApi::ok();
    let notifier = CollectingNotifier::new();
    let id = ExperimentId::parse("experiment_1_0001").expect("id");
    let mut wizard = open(FormMode::Update {
        id,
        target: mnist_spec(),
    });

    assert_eq!(wizard.form().experiment_name(), "mnist-job");
    assert!(wizard.form().is_name_locked());
    assert!(wizard.form_mut().set_experiment_name("renamed").is_err());
    assert_eq!(wizard.form().specs().len(), 1);
    assert_eq!(wizard.form().specs().values().next().map(|s| s.replicas), Some(2));

    walk_to_last_step(&mut wizard);
    wizard.submit(&api, &notifier).expect("submit");

    assert_eq!(
        notifier.notices(),
        vec![Notice::Success("Modification succeeds!".to_string())]
    );
    let calls = api.calls();
    let [ApiCall::Update(id, spec)] = calls.as_slice() else {
        panic!("expected one update call, got {calls:?}");
    };
    assert_eq!(id, "experiment_1_0001");
    assert_eq!(spec.meta.name, "mnist-job");
    assert_eq!(spec.spec["Worker"].replicas, Replicas::Count(2));
}

#[test]
fn clone_mode_derives_a_fresh_lowercase_name() {
    let mut seen = Vec::new();
    for _ in 0..2 {
        let wizard = ExperimentWizard::open(
            FormMode::Clone {
                source: mnist_spec(),
            },
            WizardOptions::default(),
            Box::new(StandardRules),
            &RandomShortIds,
            EventLog::disabled(),
        )
        .expect("open clone");

        let name = wizard.form().experiment_name().to_string();
        let suffix = name.strip_prefix("mnist-job-").expect("source prefix");
        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
        assert!(!wizard.form().is_name_locked());
        seen.push(name);
    }
    assert_ne!(seen[0], seen[1]);
}

#[test]
fn clone_submits_as_create_with_the_derived_name() {
    let api = FakeApi::ok();
    let notifier = CollectingNotifier::new();
    let mut source = mnist_spec();
    source.meta.name = "MNIST-Job".to_string();
    let mut wizard = ExperimentWizard::open(
        FormMode::Clone { source },
        WizardOptions::default(),
        Box::new(StandardRules),
        &FixedIds("AB12CD34"),
        EventLog::disabled(),
    )
    .expect("open clone");
    assert_eq!(wizard.form().experiment_name(), "mnist-job-ab12cd34");

    walk_to_last_step(&mut wizard);
    wizard.submit(&api, &notifier).expect("submit");
    assert_eq!(
        notifier.notices(),
        vec![Notice::Success("Create a new experiment!".to_string())]
    );
    assert!(matches!(
        api.calls().as_slice(),
        [ApiCall::Create(spec)] if spec.meta.name == "mnist-job-ab12cd34"
    ));
}

#[test]
fn malformed_source_spec_fails_to_open() {
    let mut source = mnist_spec();
    source.spec.insert(
        "Ps".to_string(),
        SpecResource {
            replicas: Replicas::Count(1),
            resources: "cpu=one,memory=1G".to_string(),
        },
    );
    let result = ExperimentWizard::open(
        FormMode::Clone { source },
        WizardOptions::default(),
        Box::new(StandardRules),
        &FixedIds("abcdefgh"),
        EventLog::disabled(),
    );
    assert!(matches!(result, Err(WizardError::Decode(_))));
}

#[test]
fn close_hides_the_dialog_and_stops_navigation() {
    let mut wizard = open(FormMode::Create);
    wizard.close();
    wizard.close();

    assert_eq!(
        wizard.drain_signals(),
        vec![
            HostSignal::ModalVisibilityChanged(true),
            HostSignal::ModalVisibilityChanged(false),
        ]
    );
    assert!(matches!(wizard.next(), Err(WizardError::Closed)));

    wizard.restart(&FixedIds("abcdefgh")).expect("restart");
    assert!(wizard.is_visible());
    assert_eq!(wizard.step(), WizardStep::BasicInfo);
}

#[test]
fn wizard_events_are_logged_as_json_lines() {
    let dir = tempdir().expect("tempdir");
    let log_path = dir.path().join("logs/expform.log");
    let api = FakeApi::ok();
    let notifier = CollectingNotifier::new();
    let mut wizard = ExperimentWizard::open(
        FormMode::Create,
        WizardOptions::default(),
        Box::new(StandardRules),
        &FixedIds("abcdefgh"),
        EventLog::to_path(&log_path),
    )
    .expect("open");
    fill_valid_create_form(&mut wizard);
    walk_to_last_step(&mut wizard);
    wizard.submit(&api, &notifier).expect("submit");

    let log = fs::read_to_string(&log_path).expect("read log");
    let events: Vec<String> = log
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            value["event"].as_str().expect("event").to_string()
        })
        .collect();
    assert_eq!(
        events,
        vec![
            "wizard.opened",
            "wizard.step_advanced",
            "wizard.step_advanced",
            "wizard.submit_started",
            "wizard.submit_succeeded",
        ]
    );
}
