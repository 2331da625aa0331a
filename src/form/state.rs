use super::entries::{EntryList, EnvVar, ListKind, SpecEntryValues};
use super::error::FormError;
use super::pager::{Pager, DEFAULT_PAGE_SIZE};
use super::rules::{required, StandardRules, ValidationIssue, ValidationRules};
use super::snapshot::FormSnapshot;

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    pub default_namespace: String,
    pub page_size: usize,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Client-side state of the experiment form: basic fields, the name lock and
/// the two dynamic lists. All list edits go through this type so entry and
/// list validity stay current.
#[derive(Debug)]
pub struct ExperimentForm {
    experiment_name: String,
    name_locked: bool,
    description: String,
    namespace: String,
    cmd: String,
    image: String,
    envs: EntryList<EnvVar>,
    specs: EntryList<SpecEntryValues>,
    env_pager: Pager,
    spec_pager: Pager,
    options: FormOptions,
    rules: Box<dyn ValidationRules>,
}

impl ExperimentForm {
    pub fn new(rules: Box<dyn ValidationRules>, options: FormOptions) -> Self {
        let mut form = Self {
            experiment_name: String::new(),
            name_locked: false,
            description: String::new(),
            namespace: String::new(),
            cmd: String::new(),
            image: String::new(),
            envs: EntryList::new(ListKind::Envs),
            specs: EntryList::new(ListKind::Specs),
            env_pager: Pager::new(options.page_size),
            spec_pager: Pager::new(options.page_size),
            options,
            rules,
        };
        form.reset();
        form
    }

    pub fn with_standard_rules(options: FormOptions) -> Self {
        Self::new(Box::new(StandardRules), options)
    }

    /// Clear every field, default the namespace, empty both lists and unlock
    /// the name.
    pub fn reset(&mut self) {
        self.experiment_name.clear();
        self.name_locked = false;
        self.description.clear();
        self.namespace = self.options.default_namespace.clone();
        self.cmd.clear();
        self.image.clear();
        self.envs.clear();
        self.specs.clear();
        self.env_pager.reset();
        self.spec_pager.reset();
    }

    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    pub fn is_name_locked(&self) -> bool {
        self.name_locked
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn envs(&self) -> &EntryList<EnvVar> {
        &self.envs
    }

    pub fn specs(&self) -> &EntryList<SpecEntryValues> {
        &self.specs
    }

    pub fn pager(&self, list: ListKind) -> &Pager {
        match list {
            ListKind::Envs => &self.env_pager,
            ListKind::Specs => &self.spec_pager,
        }
    }

    pub fn go_to_page(&mut self, list: ListKind, page: usize) -> bool {
        let len = self.list_len(list);
        match list {
            ListKind::Envs => self.env_pager.go_to(page, len),
            ListKind::Specs => self.spec_pager.go_to(page, len),
        }
    }

    pub fn set_experiment_name(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        if self.name_locked {
            return Err(FormError::NameLocked);
        }
        self.experiment_name = value.into();
        Ok(())
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_namespace(&mut self, value: impl Into<String>) {
        self.namespace = value.into();
    }

    pub fn set_cmd(&mut self, value: impl Into<String>) {
        self.cmd = value.into();
    }

    pub fn set_image(&mut self, value: impl Into<String>) {
        self.image = value.into();
    }

    pub(crate) fn lock_name(&mut self, name: String) {
        self.experiment_name = name;
        self.name_locked = true;
    }

    pub(crate) fn unlock_name(&mut self, name: String) {
        self.experiment_name = name;
        self.name_locked = false;
    }

    /// Returns the index of the new entry.
    pub fn append_env_entry(&mut self, entry: EnvVar) -> usize {
        let index = self.envs.push(entry, self.rules.as_ref());
        self.env_pager.after_append(self.envs.len());
        index
    }

    /// Returns the index of the new entry.
    pub fn append_spec_entry(&mut self, entry: SpecEntryValues) -> usize {
        let index = self.specs.push(entry, self.rules.as_ref());
        self.spec_pager.after_append(self.specs.len());
        index
    }

    pub fn update_env_entry(&mut self, index: usize, entry: EnvVar) -> Result<(), FormError> {
        self.envs.replace(index, entry, self.rules.as_ref())
    }

    pub fn update_spec_entry(
        &mut self,
        index: usize,
        entry: SpecEntryValues,
    ) -> Result<(), FormError> {
        self.specs.replace(index, entry, self.rules.as_ref())
    }

    pub fn remove_entry(&mut self, list: ListKind, index: usize) -> Result<(), FormError> {
        match list {
            ListKind::Envs => {
                self.envs.remove(index, self.rules.as_ref())?;
                self.env_pager.after_remove(self.envs.len());
            }
            ListKind::Specs => {
                self.specs.remove(index, self.rules.as_ref())?;
                self.spec_pager.after_remove(self.specs.len());
            }
        }
        Ok(())
    }

    pub fn is_list_invalid(&self, list: ListKind) -> bool {
        match list {
            ListKind::Envs => self.envs.is_invalid(),
            ListKind::Specs => self.specs.is_invalid(),
        }
    }

    /// Required-field issues for the basic info step. Description is optional.
    pub fn basic_info_issues(&self) -> Vec<ValidationIssue> {
        [
            required("experiment name", &self.experiment_name),
            required("namespace", &self.namespace),
            required("cmd", &self.cmd),
            required("image", &self.image),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            experiment_name: self.experiment_name.clone(),
            description: self.description.clone(),
            namespace: self.namespace.clone(),
            cmd: self.cmd.clone(),
            image: self.image.clone(),
            envs: self.envs.values().cloned().collect(),
            specs: self.specs.values().cloned().collect(),
        }
    }

    /// Replace all values with the snapshot's. A locked name must match the
    /// snapshot name (or the snapshot must leave it empty).
    pub fn load_snapshot(&mut self, snapshot: FormSnapshot) -> Result<(), FormError> {
        if self.name_locked
            && !snapshot.experiment_name.is_empty()
            && snapshot.experiment_name != self.experiment_name
        {
            return Err(FormError::NameLocked);
        }
        if !self.name_locked {
            self.experiment_name = snapshot.experiment_name.clone();
        }
        self.envs.clear();
        self.specs.clear();
        self.env_pager.reset();
        self.spec_pager.reset();
        self.apply_decoded(snapshot);
        Ok(())
    }

    /// Fill fields from a decoded spec. The name is left to the caller, and
    /// list entries are appended in order without moving either pager.
    pub fn apply_decoded(&mut self, decoded: FormSnapshot) {
        self.description = decoded.description;
        self.namespace = decoded.namespace;
        self.cmd = decoded.cmd;
        self.image = decoded.image;
        for env in decoded.envs {
            self.envs.push(env, self.rules.as_ref());
        }
        for spec in decoded.specs {
            self.specs.push(spec, self.rules.as_ref());
        }
    }

    fn list_len(&self, list: ListKind) -> usize {
        match list {
            ListKind::Envs => self.envs.len(),
            ListKind::Specs => self.specs.len(),
        }
    }
}
