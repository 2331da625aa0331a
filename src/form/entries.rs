use super::error::FormError;
use super::rules::{ValidationIssue, ValidationRules};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One resource group row. `memory` is kept as typed text so that partially
/// entered values can still be shown and validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecEntryValues {
    pub name: String,
    pub replicas: u32,
    pub cpus: u32,
    pub memory: String,
    pub unit: String,
}

impl Default for SpecEntryValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            replicas: 1,
            cpus: 1,
            memory: String::new(),
            unit: "M".to_string(),
        }
    }
}

impl SpecEntryValues {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Envs,
    Specs,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Envs => "envs",
            ListKind::Specs => "specs",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait ListEntry: Clone {
    /// Field that must be unique across the list.
    const UNIQUE_FIELD: &'static str;

    fn unique_value(&self) -> &str;

    fn validate(&self, rules: &dyn ValidationRules) -> Vec<ValidationIssue>;
}

impl ListEntry for EnvVar {
    const UNIQUE_FIELD: &'static str = "key";

    fn unique_value(&self) -> &str {
        &self.key
    }

    fn validate(&self, rules: &dyn ValidationRules) -> Vec<ValidationIssue> {
        rules.env_entry(self)
    }
}

impl ListEntry for SpecEntryValues {
    const UNIQUE_FIELD: &'static str = "name";

    fn unique_value(&self) -> &str {
        &self.name
    }

    fn validate(&self, rules: &dyn ValidationRules) -> Vec<ValidationIssue> {
        let mut issues = rules.spec_entry(self);
        issues.extend(rules.memory(&self.memory, &self.unit));
        issues
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    values: T,
    issues: Vec<ValidationIssue>,
}

impl<T> Validated<T> {
    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Ordered, dynamically sized list of entries. Each entry is validated on
/// every change and the list re-runs its uniqueness check afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryList<T> {
    kind: ListKind,
    entries: Vec<Validated<T>>,
    list_issues: Vec<ValidationIssue>,
}

impl<T: ListEntry> EntryList<T> {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            list_issues: Vec::new(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Validated<T>> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Validated<T>> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(Validated::values)
    }

    pub fn list_issues(&self) -> &[ValidationIssue] {
        &self.list_issues
    }

    /// Every issue in the list: per-entry issues tagged with their index,
    /// then cross-entry issues.
    pub fn all_issues(&self) -> Vec<(Option<usize>, &ValidationIssue)> {
        let mut out: Vec<(Option<usize>, &ValidationIssue)> = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            out.extend(entry.issues.iter().map(|issue| (Some(index), issue)));
        }
        out.extend(self.list_issues.iter().map(|issue| (None, issue)));
        out
    }

    pub fn is_invalid(&self) -> bool {
        !self.list_issues.is_empty() || self.entries.iter().any(|entry| !entry.is_valid())
    }

    pub(crate) fn push(&mut self, values: T, rules: &dyn ValidationRules) -> usize {
        let issues = values.validate(rules);
        self.entries.push(Validated { values, issues });
        self.refresh_list_issues(rules);
        self.entries.len() - 1
    }

    pub(crate) fn replace(
        &mut self,
        index: usize,
        values: T,
        rules: &dyn ValidationRules,
    ) -> Result<(), FormError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange {
                list: self.kind,
                index,
                len,
            })?;
        entry.issues = values.validate(rules);
        entry.values = values;
        self.refresh_list_issues(rules);
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize, rules: &dyn ValidationRules) -> Result<T, FormError> {
        if index >= self.entries.len() {
            return Err(FormError::IndexOutOfRange {
                list: self.kind,
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.refresh_list_issues(rules);
        Ok(removed.values)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.list_issues.clear();
    }

    fn refresh_list_issues(&mut self, rules: &dyn ValidationRules) {
        let values: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| entry.values.unique_value())
            .collect();
        self.list_issues = rules.unique_by(T::UNIQUE_FIELD, &values);
    }
}
