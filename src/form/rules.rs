//! Validation rules for the experiment form.
//!
//! Rules are pure: each takes values and returns the issues it finds, an
//! empty vector meaning valid. The form calls them whenever an entry changes.

use super::entries::{EnvVar, SpecEntryValues};
use crate::spec::MemoryUnit;
use std::collections::BTreeMap;

pub const MIN_REPLICAS: u32 = 1;
pub const MIN_CPUS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be at least {min}, got {actual}")]
    BelowMinimum {
        field: &'static str,
        min: u32,
        actual: u32,
    },
    #[error("{field} must be a whole number, got `{raw}`")]
    NotNumeric { field: &'static str, raw: String },
    #[error("memory unit `{unit}` is not one of M, G")]
    UnsupportedUnit { unit: String },
    #[error("duplicate {field} `{value}` at entries {first} and {second}")]
    Duplicate {
        field: &'static str,
        value: String,
        first: usize,
        second: usize,
    },
}

pub trait ValidationRules: std::fmt::Debug {
    fn env_entry(&self, entry: &EnvVar) -> Vec<ValidationIssue>;

    fn memory(&self, amount: &str, unit: &str) -> Vec<ValidationIssue>;

    fn spec_entry(&self, entry: &SpecEntryValues) -> Vec<ValidationIssue>;

    /// Cross-entry check over one field of every entry in a list.
    fn unique_by(&self, field: &'static str, values: &[&str]) -> Vec<ValidationIssue>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl ValidationRules for StandardRules {
    fn env_entry(&self, entry: &EnvVar) -> Vec<ValidationIssue> {
        [required("key", &entry.key), required("value", &entry.value)]
            .into_iter()
            .flatten()
            .collect()
    }

    fn memory(&self, amount: &str, unit: &str) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if amount.is_empty() {
            issues.push(ValidationIssue::Required { field: "memory" });
        } else if !amount.bytes().all(|b| b.is_ascii_digit()) {
            issues.push(ValidationIssue::NotNumeric {
                field: "memory",
                raw: amount.to_string(),
            });
        }
        if unit.is_empty() {
            issues.push(ValidationIssue::Required { field: "unit" });
        } else if MemoryUnit::parse(unit).is_none() {
            issues.push(ValidationIssue::UnsupportedUnit {
                unit: unit.to_string(),
            });
        }
        issues
    }

    fn spec_entry(&self, entry: &SpecEntryValues) -> Vec<ValidationIssue> {
        let mut issues: Vec<ValidationIssue> = required("name", &entry.name).into_iter().collect();
        issues.extend(at_least("replicas", entry.replicas, MIN_REPLICAS));
        issues.extend(at_least("cpus", entry.cpus, MIN_CPUS));
        issues
    }

    fn unique_by(&self, field: &'static str, values: &[&str]) -> Vec<ValidationIssue> {
        let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();
        let mut issues = Vec::new();
        for (index, value) in values.iter().enumerate() {
            // Empty values are already reported by the per-entry rules.
            if value.is_empty() {
                continue;
            }
            if let Some(first) = first_seen.get(value) {
                issues.push(ValidationIssue::Duplicate {
                    field,
                    value: value.to_string(),
                    first: *first,
                    second: index,
                });
            } else {
                first_seen.insert(*value, index);
            }
        }
        issues
    }
}

pub fn required(field: &'static str, value: &str) -> Option<ValidationIssue> {
    value
        .is_empty()
        .then_some(ValidationIssue::Required { field })
}

fn at_least(field: &'static str, actual: u32, min: u32) -> Option<ValidationIssue> {
    (actual < min).then_some(ValidationIssue::BelowMinimum { field, min, actual })
}
