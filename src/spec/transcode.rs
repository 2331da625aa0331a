//! Conversion between the form and `ExperimentSpec`.
//!
//! `encode_form` builds the request body on submit. `decode_spec` turns a spec
//! fetched from the backend into form values for update and clone; it is pure
//! so a malformed spec never leaves a half-filled form behind.

use super::error::DecodeError;
use super::resources::{compose_resources, Resources};
use super::wire::{
    ExperimentSpec, Replicas, SpecEnvironment, SpecMeta, SpecResource, Specs, DEFAULT_FRAMEWORK,
};
use crate::form::{EnvVar, ExperimentForm, FormSnapshot, SpecEntryValues};
use std::collections::BTreeMap;

pub fn encode_form(form: &ExperimentForm) -> ExperimentSpec {
    let mut env_vars = BTreeMap::new();
    for env in form.envs().values() {
        if env.key.is_empty() {
            continue;
        }
        env_vars.insert(env.key.clone(), env.value.clone());
    }

    let mut specs = Specs::new();
    for entry in form.specs().values() {
        if entry.name.is_empty() {
            continue;
        }
        specs.insert(
            entry.name.clone(),
            SpecResource {
                replicas: Replicas::Count(entry.replicas),
                resources: compose_resources(entry.cpus, &entry.memory, &entry.unit),
            },
        );
    }

    let description = Some(form.description().to_string()).filter(|value| !value.is_empty());

    ExperimentSpec {
        meta: SpecMeta {
            name: form.experiment_name().to_string(),
            namespace: form.namespace().to_string(),
            framework: DEFAULT_FRAMEWORK.as_str().to_string(),
            cmd: form.cmd().to_string(),
            description,
            env_vars,
        },
        environment: SpecEnvironment {
            image: form.image().to_string(),
        },
        spec: specs,
    }
}

pub fn decode_spec(spec: &ExperimentSpec) -> Result<FormSnapshot, DecodeError> {
    let envs = spec
        .meta
        .env_vars
        .iter()
        .map(|(key, value)| EnvVar::new(key.clone(), value.clone()))
        .collect();

    let mut specs = Vec::with_capacity(spec.spec.len());
    for (name, info) in &spec.spec {
        specs.push(decode_spec_entry(name, info)?);
    }

    Ok(FormSnapshot {
        experiment_name: spec.meta.name.clone(),
        description: spec.meta.description.clone().unwrap_or_default(),
        namespace: spec.meta.namespace.clone(),
        cmd: spec.meta.cmd.clone(),
        image: spec.environment.image.clone(),
        envs,
        specs,
    })
}

fn decode_spec_entry(name: &str, info: &SpecResource) -> Result<SpecEntryValues, DecodeError> {
    let resources =
        Resources::parse(&info.resources).map_err(|source| DecodeError::MalformedResources {
            spec: name.to_string(),
            raw: info.resources.clone(),
            source,
        })?;
    let replicas = info
        .replicas
        .count()
        .ok_or_else(|| DecodeError::InvalidReplicas {
            spec: name.to_string(),
            raw: info.replicas.raw(),
        })?;

    Ok(SpecEntryValues {
        name: name.to_string(),
        replicas,
        cpus: resources.cpus,
        memory: resources.memory,
        unit: resources.unit.as_str().to_string(),
    })
}
