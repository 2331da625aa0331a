//! Spec layer: the `ExperimentSpec` wire document, the resources string codec
//! and the transcoder between form values and the wire document.

pub mod error;
pub mod resources;
pub mod transcode;
pub mod wire;

pub use error::{DecodeError, ResourceParseError};
pub use resources::{compose_resources, MemoryUnit, Resources, MEMORY_UNITS};
pub use transcode::{decode_spec, encode_form};
pub use wire::{
    ExperimentSpec, Framework, Replicas, SpecEnvironment, SpecMeta, SpecResource, Specs,
    DEFAULT_FRAMEWORK,
};
