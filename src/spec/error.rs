#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceParseError {
    #[error("expected `cpu=<n>,memory=<n><M|G>`, found `{raw}`")]
    Malformed { raw: String },
    #[error("cpu count `{raw}` does not fit in 32 bits")]
    CpuOverflow { raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("spec `{spec}` has malformed resources `{raw}`: {source}")]
    MalformedResources {
        spec: String,
        raw: String,
        #[source]
        source: ResourceParseError,
    },
    #[error("spec `{spec}` has invalid replicas `{raw}`")]
    InvalidReplicas { spec: String, raw: String },
}
