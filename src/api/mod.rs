pub mod client;
pub mod error;
pub mod http;

pub use client::{ExperimentApi, SubmittedExperiment};
pub use error::ApiError;
pub use http::HttpExperimentApi;
