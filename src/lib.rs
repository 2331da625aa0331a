pub mod api;
pub mod app;
pub mod config;
pub mod form;
pub mod shared;
pub mod spec;
pub mod wizard;
