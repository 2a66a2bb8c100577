//! This crate contains the code required to make the services observable.
//! At the moment that is the initialization logic for logging shared by the
//! binaries.
mod config;
pub mod tracing;

pub use config::Config;
