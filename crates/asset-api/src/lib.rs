//! HTTP interface to the deployed asset token contracts.

pub mod api;
pub mod arguments;
mod run;

pub use run::{run, start};
