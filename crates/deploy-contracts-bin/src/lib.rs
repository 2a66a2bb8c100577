//! Publishes the asset token contract suite and records where it lives.

pub mod arguments;
pub mod deployment;
mod run;

pub use run::{run, start};
