// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod factory;
mod orchestrator;
mod stats;
#[cfg(test)]
pub(crate) mod testing;

pub use factory::{Collaborators, HttpCollaborators, PipelineFactory};
pub use orchestrator::{Pipeline, RunOutcome};
pub use stats::{RunStats, Stage};
