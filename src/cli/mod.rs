//! Command-line workflow, kept separate from argument parsing in `main.rs`

pub mod orchestration;

pub use orchestration::{resolve_bump, run_workflow, WorkflowArgs, WorkflowOutcome};
