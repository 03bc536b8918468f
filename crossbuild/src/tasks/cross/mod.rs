//! Cross-compilation of the application for every Windows target.
//!
//! - `common` - run state, cargo invocation, build-then-stage
//! - `check` / `build` / `build_all` - one entry point per action
//! - `stage` - copies finished executables to the staging directory
//! - `summary` - per-target outcomes and the final report

pub mod build;
pub mod build_all;
pub mod check;
pub mod common;
pub mod stage;
pub mod summary;

pub use common::{Action, Phase, Session};
pub use stage::{stage, StagedArtifact};
pub use summary::{BuildOutcome, RunSummary, TargetResult};
