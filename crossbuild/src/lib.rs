//! # crossbuild
//!
//! Cross-compiles htop-win for Windows x64 and ARM64 from a Linux/WSL host and
//! stages the resulting executables.
//!
//! ## Usage
//!
//! ```bash
//! crossbuild                       # build-all: x64 then arm64
//! crossbuild build --target arm64  # one target
//! crossbuild check --target x64    # cargo check only
//! crossbuild build-all -j 4        # limit parallel jobs
//! ```
//!
//! ## Structure
//!
//! - `targets` - the fixed target registry
//! - `util::tools_env` - per-target child environment
//! - `tasks::tooling` - prerequisite checks and rustup targets
//! - `tasks::cross` - check / build / build-all and artifact staging

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod targets;
pub mod tasks;
pub mod util;
