//! repdep - float pinned package.json dependencies to their latest versions
//!
//! The workflow:
//! - Back up package.json to package.json.old and clear its dependency sections
//! - Delete node_modules
//! - Reinstall every dependency through the package manager, keeping the
//!   pinned version only for excluded packages

pub mod cache;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod runner;
