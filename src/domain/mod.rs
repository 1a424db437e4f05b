//! Core domain models for repdep
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency sections of package.json and their extracted contents
//! - Install commands and their per-command outcomes
//! - The report produced by a complete run

mod install;
mod report;
mod section;

pub use install::{InstallCommand, InstallOutcome, InstallResult};
pub use report::RunReport;
pub use section::{DependencySection, ExtractedSections, SectionDependencies};
