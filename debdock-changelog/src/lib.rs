//! debdock-changelog: changelog interpretation for Debian package builds
//!
//! This crate provides:
//! - Reading the first line of a `debian/changelog` file
//! - Parsing it into package, version and distribution fields
//! - The `[epoch:]upstream[-revision]` version model
//! - The architecture table used for emulated builds
//! - Derivation of an immutable build plan from a parsed entry

pub mod arch;
pub mod changelog;
pub mod error;
pub mod plan;
pub mod version;

pub use arch::Architecture;
pub use changelog::{first_line, ChangelogEntry};
pub use error::{Error, Result};
pub use plan::{image_reference, release_alias, BuildPlan, PlanOptions};
pub use version::PackageVersion;
