//! Configuration structures for packaging operations.
//!
//! Everything here is plain configuration: project identity, the directory
//! layout a run works in, and architecture detection for the built binary.

#![allow(dead_code)] // Public API - accessors may be used by external consumers

mod arch;
mod builder;
mod core;
mod package;

pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use package::PackageSettings;
