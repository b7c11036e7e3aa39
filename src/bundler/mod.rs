//! Core packaging functionality.
//!
//! Turns a previously built Qt application into exactly one distributable
//! artifact for the host platform:
//!
//! - Windows: redistributable `.zip` via windeployqt
//! - Linux: `.AppImage` via linuxdeployqt
//! - macOS: compressed `.dmg` via macdeployqt and hdiutil

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use builder::{BundledArtifact, Bundler};
pub use error::{Error, Result};
pub use platform::PackageType;
pub use settings::{Arch, PackageSettings, Settings, SettingsBuilder};
