//! Release packager library for Qt applications.
//!
//! Provides the core packaging functionality for creating:
//! - Windows redistributable zip archives (windeployqt)
//! - Linux AppImages (linuxdeployqt)
//! - macOS compressed disk images (macdeployqt + hdiutil)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
