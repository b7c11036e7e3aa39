//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Release packager for Qt applications
#[derive(Parser, Debug)]
#[command(
    name = "qtpack",
    version,
    about = "Release packager for Qt applications",
    long_about = "Bundles a previously built Qt application with its runtime dependencies
into one platform-specific distributable artifact per run: a .zip on Windows,
an .AppImage on Linux, a .dmg on macOS.

Expects the project layout: bin/<exe> (the built binary or .app bundle),
release/version.txt, release/<name>.desktop and img/icon/main_256.png (Linux).

Usage:
  qtpack --name Procyon
  qtpack --name Procyon --exe procyon --project-dir ~/src/procyon

Exit code 0 = the artifact exists in the output directory."
)]
pub struct Args {
    /// Product name, used in the package name and desktop-entry lookup
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: String,

    /// Built executable (or .app bundle) name, if it differs from the
    /// platform default derived from the product name
    #[arg(short = 'e', long, value_name = "FILE")]
    pub exe: Option<String>,

    /// Root of the project checkout
    #[arg(short = 'p', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Output directory, relative to the project directory
    #[arg(long, value_name = "DIR", default_value = "out")]
    pub out_dir: PathBuf,

    /// Version text file, relative to the project directory
    #[arg(long, value_name = "PATH", default_value = "release/version.txt")]
    pub version_file: PathBuf,

    /// Print artifact details on success
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name cannot be empty".to_string());
        }
        if self.name.contains(['/', '\\']) {
            return Err(format!(
                "Product name must not contain path separators: {}",
                self.name
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: &str) -> Args {
        Args::parse_from(["qtpack", "--name", name])
    }

    #[test]
    fn defaults_cover_the_conventional_layout() {
        let args = args("Procyon");
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!(args.version_file, PathBuf::from("release/version.txt"));
        assert!(args.exe.is_none());
    }

    #[test]
    fn validate_rejects_path_separators_in_the_name() {
        assert!(args("../evil").validate().is_err());
        assert!(args("Procyon").validate().is_ok());
    }
}
