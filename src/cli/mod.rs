//! Command line interface for qtpack.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::{
    bundler::{
        Bundler, PackageSettings, SettingsBuilder,
        error::{Error, ErrorExt},
    },
    error::{CliError, Result},
};
use std::path::Path;

/// Main CLI entry point.
///
/// Returns the process exit code; every failure is reported on the console
/// before returning.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let output = OutputManager::new(args.verbose, false);

    if let Err(reason) = args.validate() {
        let error = CliError::InvalidArguments { reason };
        output.error(&error.to_string());
        return Ok(2);
    }

    match execute(&args, &output).await {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&e.to_string());
            Ok(1)
        }
    }
}

/// Runs one packaging pass end to end.
async fn execute(args: &Args, output: &OutputManager) -> crate::bundler::Result<()> {
    let version = read_version(&args.project_dir.join(&args.version_file)).await?;

    output.section(&format!(
        "Create redistributable package version {}",
        version
    ));

    let settings = SettingsBuilder::new()
        .project_directory(&args.project_dir)
        .out_directory(&args.out_dir)
        .package_settings(PackageSettings {
            product_name: args.name.clone(),
            version,
            executable: args.exe.clone(),
        })
        .build()?;

    let artifact = Bundler::new(settings).bundle().await?;

    let file_name = artifact
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| artifact.path.display().to_string());

    output.info(&format!("\nPackage created: {}", file_name));
    output.verbose(&format!(
        "  {} artifact, {} bytes, sha256 {}",
        artifact.package_type, artifact.size, artifact.checksum
    ));
    output.success("Done");

    Ok(())
}

/// Reads and trims the release version from the version text file.
async fn read_version(path: &Path) -> crate::bundler::Result<String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading version file", path)?;

    let version = raw.trim().to_string();
    if version.is_empty() {
        return Err(Error::GenericError(format!(
            "version file {} is empty",
            path.display()
        )));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_version_trims_whitespace() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("version.txt");
        tokio::fs::write(&path, "1.2.3\n").await.unwrap();

        assert_eq!(read_version(&path).await.unwrap(), "1.2.3");
    }

    #[tokio::test]
    async fn read_version_rejects_an_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("version.txt");
        tokio::fs::write(&path, "  \n").await.unwrap();

        assert!(read_version(&path).await.is_err());
    }

    #[tokio::test]
    async fn read_version_reports_a_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_version(&tmp.path().join("version.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("version file"));
    }
}
