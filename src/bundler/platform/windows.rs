//! Windows zip packager.

use crate::{
    bail,
    bundler::{
        error::{Error, Result},
        settings::{Arch, Settings},
        utils::{fs, zip},
    },
};
use std::path::{Path, PathBuf};

/// Plugin files windeployqt copies that the application does not use.
///
/// EGL/GLES shims, SQL drivers and image-format plugins. Hand-maintained;
/// paths are relative to the staging tree.
const EXCLUDED_PLUGINS: &[&str] = &[
    "libEGL.dll",
    "libGLESV2.dll",
    "sqldrivers/qsqlmysql.dll",
    "sqldrivers/qsqlodbc.dll",
    "sqldrivers/qsqlpsql.dll",
    "imageformats/qicns.dll",
    "imageformats/qtga.dll",
    "imageformats/qtiff.dll",
    "imageformats/qwbmp.dll",
    "imageformats/qwebp.dll",
];

/// Package the built executable as a redistributable zip.
///
/// # Process
///
/// 1. Runs windeployqt against the built executable, staging its runtime
///    dependencies (translations, the software D3D compiler and software
///    OpenGL are disabled)
/// 2. Prunes the unneeded plugin files
/// 3. Copies the executable into the staging tree
/// 4. Archives the staging tree into `<name>-<version>-win-x<bits>.zip`
///
/// # Returns
///
/// Path to the generated zip archive in the output directory.
pub async fn bundle_project(settings: &Settings) -> Result<PathBuf> {
    let staging = settings.staging_directory();
    let binary = settings.built_binary_path();

    // 1. Stage runtime dependencies
    log::info!("Running windeployqt for {}", settings.product_name());
    let status = tokio::process::Command::new("windeployqt")
        .arg(&binary)
        .arg("--dir")
        .arg(&staging)
        .args(["--no-translations", "--no-system-d3d-compiler", "--no-opengl-sw"])
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "windeployqt".to_string(),
            error: e,
        })?;

    if !status.success() {
        bail!("windeployqt failed with exit code: {:?}", status.code());
    }

    // 2. Prune plugins the application never loads
    prune_excluded_plugins(&staging).await?;

    // 3. Copy the executable itself
    let staged_binary = staging.join(settings.executable_name());
    fs::copy_file(&binary, &staged_binary).await?;

    // 4. Archive
    let arch = Arch::of_binary(&staged_binary).await?;
    let archive_path = settings
        .out_directory()
        .join(package_file_name(settings, arch));

    log::info!("Packing staged files into {}", archive_path.display());
    zip::zip_dir(&staging, &archive_path).await?;

    log::info!("✓ Created zip archive: {}", archive_path.display());

    Ok(archive_path)
}

/// Deletes the excluded plugin files from the staging tree.
///
/// A listed file the Qt build never produced is skipped.
async fn prune_excluded_plugins(staging: &Path) -> Result<()> {
    log::debug!("Pruning {} excluded plugin files", EXCLUDED_PLUGINS.len());
    for relative in EXCLUDED_PLUGINS {
        fs::remove_file(&staging.join(relative)).await?;
    }
    Ok(())
}

/// Final archive name: `<name>-<version>-win-x<bits>.zip`.
fn package_file_name(settings: &Settings, arch: Arch) -> String {
    format!("{}-win-x{}.zip", settings.package_base_name(), arch.bits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{PackageSettings, SettingsBuilder};

    fn settings() -> Settings {
        SettingsBuilder::new()
            .project_directory("/work/app")
            .package_settings(PackageSettings {
                product_name: "App".into(),
                version: "1.2.3".into(),
                executable: Some("App.exe".into()),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn archive_name_matches_the_template() {
        assert_eq!(
            package_file_name(&settings(), Arch::X86_64),
            "App-1.2.3-win-x64.zip"
        );
        assert_eq!(
            package_file_name(&settings(), Arch::X86),
            "App-1.2.3-win-x32.zip"
        );
    }

    #[tokio::test]
    async fn pruning_removes_only_the_excluded_files() {
        let tmp = tempfile::tempdir().unwrap();
        let staging = tmp.path();
        tokio::fs::create_dir_all(staging.join("sqldrivers"))
            .await
            .unwrap();
        tokio::fs::create_dir_all(staging.join("imageformats"))
            .await
            .unwrap();

        tokio::fs::write(staging.join("libEGL.dll"), b"x").await.unwrap();
        tokio::fs::write(staging.join("sqldrivers/qsqlmysql.dll"), b"x")
            .await
            .unwrap();
        tokio::fs::write(staging.join("sqldrivers/qsqlite.dll"), b"x")
            .await
            .unwrap();
        tokio::fs::write(staging.join("imageformats/qjpeg.dll"), b"x")
            .await
            .unwrap();

        prune_excluded_plugins(staging).await.unwrap();

        assert!(!staging.join("libEGL.dll").exists());
        assert!(!staging.join("sqldrivers/qsqlmysql.dll").exists());
        // Files outside the exclusion list survive.
        assert!(staging.join("sqldrivers/qsqlite.dll").exists());
        assert!(staging.join("imageformats/qjpeg.dll").exists());
    }

    #[tokio::test]
    async fn pruning_tolerates_files_the_qt_build_never_produced() {
        let tmp = tempfile::tempdir().unwrap();
        prune_excluded_plugins(tmp.path()).await.unwrap();
    }
}
