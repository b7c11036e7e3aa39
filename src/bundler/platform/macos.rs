//! macOS dmg packager.
//!
//! Stages the application bundle, deploys its Qt dependencies, then turns it
//! into a compressed read-only disk image. hdiutil cannot write a compressed
//! image directly from a source folder with overwrite semantics intact, so
//! the image is created writable first and converted to UDZO afterwards.

use crate::{
    bail,
    bundler::{
        error::{Context, Error, Result},
        settings::Settings,
        utils::fs,
    },
};
use std::path::PathBuf;

/// Plugin files macdeployqt copies into the bundle that the application
/// does not use. Paths are relative to the bundle root.
const EXCLUDED_PLUGINS: &[&str] = &[
    "Contents/PlugIns/sqldrivers/libqsqlmysql.dylib",
    "Contents/PlugIns/sqldrivers/libqsqlpsql.dylib",
    "Contents/PlugIns/imageformats/libqico.dylib",
    "Contents/PlugIns/imageformats/libqtga.dylib",
    "Contents/PlugIns/imageformats/libqtiff.dylib",
    "Contents/PlugIns/imageformats/libqwbmp.dylib",
    "Contents/PlugIns/imageformats/libqwebp.dylib",
];

/// Name of the intermediate writable image inside the staging directory.
const TMP_DMG: &str = "tmp.dmg";

/// Package the built application bundle as a compressed dmg.
///
/// # Process
///
/// 1. Deep-copies the freshly built `.app` into the staging directory
/// 2. Runs macdeployqt on the staged bundle
/// 3. Prunes the unneeded plugin libraries from inside the bundle
/// 4. Creates a writable HFS+ image, then converts it to compressed
///    read-only UDZO as `<name>-<version>.dmg`
///
/// # Returns
///
/// Path to the generated dmg in the output directory.
pub async fn bundle_project(settings: &Settings) -> Result<PathBuf> {
    let staging = settings.staging_directory();

    // 1. Stage the application bundle
    let bundle = staging.join(settings.executable_name());
    fs::remove_dir_all(&bundle).await?;
    log::info!("Copying application bundle to {}", bundle.display());
    fs::copy_dir(&settings.built_binary_path(), &bundle).await?;

    // 2. Deploy Qt dependencies into the bundle
    log::info!("Running macdeployqt for {}", settings.product_name());
    let status = tokio::process::Command::new("macdeployqt")
        .arg(&bundle)
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "macdeployqt".to_string(),
            error: e,
        })?;

    if !status.success() {
        bail!("macdeployqt failed with exit code: {:?}", status.code());
    }

    // 3. Prune plugins the application never loads
    for relative in EXCLUDED_PLUGINS {
        fs::remove_file(&bundle.join(relative)).await?;
    }

    // 4. Create the disk image. Stale images are deleted first; hdiutil
    // refuses to overwrite an existing output file.
    let final_path = settings.out_directory().join(package_file_name(settings));
    let tmp_dmg = staging.join(TMP_DMG);

    fs::remove_file(&tmp_dmg).await?;
    fs::remove_file(&final_path).await?;

    let tmp_str = tmp_dmg
        .to_str()
        .context("temporary image path contains invalid UTF-8")?;
    let bundle_str = bundle
        .to_str()
        .context("bundle path contains invalid UTF-8")?;
    let final_str = final_path
        .to_str()
        .context("dmg path contains invalid UTF-8")?;

    log::info!("Creating disk image...");
    run_hdiutil(&[
        "create",
        tmp_str,
        "-ov",
        "-volname",
        settings.product_name(),
        "-fs",
        "HFS+",
        "-srcfolder",
        bundle_str,
    ])
    .await?;

    log::info!("Converting disk image to compressed UDZO format...");
    run_hdiutil(&["convert", tmp_str, "-format", "UDZO", "-o", final_str]).await?;

    // The writable intermediate has served its purpose.
    fs::remove_file(&tmp_dmg).await?;

    log::info!("✓ Created dmg: {}", final_path.display());

    Ok(final_path)
}

/// Runs hdiutil, surfacing its stderr in the error on a nonzero exit.
async fn run_hdiutil(args: &[&str]) -> Result<()> {
    let output = tokio::process::Command::new("hdiutil")
        .args(args)
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "hdiutil".to_string(),
            error: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("hdiutil {} failed: {}", args.first().unwrap_or(&""), stderr);
    }

    Ok(())
}

/// Final package name: `<name>-<version>.dmg`.
fn package_file_name(settings: &Settings) -> String {
    format!("{}.dmg", settings.package_base_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{PackageSettings, SettingsBuilder};

    fn settings() -> Settings {
        SettingsBuilder::new()
            .project_directory("/work/procyon")
            .package_settings(PackageSettings {
                product_name: "Procyon".into(),
                version: "1.2.3".into(),
                executable: Some("Procyon.app".into()),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn package_name_matches_the_template() {
        assert_eq!(package_file_name(&settings()), "Procyon-1.2.3.dmg");
    }

    #[test]
    fn excluded_plugins_live_inside_the_bundle_plugin_dirs() {
        for path in EXCLUDED_PLUGINS {
            assert!(path.starts_with("Contents/PlugIns/"));
        }
    }
}
