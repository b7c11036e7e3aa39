//! AppImage packager - portable Linux applications.

use crate::{
    bail,
    bundler::{
        error::{Context, Error, Result},
        settings::{Arch, Settings},
        utils::{fs, http},
    },
};
use std::path::{Path, PathBuf};

/// Pinned linuxdeployqt release.
///
/// Release 6 and later refuse to run on anything newer than the oldest
/// supported LTS; release 5 is the last one relaxed about the build host.
const LINUXDEPLOYQT_FILE: &str = "linuxdeployqt-5-x86_64.AppImage";
const LINUXDEPLOYQT_BASE_URL: &str =
    "https://github.com/probonopd/linuxdeployqt/releases/download/5";

/// Extra plugins linuxdeployqt does not pull in on its own.
const EXTRA_PLUGINS: &str = "iconengines,imageformats/libqsvg.so";

/// Libraries excluded from the AppImage (SQL drivers, image-format plugins).
const EXCLUDED_LIBS: &str =
    "libqsqlmysql,libqsqlpsql,libqicns,libqico,libqtga,libqtiff,libqwbmp,libqwebp";

/// Package the built executable as an AppImage.
///
/// # Process
///
/// 1. Downloads the pinned linuxdeployqt release (cached in `.tools/`)
/// 2. Builds the AppDir skeleton in the staging directory
/// 3. Copies the executable, desktop entry and icon into place
/// 4. Invokes linuxdeployqt against the desktop file
/// 5. Renames the tool's output to `<name>-<version>-linux-x<bits>.AppImage`
///
/// # Returns
///
/// Path to the generated AppImage in the output directory.
pub async fn bundle_project(settings: &Settings) -> Result<PathBuf> {
    // 1. Fetch the deployment tool if a previous run has not already
    let tool = ensure_linuxdeployqt(&settings.tools_directory()).await?;

    // 2. AppDir skeleton
    let app_dir = settings.staging_directory();
    let bin_dir = app_dir.join("usr/bin");
    let lib_dir = app_dir.join("usr/lib");
    let applications_dir = app_dir.join("usr/share/applications");
    let icons_dir = app_dir.join("usr/share/icons/hicolor/256x256/apps");

    for dir in [&bin_dir, &lib_dir, &applications_dir, &icons_dir] {
        fs::create_dir_all(dir, false).await?;
    }

    // 3. Payload: executable, desktop entry, icon
    let target_exe = bin_dir.join(settings.executable_name());
    fs::copy_file(&settings.built_binary_path(), &target_exe).await?;

    let desktop_file = applications_dir.join(format!("{}.desktop", settings.product_name()));
    fs::copy_file(&settings.desktop_file_path(), &desktop_file).await?;

    let icon_file = icons_dir.join(format!("{}.png", settings.product_name()));
    fs::copy_file(&settings.icon_path(), &icon_file).await?;

    // linuxdeployqt reports "Could not determine the path to the executable"
    // when the copied binary is not runnable.
    fs::set_executable(&target_exe).await?;

    // 4. Invoke the tool. It writes its AppImage into the current directory,
    // so run it from the output directory.
    log::info!("Running linuxdeployqt for {}", settings.product_name());
    let status = tokio::process::Command::new(&tool)
        .arg(&desktop_file)
        .args(["-appimage", "-no-translations", "-no-copy-copyright-files"])
        .arg(format!("-extra-plugins={}", EXTRA_PLUGINS))
        .arg(format!("-exclude-libs={}", EXCLUDED_LIBS))
        .current_dir(settings.out_directory())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "linuxdeployqt".to_string(),
            error: e,
        })?;

    if !status.success() {
        bail!("linuxdeployqt failed with exit code: {:?}", status.code());
    }

    // 5. The tool picks its own output name with an architecture suffix;
    // locate it and rename onto the final package name.
    let produced = find_tool_output(&settings.out_directory(), settings.product_name())?;

    let arch = Arch::of_binary(&target_exe).await?;
    let final_path = settings
        .out_directory()
        .join(package_file_name(settings, arch));

    fs::remove_file(&final_path).await?;
    tokio::fs::rename(&produced, &final_path)
        .await
        .map_err(|source| Error::Fs {
            action: "renaming AppImage".to_string(),
            path: final_path.clone(),
            source,
        })?;

    log::info!("✓ Created AppImage: {}", final_path.display());

    Ok(final_path)
}

/// Downloads the pinned linuxdeployqt release into the tool cache.
///
/// Idempotent: a cached file skips the download entirely, with no checksum
/// or freshness re-validation. The digest of a fresh download is logged so
/// the fetch is auditable.
async fn ensure_linuxdeployqt(tools_dir: &Path) -> Result<PathBuf> {
    let tool_path = tools_dir.join(LINUXDEPLOYQT_FILE);

    if tool_path.exists() {
        log::debug!("linuxdeployqt already cached at {}", tool_path.display());
        return Ok(tool_path);
    }

    fs::create_dir_all(tools_dir, false).await?;

    let url = format!("{}/{}", LINUXDEPLOYQT_BASE_URL, LINUXDEPLOYQT_FILE);
    let data = http::download(&url).await?;
    log::info!(
        "{} sha256: {}",
        LINUXDEPLOYQT_FILE,
        crate::bundler::builder::checksum::sha256_hex(&data)
    );

    tokio::fs::write(&tool_path, data)
        .await
        .map_err(|source| Error::Fs {
            action: "writing linuxdeployqt tool".to_string(),
            path: tool_path.clone(),
            source,
        })?;

    fs::set_executable(&tool_path).await?;

    Ok(tool_path)
}

/// Locates the AppImage the tool produced.
///
/// The output name is nondeterministic (`<name>-x*.AppImage`); anything other
/// than exactly one match is an error, never a silent pick.
fn find_tool_output(out_dir: &Path, product_name: &str) -> Result<PathBuf> {
    let pattern = out_dir.join(format!("{}-x*.AppImage", product_name));
    let pattern = pattern
        .to_str()
        .context("output directory path contains invalid UTF-8")?;

    let matches: Vec<PathBuf> = glob::glob(pattern)?.filter_map(|m| m.ok()).collect();

    match matches.as_slice() {
        [single] => Ok(single.clone()),
        [] => Err(Error::GenericError(format!(
            "linuxdeployqt produced no {}-x*.AppImage in {}",
            product_name,
            out_dir.display()
        ))),
        many => Err(Error::GenericError(format!(
            "ambiguous linuxdeployqt output: {} files match {}-x*.AppImage",
            many.len(),
            product_name
        ))),
    }
}

/// Final package name: `<name>-<version>-linux-x<bits>.AppImage`.
fn package_file_name(settings: &Settings, arch: Arch) -> String {
    format!(
        "{}-linux-x{}.AppImage",
        settings.package_base_name(),
        arch.bits()
    )
}
