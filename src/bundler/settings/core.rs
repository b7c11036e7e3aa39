//! Core Settings struct and implementations.

use super::PackageSettings;
use std::path::{Path, PathBuf};

/// Name of the staging directory under the output directory.
///
/// Deleted and recreated at the start of every run so a previous run can
/// never leak files into the new package.
pub(crate) const STAGING_DIR_NAME: &str = "redist";

/// Name of the tool cache directory under the output directory.
///
/// The downloaded linuxdeployqt binary persists here across runs.
pub(crate) const TOOLS_DIR_NAME: &str = ".tools";

/// Main settings for a packaging run.
///
/// Central configuration constructed via [`SettingsBuilder`], combining the
/// project identity with the fixed directory layout the packagers work in.
///
/// # Examples
///
/// ```no_run
/// use qtpack::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> qtpack::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_directory(".")
///     .package_settings(PackageSettings {
///         product_name: "Procyon".into(),
///         version: "1.2.3".into(),
///         executable: None,
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Project identity.
    package: PackageSettings,

    /// Root of the project checkout holding `bin/`, `release/` and `img/`.
    project_directory: PathBuf,

    /// Output directory, relative to the project directory.
    out_directory: PathBuf,

    /// Resolved executable name (platform default applied).
    executable: String,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the executable (or macOS bundle) file name.
    pub fn executable_name(&self) -> &str {
        &self.executable
    }

    /// Returns the root of the project checkout.
    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }

    /// Returns the output directory where the final artifact lands.
    pub fn out_directory(&self) -> PathBuf {
        self.project_directory.join(&self.out_directory)
    }

    /// Returns the staging directory where files are assembled.
    pub fn staging_directory(&self) -> PathBuf {
        self.out_directory().join(STAGING_DIR_NAME)
    }

    /// Returns the directory caching downloaded deployment tools.
    pub fn tools_directory(&self) -> PathBuf {
        self.out_directory().join(TOOLS_DIR_NAME)
    }

    /// Returns the path of the previously built executable or bundle.
    pub fn built_binary_path(&self) -> PathBuf {
        self.project_directory.join("bin").join(&self.executable)
    }

    /// Returns the path of the desktop-entry file shipped with the project.
    pub fn desktop_file_path(&self) -> PathBuf {
        self.project_directory
            .join("release")
            .join(format!("{}.desktop", self.package.product_name))
    }

    /// Returns the path of the 256x256 application icon.
    pub fn icon_path(&self) -> PathBuf {
        self.project_directory.join("img/icon/main_256.png")
    }

    /// Returns the `<name>-<version>` stem every package name starts from.
    pub fn package_base_name(&self) -> String {
        format!("{}-{}", self.package.product_name, self.package.version)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        project_directory: PathBuf,
        out_directory: PathBuf,
    ) -> Self {
        let executable = package
            .executable
            .clone()
            .unwrap_or_else(|| default_executable_name(&package.product_name));

        Self {
            package,
            project_directory,
            out_directory,
            executable,
        }
    }
}

/// Platform-conventional executable name for a product.
fn default_executable_name(product_name: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{}.exe", product_name)
    } else if cfg!(target_os = "macos") {
        format!("{}.app", product_name)
    } else {
        product_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn settings() -> Settings {
        SettingsBuilder::new()
            .project_directory("/work/procyon")
            .package_settings(PackageSettings {
                product_name: "Procyon".into(),
                version: "1.2.3".into(),
                executable: Some("Procyon.exe".into()),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn package_base_name_combines_name_and_version() {
        assert_eq!(settings().package_base_name(), "Procyon-1.2.3");
    }

    #[test]
    fn staging_and_tools_live_under_the_output_directory() {
        let s = settings();
        assert_eq!(s.staging_directory(), s.out_directory().join("redist"));
        assert_eq!(s.tools_directory(), s.out_directory().join(".tools"));
    }

    #[test]
    fn built_binary_is_looked_up_in_bin() {
        assert_eq!(
            settings().built_binary_path(),
            PathBuf::from("/work/procyon/bin/Procyon.exe")
        );
    }

    #[test]
    fn executable_defaults_follow_the_platform() {
        let name = default_executable_name("Procyon");
        if cfg!(target_os = "windows") {
            assert_eq!(name, "Procyon.exe");
        } else if cfg!(target_os = "macos") {
            assert_eq!(name, "Procyon.app");
        } else {
            assert_eq!(name, "Procyon");
        }
    }
}
