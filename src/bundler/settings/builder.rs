//! Builder for constructing Settings.

use super::{PackageSettings, Settings};
use crate::bundler::error::{Context, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use qtpack::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> qtpack::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_directory(".")
///     .out_directory("out")
///     .package_settings(PackageSettings {
///         product_name: "Procyon".into(),
///         version: "1.2.3".into(),
///         executable: None,
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_directory: Option<PathBuf>,
    out_directory: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the root of the project checkout.
    ///
    /// Default: the current directory.
    pub fn project_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory, relative to the project directory.
    ///
    /// Default: `out`
    pub fn out_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project identity.
    ///
    /// # Required
    ///
    /// This field is required for building, and the product name and version
    /// must be non-empty.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `package_settings` is missing or carries an empty
    /// product name or version.
    pub fn build(self) -> Result<Settings> {
        let package = self
            .package_settings
            .context("package_settings is required")?;

        if package.product_name.is_empty() {
            return Err(crate::bundler::error::Error::GenericError(
                "product name must not be empty".to_string(),
            ));
        }
        if package.version.is_empty() {
            return Err(crate::bundler::error::Error::GenericError(
                "version must not be empty".to_string(),
            ));
        }

        Ok(Settings::new(
            package,
            self.project_directory
                .unwrap_or_else(|| PathBuf::from(".")),
            self.out_directory.unwrap_or_else(|| PathBuf::from("out")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_package_settings() {
        assert!(SettingsBuilder::new().build().is_err());
    }

    #[test]
    fn build_rejects_empty_version() {
        let result = SettingsBuilder::new()
            .package_settings(PackageSettings {
                product_name: "Procyon".into(),
                version: String::new(),
                executable: None,
            })
            .build();
        assert!(result.is_err());
    }
}
