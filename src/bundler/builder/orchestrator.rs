//! Main packaging orchestration.

use crate::bundler::{
    Result, Settings,
    error::ErrorExt,
    platform::{self, PackageType},
    utils::fs,
};
use std::path::PathBuf;

use super::{checksum::calculate_sha256, tool_detection};

/// A finished distributable artifact.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Kind of artifact produced.
    pub package_type: PackageType,
    /// Final artifact path inside the output directory.
    pub path: PathBuf,
    /// Artifact size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the artifact.
    pub checksum: String,
}

/// Main packaging orchestrator.
///
/// Selects exactly one packaging procedure from the host platform and runs
/// it as a linear sequence of fatal-on-failure steps.
///
/// # Examples
///
/// ```no_run
/// use qtpack::bundler::{Bundler, PackageSettings, SettingsBuilder};
///
/// # async fn example() -> qtpack::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_directory(".")
///     .package_settings(PackageSettings {
///         product_name: "Procyon".into(),
///         version: "1.2.3".into(),
///         executable: None,
///     })
///     .build()?;
///
/// let artifact = Bundler::new(settings).bundle().await?;
/// println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the packaging settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the packaging procedure for the host platform.
    ///
    /// # Process
    ///
    /// 1. Probes the deployment tool before any side effect
    /// 2. Creates the output directory if absent; deletes and recreates the
    ///    staging directory unconditionally
    /// 3. Delegates to the platform packager
    /// 4. Collects artifact metadata (size, SHA-256)
    ///
    /// # Errors
    ///
    /// Any failed step aborts the run; nothing is retried or rolled back.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let package_type = PackageType::host()?;

        tool_detection::ensure_deploy_tool(package_type).await?;

        fs::create_dir_all(&self.settings.out_directory(), false).await?;
        fs::create_dir_all(&self.settings.staging_directory(), true).await?;

        let path = match package_type {
            PackageType::Zip => platform::windows::bundle_project(&self.settings).await?,
            PackageType::AppImage => platform::linux::bundle_project(&self.settings).await?,
            PackageType::Dmg => platform::macos::bundle_project(&self.settings).await?,
        };

        let metadata = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?;
        let checksum = calculate_sha256(&path).await?;

        Ok(BundledArtifact {
            package_type,
            path,
            size: metadata.len(),
            checksum,
        })
    }
}
