//! Deployment tool reachability probes.
//!
//! Run before any side effect so a missing tool fails the run while the
//! output directory is still untouched.

use crate::{
    bail,
    bundler::{
        error::{Error, Result},
        platform::PackageType,
    },
};
use std::process::Stdio;

/// Verifies the deployment tool for the selected package type is reachable.
pub async fn ensure_deploy_tool(package_type: PackageType) -> Result<()> {
    match package_type {
        PackageType::Zip => probe_deployqt("windeployqt").await,
        PackageType::Dmg => probe_deployqt("macdeployqt").await,
        // linuxdeployqt is fetched by the packager itself, but it resolves
        // the Qt installation through qmake on PATH.
        PackageType::AppImage => probe_qmake().await,
    }
}

/// Probes windeployqt/macdeployqt.
///
/// Both tools exit nonzero for a version query and print their full help
/// text, so the probe discards the output and deliberately ignores the exit
/// status; reachability is all it establishes.
async fn probe_deployqt(tool: &str) -> Result<()> {
    let path = which::which(tool).map_err(|_| Error::ToolNotFound {
        tool: tool.to_string(),
    })?;

    let _ = tokio::process::Command::new(&path)
        .arg("-v")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| Error::CommandFailed {
            command: tool.to_string(),
            error: e,
        })?;

    log::debug!("Found {} at {}", tool, path.display());
    Ok(())
}

/// Probes qmake, which reports its version with a well-behaved exit status.
async fn probe_qmake() -> Result<()> {
    let path = which::which("qmake").map_err(|_| Error::ToolNotFound {
        tool: "qmake".to_string(),
    })?;

    let output = tokio::process::Command::new(&path)
        .arg("-version")
        .output()
        .await
        .map_err(|e| Error::CommandFailed {
            command: "qmake".to_string(),
            error: e,
        })?;

    if !output.status.success() {
        bail!("qmake -version failed with exit code: {:?}", output.status.code());
    }

    log::debug!(
        "Found qmake at {}: {}",
        path.display(),
        String::from_utf8_lossy(&output.stdout).trim()
    );
    Ok(())
}
