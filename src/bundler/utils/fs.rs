//! File system utilities for packaging.
//!
//! Removal helpers are idempotent: a missing path is not an error, so every
//! delete-before-create step can run unconditionally.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if
/// specified.
///
/// Erasing guarantees the directory is empty afterwards; this is how the
/// staging directory is reset at the start of every run.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Fs {
            action: "removing directory".to_string(),
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Removes the file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Fs {
            action: "removing file".to_string(),
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        return Err(Error::GenericError(format!(
            "{} does not exist or is not a file",
            from.display()
        )));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Recursively copies a directory from one path to another.
///
/// Symlinks are recreated rather than followed; macOS application bundles
/// carry framework symlinks that must survive the copy.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} does not exist or is not a directory",
            from.display()
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // The walk is blocking work, keep it off the async executor.
    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }

        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.path_is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                symlink(&target, &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("directory copy task panicked: {}", e)))?
}

/// Marks the file executable (mode 0755).
#[cfg(unix)]
pub async fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .fs_context("marking executable", path)
}

/// Marks the file executable. No-op on platforms without an executable bit.
#[cfg(not(unix))]
pub async fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn erase_resets_directory_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let staging = tmp.path().join("redist");

        create_dir_all(&staging, true).await.unwrap();
        tokio::fs::write(staging.join("leftover.dll"), b"junk")
            .await
            .unwrap();

        create_dir_all(&staging, true).await.unwrap();
        assert!(staging.is_dir());
        assert!(!staging.join("leftover.dll").exists());
    }

    #[tokio::test]
    async fn remove_file_tolerates_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        remove_file(&tmp.path().join("never-created.dll"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn copy_dir_reproduces_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("App.app");
        tokio::fs::create_dir_all(src.join("Contents/MacOS"))
            .await
            .unwrap();
        tokio::fs::write(src.join("Contents/MacOS/App"), b"binary")
            .await
            .unwrap();

        let dst = tmp.path().join("staged/App.app");
        copy_dir(&src, &dst).await.unwrap();
        assert!(dst.join("Contents/MacOS/App").is_file());
    }
}
