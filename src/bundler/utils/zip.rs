//! Zip archive creation for the Windows redistributable.

use crate::bundler::error::{Error, Result};
use std::path::Path;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Archives every file under `src_dir` into a new zip at `archive_path`.
///
/// Entry names are relative to `src_dir` with forward-slash separators, so
/// the archive unpacks into the same tree on any platform. Any pre-existing
/// archive at the destination is deleted first. Uses deflate compression.
pub async fn zip_dir(src_dir: &Path, archive_path: &Path) -> Result<()> {
    super::fs::remove_file(archive_path).await?;

    let src_dir = src_dir.to_path_buf();
    let archive_path = archive_path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = std::fs::File::create(&archive_path)?;
        let mut writer = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in walkdir::WalkDir::new(&src_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel_path = entry.path().strip_prefix(&src_dir)?;
            let name = rel_path.to_string_lossy().replace('\\', "/");

            writer.start_file(name, options)?;
            let mut input = std::fs::File::open(entry.path())?;
            std::io::copy(&mut input, &mut writer)?;
        }

        writer.finish()?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("zip task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn archive_contains_exactly_the_staged_files() {
        let tmp = tempfile::tempdir().unwrap();
        let staging = tmp.path().join("redist");
        tokio::fs::create_dir_all(staging.join("imageformats"))
            .await
            .unwrap();
        tokio::fs::write(staging.join("App.exe"), b"exe").await.unwrap();
        tokio::fs::write(staging.join("Qt5Core.dll"), b"dll")
            .await
            .unwrap();
        tokio::fs::write(staging.join("imageformats/qjpeg.dll"), b"dll")
            .await
            .unwrap();

        let archive = tmp.path().join("App-1.0.0-win-x64.zip");
        zip_dir(&staging, &archive).await.unwrap();

        let reader = std::fs::File::open(&archive).unwrap();
        let zip = zip::ZipArchive::new(reader).unwrap();
        let names: BTreeSet<String> = zip.file_names().map(str::to_string).collect();
        let expected: BTreeSet<String> = ["App.exe", "Qt5Core.dll", "imageformats/qjpeg.dll"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn stale_archive_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let staging = tmp.path().join("redist");
        tokio::fs::create_dir_all(&staging).await.unwrap();
        tokio::fs::write(staging.join("App.exe"), b"exe").await.unwrap();

        let archive = tmp.path().join("App.zip");
        tokio::fs::write(&archive, b"not a zip").await.unwrap();

        zip_dir(&staging, &archive).await.unwrap();

        let reader = std::fs::File::open(&archive).unwrap();
        let zip = zip::ZipArchive::new(reader).unwrap();
        assert_eq!(zip.len(), 1);
    }
}
