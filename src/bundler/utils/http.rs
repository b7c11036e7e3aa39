//! HTTP download for the pinned linuxdeployqt release.

use crate::bundler::error::Result;

/// Downloads a file from a URL and returns its contents as a byte vector.
///
/// No timeout is applied; a stalled transfer blocks the run.
pub async fn download(url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading {}", url);

    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    Ok(bytes.to_vec())
}
