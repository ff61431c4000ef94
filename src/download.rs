//! Blocking HTTP downloads for the checkpoint and the sample image.

use std::path::Path;

use crate::CamError;

/// Downloads `url` to `path`, overwriting any existing file.
pub fn fetch(url: &str, path: &Path) -> Result<(), CamError> {
    log::info!("fetching {url} -> {}", path.display());
    let response = reqwest::blocking::get(url)
        .map_err(|source| CamError::Download { url: url.to_string(), source })?;
    let status = response.status();
    if !status.is_success() {
        return Err(CamError::HttpStatus { url: url.to_string(), status });
    }
    let bytes = response
        .bytes()
        .map_err(|source| CamError::Download { url: url.to_string(), source })?;
    std::fs::write(path, &bytes)
        .map_err(|source| CamError::Io { path: path.to_path_buf(), source })?;
    Ok(())
}

/// Downloads `url` to `path` unless the file is already present.
pub fn fetch_if_missing(url: &str, path: &Path) -> Result<(), CamError> {
    if path.exists() {
        log::debug!("{} already present, skipping download", path.display());
        return Ok(());
    }
    fetch(url, path)
}
