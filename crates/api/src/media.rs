//! Uploaded file storage under the configured media root, served back at
//! `/media`.

use std::path::Path;

use crate::error::AppError;

/// URL prefix the media root is served under.
pub const MEDIA_URL: &str = "/media";

/// Public URL for a path relative to the media root.
pub fn media_url(relative: &str) -> String {
    format!("{MEDIA_URL}/{relative}")
}

/// Write `bytes` to `root/relative`, creating parent directories as needed.
pub async fn store(root: &Path, relative: &str, bytes: &[u8]) -> Result<(), AppError> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(format!("create {}: {e}", parent.display())))?;
    }
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload");
    Ok(())
}

/// Delete `root/relative` if present. Failures are logged, not returned.
pub async fn discard(root: &Path, relative: &str) {
    let path = root.join(relative);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Discarded upload"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to discard upload"),
    }
}
