//! Crash-safe whole-file writes.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::StoreError;

/// Write `contents` to a uniquely named temp file in `dir`, then rename it
/// over `target`.
///
/// The rename is the only step that makes new contents visible, so `target`
/// holds either the old bytes or the new ones. The temp file is gone when this
/// returns, whether or not the write succeeded.
pub(crate) async fn write_atomic(
    dir: &Path,
    target: &Path,
    prefix: &str,
    contents: &[u8],
) -> Result<(), StoreError> {
    let tmp = dir.join(format!("{}_{}.tmp", prefix, Uuid::new_v4().simple()));

    let result = write_then_rename(&tmp, target, contents).await;
    if result.is_err() {
        match fs::remove_file(&tmp).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove temp file {}: {}", tmp.display(), e),
        }
    }
    result
}

async fn write_then_rename(tmp: &Path, target: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut file = fs::File::create(tmp).await.map_err(StoreError::io(tmp))?;
    file.write_all(contents).await.map_err(StoreError::io(tmp))?;
    file.sync_all().await.map_err(StoreError::io(tmp))?;
    drop(file);

    fs::rename(tmp, target).await.map_err(StoreError::io(target))
}
