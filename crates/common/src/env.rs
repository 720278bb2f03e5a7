//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data directory exists at startup.

use std::path::Path;

use tracing::info;

/// Create the data directory if it is missing.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    info!(data_dir = %data_dir.display(), "created data directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_dir_and_tolerates_existing() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("records_env_{}", uuid::Uuid::new_v4()));
        ensure_data_dir(&dir).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        ensure_data_dir(&dir).await?;
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
