//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the static asset directory is missing. Returns whether it exists.
pub async fn check_static_dir(static_dir: &str) -> bool {
    let found = tokio::fs::metadata(static_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !found {
        warn!(%static_dir, "static assets directory not found; front-end routes will 404");
    }
    found
}

/// Ensure an optional data file exists before it is read.
pub async fn require_file(path: &str) -> anyhow::Result<()> {
    tokio::fs::metadata(path)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read {path}: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_static_dir_reported() {
        assert!(!check_static_dir("/definitely/not/here").await);
        assert!(check_static_dir(".").await);
    }

    #[tokio::test]
    async fn require_file_errors_on_missing() {
        assert!(require_file("/definitely/not/here.json").await.is_err());
        assert!(require_file("Cargo.toml").await.is_ok());
    }
}
