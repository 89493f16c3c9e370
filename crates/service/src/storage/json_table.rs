use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs;

use crate::errors::ServiceError;

/// Read a JSON array file into a `Vec<T>`.
///
/// Tables are read once at startup; there is no write-back.
pub async fn load_table<T, P>(path: P) -> Result<Vec<T>, ServiceError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path)
        .await
        .map_err(|e| ServiceError::Data(format!("{}: {e}", path.display())))?;
    serde_json::from_slice(&bytes).map_err(|e| ServiceError::Data(format!("{}: {e}", path.display())))
}
