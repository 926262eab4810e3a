use crate::errors::AppError;
use crate::models::TrackerData;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, warn};

/// Reads the tracker document, starting empty when it is missing or unreadable.
pub async fn load_data(path: &Path) -> TrackerData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<TrackerData>(&bytes) {
            Ok(data) => {
                debug!(
                    users = data.users.len(),
                    entries = data.entries.len(),
                    goals = data.goals.len(),
                    "loaded tracker data"
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file {}: {err}", path.display());
                TrackerData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!("no data file at {}, starting empty", path.display());
            TrackerData::default()
        }
        Err(err) => {
            error!("failed to read data file {}: {err}", path.display());
            TrackerData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &TrackerData) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
