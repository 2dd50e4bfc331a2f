//! Implements LocationRepoPort using a JSON file.
//!
//! Stores trip_id -> ordered locations. Whole-file rewrite on every insert.

use crate::domain::{DomainError, Location};
use crate::ports::LocationRepoPort;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocationData {
    trips: HashMap<String, Vec<Location>>,
}

/// JSON file-based location storage.
pub struct JsonLocationRepo {
    path: std::path::PathBuf,
    cache: tokio::sync::RwLock<LocationData>,
}

impl JsonLocationRepo {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(LocationData::default()),
        }
    }

    /// Load locations from disk. A missing file starts empty; an unreadable one is an error.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s)
                .map_err(|e| DomainError::Repo(format!("parse {}: {}", self.path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "no location store yet; starting empty");
                LocationData::default()
            }
            Err(e) => return Err(DomainError::Repo(format!("read store: {}", e))),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Atomic save: write temp file, sync, rename over the target.
    async fn save(&self, data: &LocationData) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| DomainError::Repo(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Repo(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Repo(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Repo(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Repo(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Repo(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl LocationRepoPort for JsonLocationRepo {
    async fn count(&self, trip_id: &str) -> Result<usize, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.trips.get(trip_id).map_or(0, Vec::len))
    }

    async fn insert(&self, location: Location) -> Result<(), DomainError> {
        // Hold the write lock across the save so concurrent inserts serialize
        let mut cache = self.cache.write().await;
        let trip_id = location.trip_id.clone();
        cache
            .trips
            .entry(trip_id.clone())
            .or_default()
            .push(location);
        if let Err(e) = self.save(&cache).await {
            if let Some(list) = cache.trips.get_mut(&trip_id) {
                list.pop();
            }
            return Err(e);
        }
        info!(trip_id = %trip_id, path = %self.path.display(), "location saved");
        Ok(())
    }

    async fn list(&self, trip_id: &str) -> Result<Vec<Location>, DomainError> {
        let cache = self.cache.read().await;
        let mut locations = cache.trips.get(trip_id).cloned().unwrap_or_default();
        locations.sort_by_key(|l| l.order);
        Ok(locations)
    }
}
