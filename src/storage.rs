use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use thiserror::Error;
use tokio::fs;

use crate::models::ProfileRecord;

/// Fixed file name used at both storage locations.
pub const PROFILE_FILE_NAME: &str = "profile_data.json";

const APP_DIR_NAME: &str = "wenzday";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no profile data at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to serialize profile data: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves and owns the two candidate storage locations: the writable
/// primary file, and an optional read-only seed shipped with the app.
/// Saves only ever touch the primary.
pub struct ProfileStorage {
    primary: PathBuf,
    seed: Option<PathBuf>,
}

impl ProfileStorage {
    pub fn new(primary: PathBuf, seed: Option<PathBuf>) -> Self {
        Self { primary, seed }
    }

    /// Storage under the per-user data directory, no seed. `None` when the
    /// platform reports no data directory.
    pub fn in_default_location() -> Option<Self> {
        let dir = dirs::data_dir()?.join(APP_DIR_NAME);
        Some(Self::new(dir.join(PROFILE_FILE_NAME), None))
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    /// Loads the record, trying the primary file, then the seed, then
    /// falling back to the defaulted record. Absent or undecodable data is
    /// never an error for the caller; corrupt local state degrades to an
    /// empty profile.
    pub async fn load(&self) -> ProfileRecord {
        match self.try_load_from(&self.primary).await {
            Ok(record) => {
                info!("Loaded profile data from {}", self.primary.display());
                return record;
            }
            Err(LoadError::NotFound { .. }) => {}
            Err(err) => warn!("Ignoring profile data: {err}"),
        }

        if let Some(seed) = &self.seed {
            match self.try_load_from(seed).await {
                Ok(record) => {
                    info!("Loaded seed profile data from {}", seed.display());
                    return record;
                }
                Err(LoadError::NotFound { .. }) => {}
                Err(err) => warn!("Ignoring seed data: {err}"),
            }
        }

        info!("No profile data found; starting with an empty profile");
        ProfileRecord::default()
    }

    async fn try_load_from(&self, path: &Path) -> Result<ProfileRecord, LoadError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|err| LoadError::Decode {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Writes the full record to the primary location, overwriting any
    /// existing content. Failures are the caller's to report; in-memory
    /// state stays authoritative either way.
    pub async fn save(&self, record: &ProfileRecord) -> Result<(), SaveError> {
        let json = serde_json::to_vec_pretty(record)?;

        if let Some(parent) = self.primary.parent() {
            fs::create_dir_all(parent).await.map_err(|err| SaveError::Io {
                path: parent.to_path_buf(),
                source: err,
            })?;
        }

        fs::write(&self.primary, json).await.map_err(|err| SaveError::Io {
            path: self.primary.to_path_buf(),
            source: err,
        })
    }
}
