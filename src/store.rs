use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::diet::WeeklyDiet;
use crate::i18n::Language;
use crate::profile::UserProfile;
use crate::tracking::ProgressEntry;

pub const STORE_VERSION: u32 = 1;

const PROFILE_KEY: &str = "profile";
const HISTORY_KEY: &str = "history";
const DIET_KEY: &str = "diet";
const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize record '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

/// Directory-backed key/value store, one JSON record per key.
///
/// Reads are lenient: a missing, malformed or wrong-version record loads as absent.
/// Writes replace the whole record.
#[derive(Debug, Clone)]
pub struct PlanStore {
    root: PathBuf,
}

impl PlanStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read stored record");
                return None;
            }
        };
        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) if envelope.version == STORE_VERSION => Some(envelope.data),
            Ok(envelope) => {
                tracing::warn!(key, version = envelope.version, "ignoring record with unknown version");
                None
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed stored record");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(&EnvelopeRef {
            version: STORE_VERSION,
            data: value,
        })
        .map_err(|source| StoreError::Serialize { key, source })?;

        let path = self.path_for(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, body).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(key, "record saved");
        Ok(())
    }

    fn remove(&self, key: &'static str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    pub fn load_profile(&self) -> Option<UserProfile> {
        self.read(PROFILE_KEY)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.write(PROFILE_KEY, profile)
    }

    pub fn load_history(&self) -> Vec<ProgressEntry> {
        self.read(HISTORY_KEY).unwrap_or_default()
    }

    pub fn save_history(&self, history: &[ProgressEntry]) -> Result<(), StoreError> {
        self.write(HISTORY_KEY, &history)
    }

    pub fn load_diet(&self) -> Option<WeeklyDiet> {
        self.read(DIET_KEY)
    }

    pub fn save_diet(&self, diet: &WeeklyDiet) -> Result<(), StoreError> {
        self.write(DIET_KEY, diet)
    }

    pub fn load_language(&self) -> Option<Language> {
        self.read(LANGUAGE_KEY)
    }

    pub fn save_language(&self, language: Language) -> Result<(), StoreError> {
        self.write(LANGUAGE_KEY, &language)
    }

    /// Removes profile, history and diet. The language preference is kept.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.remove(PROFILE_KEY)?;
        self.remove(HISTORY_KEY)?;
        self.remove(DIET_KEY)?;
        tracing::info!("stored profile, history and diet cleared");
        Ok(())
    }
}
