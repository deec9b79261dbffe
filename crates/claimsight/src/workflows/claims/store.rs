//! Key-value record store holding the current claim, its score, and the
//! assessment history.
//!
//! Values are strings; the typed [`ClaimRecords`] facade JSON-encodes the
//! three well-known keys on top of any [`RecordStore`].

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::domain::{ClaimRecord, HistoryEntry};

pub const CURRENT_CLAIM_KEY: &str = "currentClaim";
pub const PREDICTION_SCORE_KEY: &str = "predictionScore";
pub const CLAIM_HISTORY_KEY: &str = "claimHistory";

/// String-valued persistence surface with get/set/has/remove semantics.
pub trait RecordStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("record file {path} is not a JSON object: {source}")]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored value for '{key}' is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("value for '{key}' could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by tests and the in-memory demo.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> Result<T, StoreError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store mutex poisoned".to_string()))?;
        Ok(apply(&mut guard))
    }
}

impl RecordStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

/// Store persisted as a single JSON object on disk. Every write replaces the
/// file through a sibling temp file so readers never see a partial object.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|source| StoreError::CorruptFile {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let encoded = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Encode {
                key: self.path.display().to_string(),
                source,
            }
        })?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(io_err)?;
        fs::rename(&staging, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::Unavailable("record file lock poisoned".to_string()))?;
        let mut entries = self.read_entries()?;
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl RecordStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// Typed access to the claim keys of a [`RecordStore`].
pub struct ClaimRecords<S> {
    store: Arc<S>,
}

impl<S> Clone for ClaimRecords<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> ClaimRecords<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn current_claim(&self) -> Result<Option<ClaimRecord>, StoreError> {
        self.read_json(CURRENT_CLAIM_KEY)
    }

    pub fn has_current_claim(&self) -> Result<bool, StoreError> {
        self.store.has(CURRENT_CLAIM_KEY)
    }

    /// Stores a freshly submitted claim and drops any score left over from the
    /// previous one.
    pub fn set_current_claim(&self, claim: &ClaimRecord) -> Result<(), StoreError> {
        self.write_json(CURRENT_CLAIM_KEY, claim)?;
        self.store.remove(PREDICTION_SCORE_KEY)?;
        debug!(claim_id = %claim.claim_id, "current claim stored");
        Ok(())
    }

    pub fn prediction_score(&self) -> Result<Option<f64>, StoreError> {
        self.read_json(PREDICTION_SCORE_KEY)
    }

    pub fn has_prediction_score(&self) -> Result<bool, StoreError> {
        self.store.has(PREDICTION_SCORE_KEY)
    }

    pub fn set_prediction_score(&self, score: f64) -> Result<(), StoreError> {
        self.write_json(PREDICTION_SCORE_KEY, &score)
    }

    /// History as stored, or `None` when the key has never been written.
    pub fn history_if_present(&self) -> Result<Option<Vec<HistoryEntry>>, StoreError> {
        self.read_json(CLAIM_HISTORY_KEY)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.history_if_present()?.unwrap_or_default())
    }

    /// Appends without deduplication; returns the new history length.
    pub fn append_history(&self, entry: HistoryEntry) -> Result<usize, StoreError> {
        let mut history = self.history()?;
        history.push(entry);
        self.write_json(CLAIM_HISTORY_KEY, &history)?;
        Ok(history.len())
    }

    pub fn replace_history(&self, history: &[HistoryEntry]) -> Result<(), StoreError> {
        self.write_json(CLAIM_HISTORY_KEY, &history)
    }

    /// Forgets the current claim, its score, and the history.
    pub fn clear(&self) -> Result<(), StoreError> {
        for key in [CURRENT_CLAIM_KEY, PREDICTION_SCORE_KEY, CLAIM_HISTORY_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.store
            .get(key)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                    key: key.to_string(),
                    source,
                })
            })
            .transpose()
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, encoded)
    }
}
