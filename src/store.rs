use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, warn};
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::models::{EducationEntry, Gender, ProfileRecord};
use crate::storage::ProfileStorage;

/// Value published to watchers after every state change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub record: ProfileRecord,
    pub is_loading: bool,
}

/// Partial update for the basic-info fields. `None` leaves the existing
/// value untouched; in particular an already-set birth date cannot be
/// cleared through this operation.
#[derive(Debug, Clone, Default)]
pub struct BasicInfoUpdate {
    pub chinese_name: Option<String>,
    pub english_name: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
}

struct StoreState {
    record: ProfileRecord,
    is_loading: bool,
    initialized: bool,
}

/// Stateful facade over the persisted profile record. Holds the current
/// record behind a lock, publishes a snapshot to subscribers after every
/// change, and writes the full record back in a detached task after each
/// mutation. Later writes may overwrite earlier in-flight ones; the
/// in-memory record is authoritative for the running process.
#[derive(Clone)]
pub struct ProfileStore {
    state: Arc<Mutex<StoreState>>,
    storage: Arc<ProfileStorage>,
    events: watch::Sender<ProfileSnapshot>,
}

impl ProfileStore {
    pub fn new(storage: ProfileStorage) -> Self {
        let (events, _) = watch::channel(ProfileSnapshot {
            record: ProfileRecord::default(),
            is_loading: false,
        });

        Self {
            state: Arc::new(Mutex::new(StoreState {
                record: ProfileRecord::default(),
                is_loading: false,
                initialized: false,
            })),
            storage: Arc::new(storage),
            events,
        }
    }

    /// One-shot startup load. Sets the loading flag, reads the persisted
    /// record (or its fallbacks), publishes the result, and clears the
    /// flag. Repeated calls are ignored.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.lock().await;
            if state.initialized {
                warn!("Profile store already initialized; ignoring");
                return;
            }
            state.initialized = true;
            state.is_loading = true;
            self.publish(&state);
        }

        let record = self.storage.load().await;

        let mut state = self.state.lock().await;
        state.record = record;
        state.is_loading = false;
        self.publish(&state);
    }

    pub fn subscribe(&self) -> watch::Receiver<ProfileSnapshot> {
        self.events.subscribe()
    }

    pub async fn record(&self) -> ProfileRecord {
        self.state.lock().await.record.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.is_loading
    }

    pub async fn snapshot(&self) -> ProfileSnapshot {
        let state = self.state.lock().await;
        ProfileSnapshot {
            record: state.record.clone(),
            is_loading: state.is_loading,
        }
    }

    /// Applies the provided fields and leaves the rest alone.
    pub async fn update_basic_info(&self, update: BasicInfoUpdate) {
        let record = {
            let mut state = self.state.lock().await;
            if let Some(value) = update.chinese_name {
                state.record.chinese_name = value;
            }
            if let Some(value) = update.english_name {
                state.record.english_name = value;
            }
            if let Some(value) = update.birth_date {
                state.record.birth_date = Some(value);
            }
            if let Some(value) = update.gender {
                state.record.gender = value;
            }
            if let Some(value) = update.email {
                state.record.email = value;
            }
            self.publish(&state);
            state.record.clone()
        };

        self.persist(record);
    }

    pub async fn add_education_entry(&self, entry: EducationEntry) {
        let record = {
            let mut state = self.state.lock().await;
            state.record.education_history.push(entry);
            self.publish(&state);
            state.record.clone()
        };

        self.persist(record);
    }

    /// Replaces the entry with the same id, position preserved. An
    /// unmatched id is a silent no-op: no notification, no save.
    pub async fn update_education_entry(&self, entry: EducationEntry) {
        let record = {
            let mut state = self.state.lock().await;
            match state
                .record
                .education_history
                .iter_mut()
                .find(|existing| existing.id == entry.id)
            {
                Some(slot) => *slot = entry,
                None => return,
            }
            self.publish(&state);
            state.record.clone()
        };

        self.persist(record);
    }

    /// Removes every entry with the given entry's id (at most one, since
    /// ids are unique). Persists even when nothing matched.
    pub async fn delete_education_entry(&self, entry: &EducationEntry) {
        let record = {
            let mut state = self.state.lock().await;
            state
                .record
                .education_history
                .retain(|existing| existing.id != entry.id);
            self.publish(&state);
            state.record.clone()
        };

        self.persist(record);
    }

    fn publish(&self, state: &StoreState) {
        self.events.send_replace(ProfileSnapshot {
            record: state.record.clone(),
            is_loading: state.is_loading,
        });
    }

    fn persist(&self, record: ProfileRecord) {
        let storage = self.storage.clone();
        tokio::spawn(async move {
            if let Err(err) = storage.save(&record).await {
                error!("Failed to persist profile data: {err}");
            }
        });
    }
}
