// ABOUTME: The Persistence adapter: snapshot load/save/clear over a Slot with failure masking.
// ABOUTME: Load falls back to defaults on any failure; save/clear degrade to logged no-ops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::Counter;
use thiserror::Error;

use crate::slot::{Slot, SlotError};

/// Errors that can occur inside the persistence adapter. These never cross
/// the adapter's public surface; they exist to be logged.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("slot error: {0}")]
    Slot(#[from] SlotError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The serialized record stored in the durable slot. Missing fields take
/// defaults on load, so an older or differently-shaped record still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub counters: Vec<Counter>,
    pub next_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            counters: Vec::new(),
            next_id: 1,
            saved_at: None,
        }
    }
}

/// Snapshot persistence over a durable slot. Both failure kinds the system
/// knows about (medium unavailable, payload unreadable) are caught here,
/// logged as warnings, and masked behind safe defaults.
pub struct Persistence<S: Slot> {
    slot: S,
}

impl<S: Slot> Persistence<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Load the persisted state, or defaults if the slot is absent, the
    /// medium is unavailable, or the payload fails to parse. Never errors.
    pub fn load(&self) -> PersistedState {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("failed to load counter data, starting empty: {e}");
                PersistedState::default()
            }
        }
    }

    fn try_load(&self) -> Result<PersistedState, PersistError> {
        match self.slot.read()? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(PersistedState::default()),
        }
    }

    /// Serialize and write the state to the slot. Failures are logged and
    /// swallowed; the in-memory state stays authoritative either way.
    pub fn save(&self, state: &PersistedState) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!("failed to save counter data: {e}");
        }
    }

    fn try_save(&self, state: &PersistedState) -> Result<(), PersistError> {
        let json = serde_json::to_string(state)?;
        self.slot.write(&json)?;
        Ok(())
    }

    /// Remove the durable slot entirely. Failures are logged and swallowed.
    pub fn clear(&self) {
        if let Err(e) = self.slot.remove() {
            tracing::warn!("failed to clear counter data: {e}");
        }
    }
}
