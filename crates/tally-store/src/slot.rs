// ABOUTME: The Slot trait abstracting the single durable key-value slot, plus its implementations.
// ABOUTME: FileSlot writes atomically (tmp, fsync, rename); NullSlot models an unavailable medium.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

/// File name of the durable slot inside its data directory.
pub const SLOT_FILE_NAME: &str = "counter_store_data.json";

/// Errors that can occur reading or writing the durable slot.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("durable storage unavailable")]
    Unavailable,
}

/// A single durable string-valued slot. The only shared resource in the
/// system; accessed read-then-write by a single logical thread.
pub trait Slot {
    /// Read the slot contents, `None` if the slot has never been written
    /// or was removed.
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Overwrite the slot contents.
    fn write(&self, payload: &str) -> Result<(), SlotError>;

    /// Remove the slot entirely. Removing an absent slot is not an error.
    fn remove(&self) -> Result<(), SlotError>;
}

impl<S: Slot> Slot for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>, SlotError> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<(), SlotError> {
        (**self).write(payload)
    }

    fn remove(&self) -> Result<(), SlotError> {
        (**self).remove()
    }
}

/// Durable slot backed by one JSON file under a data directory.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot at the fixed file name inside `dir`. The directory is
    /// created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SLOT_FILE_NAME),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&self, payload: &str) -> Result<(), SlotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: tmp file, fsync, rename.
        let tmp_path = self.path.with_extension("tmp");
        let mut file = File::create(&tmp_path)?;
        file.write_all(payload.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), SlotError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-process slot for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySlot {
    cell: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.cell.lock().expect("slot lock poisoned").clone())
    }

    fn write(&self, payload: &str) -> Result<(), SlotError> {
        *self.cell.lock().expect("slot lock poisoned") = Some(payload.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), SlotError> {
        *self.cell.lock().expect("slot lock poisoned") = None;
        Ok(())
    }
}

/// A slot whose medium is unavailable: reads see nothing, writes fail.
pub struct NullSlot;

impl Slot for NullSlot {
    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(None)
    }

    fn write(&self, _payload: &str) -> Result<(), SlotError> {
        Err(SlotError::Unavailable)
    }

    fn remove(&self) -> Result<(), SlotError> {
        Err(SlotError::Unavailable)
    }
}
