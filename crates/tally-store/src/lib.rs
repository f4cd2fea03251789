// ABOUTME: Persistence layer for tally, handling the durable slot and snapshot serialization.
// ABOUTME: Provides the Slot trait, file/memory/null slots, and the failure-masking Persistence adapter.

pub mod persist;
pub mod slot;

pub use persist::{PersistError, PersistedState, Persistence};
pub use slot::{FileSlot, MemorySlot, NullSlot, SLOT_FILE_NAME, Slot, SlotError};
