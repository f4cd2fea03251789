// ABOUTME: Core library for tally, containing domain types, actions, and the state reducer.
// ABOUTME: This crate defines the data model and pure view pipeline shared across tally components.

pub mod action;
pub mod criteria;
pub mod model;
pub mod state;
pub mod view;

pub use action::{Action, CounterUpdate};
pub use criteria::{FilterOp, SortOrder, ValueFilter, ViewCriteria};
pub use model::{Counter, CounterDraft};
pub use state::CounterState;
