// ABOUTME: Defines CounterState and the apply() reducer folding actions into the counter list.
// ABOUTME: Actions on a missing id are silent no-ops; next_id only ever moves forward.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::model::Counter;

/// The canonical counter list plus the next id to issue. `next_id` is
/// strictly greater than every id ever issued this session and is never
/// decremented, even after deletions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    pub counters: Vec<Counter>,
    pub next_id: u64,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            counters: Vec::new(),
            next_id: 1,
        }
    }
}

impl CounterState {
    /// Create an empty state with ids starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from a previously persisted counter list and next id.
    pub fn from_parts(counters: Vec<Counter>, next_id: u64) -> Self {
        Self { counters, next_id }
    }

    /// Apply a single action to mutate this state. Actions that target an id
    /// not in the list do nothing.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::AddCounter { draft } => {
                let counter = Counter::from_draft(self.next_id, draft);
                self.counters.push(counter);
                self.next_id += 1;
            }

            Action::RemoveCounter { id } => {
                self.counters.retain(|counter| counter.id != *id);
            }

            Action::UpdateCounter { id, update } => {
                if let Some(counter) = self.counter_by_id_mut(*id) {
                    if let Some(name) = &update.name {
                        counter.name = name.clone();
                    }
                    if let Some(value) = update.value {
                        counter.value = value;
                    }
                    if let Some(step) = update.step {
                        counter.step = step;
                    }
                }
            }

            Action::IncrementCounter { id } => {
                if let Some(counter) = self.counter_by_id_mut(*id) {
                    counter.value += counter.step;
                }
            }

            Action::DecrementCounter { id } => {
                if let Some(counter) = self.counter_by_id_mut(*id) {
                    counter.value -= counter.step;
                }
            }

            Action::ResetCounter { id } => {
                if let Some(counter) = self.counter_by_id_mut(*id) {
                    counter.value = 0.0;
                }
            }

            Action::SetCounterValue { id, value } => {
                if let Some(counter) = self.counter_by_id_mut(*id) {
                    counter.value = *value;
                }
            }
        }
    }

    /// Look up a counter by id.
    pub fn counter_by_id(&self, id: u64) -> Option<&Counter> {
        self.counters.iter().find(|counter| counter.id == id)
    }

    fn counter_by_id_mut(&mut self, id: u64) -> Option<&mut Counter> {
        self.counters.iter_mut().find(|counter| counter.id == id)
    }

    /// Number of counters in the list.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Sum of all counter values.
    pub fn total_value(&self) -> f64 {
        self.counters.iter().map(|counter| counter.value).sum()
    }

    /// Counters with a strictly positive value.
    pub fn active_counters(&self) -> Vec<&Counter> {
        self.counters
            .iter()
            .filter(|counter| counter.value > 0.0)
            .collect()
    }
}
