// ABOUTME: Defines the Counter entity and the CounterDraft creation payload.
// ABOUTME: Drafts carry optional fields; Counter::from_draft fills in the documented defaults.

use serde::{Deserialize, Serialize};

/// A single named counter. Ids are assigned by the state reducer and are
/// unique and monotonically increasing within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub id: u64,
    pub name: String,
    pub value: f64,
    pub step: f64,
}

/// Partial creation payload for a new counter. Any omitted field takes its
/// default: name "Counter {id}", value 0, step 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterDraft {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub step: Option<f64>,
}

impl Counter {
    /// Build a counter from a draft, applying defaults for missing fields.
    /// The id comes from the caller (the reducer owns id assignment).
    pub fn from_draft(id: u64, draft: &CounterDraft) -> Self {
        Self {
            id,
            name: draft
                .name
                .clone()
                .unwrap_or_else(|| format!("Counter {}", id)),
            value: draft.value.unwrap_or(0.0),
            step: draft.step.unwrap_or(1.0),
        }
    }
}
