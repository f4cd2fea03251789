// ABOUTME: Defines the Action enum representing all write operations on the counter list.
// ABOUTME: Actions are folded into CounterState by the reducer; criteria changes are not actions.

use serde::{Deserialize, Serialize};

use crate::model::CounterDraft;

/// An intent to mutate the counter list. Every list mutation in the system is
/// expressed as one of these, so persistence can hook a single apply path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    AddCounter {
        draft: CounterDraft,
    },
    RemoveCounter {
        id: u64,
    },
    UpdateCounter {
        id: u64,
        update: CounterUpdate,
    },
    IncrementCounter {
        id: u64,
    },
    DecrementCounter {
        id: u64,
    },
    ResetCounter {
        id: u64,
    },
    SetCounterValue {
        id: u64,
        value: f64,
    },
}

/// Shallow-merge payload for UpdateCounter. Only present fields overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterUpdate {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub step: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_round_trip() {
        let actions = vec![
            Action::AddCounter {
                draft: CounterDraft {
                    name: Some("Water".to_string()),
                    value: None,
                    step: Some(2.0),
                },
            },
            Action::RemoveCounter { id: 4 },
            Action::UpdateCounter {
                id: 2,
                update: CounterUpdate {
                    name: Some("Renamed".to_string()),
                    value: None,
                    step: None,
                },
            },
            Action::IncrementCounter { id: 1 },
            Action::DecrementCounter { id: 1 },
            Action::ResetCounter { id: 9 },
            Action::SetCounterValue { id: 3, value: -2.5 },
        ];

        for action in &actions {
            let json = serde_json::to_string(action).expect("serialize action");
            let deser: Action = serde_json::from_str(&json).expect("deserialize action");
            assert_eq!(*action, deser, "round-trip mismatch for action");
        }
    }

    #[test]
    fn action_uses_type_tag() {
        let json = serde_json::to_string(&Action::ResetCounter { id: 5 }).unwrap();
        assert!(json.contains("\"type\":\"ResetCounter\""));
    }
}
