// ABOUTME: View criteria types: sort order, value filter, and search term.
// ABOUTME: Criteria are session-scoped and never persisted; unknown inputs fold to passthrough.

use serde::{Deserialize, Serialize};

/// Sort order for the view pipeline. `Unsorted` preserves insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Unsorted,
    NameAsc,
    NameDesc,
    ValueAsc,
    ValueDesc,
}

impl SortOrder {
    /// Parse a sort key as supplied by UI code. Unrecognized or empty keys
    /// fold to `Unsorted` rather than erroring.
    pub fn from_key(key: &str) -> Self {
        match key {
            "name-asc" => SortOrder::NameAsc,
            "name-desc" => SortOrder::NameDesc,
            "value-asc" => SortOrder::ValueAsc,
            "value-desc" => SortOrder::ValueDesc,
            _ => SortOrder::Unsorted,
        }
    }
}

/// Comparison operator for the value filter. `Any` disables filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterOp {
    #[default]
    Any,
    Greater,
    Less,
}

impl FilterOp {
    /// Parse a filter key as supplied by UI code. Unrecognized or empty keys
    /// fold to `Any` (no filtering).
    pub fn from_key(key: &str) -> Self {
        match key {
            "greater" => FilterOp::Greater,
            "less" => FilterOp::Less,
            _ => FilterOp::Any,
        }
    }
}

/// Value filter: keep counters whose value compares against `value` per `op`.
/// An `Any` op or a missing threshold means passthrough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueFilter {
    pub op: FilterOp,
    pub value: Option<f64>,
}

impl ValueFilter {
    pub fn greater_than(value: f64) -> Self {
        Self {
            op: FilterOp::Greater,
            value: Some(value),
        }
    }

    pub fn less_than(value: f64) -> Self {
        Self {
            op: FilterOp::Less,
            value: Some(value),
        }
    }
}

/// The full set of view criteria applied by the pipeline. Defaults to
/// everything-passes-through; reset wholesale by `clear_filters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewCriteria {
    pub sort: SortOrder,
    pub filter: ValueFilter,
    pub search: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_from_key_recognizes_known_keys() {
        assert_eq!(SortOrder::from_key("name-asc"), SortOrder::NameAsc);
        assert_eq!(SortOrder::from_key("name-desc"), SortOrder::NameDesc);
        assert_eq!(SortOrder::from_key("value-asc"), SortOrder::ValueAsc);
        assert_eq!(SortOrder::from_key("value-desc"), SortOrder::ValueDesc);
    }

    #[test]
    fn sort_order_from_key_folds_unknown_to_unsorted() {
        assert_eq!(SortOrder::from_key(""), SortOrder::Unsorted);
        assert_eq!(SortOrder::from_key("created-asc"), SortOrder::Unsorted);
    }

    #[test]
    fn filter_op_from_key_folds_unknown_to_any() {
        assert_eq!(FilterOp::from_key("greater"), FilterOp::Greater);
        assert_eq!(FilterOp::from_key("less"), FilterOp::Less);
        assert_eq!(FilterOp::from_key(""), FilterOp::Any);
        assert_eq!(FilterOp::from_key("between"), FilterOp::Any);
    }

    #[test]
    fn sort_order_serializes_kebab_case() {
        let json = serde_json::to_string(&SortOrder::ValueDesc).unwrap();
        assert_eq!(json, "\"value-desc\"");
    }

    #[test]
    fn view_criteria_default_is_passthrough() {
        let criteria = ViewCriteria::default();
        assert_eq!(criteria.sort, SortOrder::Unsorted);
        assert_eq!(criteria.filter.op, FilterOp::Any);
        assert!(criteria.filter.value.is_none());
        assert!(criteria.search.is_empty());
    }
}
