// ABOUTME: Pure view pipeline: search, value filter, and sort stages over the counter list.
// ABOUTME: Stages run in fixed order and never mutate their input; passthrough keeps insertion order.

use std::cmp::Ordering;

use crate::criteria::{FilterOp, SortOrder, ValueFilter, ViewCriteria};
use crate::model::Counter;

/// Keep counters whose name contains the trimmed search term, matched
/// case-insensitively. An empty or whitespace-only term passes everything.
pub fn search_stage(counters: Vec<Counter>, term: &str) -> Vec<Counter> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return counters;
    }
    counters
        .into_iter()
        .filter(|counter| counter.name.to_lowercase().contains(&needle))
        .collect()
}

/// Keep counters whose value compares against the filter threshold. A filter
/// without an op or without a threshold passes everything.
pub fn filter_stage(counters: Vec<Counter>, filter: &ValueFilter) -> Vec<Counter> {
    let Some(threshold) = filter.value else {
        return counters;
    };
    match filter.op {
        FilterOp::Any => counters,
        FilterOp::Greater => counters
            .into_iter()
            .filter(|counter| counter.value > threshold)
            .collect(),
        FilterOp::Less => counters
            .into_iter()
            .filter(|counter| counter.value < threshold)
            .collect(),
    }
}

/// Order counters per the sort criterion. `Unsorted` preserves the incoming
/// order. Name sorts compare case-insensitively; sorts are stable.
pub fn sort_stage(mut counters: Vec<Counter>, order: SortOrder) -> Vec<Counter> {
    match order {
        SortOrder::Unsorted => {}
        SortOrder::NameAsc => counters.sort_by(|a, b| compare_names(a, b)),
        SortOrder::NameDesc => counters.sort_by(|a, b| compare_names(b, a)),
        SortOrder::ValueAsc => counters.sort_by(|a, b| a.value.total_cmp(&b.value)),
        SortOrder::ValueDesc => counters.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
    counters
}

fn compare_names(a: &Counter, b: &Counter) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Apply the full pipeline (search, then value filter, then sort) to a
/// counter list, producing a new projection.
pub fn apply(counters: &[Counter], criteria: &ViewCriteria) -> Vec<Counter> {
    let searched = search_stage(counters.to_vec(), &criteria.search);
    let filtered = filter_stage(searched, &criteria.filter);
    sort_stage(filtered, criteria.sort)
}
