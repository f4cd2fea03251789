// ABOUTME: The CounterStore state-holder: mutation entry points, derived queries, and subscriptions.
// ABOUTME: Every list mutation funnels through one commit path that persists and notifies.

use chrono::Utc;
use tally_core::view;

pub use tally_core::{
    Action, Counter, CounterDraft, CounterState, CounterUpdate, FilterOp, SortOrder, ValueFilter,
    ViewCriteria,
};
pub use tally_store::{
    FileSlot, MemorySlot, NullSlot, PersistedState, Persistence, SLOT_FILE_NAME, Slot, SlotError,
};

type Subscriber = Box<dyn Fn(&CounterState, &ViewCriteria)>;

/// The counter state container. Owns the canonical counter list and the
/// session-scoped view criteria, persists the list after every mutation,
/// and notifies subscribers after every observable change.
///
/// Single logical thread of execution: entry points take `&mut self` and run
/// to completion, so no interleaving is ever observed.
pub struct CounterStore<S: Slot> {
    state: CounterState,
    criteria: ViewCriteria,
    persistence: Persistence<S>,
    subscribers: Vec<Subscriber>,
}

impl CounterStore<FileSlot> {
    /// Open a store backed by the durable slot file inside `dir`, loading
    /// any previously persisted counter list.
    pub fn open(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::with_slot(FileSlot::new(dir))
    }
}

impl<S: Slot> CounterStore<S> {
    /// Build a store over any slot. Persisted state is loaded once, here;
    /// load failures fall back to an empty list (logged by the adapter).
    pub fn with_slot(slot: S) -> Self {
        let persistence = Persistence::new(slot);
        let loaded = persistence.load();
        tracing::debug!(
            counters = loaded.counters.len(),
            next_id = loaded.next_id,
            "counter store loaded"
        );
        Self {
            state: CounterState::from_parts(loaded.counters, loaded.next_id),
            criteria: ViewCriteria::default(),
            persistence,
            subscribers: Vec::new(),
        }
    }

    // --- mutation entry points ---

    /// Append a new counter, filling defaults for missing draft fields.
    /// Returns the assigned id.
    pub fn add_counter(&mut self, draft: CounterDraft) -> u64 {
        let id = self.state.next_id;
        self.commit(Action::AddCounter { draft });
        id
    }

    /// Remove the counter with the given id. No-op if absent.
    pub fn remove_counter(&mut self, id: u64) {
        self.commit(Action::RemoveCounter { id });
    }

    /// Shallow-merge the update into the matching counter. No-op if absent.
    pub fn update_counter(&mut self, id: u64, update: CounterUpdate) {
        self.commit(Action::UpdateCounter { id, update });
    }

    /// Add the counter's step to its value. No-op if absent.
    pub fn increment(&mut self, id: u64) {
        self.commit(Action::IncrementCounter { id });
    }

    /// Subtract the counter's step from its value. No-op if absent.
    pub fn decrement(&mut self, id: u64) {
        self.commit(Action::DecrementCounter { id });
    }

    /// Set the counter's value back to zero. No-op if absent.
    pub fn reset(&mut self, id: u64) {
        self.commit(Action::ResetCounter { id });
    }

    /// Overwrite the counter's value. No-op if absent.
    pub fn set_value(&mut self, id: u64, value: f64) {
        self.commit(Action::SetCounterValue { id, value });
    }

    /// Remove the durable slot and reset the list to empty with ids starting
    /// over at 1. View criteria are untouched.
    pub fn clear_storage(&mut self) {
        self.persistence.clear();
        self.state = CounterState::new();
        self.notify();
    }

    // --- criteria-only entry points (no persistence) ---

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.criteria.sort = sort;
        self.notify();
    }

    /// Replace the value filter wholesale.
    pub fn set_filter(&mut self, filter: ValueFilter) {
        self.criteria.filter = filter;
        self.notify();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.criteria.search = term.into();
        self.notify();
    }

    /// Reset sort, filter, and search to their defaults.
    pub fn clear_filters(&mut self) {
        self.criteria = ViewCriteria::default();
        self.notify();
    }

    // --- queries ---

    /// The canonical counter list, in insertion order.
    pub fn counters(&self) -> &[Counter] {
        &self.state.counters
    }

    pub fn counter_by_id(&self, id: u64) -> Option<&Counter> {
        self.state.counter_by_id(id)
    }

    pub fn counters_count(&self) -> usize {
        self.state.len()
    }

    /// Sum of all counter values.
    pub fn total_value(&self) -> f64 {
        self.state.total_value()
    }

    /// Counters with a strictly positive value.
    pub fn active_counters(&self) -> Vec<&Counter> {
        self.state.active_counters()
    }

    /// The view pipeline (search, value filter, sort) applied to the full
    /// list with the current criteria. Recomputed from canonical state on
    /// every call, so reads are always fresh.
    pub fn visible_counters(&self) -> Vec<Counter> {
        view::apply(&self.state.counters, &self.criteria)
    }

    pub fn sort(&self) -> SortOrder {
        self.criteria.sort
    }

    pub fn filter(&self) -> ValueFilter {
        self.criteria.filter
    }

    pub fn search(&self) -> &str {
        &self.criteria.search
    }

    // --- subscriptions ---

    /// Register a callback invoked after every mutation, whether to the
    /// counter list or to the view criteria.
    pub fn subscribe(&mut self, callback: impl Fn(&CounterState, &ViewCriteria) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// The single post-mutation path for all counter list changes: fold the
    /// action into state, persist synchronously, notify subscribers.
    fn commit(&mut self, action: Action) {
        self.state.apply(&action);
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        self.persistence.save(&PersistedState {
            counters: self.state.counters.clone(),
            next_id: self.state.next_id,
            saved_at: Some(Utc::now()),
        });
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.state, &self.criteria);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn memory_store() -> CounterStore<MemorySlot> {
        CounterStore::with_slot(MemorySlot::new())
    }

    fn draft(name: &str, value: f64, step: f64) -> CounterDraft {
        CounterDraft {
            name: Some(name.to_string()),
            value: Some(value),
            step: Some(step),
        }
    }

    #[test]
    fn add_counter_returns_assigned_id() {
        let mut store = memory_store();

        assert_eq!(store.add_counter(CounterDraft::default()), 1);
        assert_eq!(store.add_counter(CounterDraft::default()), 2);
        assert_eq!(store.counters_count(), 2);
    }

    #[test]
    fn remove_then_lookup_yields_absent() {
        let mut store = memory_store();
        let id = store.add_counter(draft("A", 0.0, 1.0));

        store.remove_counter(id);

        assert!(store.counter_by_id(id).is_none());
    }

    #[test]
    fn every_mutation_persists() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = CounterStore::with_slot(Arc::clone(&slot));

        let raw_after = |slot: &MemorySlot| slot.read().unwrap().unwrap();

        let id = store.add_counter(draft("A", 0.0, 1.0));
        let after_add = raw_after(&slot);
        assert!(after_add.contains("\"A\""));

        store.increment(id);
        assert_ne!(raw_after(&slot), after_add, "increment should re-save");

        store.set_value(id, 9.0);
        assert!(raw_after(&slot).contains("9.0") || raw_after(&slot).contains(":9"));
    }

    #[test]
    fn criteria_changes_do_not_persist() {
        let slot = Arc::new(MemorySlot::new());
        let mut store = CounterStore::with_slot(Arc::clone(&slot));

        store.set_search("coffee");
        store.set_sort(SortOrder::NameAsc);
        store.set_filter(ValueFilter::greater_than(1.0));
        store.clear_filters();

        assert!(slot.read().unwrap().is_none(), "criteria must never hit the slot");
    }

    #[test]
    fn total_value_tracks_every_mutation() {
        let mut store = memory_store();
        let a = store.add_counter(draft("A", 2.0, 1.0));
        let b = store.add_counter(draft("B", 5.0, 3.0));

        let check = |store: &CounterStore<MemorySlot>| {
            let sum: f64 = store.counters().iter().map(|c| c.value).sum();
            assert_eq!(store.total_value(), sum);
        };

        check(&store);
        store.increment(a);
        check(&store);
        store.decrement(b);
        check(&store);
        store.set_value(a, -10.0);
        check(&store);
        store.remove_counter(b);
        check(&store);
    }

    #[test]
    fn clear_storage_resets_ids() {
        let mut store = memory_store();
        store.add_counter(CounterDraft::default());
        store.add_counter(CounterDraft::default());

        store.clear_storage();

        assert_eq!(store.counters_count(), 0);
        assert_eq!(store.add_counter(CounterDraft::default()), 1);
    }

    #[test]
    fn clear_storage_keeps_criteria() {
        let mut store = memory_store();
        store.set_search("water");

        store.clear_storage();

        assert_eq!(store.search(), "water");
    }

    #[test]
    fn visible_counters_reads_are_always_fresh() {
        let mut store = memory_store();
        store.add_counter(draft("Coffee", 3.0, 1.0));
        store.add_counter(draft("Water", 8.0, 1.0));

        assert_eq!(store.visible_counters().len(), 2);

        store.set_search("cof");
        assert_eq!(store.visible_counters().len(), 1);

        store.clear_filters();
        assert_eq!(store.visible_counters().len(), 2);
    }

    #[test]
    fn subscriber_fires_on_list_and_criteria_changes() {
        let mut store = memory_store();
        let calls = Rc::new(Cell::new(0usize));
        let calls_seen = Rc::clone(&calls);

        store.subscribe(move |_state, _criteria| {
            calls_seen.set(calls_seen.get() + 1);
        });

        store.add_counter(CounterDraft::default()); // 1
        store.increment(1); // 2
        store.set_search("a"); // 3
        store.clear_filters(); // 4
        store.clear_storage(); // 5

        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn subscriber_observes_committed_state() {
        let mut store = memory_store();
        let last_count = Rc::new(Cell::new(usize::MAX));
        let last_seen = Rc::clone(&last_count);

        store.subscribe(move |state, _criteria| {
            last_seen.set(state.counters.len());
        });

        store.add_counter(CounterDraft::default());
        assert_eq!(last_count.get(), 1);

        store.remove_counter(1);
        assert_eq!(last_count.get(), 0);
    }

    #[test]
    fn unavailable_medium_never_disturbs_the_store() {
        let mut store = CounterStore::with_slot(NullSlot);

        let id = store.add_counter(draft("A", 1.0, 1.0));
        store.increment(id);
        store.clear_storage();

        assert_eq!(store.counters_count(), 0);
    }
}
