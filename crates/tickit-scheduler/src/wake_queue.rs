//! `WakeQueue` — the master scheduler's due-time index of pending wake-ups
//! (§3 "Wake queue"), implemented as a `BTreeMap<SimTime, Vec<ComponentId>>`
//! grouped by due tick, the same sparse representation the teacher crate uses
//! for its own wake queue: most components are idle most ticks, so indexing
//! by due time and draining only the due bucket costs `O(log W)` per
//! operation, where `W` is the number of distinct pending wake times, not the
//! number of components.

use std::collections::{BTreeMap, HashMap, HashSet};

use tickit_core::{ComponentId, SimTime};

/// At most one outstanding wake request per component is meaningful (§3); a
/// later request at an earlier time supersedes an earlier one, and a later
/// request at an equal-or-later time is dropped as a tolerated duplicate.
#[derive(Debug, Default)]
pub struct WakeQueue {
    buckets: BTreeMap<SimTime, Vec<ComponentId>>,
    pending: HashMap<ComponentId, SimTime>,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that `component` be woken at `at`. If `component` already has
    /// a pending wake at an earlier-or-equal time, this call is a no-op; if
    /// the existing pending wake is later, it is rescheduled to `at`.
    pub fn push(&mut self, component: ComponentId, at: SimTime) {
        if let Some(&existing) = self.pending.get(&component) {
            if existing <= at {
                return;
            }
            if let Some(bucket) = self.buckets.get_mut(&existing) {
                bucket.retain(|c| c != &component);
                if bucket.is_empty() {
                    self.buckets.remove(&existing);
                }
            }
        }
        self.buckets.entry(at).or_default().push(component.clone());
        self.pending.insert(component, at);
    }

    /// Remove and return the earliest due time and every component waiting
    /// on it, or `None` if the queue is empty (the signal the master
    /// scheduler's main loop uses to decide on natural shutdown, §4.4).
    pub fn pop_due_earliest(&mut self) -> Option<(SimTime, HashSet<ComponentId>)> {
        let &time = self.buckets.keys().next()?;
        let components = self.buckets.remove(&time).unwrap();
        for component in &components {
            self.pending.remove(component);
        }
        Some((time, components.into_iter().collect()))
    }

    pub fn peek_next_time(&self) -> Option<SimTime> {
        self.buckets.keys().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_earliest_bucket_with_all_its_components() {
        let mut q = WakeQueue::new();
        q.push(ComponentId::new("a"), SimTime::ZERO.offset(10));
        q.push(ComponentId::new("b"), SimTime::ZERO.offset(10));
        q.push(ComponentId::new("c"), SimTime::ZERO.offset(20));

        let (time, components) = q.pop_due_earliest().unwrap();
        assert_eq!(time, SimTime::ZERO.offset(10));
        assert_eq!(components.len(), 2);
        assert_eq!(q.peek_next_time(), Some(SimTime::ZERO.offset(20)));
    }

    #[test]
    fn later_equal_or_later_request_is_a_tolerated_no_op() {
        let mut q = WakeQueue::new();
        q.push(ComponentId::new("a"), SimTime::ZERO.offset(10));
        q.push(ComponentId::new("a"), SimTime::ZERO.offset(20)); // later, dropped
        let (time, components) = q.pop_due_earliest().unwrap();
        assert_eq!(time, SimTime::ZERO.offset(10));
        assert_eq!(components.len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn earlier_request_reschedules_the_pending_wake() {
        let mut q = WakeQueue::new();
        q.push(ComponentId::new("a"), SimTime::ZERO.offset(20));
        q.push(ComponentId::new("a"), SimTime::ZERO.offset(5)); // earlier, supersedes
        assert_eq!(q.peek_next_time(), Some(SimTime::ZERO.offset(5)));
        let (time, components) = q.pop_due_earliest().unwrap();
        assert_eq!(time, SimTime::ZERO.offset(5));
        assert_eq!(components.len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn empty_queue_pops_none() {
        let mut q = WakeQueue::new();
        assert!(q.pop_due_earliest().is_none());
    }
}
