//! Update-storm suppression for reorder commits.
//!
//! The visible sequence reflects a drag immediately; the committed sequence
//! reaches the caller only after a quiet period, and only the final sequence
//! of a burst is ever committed. The adapter never owns a timer thread — the
//! event loop calls [`DebouncedOrder::poll`] on its tick, so dropping the
//! adapter with a commit pending invokes nothing.

use std::time::{Duration, Instant};

/// Quiet period after the last reorder before a commit fires.
pub const QUIET_PERIOD_MS: u64 = 150;

#[derive(Debug)]
struct Pending<T> {
    seq: Vec<T>,
    deadline: Instant,
}

/// A debounced view over the caller's collection.
#[derive(Debug)]
pub struct DebouncedOrder<T> {
    visible: Vec<T>,
    pending: Option<Pending<T>>,
}

impl<T: Clone> DebouncedOrder<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            visible: items,
            pending: None,
        }
    }

    /// The locally visible sequence.
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// Replace the visible sequence immediately and (re)arm the commit.
    ///
    /// A second call inside the quiet window cancels and replaces the prior
    /// pending commit — intermediate sequences are visible locally but never
    /// reach the caller.
    pub fn update(&mut self, seq: Vec<T>, now: Instant) {
        self.visible = seq.clone();
        self.pending = Some(Pending {
            seq,
            deadline: now + Duration::from_millis(QUIET_PERIOD_MS),
        });
    }

    /// Restore the local view without touching any pending commit.
    ///
    /// Used by drag cancellation: a cancelled drag must not disturb a commit
    /// already scheduled by an earlier drop.
    pub fn set_visible(&mut self, seq: Vec<T>) {
        self.visible = seq;
    }

    /// Resynchronize to new canonical caller data, discarding any pending
    /// uncommitted local state.
    pub fn sync_external(&mut self, items: Vec<T>) {
        self.visible = items;
        self.pending = None;
    }

    /// Return the committed sequence once the quiet period has elapsed.
    ///
    /// Fires at most once per burst; returns `None` while the window is
    /// still open or when nothing is pending.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<T>> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.seq),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Duration {
        Duration::from_millis(QUIET_PERIOD_MS)
    }

    #[test]
    fn update_is_immediately_visible() {
        let t0 = Instant::now();
        let mut order = DebouncedOrder::new(vec![1, 2, 3]);
        order.update(vec![3, 1, 2], t0);
        assert_eq!(order.visible(), &[3, 1, 2]);
        // But nothing committed yet.
        assert_eq!(order.poll(t0), None);
    }

    #[test]
    fn commit_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut order = DebouncedOrder::new(vec![1, 2]);
        order.update(vec![2, 1], t0);

        assert_eq!(order.poll(t0 + quiet() / 2), None);
        assert_eq!(order.poll(t0 + quiet()), Some(vec![2, 1]));
        // Exactly once per burst.
        assert_eq!(order.poll(t0 + quiet() * 2), None);
    }

    #[test]
    fn rapid_updates_coalesce_to_the_last_sequence() {
        let t0 = Instant::now();
        let mut order = DebouncedOrder::new(vec![1, 2, 3]);
        order.update(vec![2, 1, 3], t0);
        order.update(vec![2, 3, 1], t0 + Duration::from_millis(40));
        order.update(vec![3, 2, 1], t0 + Duration::from_millis(80));

        // The burst commits once, with the final sequence, timed from the
        // last update.
        assert_eq!(order.poll(t0 + quiet()), None);
        assert_eq!(
            order.poll(t0 + Duration::from_millis(80) + quiet()),
            Some(vec![3, 2, 1])
        );
        assert_eq!(order.poll(t0 + Duration::from_millis(80) + quiet() * 2), None);
    }

    #[test]
    fn external_sync_discards_pending_state() {
        let t0 = Instant::now();
        let mut order = DebouncedOrder::new(vec![1, 2, 3]);
        order.update(vec![3, 2, 1], t0);
        assert!(order.has_pending());

        // Caller replaced the canonical collection (e.g. a row was deleted).
        order.sync_external(vec![1, 3]);
        assert_eq!(order.visible(), &[1, 3]);
        assert!(!order.has_pending());
        assert_eq!(order.poll(t0 + quiet()), None);
    }

    #[test]
    fn set_visible_keeps_pending_commit() {
        let t0 = Instant::now();
        let mut order = DebouncedOrder::new(vec![1, 2]);
        order.update(vec![2, 1], t0);
        order.set_visible(vec![1, 2]);

        assert_eq!(order.visible(), &[1, 2]);
        assert_eq!(order.poll(t0 + quiet()), Some(vec![2, 1]));
    }
}
