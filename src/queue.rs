//! Bounded FIFO of grid snapshots between the simulation and render threads.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::grid::Grid;

/// Queue capacity used by the stock runner.
pub const DEFAULT_CAPACITY: usize = 30;

/// A thread-safe bounded FIFO of rendered-generation snapshots.
///
/// The producer never blocks: pushing into a full queue drops that snapshot
/// and reports it, so the simulation keeps its own pace while the consumer
/// drains at whatever cadence it likes. Gaps between delivered generations
/// are expected under load. `try_push`, `try_pop` and `len` are atomic with
/// respect to each other; the queue never holds more than its capacity.
pub struct SnapshotQueue {
    inner: Mutex<VecDeque<Grid>>,
    capacity: usize,
}

impl SnapshotQueue {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "snapshot queue needs capacity >= 1");
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push a snapshot unless the queue is full. Returns whether the
    /// snapshot was accepted; a full queue is not an error.
    pub fn try_push(&self, snapshot: Grid) -> bool {
        let mut inner = self.inner.lock();
        if inner.len() >= self.capacity {
            return false;
        }
        inner.push_back(snapshot);
        true
    }

    /// Pop the oldest snapshot, if any.
    pub fn try_pop(&self) -> Option<Grid> {
        self.inner.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for SnapshotQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
