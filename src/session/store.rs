//! Memory Store Module
//!
//! Session engine combining a HashMap index with an arena-backed recency list.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, SessionError};
use crate::session::{
    AccessTracker, Clock, NodeId, RecencyList, Session, SessionRecord, StoreStats, SystemClock,
};

// == Engine State ==
/// Index and recency order, always mutated together under one lock.
#[derive(Debug)]
struct State<K, V> {
    /// Session id to recency list node
    index: HashMap<Arc<str>, NodeId>,
    /// Records, most recently used first
    order: RecencyList<SessionRecord<K, V>>,
    stats: StoreStats,
    next_serial: u64,
}

impl<K, V> State<K, V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            stats: StoreStats::new(),
            next_serial: 0,
        }
    }

    fn live_record(&self, id: &str, serial: u64) -> Option<NodeId> {
        let node = *self.index.get(id)?;
        match self.order.get(node) {
            Some(record) if record.serial == serial => Some(node),
            _ => None,
        }
    }

    fn insert(
        &mut self,
        id: &str,
        now: Instant,
        tracker: Weak<dyn AccessTracker>,
    ) -> Session<K, V> {
        self.next_serial += 1;
        let record = SessionRecord::new(id, self.next_serial, now);
        let session = record.handle(tracker);
        let key = Arc::clone(&record.id);
        let node = self.order.push_front(record);
        self.index.insert(key, node);

        self.stats.record_created();
        self.stats.set_live_sessions(self.index.len());
        session
    }
}

/// Shared engine internals; session handles hold a weak link to this.
struct Engine<K, V> {
    state: Mutex<State<K, V>>,
    clock: Arc<dyn Clock>,
}

impl<K, V> AccessTracker for Engine<K, V>
where
    K: Send,
    V: Send,
{
    fn touch_record(&self, id: &str, serial: u64) -> bool {
        let mut state = self.state.lock();
        match state.live_record(id, serial) {
            Some(node) => {
                let now = self.clock.now();
                if let Some(record) = state.order.get_mut(node) {
                    record.last_accessed = now;
                }
                state.order.touch(node)
            }
            None => false,
        }
    }

    fn is_live(&self, id: &str, serial: u64) -> bool {
        self.state.lock().live_record(id, serial).is_some()
    }
}

// == Memory Store ==
/// In-memory session store with recency tracking and TTL garbage collection.
///
/// All structural changes (create, destroy, touch, collect) take one engine
/// lock, so the index and the recency list are never observed out of step.
/// Each session's values sit behind their own lock.
///
/// Cloning the store yields another handle to the same engine.
pub struct MemoryStore<K = String, V = serde_json::Value> {
    engine: Arc<Engine<K, V>>,
}

impl<K, V> Clone for MemoryStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructor ==
    /// Creates an empty store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: Arc::new(Engine {
                state: Mutex::new(State::new()),
                clock,
            }),
        }
    }

    fn tracker(&self) -> Weak<dyn AccessTracker> {
        let weak: Weak<Engine<K, V>> = Arc::downgrade(&self.engine);
        weak
    }

    // == Init ==
    /// Creates a new empty session under `id`.
    ///
    /// Fails with [`SessionError::DuplicateId`] if `id` is already live; the
    /// existing session is left untouched.
    pub fn init(&self, id: &str) -> Result<Session<K, V>> {
        let tracker = self.tracker();
        let mut state = self.engine.state.lock();

        if state.index.contains_key(id) {
            state.stats.record_rejected();
            warn!(session_id = %id, "Rejected init for existing session id");
            return Err(SessionError::DuplicateId(id.to_string()));
        }

        let now = self.engine.clock.now();
        let session = state.insert(id, now, tracker);
        debug!(session_id = %id, "Session created");
        Ok(session)
    }

    // == Read ==
    /// Returns the session for `id`, creating an empty one if none is live.
    ///
    /// The lookup and the implicit creation happen under one lock, so
    /// concurrent readers of an unknown id all receive the same record.
    /// Reading does not refresh recency; operations on the handle do.
    pub fn read(&self, id: &str) -> Result<Session<K, V>> {
        let tracker = self.tracker();
        let mut state = self.engine.state.lock();

        if let Some(record) = state.index.get(id).and_then(|node| state.order.get(*node)) {
            return Ok(record.handle(tracker));
        }

        let now = self.engine.clock.now();
        let session = state.insert(id, now, tracker);
        debug!(session_id = %id, "Session created on read");
        Ok(session)
    }

    // == Lookup ==
    /// Strict lookup: returns the live session for `id` without creating or
    /// touching it.
    pub fn lookup(&self, id: &str) -> Option<Session<K, V>> {
        let tracker = self.tracker();
        let state = self.engine.state.lock();
        let node = state.index.get(id)?;
        state.order.get(*node).map(|record| record.handle(tracker))
    }

    // == Destroy ==
    /// Removes the session for `id`. Destroying an absent id is a no-op.
    pub fn destroy(&self, id: &str) -> Result<()> {
        let mut state = self.engine.state.lock();

        if let Some(node) = state.index.remove(id) {
            state.order.remove(node);
            let live = state.index.len();
            state.stats.record_destroyed();
            state.stats.set_live_sessions(live);
            debug!(session_id = %id, "Session destroyed");
        }

        Ok(())
    }

    // == Touch ==
    /// Re-stamps the session for `id` and moves it to the most recently used
    /// end. Touching an absent id is a no-op.
    pub fn touch(&self, id: &str) -> Result<()> {
        let mut state = self.engine.state.lock();

        if let Some(node) = state.index.get(id).copied() {
            let now = self.engine.clock.now();
            if let Some(record) = state.order.get_mut(node) {
                record.last_accessed = now;
            }
            state.order.touch(node);
        }

        Ok(())
    }

    // == Garbage Collect ==
    /// Evicts every session idle for at least `ttl`.
    ///
    /// Walks from the least recently used end and stops at the first session
    /// still within `ttl`. The boundary is inclusive: a session idle for
    /// exactly `ttl` is evicted, so a zero `ttl` clears the store.
    ///
    /// Returns the number of sessions evicted.
    pub fn garbage_collect(&self, ttl: Duration) -> usize {
        let mut guard = self.engine.state.lock();
        let state = &mut *guard;
        let now = self.engine.clock.now();
        let mut evicted = 0;

        loop {
            let expired = match state.order.peek_oldest() {
                Some(record) => now.saturating_duration_since(record.last_accessed) >= ttl,
                None => false,
            };
            if !expired {
                break;
            }

            if let Some(record) = state.order.evict_oldest() {
                state.index.remove(&record.id);
                debug!(session_id = %record.id, "Session expired");
                evicted += 1;
            }
        }

        state.stats.record_expired(evicted);
        state.stats.set_live_sessions(state.index.len());
        evicted
    }

    // == Inspection ==
    /// Returns the last access time of the session for `id`.
    pub fn last_accessed(&self, id: &str) -> Option<Instant> {
        let state = self.engine.state.lock();
        let node = state.index.get(id)?;
        state.order.get(*node).map(|record| record.last_accessed)
    }

    /// Returns how long the session for `id` has been idle.
    pub fn idle_time(&self, id: &str) -> Option<Duration> {
        let state = self.engine.state.lock();
        let node = state.index.get(id)?;
        let record = state.order.get(*node)?;
        Some(
            self.engine
                .clock
                .now()
                .saturating_duration_since(record.last_accessed),
        )
    }

    /// Session ids from most recently used to least recently used.
    pub fn ids_by_recency(&self) -> Vec<String> {
        let state = self.engine.state.lock();
        state.order.iter().map(|record| record.id.to_string()).collect()
    }

    /// Returns the current number of live sessions.
    pub fn len(&self) -> usize {
        self.engine.state.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.state.lock().index.is_empty()
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let state = self.engine.state.lock();
        let mut stats = state.stats.clone();
        stats.set_live_sessions(state.index.len());
        stats
    }

    /// Verifies the index/order bijection and recency ordering.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        let state = self.engine.state.lock();

        if state.index.len() != state.order.len() {
            return Err(format!(
                "index has {} ids but order has {} records",
                state.index.len(),
                state.order.len()
            ));
        }

        let mut previous: Option<Instant> = None;
        for record in state.order.iter() {
            match state.index.get(&record.id) {
                Some(node) if state.order.get(*node).map(|r| r.serial) == Some(record.serial) => {}
                _ => return Err(format!("record {} is not indexed", record.id)),
            }
            if let Some(newer) = previous {
                if record.last_accessed > newer {
                    return Err(format!("record {} is out of recency order", record.id));
                }
            }
            previous = Some(record.last_accessed);
        }

        Ok(())
    }
}
