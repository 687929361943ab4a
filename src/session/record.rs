//! Session Record Module
//!
//! Defines the engine-owned session record and the handle given to callers.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Instant;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Shared key/value bag of one session.
pub type SessionValues<K, V> = Arc<Mutex<HashMap<K, V>>>;

// == Access Tracker ==
/// Engine-side hook a [`Session`] handle calls to refresh its recency.
///
/// `serial` identifies one incarnation of a record, so a handle whose record
/// was destroyed never refreshes a newer record that reused the same id.
pub trait AccessTracker: Send + Sync {
    /// Re-stamps the record and moves it to the most recently used end.
    ///
    /// Returns false when the record is no longer live.
    fn touch_record(&self, id: &str, serial: u64) -> bool;

    /// Checks whether the record is still owned by the engine.
    fn is_live(&self, id: &str, serial: u64) -> bool;
}

// == Session Record ==
/// A live session as stored inside the engine's recency list.
#[derive(Debug)]
pub(crate) struct SessionRecord<K, V> {
    /// Session identifier, immutable after creation
    pub(crate) id: Arc<str>,
    /// Unique per record incarnation
    pub(crate) serial: u64,
    /// Last access time, refreshed on every touch
    pub(crate) last_accessed: Instant,
    /// Wall-clock creation time
    pub(crate) created_at: DateTime<Utc>,
    /// Stored key/value pairs
    pub(crate) values: SessionValues<K, V>,
}

impl<K, V> SessionRecord<K, V> {
    // == Constructor ==
    /// Creates a record with an empty value bag.
    pub(crate) fn new(id: &str, serial: u64, now: Instant) -> Self {
        Self {
            id: Arc::from(id),
            serial,
            last_accessed: now,
            created_at: Utc::now(),
            values: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Builds a caller handle linked back to the owning engine.
    pub(crate) fn handle(&self, tracker: Weak<dyn AccessTracker>) -> Session<K, V> {
        Session::new(
            Arc::clone(&self.id),
            self.serial,
            self.created_at,
            Arc::clone(&self.values),
            tracker,
        )
    }
}

// == Session Handle ==
/// Caller handle to a session record.
///
/// Every data operation refreshes the record's recency in the owning engine,
/// reads included. Once the engine has dropped the record the handle keeps
/// working on its detached values and the refresh becomes a no-op.
pub struct Session<K = String, V = serde_json::Value> {
    id: Arc<str>,
    serial: u64,
    created_at: DateTime<Utc>,
    values: SessionValues<K, V>,
    tracker: Weak<dyn AccessTracker>,
}

impl<K, V> Session<K, V> {
    pub fn new(
        id: Arc<str>,
        serial: u64,
        created_at: DateTime<Utc>,
        values: SessionValues<K, V>,
        tracker: Weak<dyn AccessTracker>,
    ) -> Self {
        Self {
            id,
            serial,
            created_at,
            values,
            tracker,
        }
    }

    /// Returns the session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of stored keys. Does not refresh recency.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// Returns true if both handles refer to the same record incarnation.
    pub fn same_record(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    /// Checks whether the engine still owns this record.
    pub fn is_live(&self) -> bool {
        self.tracker
            .upgrade()
            .map(|tracker| tracker.is_live(&self.id, self.serial))
            .unwrap_or(false)
    }

    // == Touch ==
    /// Refreshes recency in the owning engine.
    ///
    /// Returns false if the record is gone.
    pub fn touch(&self) -> bool {
        match self.tracker.upgrade() {
            Some(tracker) => tracker.touch_record(&self.id, self.serial),
            None => false,
        }
    }
}

impl<K, V> Session<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    // == Set ==
    /// Inserts or overwrites a value, returning the previous one.
    pub fn set(&self, key: K, value: V) -> Option<V> {
        let previous = self.values.lock().insert(key, value);
        self.touch();
        previous
    }

    // == Get ==
    /// Returns a copy of the stored value, or None if the key was never set.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.touch();
        self.values.lock().get(key).cloned()
    }

    // == Delete ==
    /// Removes a key. Deleting an absent key is a no-op.
    pub fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.values.lock().remove(key);
        self.touch();
        removed
    }

    /// Copies out every stored pair. Counts as an access.
    pub fn snapshot(&self) -> HashMap<K, V>
    where
        K: Clone,
    {
        self.touch();
        self.values.lock().clone()
    }

    /// Stored keys in no particular order. Does not refresh recency.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.values.lock().keys().cloned().collect()
    }
}

impl<K, V> Clone for Session<K, V> {
    fn clone(&self) -> Self {
        Self {
            id: Arc::clone(&self.id),
            serial: self.serial,
            created_at: self.created_at,
            values: Arc::clone(&self.values),
            tracker: Weak::clone(&self.tracker),
        }
    }
}

impl<K, V> fmt::Debug for Session<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("serial", &self.serial)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
