//! Store Statistics Module
//!
//! Tracks session lifecycle counters for the store engine.

use serde::Serialize;

// == Store Stats ==
/// Session lifecycle counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of sessions created (explicitly or implicitly)
    pub created: u64,
    /// Number of sessions removed by an explicit destroy
    pub destroyed: u64,
    /// Number of sessions evicted by garbage collection
    pub expired: u64,
    /// Number of init calls rejected for a duplicate id
    pub rejected: u64,
    /// Current number of live sessions
    pub live_sessions: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self) {
        self.created += 1;
    }

    pub fn record_destroyed(&mut self) {
        self.destroyed += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    // == Update Live Count ==
    pub fn set_live_sessions(&mut self, count: usize) {
        self.live_sessions = count;
    }
}
