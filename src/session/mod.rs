//! Session Module
//!
//! Provides in-memory session storage with recency tracking and TTL garbage
//! collection.

mod clock;
mod lru;
mod provider;
mod record;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub(crate) use lru::{NodeId, RecencyList};
pub use provider::{ProviderFactory, ProviderRegistry, SessionProvider, MEMORY_PROVIDER};
pub use record::{AccessTracker, Session, SessionValues};
pub(crate) use record::SessionRecord;
pub use stats::StoreStats;
pub use store::MemoryStore;

// == Public Constants ==
/// Maximum allowed session id length in bytes
pub const MAX_ID_LENGTH: usize = 256;

/// Maximum allowed value key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
