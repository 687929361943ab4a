//! Session Store - In-process session storage
//!
//! Keeps per-client session state keyed by opaque ids, with O(1) recency
//! tracking and TTL-based garbage collection of idle sessions.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, SessionError};
pub use session::{MemoryStore, ProviderRegistry, Session, SessionProvider};
pub use tasks::spawn_gc_task;
