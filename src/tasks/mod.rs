//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Session GC: Evicts sessions idle beyond the configured TTL

mod gc;

pub use gc::spawn_gc_task;
