//! Provider Module
//!
//! Storage engine contract and the name-keyed registry used to pick one at
//! startup.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::error::{Result, SessionError};
use crate::session::{MemoryStore, Session, StoreStats};

/// Registry name of the in-memory engine.
pub const MEMORY_PROVIDER: &str = "memory";

// == Session Provider ==
/// Contract every session storage engine implements.
pub trait SessionProvider<K = String, V = serde_json::Value>: Send + Sync {
    /// Creates a new session; fails if `id` is already live.
    fn init(&self, id: &str) -> Result<Session<K, V>>;

    /// Returns the session for `id`, creating it if absent.
    fn read(&self, id: &str) -> Result<Session<K, V>>;

    /// Removes a session. Absent ids are not an error.
    fn destroy(&self, id: &str) -> Result<()>;

    /// Refreshes a session's recency. Absent ids are not an error.
    fn touch(&self, id: &str) -> Result<()>;

    /// Evicts sessions idle for at least `ttl`, returning how many.
    fn garbage_collect(&self, ttl: Duration) -> usize;

    /// Returns the live session for `id` without creating it.
    fn lookup(&self, id: &str) -> Option<Session<K, V>>;

    /// How long the session for `id` has been idle.
    fn idle_time(&self, id: &str) -> Option<Duration>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> StoreStats;
}

impl<K, V> SessionProvider<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    fn init(&self, id: &str) -> Result<Session<K, V>> {
        MemoryStore::init(self, id)
    }

    fn read(&self, id: &str) -> Result<Session<K, V>> {
        MemoryStore::read(self, id)
    }

    fn destroy(&self, id: &str) -> Result<()> {
        MemoryStore::destroy(self, id)
    }

    fn touch(&self, id: &str) -> Result<()> {
        MemoryStore::touch(self, id)
    }

    fn garbage_collect(&self, ttl: Duration) -> usize {
        MemoryStore::garbage_collect(self, ttl)
    }

    fn lookup(&self, id: &str) -> Option<Session<K, V>> {
        MemoryStore::lookup(self, id)
    }

    fn idle_time(&self, id: &str) -> Option<Duration> {
        MemoryStore::idle_time(self, id)
    }

    fn len(&self) -> usize {
        MemoryStore::len(self)
    }

    fn stats(&self) -> StoreStats {
        MemoryStore::stats(self)
    }
}

/// Builds a fresh provider instance.
pub type ProviderFactory<K, V> = Box<dyn Fn() -> Arc<dyn SessionProvider<K, V>> + Send + Sync>;

// == Provider Registry ==
/// Name-keyed table of provider constructors.
///
/// Populated explicitly at startup; there is no global instance.
pub struct ProviderRegistry<K = String, V = serde_json::Value> {
    factories: HashMap<String, ProviderFactory<K, V>>,
}

impl<K, V> Default for ProviderRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ProviderRegistry<K, V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a constructor under `name`.
    ///
    /// A name can only be registered once.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Arc<dyn SessionProvider<K, V>> + Send + Sync + 'static,
    {
        if self.factories.contains_key(name) {
            return Err(SessionError::DuplicateProvider(name.to_string()));
        }
        self.factories.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    /// Builds the provider registered under `name`.
    pub fn create(&self, name: &str) -> Result<Arc<dyn SessionProvider<K, V>>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| SessionError::UnknownProvider(name.to_string()))?;
        info!(provider = %name, "Session provider created");
        Ok(factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<K, V> ProviderRegistry<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Registry with the built-in engines registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.factories.insert(
            MEMORY_PROVIDER.to_string(),
            Box::new(|| Arc::new(MemoryStore::<K, V>::new()) as Arc<dyn SessionProvider<K, V>>),
        );
        registry
    }
}
