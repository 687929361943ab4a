//! Session GC Task
//!
//! Background task that periodically evicts idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::session::SessionProvider;

/// Spawns a background task that periodically garbage collects sessions.
///
/// The task sleeps for `interval` between sweeps and evicts every session
/// idle for at least `ttl`. Each sweep only takes the engine lock for the
/// duration of the eviction walk, so request traffic keeps flowing.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let provider: Arc<dyn SessionProvider> = Arc::new(MemoryStore::new());
/// let gc_handle = spawn_gc_task(provider.clone(), Duration::from_secs(60), Duration::from_secs(3600));
/// // Later, during shutdown:
/// gc_handle.abort();
/// ```
pub fn spawn_gc_task<K, V>(
    provider: Arc<dyn SessionProvider<K, V>>,
    interval: Duration,
    ttl: Duration,
) -> JoinHandle<()>
where
    K: 'static,
    V: 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting session GC task with interval of {:?} and ttl of {:?}",
            interval, ttl
        );

        loop {
            tokio::time::sleep(interval).await;

            let evicted = provider.garbage_collect(ttl);

            if evicted > 0 {
                info!(
                    "Session GC: evicted {} idle sessions, {} remain",
                    evicted,
                    provider.len()
                );
            } else {
                debug!("Session GC: no idle sessions found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    fn provider() -> Arc<dyn SessionProvider<String, i64>> {
        Arc::new(MemoryStore::<String, i64>::new())
    }

    #[tokio::test]
    async fn test_gc_task_evicts_idle_sessions() {
        let provider = provider();
        provider.read("idle").unwrap().set("k".to_string(), 1);

        let handle = spawn_gc_task(
            provider.clone(),
            Duration::from_millis(100),
            Duration::from_millis(200),
        );

        // Wait for the session to go idle and a sweep to run
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert!(provider.lookup("idle").is_none(), "Idle session should be collected");
        assert!(provider.stats().expired >= 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_gc_task_preserves_active_sessions() {
        let provider = provider();
        provider.read("active").unwrap();

        let handle = spawn_gc_task(
            provider.clone(),
            Duration::from_millis(100),
            Duration::from_secs(3600),
        );

        tokio::time::sleep(Duration::from_millis(350)).await;

        assert!(provider.lookup("active").is_some(), "Active session should survive");

        handle.abort();
    }

    #[tokio::test]
    async fn test_gc_task_can_be_aborted() {
        let handle = spawn_gc_task(provider(), Duration::from_secs(1), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
