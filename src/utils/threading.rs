//! Threading utilities

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Spawn a background task
pub fn spawn_background<F, T>(future: F) -> JoinHandle<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(future)
}

/// Spawn a task that runs once after `delay`
pub fn spawn_delayed<F>(delay: Duration, f: F) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        f();
    })
}
