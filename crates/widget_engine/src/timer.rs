//! Deferred one-shot actions on cancellable timers.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Run `action` after `delay` unless `cancel` fires first.
///
/// The spawned task holds no strong reference to the widget; callers capture
/// a `Weak` handle and upgrade it at fire time, so a timer that outlives its
/// widget resolves to a no-op instead of touching torn-down state.
pub fn defer<F, Fut>(delay: Duration, cancel: CancellationToken, action: F) -> JoinHandle<()>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(
                    delay_ms = delay.as_millis() as u64,
                    "Timer: cancelled before firing"
                );
            }
            _ = tokio::time::sleep(delay) => {
                action().await;
            }
        }
    })
}
