//! Cooperative single-threaded task runtime
//!
//! Submission delays and banner dismissal are timer-driven. Hosts supply the
//! timers: [`TokioRuntime`] natively, a `setTimeout`-backed runtime in the
//! browser.

use futures::future::LocalBoxFuture;
use std::time::Duration;

pub trait Runtime: Clone + 'static {
    /// Resolve after `duration`
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    /// Run `task` to completion in the background on the current thread
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Tokio-backed runtime.
///
/// Tasks are spawned with `tokio::task::spawn_local`, so every call that may
/// spawn (showing a banner) must happen inside a `tokio::task::LocalSet`.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRuntime;

#[cfg(feature = "tokio")]
impl Runtime for TokioRuntime {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}
