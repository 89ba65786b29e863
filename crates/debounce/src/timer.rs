//! Host timer facility
//!
//! The invoker only needs two primitives from its host: "run this callback
//! once after a delay" and "cancel that scheduled callback". Anything that
//! can provide them (a tokio runtime, a UI event loop, a manual test clock)
//! can drive a [`Debouncer`](crate::Debouncer).

use crate::{DebounceError, Result};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Callback run by the host when a scheduled timer elapses
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Schedule/cancel primitives provided by the host environment
pub trait TimerHost: Send + Sync + 'static {
    /// Opaque handle identifying one scheduled callback
    type Handle: Send + 'static;

    /// Run `callback` once after `delay`, unless cancelled first.
    ///
    /// Must never run the callback synchronously inside this call, even
    /// for a zero delay.
    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Handle;

    /// Cancel a scheduled callback. Cancelling one that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Timer host backed by a tokio runtime
///
/// Each scheduled callback is a spawned task that sleeps for the delay and
/// then runs the callback; cancelling aborts the task.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: Handle,
}

impl TokioTimer {
    /// Use an explicit runtime handle
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is currently running on
    ///
    /// Fails fast when called outside a runtime rather than at fire time.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| DebounceError::NoRuntime)
    }
}

impl TimerHost for TokioTimer {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, callback: Callback) -> Self::Handle {
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}
