//! Debounced invoker
//!
//! A [`Debouncer`] owns at most one pending timer. Every trigger cancels the
//! pending timer (if any), stores the new arguments and schedules a fresh
//! timer for the full quiet period. When a timer fires, the action runs once
//! with whatever arguments the last trigger stored.

use crate::config::DebounceConfig;
use crate::timer::{TimerHost, TokioTimer};
use crate::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace};

type Action<A> = Box<dyn Fn(A) + Send + Sync + 'static>;

/// Counters describing what an invoker has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceStats {
    /// Calls to `trigger`
    pub triggers: u64,
    /// Pending timers replaced by a newer trigger
    pub superseded: u64,
    /// Action invocations (timer fires and flushes)
    pub fired: u64,
    /// Pending timers dropped by `cancel` or disposal
    pub cancelled: u64,
}

/// Trailing-edge debounced wrapper around an action
///
/// Dropping the debouncer cancels its pending timer, so the action never
/// runs against torn-down state.
pub struct Debouncer<A, H: TimerHost = TokioTimer> {
    inner: Arc<Inner<A, H>>,
}

struct Inner<A, H: TimerHost> {
    action: Action<A>,
    quiet_period: Duration,
    host: H,
    state: Mutex<State<A, H::Handle>>,
}

struct State<A, T> {
    pending: Option<Pending<A, T>>,
    /// Bumped on every trigger; a timer only fires if its generation is current
    generation: u64,
    stats: DebounceStats,
}

struct Pending<A, T> {
    generation: u64,
    args: A,
    timer: T,
}

impl<A: Send + 'static> Debouncer<A, TokioTimer> {
    /// Create a debouncer on the current tokio runtime
    pub fn new<F>(action: F, quiet_period: Duration) -> Result<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Ok(Self::with_host(action, quiet_period, TokioTimer::current()?))
    }

    /// Create a debouncer from configuration on the current tokio runtime
    pub fn from_config<F>(action: F, config: &DebounceConfig) -> Result<Self>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(action, config.quiet_period()?)
    }
}

impl<A: Send + 'static, H: TimerHost> Debouncer<A, H> {
    /// Create a debouncer scheduling its timers on `host`
    pub fn with_host<F>(action: F, quiet_period: Duration, host: H) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                action: Box::new(action),
                quiet_period,
                host,
                state: Mutex::new(State {
                    pending: None,
                    generation: 0,
                    stats: DebounceStats::default(),
                }),
            }),
        }
    }

    /// Record `args` as the latest arguments and restart the quiet period
    ///
    /// Never blocks and never runs the action synchronously.
    pub fn trigger(&self, args: A) {
        let inner = &self.inner;
        let mut state = inner.state.lock();
        state.stats.triggers += 1;

        if let Some(previous) = state.pending.take() {
            state.stats.superseded += 1;
            trace!(generation = previous.generation, "Superseding pending debounce timer");
            inner.host.cancel(previous.timer);
        }

        state.generation += 1;
        let generation = state.generation;
        let weak: Weak<Inner<A, H>> = Arc::downgrade(inner);
        let timer = inner.host.schedule(
            inner.quiet_period,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.fire(generation);
                }
            }),
        );

        state.pending = Some(Pending {
            generation,
            args,
            timer,
        });
    }

    /// Drop the pending timer and its arguments without running the action
    ///
    /// Returns true if something was pending.
    pub fn cancel(&self) -> bool {
        let mut state = self.inner.state.lock();
        match state.pending.take() {
            Some(pending) => {
                state.stats.cancelled += 1;
                debug!(generation = pending.generation, "Cancelled pending debounce timer");
                self.inner.host.cancel(pending.timer);
                true
            }
            None => false,
        }
    }

    /// Run the action now with the latest arguments, if a timer is pending
    ///
    /// Returns true if the action ran.
    pub fn flush(&self) -> bool {
        let args = {
            let mut state = self.inner.state.lock();
            let Some(pending) = state.pending.take() else {
                return false;
            };
            state.stats.fired += 1;
            self.inner.host.cancel(pending.timer);
            pending.args
        };

        debug!("Flushing debounced action");
        (self.inner.action)(args);
        true
    }

    /// Whether a timer is currently pending
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }

    /// Quiet period fixed at construction
    pub fn quiet_period(&self) -> Duration {
        self.inner.quiet_period
    }

    /// Snapshot of the invoker's counters
    pub fn stats(&self) -> DebounceStats {
        self.inner.state.lock().stats
    }

    /// Borrow the debouncer as a plain callable
    pub fn as_fn(&self) -> impl Fn(A) + '_ {
        move |args| self.trigger(args)
    }
}

impl<A, H: TimerHost> Inner<A, H> {
    fn fire(&self, generation: u64) {
        let args = {
            let mut state = self.state.lock();
            match state.pending.take() {
                Some(pending) if pending.generation == generation => {
                    state.stats.fired += 1;
                    pending.args
                }
                other => {
                    // Superseded or cancelled after the timer already started running
                    state.pending = other;
                    trace!(generation, "Ignoring stale debounce timer");
                    return;
                }
            }
        };

        debug!(generation, "Quiet period elapsed, invoking debounced action");
        (self.action)(args);
    }
}

impl<A, H: TimerHost> Drop for Debouncer<A, H> {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        if let Some(pending) = state.pending.take() {
            state.stats.cancelled += 1;
            debug!(generation = pending.generation, "Disposing debouncer with pending timer");
            self.inner.host.cancel(pending.timer);
        }
    }
}

impl<A, H: TimerHost> fmt::Debug for Debouncer<A, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Debouncer")
            .field("quiet_period", &self.inner.quiet_period)
            .field("pending", &state.pending.is_some())
            .field("stats", &state.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Callback;

    /// Timer host that only runs callbacks when the test says so
    #[derive(Clone, Default)]
    struct ManualTimer {
        slots: Arc<Mutex<Vec<Slot>>>,
    }

    struct Slot {
        delay: Duration,
        callback: Option<Callback>,
        cancelled: bool,
    }

    impl ManualTimer {
        fn run(&self, id: usize) {
            let callback = self.slots.lock()[id].callback.take().unwrap();
            callback();
        }

        fn is_cancelled(&self, id: usize) -> bool {
            self.slots.lock()[id].cancelled
        }

        fn scheduled(&self) -> usize {
            self.slots.lock().len()
        }
    }

    impl TimerHost for ManualTimer {
        type Handle = usize;

        fn schedule(&self, delay: Duration, callback: Callback) -> usize {
            let mut slots = self.slots.lock();
            slots.push(Slot {
                delay,
                callback: Some(callback),
                cancelled: false,
            });
            slots.len() - 1
        }

        fn cancel(&self, handle: usize) {
            self.slots.lock()[handle].cancelled = true;
        }
    }

    fn recording(timer: &ManualTimer) -> (Debouncer<&'static str, ManualTimer>, Arc<Mutex<Vec<&'static str>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let debouncer = Debouncer::with_host(
            move |arg| sink.lock().push(arg),
            Duration::from_millis(300),
            timer.clone(),
        );
        (debouncer, calls)
    }

    #[test]
    fn test_trigger_schedules_full_quiet_period() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        debouncer.trigger("a");

        assert!(debouncer.is_pending());
        assert_eq!(timer.scheduled(), 1);
        assert_eq!(timer.slots.lock()[0].delay, Duration::from_millis(300));
        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_retrigger_cancels_previous_timer() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        debouncer.trigger("a");
        debouncer.trigger("b");

        assert!(timer.is_cancelled(0));
        assert!(!timer.is_cancelled(1));

        timer.run(1);
        assert_eq!(*calls.lock(), vec!["b"]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        debouncer.trigger("a");
        debouncer.trigger("b");

        // Superseded timer raced past cancellation
        timer.run(0);
        assert!(calls.lock().is_empty());
        assert!(debouncer.is_pending());

        timer.run(1);
        assert_eq!(*calls.lock(), vec!["b"]);
    }

    #[test]
    fn test_cancel_discards_arguments() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        debouncer.trigger("a");
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert!(timer.is_cancelled(0));

        timer.run(0);
        assert!(calls.lock().is_empty());
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_flush_runs_latest_once() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        assert!(!debouncer.flush());

        debouncer.trigger("a");
        debouncer.trigger("b");
        assert!(debouncer.flush());
        assert_eq!(*calls.lock(), vec!["b"]);

        // The flushed timer must not fire a second time
        timer.run(1);
        assert_eq!(*calls.lock(), vec!["b"]);
        assert!(!debouncer.flush());
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        debouncer.trigger("a");
        drop(debouncer);

        assert!(timer.is_cancelled(0));
        timer.run(0);
        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_idle_after_fire_matches_fresh() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        debouncer.trigger("x");
        timer.run(0);
        assert!(!debouncer.is_pending());

        debouncer.trigger("y");
        timer.run(1);
        assert_eq!(*calls.lock(), vec!["x", "y"]);
    }

    #[test]
    fn test_stats_track_lifecycle() {
        let timer = ManualTimer::default();
        let (debouncer, _calls) = recording(&timer);

        debouncer.trigger("a");
        debouncer.trigger("b");
        debouncer.trigger("c");
        timer.run(2);
        debouncer.trigger("d");
        debouncer.cancel();

        assert_eq!(
            debouncer.stats(),
            DebounceStats {
                triggers: 4,
                superseded: 2,
                fired: 1,
                cancelled: 1,
            }
        );
    }

    #[test]
    fn test_as_fn_triggers() {
        let timer = ManualTimer::default();
        let (debouncer, calls) = recording(&timer);

        let f = debouncer.as_fn();
        f("a");
        f("b");
        timer.run(1);

        assert_eq!(*calls.lock(), vec!["b"]);
    }
}
