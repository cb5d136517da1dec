//! Debounce and throttle wrappers driven by host time.
//!
//! Nothing here owns a timer. The host passes `now_ms` into every call and, for trailing
//! debounces, calls `tick(now_ms)` from its frame loop or schedules one at `next_deadline()`.

/// Callable-free throttle state: admits at most one event per `limit_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleGate {
    limit_ms: u64,
    window_end_ms: Option<u64>,
}

impl ThrottleGate {
    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            window_end_ms: None,
        }
    }

    pub fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    /// Opens a new window and returns `true` unless one is still active at `now_ms`.
    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        if self.is_throttled(now_ms) {
            return false;
        }
        self.window_end_ms = Some(now_ms.saturating_add(self.limit_ms));
        true
    }

    pub fn is_throttled(&self, now_ms: u64) -> bool {
        self.window_end_ms.is_some_and(|end| now_ms < end)
    }

    /// When the active window closes, if one is open.
    pub fn window_end_ms(&self) -> Option<u64> {
        self.window_end_ms
    }

    pub fn reset(&mut self) {
        self.window_end_ms = None;
    }
}

/// Wraps `f` so it runs at most once per `limit_ms`.
///
/// The first call of a window fires immediately with its arguments; calls inside an active
/// window are dropped, not queued.
pub struct Throttle<A, F> {
    gate: ThrottleGate,
    f: F,
    _args: core::marker::PhantomData<fn(A)>,
}

impl<A, F: FnMut(A)> Throttle<A, F> {
    pub fn new(limit_ms: u64, f: F) -> Self {
        Self {
            gate: ThrottleGate::new(limit_ms),
            f,
            _args: core::marker::PhantomData,
        }
    }

    /// Returns `true` if `f` ran.
    pub fn call(&mut self, now_ms: u64, args: A) -> bool {
        if !self.gate.try_acquire(now_ms) {
            vtrace!(now_ms, "Throttle: dropped call inside active window");
            return false;
        }
        (self.f)(args);
        true
    }

    pub fn is_throttled(&self, now_ms: u64) -> bool {
        self.gate.is_throttled(now_ms)
    }

    pub fn reset(&mut self) {
        self.gate.reset();
    }
}

impl<A, F> core::fmt::Debug for Throttle<A, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Throttle")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// Wraps `f` so a burst of calls collapses into one invocation.
///
/// - Trailing (default): fires `wait_ms` after the *last* call of the burst, with that call's
///   arguments. Every call reschedules the pending one (last call wins).
/// - Immediate: fires on the *first* call of a burst; later calls only extend the quiet window
///   and their arguments are discarded.
///
/// A burst ends once `wait_ms` passes without a call.
pub struct Debounce<A, F> {
    wait_ms: u64,
    immediate: bool,
    deadline_ms: Option<u64>,
    pending: Option<A>,
    f: F,
}

impl<A, F: FnMut(A)> Debounce<A, F> {
    pub fn new(wait_ms: u64, f: F) -> Self {
        Self {
            wait_ms,
            immediate: false,
            deadline_ms: None,
            pending: None,
            f,
        }
    }

    /// Leading-edge variant.
    pub fn immediate(wait_ms: u64, f: F) -> Self {
        Self {
            immediate: true,
            ..Self::new(wait_ms, f)
        }
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn is_immediate(&self) -> bool {
        self.immediate
    }

    /// Records a call at `now_ms`. Returns `true` if `f` ran during this call.
    ///
    /// A deadline that already passed (the host did not `tick` in time) is settled first, as if
    /// the timer had fired on schedule.
    pub fn call(&mut self, now_ms: u64, args: A) -> bool {
        let mut fired = self.tick(now_ms);

        let call_now = self.immediate && self.deadline_ms.is_none();
        self.deadline_ms = Some(now_ms.saturating_add(self.wait_ms));
        if call_now {
            (self.f)(args);
            fired = true;
        } else if !self.immediate {
            self.pending = Some(args);
        }
        fired
    }

    /// Fires the pending trailing call if its deadline has passed. Returns `true` if `f` ran.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                self.fire_pending()
            }
            _ => false,
        }
    }

    /// When the host should call `tick` next, if a burst is in progress.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending call and ends the current burst.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
        self.pending = None;
    }

    /// Runs the pending call now instead of at its deadline. Returns `true` if `f` ran.
    pub fn flush(&mut self) -> bool {
        self.deadline_ms = None;
        self.fire_pending()
    }

    fn fire_pending(&mut self) -> bool {
        let Some(args) = self.pending.take() else {
            return false;
        };
        (self.f)(args);
        true
    }
}

impl<A, F> core::fmt::Debug for Debounce<A, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Debounce")
            .field("wait_ms", &self.wait_ms)
            .field("immediate", &self.immediate)
            .field("deadline_ms", &self.deadline_ms)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
