use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{BoxError, Clock};

/// One named measurement.
///
/// Created by `start_timing`, completed once by `end_timing`, immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerRecord {
    pub name: String,
    pub start_ms: f64,
    pub end_ms: Option<f64>,
    pub duration_ms: Option<f64>,
}

impl TimerRecord {
    pub fn is_finished(&self) -> bool {
        self.end_ms.is_some()
    }
}

/// Handle returned by [`TimingRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&str, &TimerRecord) -> Result<(), BoxError>>;

/// Named start/stop timers with observer fan-out.
///
/// Observers run synchronously inside `end_timing`, in registration order. A failing observer
/// (an `Err`, or with `std` a panic) is logged and counted, and the remaining observers still
/// run.
pub struct TimingRegistry<C> {
    clock: C,
    records: BTreeMap<String, TimerRecord>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    observer_failures: u64,
}

#[cfg(feature = "std")]
impl TimingRegistry<crate::MonotonicClock> {
    /// A registry timed by [`crate::MonotonicClock`].
    pub fn monotonic() -> Self {
        Self::new(crate::MonotonicClock::new())
    }
}

impl<C: Clock> TimingRegistry<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            records: BTreeMap::new(),
            observers: Vec::new(),
            next_observer: 0,
            observer_failures: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts (or restarts) the timer `name`.
    pub fn start_timing(&mut self, name: &str) {
        let record = TimerRecord {
            name: String::from(name),
            start_ms: self.clock.now_ms(),
            end_ms: None,
            duration_ms: None,
        };
        self.records.insert(record.name.clone(), record);
    }

    /// Stops the timer `name` and notifies observers.
    ///
    /// Returns `None` without notifying if `name` was never started or has already ended.
    pub fn end_timing(&mut self, name: &str) -> Option<TimerRecord> {
        let now = self.clock.now_ms();
        let record = self.records.get_mut(name)?;
        if record.is_finished() {
            return None;
        }
        record.end_ms = Some(now);
        record.duration_ms = Some(now - record.start_ms);
        let record = record.clone();
        vtrace!(name, duration_ms = now - record.start_ms, "TimingRegistry::end_timing");

        for (_id, observer) in self.observers.iter_mut() {
            if let Err(_err) = notify(observer, name, &record) {
                self.observer_failures = self.observer_failures.saturating_add(1);
                vwarn!(name, observer = _id.0, error = %_err, "timing observer failed");
            }
        }
        Some(record)
    }

    /// Times `f` under `name`.
    pub fn measure<R>(&mut self, name: &str, f: impl FnOnce() -> R) -> R {
        self.start_timing(name);
        let out = f();
        self.end_timing(name);
        out
    }

    pub fn get_metric(&self, name: &str) -> Option<&TimerRecord> {
        self.records.get(name)
    }

    /// An independent copy of every record; later registry changes do not affect it.
    pub fn get_all_metrics(&self) -> BTreeMap<String, TimerRecord> {
        self.records.clone()
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&str, &TimerRecord) -> Result<(), BoxError> + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer = self.next_observer.saturating_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// How many observer notifications have failed so far.
    pub fn observer_failures(&self) -> u64 {
        self.observer_failures
    }

    /// Drops every record. Observers stay subscribed.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(feature = "std")]
fn notify(observer: &mut Observer, name: &str, record: &TimerRecord) -> Result<(), BoxError> {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    match catch_unwind(AssertUnwindSafe(|| observer(name, record))) {
        Ok(res) => res,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| String::from(*s))
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| String::from("observer panicked"));
            Err(msg.into())
        }
    }
}

#[cfg(not(feature = "std"))]
fn notify(observer: &mut Observer, name: &str, record: &TimerRecord) -> Result<(), BoxError> {
    observer(name, record)
}

impl<C> core::fmt::Debug for TimingRegistry<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimingRegistry")
            .field("records", &self.records)
            .field("observers", &self.observers.len())
            .field("observer_failures", &self.observer_failures)
            .finish_non_exhaustive()
    }
}
