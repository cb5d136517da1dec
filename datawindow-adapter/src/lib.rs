//! Host-driven utilities for the `datawindow` crate.
//!
//! `datawindow` is clock-free and decides which slice of a collection to expose. This crate
//! covers the parts that depend on time or callbacks, without owning a runtime:
//!
//! - [`Debounce`] / [`Throttle`]: collapse or drop bursts of calls
//! - [`VisibilityLoader`]: fire a callback once per anchor when it first becomes visible
//! - [`TimingRegistry`]: named start/stop timers with observer fan-out
//! - [`BatchRunner`]: process a large list in chunks, yielding between them
//! - [`WindowController`]: a [`datawindow::VirtualWindow`] fed through a scroll throttle
//!
//! The host passes `now_ms` into every call and pumps `tick`/`poll` from its own frame loop or
//! timer. Nothing here spawns threads or sleeps.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batch;
mod clock;
mod controller;
mod key;
mod rate_limit;
mod timing;
mod visibility;


/// Error type observers return from [`TimingRegistry`] callbacks.
pub type BoxError = alloc::boxed::Box<dyn core::error::Error + Send + Sync>;

pub use batch::{BatchError, BatchOptions, BatchPoll, BatchRunner, Resume, batch_process};
#[cfg(feature = "std")]
pub use clock::MonotonicClock;
pub use clock::Clock;
pub use controller::WindowController;
pub use key::AnchorId;
pub use rate_limit::{Debounce, Throttle, ThrottleGate};
pub use timing::{ObserverId, TimerRecord, TimingRegistry};
pub use visibility::{
    Span, Viewport, VisibilityEntry, VisibilityEvent, VisibilityLoader, VisibilityOptions,
};

pub use datawindow::ConfigError;
