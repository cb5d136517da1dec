//! Headless data virtualization primitives for large ordered collections.
//!
//! For host-driven utilities (debounce/throttle, visibility loading, timing, batching), see the
//! `datawindow-adapter` crate.
//!
//! This crate decides *what subset* of a collection to expose and *how much* to keep in memory:
//! - [`PagedView`]: fixed-size pages over a snapshot, with clamped page numbers
//! - [`Sampler`]: reduces long series to at most `N` points, always keeping both endpoints
//! - [`VirtualWindow`]: the visible (plus buffer) slice of a fixed-height scrolling list
//! - [`BoundedCache`]: a fixed-capacity LRU map
//!
//! It is UI-agnostic and clock-free. Rendering stays with the caller.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod emitter;
mod error;
mod options;
mod paging;
mod sampler;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use cache::{BoundedCache, CacheStats};
pub use emitter::IndexEmitter;
pub use error::ConfigError;
pub use options::{SampleConfig, SampleStrategy, WindowOptions};
pub use paging::PagedView;
pub use sampler::{
    SampleValue, Sampler, intelligent_sampling, time_series_sampling, uniform_sampling,
};
pub use state::WindowState;
pub use types::{Page, VisibleWindow};
pub use window::VirtualWindow;
