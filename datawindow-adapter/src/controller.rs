use alloc::vec::Vec;

use datawindow::{ConfigError, VirtualWindow, WindowOptions};

use crate::ThrottleGate;

/// A framework-neutral controller that wraps a [`VirtualWindow`] and rate-limits scroll input.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_container_height` / `on_scroll` when UI events occur
/// - `tick(now_ms)` each frame/timer tick, so a throttled scroll is applied once the window
///   reopens
///
/// Scroll offsets that arrive inside an active throttle window are not dropped: the latest one
/// is remembered and applied by `tick`, so the window always catches up with the final
/// position.
#[derive(Clone, Debug)]
pub struct WindowController<T> {
    window: VirtualWindow<T>,
    gate: ThrottleGate,
    pending_offset: Option<u64>,
}

impl<T> WindowController<T> {
    pub fn new(
        data: Vec<T>,
        options: WindowOptions,
        throttle_ms: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_window(VirtualWindow::new(data, options)?, throttle_ms))
    }

    pub fn from_window(window: VirtualWindow<T>, throttle_ms: u64) -> Self {
        Self {
            window,
            gate: ThrottleGate::new(throttle_ms),
            pending_offset: None,
        }
    }

    pub fn window(&self) -> &VirtualWindow<T> {
        &self.window
    }

    /// Direct access for operations the controller does not wrap. Changes made here bypass
    /// the throttle.
    pub fn window_mut(&mut self) -> &mut VirtualWindow<T> {
        &mut self.window
    }

    pub fn into_window(self) -> VirtualWindow<T> {
        self.window
    }

    pub fn throttle_ms(&self) -> u64 {
        self.gate.limit_ms()
    }

    /// The latest offset still waiting for the throttle window to close.
    pub fn pending_offset(&self) -> Option<u64> {
        self.pending_offset
    }

    /// When the host should `tick` next, if an offset is waiting.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_offset.and(self.gate.window_end_ms())
    }

    /// Call this when the UI reports a scroll offset change.
    ///
    /// Returns `true` if the visible window changed during this call.
    pub fn on_scroll(&mut self, scroll_top: u64, now_ms: u64) -> bool {
        if !self.gate.try_acquire(now_ms) {
            self.pending_offset = Some(scroll_top);
            return false;
        }
        self.pending_offset = None;
        self.window.update_scroll_top(scroll_top)
    }

    /// Applies the remembered offset once the throttle window has closed.
    ///
    /// Returns `true` if the visible window changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.pending_offset.is_none() || !self.gate.try_acquire(now_ms) {
            return false;
        }
        match self.pending_offset.take() {
            Some(offset) => self.window.update_scroll_top(offset),
            None => false,
        }
    }

    pub fn on_container_height(&mut self, container_height: u32) -> bool {
        self.window.set_container_height(container_height)
    }

    /// Replaces the data set. Any pending offset is discarded along with the old scroll position.
    pub fn update_data(&mut self, data: Vec<T>) {
        self.pending_offset = None;
        self.gate.reset();
        self.window.update_data(data);
    }
}
