use alloc::vec::Vec;

use crate::{ConfigError, VisibleWindow, WindowOptions, WindowState};

/// Fixed-height list windowing.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it with scroll offsets (`update_scroll_top`).
/// - Rendering reads `visible_data()` and translates it by `offset()` pixels.
///
/// `update_scroll_top` only recomputes when the rendered range actually changes, so sub-item
/// scroll deltas never trigger redundant re-renders. Pair it with a throttle (see the
/// `datawindow-adapter` crate) to bound how often scroll events reach it.
#[derive(Clone, Debug)]
pub struct VirtualWindow<T> {
    options: WindowOptions,
    data: Vec<T>,
    visible_count: usize,
    scroll_top: u64,
    start_index: usize,
    end_index: usize,
}

impl<T> VirtualWindow<T> {
    pub fn new(data: Vec<T>, options: WindowOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let visible_count = options.visible_count();
        let end_index = visible_count.saturating_add(options.buffer).min(data.len());
        vdebug!(
            len = data.len(),
            item_height = options.item_height,
            container_height = options.container_height,
            buffer = options.buffer,
            "VirtualWindow::new"
        );
        Ok(Self {
            options,
            data,
            visible_count,
            scroll_top: 0,
            start_index: 0,
            end_index,
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn item_height(&self) -> u32 {
        self.options.item_height
    }

    pub fn container_height(&self) -> u32 {
        self.options.container_height
    }

    pub fn buffer(&self) -> usize {
        self.options.buffer
    }

    /// Number of items that fit in the container: `ceil(container_height / item_height)`.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    pub fn total_height(&self) -> u64 {
        (self.data.len() as u64).saturating_mul(self.options.item_height as u64)
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.options.container_height as u64)
    }

    pub fn clamp_scroll_top(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_top())
    }

    /// Applies a scroll offset and recomputes the window.
    ///
    /// The offset is clamped to `max_scroll_top()` before the range is computed, so an offset in
    /// `(max_scroll_top(), total_height()]` yields the same range as `max_scroll_top()` itself
    /// rather than `floor(offset / item_height) - buffer`. This keeps a full viewport of items
    /// rendered at the bottom of the list.
    ///
    /// Returns `true` only when the rendered range changed; callers can skip re-rendering
    /// otherwise.
    pub fn update_scroll_top(&mut self, offset: u64) -> bool {
        self.scroll_top = self.clamp_scroll_top(offset);
        let (start, end) = self.range_for(self.scroll_top);
        if (start, end) == (self.start_index, self.end_index) {
            return false;
        }
        vtrace!(
            scroll_top = self.scroll_top,
            start,
            end,
            "VirtualWindow::update_scroll_top"
        );
        self.start_index = start;
        self.end_index = end;
        true
    }

    /// Items to render, buffer included.
    pub fn visible_data(&self) -> &[T] {
        &self.data[self.start_index..self.end_index]
    }

    /// Pixel offset of the first rendered item: `start_index * item_height`.
    pub fn offset(&self) -> u64 {
        self.offset_for_index(self.start_index)
    }

    pub fn offset_for_index(&self, index: usize) -> u64 {
        (index.min(self.data.len()) as u64).saturating_mul(self.options.item_height as u64)
    }

    pub fn visible_window(&self) -> VisibleWindow {
        VisibleWindow {
            start_index: self.start_index,
            end_index: self.end_index,
            offset_px: self.offset(),
        }
    }

    /// Iterates rendered items together with their absolute indexes.
    pub fn for_each_visible(&self, mut f: impl FnMut(usize, &T)) {
        for (i, item) in self.visible_data().iter().enumerate() {
            f(self.start_index + i, item);
        }
    }

    /// Replaces the data set.
    ///
    /// Scroll position is not preserved across a full replacement: the window restarts at the
    /// top with `visible_count + buffer` items.
    pub fn update_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.scroll_top = 0;
        self.start_index = 0;
        self.end_index = self
            .visible_count
            .saturating_add(self.options.buffer)
            .min(self.data.len());
        vdebug!(
            len = self.data.len(),
            end = self.end_index,
            "VirtualWindow::update_data"
        );
    }

    /// Resizes the container and re-applies the current scroll offset.
    ///
    /// Returns `true` when the rendered range changed.
    pub fn set_container_height(&mut self, container_height: u32) -> bool {
        if self.options.container_height == container_height {
            return false;
        }
        self.options.container_height = container_height;
        self.visible_count = self.options.visible_count();
        let scroll_top = self.scroll_top;
        self.update_scroll_top(scroll_top)
    }

    pub fn state(&self) -> WindowState {
        WindowState {
            scroll_top: self.scroll_top,
            container_height: self.options.container_height,
        }
    }

    /// Restores a previously captured [`WindowState`] against the current data.
    pub fn restore_state(&mut self, state: WindowState) -> bool {
        let resized = self.set_container_height(state.container_height);
        let scrolled = self.update_scroll_top(state.scroll_top);
        resized || scrolled
    }

    fn range_for(&self, scroll_top: u64) -> (usize, usize) {
        let len = self.data.len();
        let raw = (scroll_top / self.options.item_height as u64).min(len as u64) as usize;
        let end = raw
            .saturating_add(self.visible_count)
            .saturating_add(self.options.buffer)
            .min(len);
        let start = raw.saturating_sub(self.options.buffer).min(end);
        (start, end)
    }
}
