use alloc::vec::Vec;

use crate::AnchorId;
use crate::key::{IdMap, IdSet};

/// An anchor's extent on the scroll axis, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u64,
    pub size: u32,
}

impl Span {
    pub fn new(start: u64, size: u32) -> Self {
        Self { start, size }
    }

    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// The observation root's visible extent on the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub offset: u64,
    pub size: u32,
}

impl Viewport {
    pub fn new(offset: u64, size: u32) -> Self {
        Self { offset, size }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityOptions {
    /// Pixels added on both sides of the viewport, so loading starts slightly early.
    pub root_margin: u32,
    /// Fraction of an anchor (0.0..=1.0) that must be inside the expanded viewport.
    pub threshold: f32,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            root_margin: 50,
            threshold: 0.1,
        }
    }
}

impl VisibilityOptions {
    pub fn with_root_margin(mut self, root_margin: u32) -> Self {
        self.root_margin = root_margin;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

/// An intersection report from a host-side observer (e.g. a platform intersection API).
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEntry<Id> {
    pub id: Id,
    pub is_intersecting: bool,
    pub ratio: f32,
}

/// Delivered to the `on_visible` callback the first time an anchor becomes visible.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEvent<Id> {
    pub id: Id,
    pub ratio: f32,
}

/// Fires a callback exactly once per id when its anchor first becomes visible.
///
/// Visibility is fed in one of two ways:
/// - `check_viewport`: the loader intersects registered [`Span`]s with a [`Viewport`] itself.
/// - `handle_entries`: the host already has intersection results and forwards them.
///
/// A fired anchor stops being observed and its id is remembered; re-observing it is a no-op
/// until `cleanup()`. Anchors firing in the same pass are not ordered relative to each other.
pub struct VisibilityLoader<Id, F> {
    options: VisibilityOptions,
    anchors: IdMap<Id, Span>,
    visited: IdSet<Id>,
    on_visible: F,
}

impl<Id: AnchorId + Clone, F: FnMut(&VisibilityEvent<Id>)> VisibilityLoader<Id, F> {
    pub fn new(options: VisibilityOptions, on_visible: F) -> Self {
        Self {
            options,
            anchors: IdMap::default(),
            visited: IdSet::default(),
            on_visible,
        }
    }

    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    /// Starts tracking `id` at `span`, or moves an already-tracked anchor.
    ///
    /// Returns `false` (and tracks nothing) if `id` already fired.
    pub fn observe(&mut self, id: Id, span: Span) -> bool {
        if self.visited.contains(&id) {
            return false;
        }
        self.anchors.insert(id, span);
        true
    }

    pub fn unobserve(&mut self, id: &Id) -> bool {
        self.anchors.remove(id).is_some()
    }

    pub fn is_observed(&self, id: &Id) -> bool {
        self.anchors.contains_key(id)
    }

    pub fn is_visited(&self, id: &Id) -> bool {
        self.visited.contains(id)
    }

    pub fn observed_len(&self) -> usize {
        self.anchors.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Intersects every tracked anchor with `viewport` (expanded by `root_margin`) and fires
    /// the ones that cross the threshold. Returns how many fired.
    pub fn check_viewport(&mut self, viewport: Viewport) -> usize {
        let margin = self.options.root_margin as u64;
        let root_start = viewport.offset.saturating_sub(margin);
        let root_end = viewport
            .offset
            .saturating_add(viewport.size as u64)
            .saturating_add(margin);

        let threshold = self.options.threshold;
        let hits: Vec<(Id, f32)> = self
            .anchors
            .iter()
            .filter_map(|(id, span)| {
                let ratio = intersection_ratio(*span, root_start, root_end)?;
                (ratio >= threshold).then(|| (id.clone(), ratio))
            })
            .collect();

        vtrace!(
            offset = viewport.offset,
            size = viewport.size,
            observed = self.anchors.len(),
            hits = hits.len(),
            "VisibilityLoader::check_viewport"
        );
        self.fire_all(hits)
    }

    /// Applies intersection results computed by the host. Entries for ids that are not
    /// observed, not intersecting, or below the threshold are ignored. Returns how many fired.
    pub fn handle_entries(
        &mut self,
        entries: impl IntoIterator<Item = VisibilityEntry<Id>>,
    ) -> usize {
        let threshold = self.options.threshold;
        let hits: Vec<(Id, f32)> = entries
            .into_iter()
            .filter(|e| e.is_intersecting && e.ratio >= threshold)
            .map(|e| (e.id, e.ratio))
            .collect();
        self.fire_all(hits)
    }

    /// Releases every anchor and forgets which ids fired.
    pub fn cleanup(&mut self) {
        vdebug!(
            observed = self.anchors.len(),
            visited = self.visited.len(),
            "VisibilityLoader::cleanup"
        );
        self.anchors.clear();
        self.visited.clear();
    }

    fn fire_all(&mut self, hits: Vec<(Id, f32)>) -> usize {
        let mut fired = 0usize;
        for (id, ratio) in hits {
            // Also rejects duplicates within one batch: the first fire removes the anchor.
            if self.anchors.remove(&id).is_none() {
                continue;
            }
            self.visited.insert(id.clone());
            (self.on_visible)(&VisibilityEvent { id, ratio });
            fired += 1;
        }
        fired
    }
}

impl<Id, F> core::fmt::Debug for VisibilityLoader<Id, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityLoader")
            .field("options", &self.options)
            .field("observed", &self.anchors.len())
            .field("visited", &self.visited.len())
            .finish_non_exhaustive()
    }
}

/// Fraction of `span` inside `[root_start, root_end)`, or `None` when they do not touch.
///
/// A zero-size anchor counts as fully visible when its position lies inside the root.
fn intersection_ratio(span: Span, root_start: u64, root_end: u64) -> Option<f32> {
    if span.size == 0 {
        return (span.start >= root_start && span.start < root_end).then_some(1.0);
    }
    let start = span.start.max(root_start);
    let end = span.end().min(root_end);
    if end <= start {
        return None;
    }
    Some((end - start) as f32 / span.size as f32)
}
