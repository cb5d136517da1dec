use alloc::vec::{self, Vec};
use core::convert::Infallible;

use datawindow::ConfigError;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchOptions {
    pub batch_size: usize,
    /// Pause between chunks. `0` means "resume on the next frame".
    pub delay_ms: u64,
}

impl BatchOptions {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            delay_ms: 0,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::new(100)
    }
}

/// When the host should poll a [`BatchRunner`] again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resume {
    /// As soon as the host has handled pending work (next frame / next turn of the loop).
    NextFrame,
    /// Not before this time.
    At(u64),
}

#[derive(Debug, PartialEq, Eq)]
pub enum BatchPoll<R> {
    Pending(Resume),
    /// Every result, in input order. Returned exactly once.
    Ready(Vec<R>),
    /// An earlier poll already returned `Ready`; the results were handed out then.
    Drained,
    /// An earlier poll failed on the item at `index`; the run is over and has no results.
    Aborted { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Drained,
    Aborted { index: usize },
}

/// The processor failed on the item at `index`; the run stopped there.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("batch processor failed at item {index}")]
pub struct BatchError<E> {
    pub index: usize,
    #[source]
    pub source: E,
}

/// Runs a processor over a large list in chunks, handing control back between chunks.
///
/// The host drives it: each `poll(now_ms)` processes at most one chunk, then reports when to
/// poll again. Nothing blocks, sleeps, or spawns.
///
/// Failure policy is fail-fast: the first processor error ends the run and partial results are
/// dropped.
pub struct BatchRunner<T, R, E, F> {
    items: vec::IntoIter<T>,
    total: usize,
    options: BatchOptions,
    processor: F,
    results: Vec<R>,
    resume_at_ms: Option<u64>,
    state: RunState,
    _error: core::marker::PhantomData<fn() -> E>,
}

impl<T, R, E, F: FnMut(T) -> Result<R, E>> BatchRunner<T, R, E, F> {
    pub fn new(items: Vec<T>, options: BatchOptions, processor: F) -> Result<Self, ConfigError> {
        if options.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        let total = items.len();
        Ok(Self {
            items: items.into_iter(),
            total,
            options,
            processor,
            results: Vec::with_capacity(total),
            resume_at_ms: None,
            state: RunState::Running,
            _error: core::marker::PhantomData,
        })
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// `(processed, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.total - self.items.len(), self.total)
    }

    /// `true` once a poll has returned `Ready` or an error.
    pub fn is_finished(&self) -> bool {
        self.state != RunState::Running
    }

    /// Index of the item the processor failed on, if the run was aborted.
    pub fn failed_at(&self) -> Option<usize> {
        match self.state {
            RunState::Aborted { index } => Some(index),
            _ => None,
        }
    }

    /// Processes the next chunk if it is due.
    ///
    /// After the run has ended, every further poll reports how it ended (`Drained` or
    /// `Aborted`) and does no work.
    pub fn poll(&mut self, now_ms: u64) -> Result<BatchPoll<R>, BatchError<E>> {
        match self.state {
            RunState::Running => {}
            RunState::Drained => return Ok(BatchPoll::Drained),
            RunState::Aborted { index } => return Ok(BatchPoll::Aborted { index }),
        }
        if let Some(at) = self.resume_at_ms {
            if now_ms < at {
                return Ok(BatchPoll::Pending(Resume::At(at)));
            }
        }
        self.resume_at_ms = None;

        let start = self.total - self.items.len();
        for (offset, item) in self.items.by_ref().take(self.options.batch_size).enumerate() {
            match (self.processor)(item) {
                Ok(r) => self.results.push(r),
                Err(source) => {
                    let index = start + offset;
                    self.state = RunState::Aborted { index };
                    self.results = Vec::new();
                    vdebug!(index, "BatchRunner: processor failed");
                    return Err(BatchError { index, source });
                }
            }
        }

        if self.items.as_slice().is_empty() {
            self.state = RunState::Drained;
            return Ok(BatchPoll::Ready(core::mem::take(&mut self.results)));
        }

        vtrace!(
            done = self.total - self.items.len(),
            total = self.total,
            "BatchRunner: yielding between chunks"
        );
        if self.options.delay_ms > 0 {
            let at = now_ms.saturating_add(self.options.delay_ms);
            self.resume_at_ms = Some(at);
            Ok(BatchPoll::Pending(Resume::At(at)))
        } else {
            Ok(BatchPoll::Pending(Resume::NextFrame))
        }
    }

    /// Drains every remaining chunk without yielding, ignoring `delay_ms`.
    ///
    /// For hosts without a scheduler (and tests); this blocks for the whole run. Returns
    /// `None` if an earlier poll already ended the run.
    pub fn run_to_completion(mut self) -> Option<Result<Vec<R>, BatchError<E>>> {
        loop {
            let now = self.resume_at_ms.unwrap_or(0);
            match self.poll(now) {
                Ok(BatchPoll::Pending(_)) => {}
                Ok(BatchPoll::Ready(results)) => return Some(Ok(results)),
                Ok(BatchPoll::Drained | BatchPoll::Aborted { .. }) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<T, R> BatchRunner<T, R, Infallible, fn(T) -> Result<R, Infallible>> {
    /// Wraps a processor that cannot fail.
    ///
    /// `f` is a plain function pointer so the runner type stays nameable; closures that
    /// capture state should go through [`BatchRunner::new`] with `Ok::<_, Infallible>`.
    pub fn infallible(
        items: Vec<T>,
        options: BatchOptions,
        f: fn(T) -> Result<R, Infallible>,
    ) -> Result<Self, ConfigError> {
        Self::new(items, options, f)
    }
}

/// Starts a chunked run over `items`; see [`BatchRunner`].
pub fn batch_process<T, R, E, F: FnMut(T) -> Result<R, E>>(
    items: Vec<T>,
    batch_size: usize,
    processor: F,
    delay_ms: u64,
) -> Result<BatchRunner<T, R, E, F>, ConfigError> {
    BatchRunner::new(
        items,
        BatchOptions::new(batch_size).with_delay_ms(delay_ms),
        processor,
    )
}

impl<T, R, E, F> core::fmt::Debug for BatchRunner<T, R, E, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("total", &self.total)
            .field("remaining", &self.items.len())
            .field("options", &self.options)
            .field("resume_at_ms", &self.resume_at_ms)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
