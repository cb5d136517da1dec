use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::{IndexEmitter, SampleConfig, SampleStrategy};

/// A numeric reading that [`SampleStrategy::Intelligent`] can rank by.
///
/// Pairs are treated as `(x, y)` points and report `y`.
pub trait SampleValue {
    fn sample_value(&self) -> f64;
}

macro_rules! impl_sample_value {
    ($($t:ty),*) => {
        $(
            impl SampleValue for $t {
                fn sample_value(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_sample_value!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl<X, Y: SampleValue> SampleValue for (X, Y) {
    fn sample_value(&self) -> f64 {
        self.1.sample_value()
    }
}

impl<T: SampleValue + ?Sized> SampleValue for &T {
    fn sample_value(&self) -> f64 {
        (**self).sample_value()
    }
}

/// Reduces large ordered series to at most `max_points` points.
///
/// For any strategy and any input longer than `max_points`, the output:
/// - is an ordered subsequence of the input,
/// - has at most `max_points` elements,
/// - starts with the first input element and ends with the last one.
///
/// Inputs that already fit are returned borrowed and untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
    config: SampleConfig,
}

impl Sampler {
    pub fn new(config: SampleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SampleConfig {
        self.config
    }

    pub fn reduce<'a, T: Clone + SampleValue>(&self, series: &'a [T]) -> Cow<'a, [T]> {
        self.reduce_by(series, T::sample_value)
    }

    /// Like [`Sampler::reduce`], reading values through `value` (only used by
    /// [`SampleStrategy::Intelligent`]).
    pub fn reduce_by<'a, T: Clone>(
        &self,
        series: &'a [T],
        value: impl Fn(&T) -> f64,
    ) -> Cow<'a, [T]> {
        if series.len() <= self.config.max_points() {
            return Cow::Borrowed(series);
        }
        let indices = self.sample_indices(series, value);
        vtrace!(
            len = series.len(),
            kept = indices.len(),
            strategy = ?self.config.strategy(),
            "Sampler::reduce"
        );
        Cow::Owned(indices.into_iter().map(|i| series[i].clone()).collect())
    }

    /// Returns the kept indexes in ascending order.
    pub fn sample_indices<T>(&self, series: &[T], value: impl Fn(&T) -> f64) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.config.max_points().min(series.len()));
        self.for_each_sample_index(series, value, |i| out.push(i));
        out
    }

    /// Allocation-light variant of [`Sampler::sample_indices`]: kept indexes are pushed into
    /// `f` in ascending order.
    pub fn for_each_sample_index<T>(
        &self,
        series: &[T],
        value: impl Fn(&T) -> f64,
        mut f: impl FnMut(usize),
    ) {
        let len = series.len();
        let max_points = self.config.max_points();
        if len <= max_points {
            for i in 0..len {
                f(i);
            }
            return;
        }

        let mut emitter = IndexEmitter::new(len, &mut f);
        match self.config.strategy() {
            SampleStrategy::Uniform => emit_uniform(len, max_points, &mut emitter),
            SampleStrategy::TimeSeries => emit_time_series(len, max_points, &mut emitter),
            SampleStrategy::Intelligent => {
                emit_intelligent(series, max_points, &value, &mut emitter)
            }
        }
    }
}

fn emit_uniform(len: usize, max_points: usize, emitter: &mut IndexEmitter<'_>) {
    // len > max_points, so the ratio is > 1 and the indexes are strictly increasing.
    for i in 0..max_points - 1 {
        let index = (i as u128 * len as u128 / max_points as u128) as usize;
        emitter.emit(index);
    }
    emitter.emit(len - 1);
}

fn emit_time_series(len: usize, max_points: usize, emitter: &mut IndexEmitter<'_>) {
    let step = len.div_ceil(max_points);
    let stride_count = len.div_ceil(step);
    let last = len - 1;

    let indices = (0..stride_count).map(|k| k * step);
    if (stride_count - 1) * step == last {
        indices.for_each(|i| emitter.emit(i));
        return;
    }
    // The stride missed the final point: append it, or let it replace the final stride sample
    // when the output is already full.
    let keep = if stride_count < max_points {
        stride_count
    } else {
        stride_count - 1
    };
    indices.take(keep).for_each(|i| emitter.emit(i));
    emitter.emit(last);
}

fn emit_intelligent<T>(
    series: &[T],
    max_points: usize,
    value: &impl Fn(&T) -> f64,
    emitter: &mut IndexEmitter<'_>,
) {
    let len = series.len();
    let mut scored: Vec<(usize, f64)> = (1..len - 1)
        .map(|i| (i, jump(value(&series[i - 1]), value(&series[i]))))
        .collect();
    // Stable sort: equal jumps keep ascending index order, so ties favour earlier points.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(max_points - 2);

    let mut interior: Vec<usize> = scored.into_iter().map(|(i, _)| i).collect();
    interior.sort_unstable();
    emitter.emit_with_endpoints(interior);
}

fn jump(prev: f64, cur: f64) -> f64 {
    let d = if cur > prev { cur - prev } else { prev - cur };
    if d.is_nan() { 0.0 } else { d }
}

pub fn uniform_sampling<T: Clone>(series: &[T], max_points: usize) -> Cow<'_, [T]> {
    reduce_with(series, max_points, SampleStrategy::Uniform, |_| 0.0)
}

pub fn time_series_sampling<T: Clone>(series: &[T], max_points: usize) -> Cow<'_, [T]> {
    reduce_with(series, max_points, SampleStrategy::TimeSeries, |_| 0.0)
}

pub fn intelligent_sampling<T: Clone + SampleValue>(
    series: &[T],
    max_points: usize,
) -> Cow<'_, [T]> {
    reduce_with(series, max_points, SampleStrategy::Intelligent, T::sample_value)
}

/// Shared body of the free sampling functions.
///
/// A `max_points` below 2 is raised to 2: the endpoints are always kept.
fn reduce_with<T: Clone>(
    series: &[T],
    max_points: usize,
    strategy: SampleStrategy,
    value: impl Fn(&T) -> f64,
) -> Cow<'_, [T]> {
    if max_points < 2 {
        vwarn!(max_points, "sampling: max_points raised to 2");
    }
    let config = SampleConfig::at_least_endpoints(max_points, strategy);
    Sampler::new(config).reduce_by(series, value)
}
