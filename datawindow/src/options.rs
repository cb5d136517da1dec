use crate::ConfigError;

/// Configuration for [`crate::VirtualWindow`].
///
/// All geometry is on the scroll axis and in pixels; items have a fixed height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowOptions {
    pub item_height: u32,
    pub container_height: u32,
    /// Extra items rendered on each side of the viewport to reduce flicker on fast scroll.
    pub buffer: usize,
}

impl WindowOptions {
    pub fn new(item_height: u32, container_height: u32) -> Self {
        Self {
            item_height,
            container_height,
            buffer: 5,
        }
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_container_height(mut self, container_height: u32) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_height == 0 {
            return Err(ConfigError::ZeroItemHeight);
        }
        Ok(())
    }

    /// `ceil(container_height / item_height)`, or 0 for an invalid item height.
    pub fn visible_count(&self) -> usize {
        if self.item_height == 0 {
            return 0;
        }
        self.container_height.div_ceil(self.item_height) as usize
    }
}

/// How [`crate::Sampler`] reduces a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleStrategy {
    /// Evenly spaced indexes (`floor(i * len / max_points)`), last slot pinned to the end.
    Uniform,
    /// Every `ceil(len / max_points)`-th point plus the final point.
    #[default]
    TimeSeries,
    /// Keeps the points with the largest jumps from their predecessor.
    Intelligent,
}

/// Configuration for [`crate::Sampler`].
///
/// `max_points` is at least 2 so both endpoints always fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleConfig {
    max_points: usize,
    strategy: SampleStrategy,
}

impl SampleConfig {
    pub fn new(max_points: usize, strategy: SampleStrategy) -> Result<Self, ConfigError> {
        if max_points < 2 {
            return Err(ConfigError::TooFewPoints(max_points));
        }
        Ok(Self {
            max_points,
            strategy,
        })
    }

    /// Like [`SampleConfig::new`], raising `max_points` to 2 instead of failing.
    pub(crate) fn at_least_endpoints(max_points: usize, strategy: SampleStrategy) -> Self {
        Self {
            max_points: max_points.max(2),
            strategy,
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn strategy(&self) -> SampleStrategy {
        self.strategy
    }

    pub fn with_strategy(mut self, strategy: SampleStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
