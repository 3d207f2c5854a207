//! Mapping of font sizes onto [`TextSize`] buckets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StyleDistribution;
use crate::error::Error;
use crate::model::TextSize;

/// Number of buckets the mappers distribute sizes over.
const BINS: f64 = 5.0;

/// Span used when the distribution has no room on one side of the pivot.
const FALLBACK_SPAN: f64 = 5.0;

/// Translates absolute font sizes into ordinal buckets.
pub trait SizeMapper {
    /// Bucket for a font size.
    fn translate(&self, size: f64) -> TextSize;

    /// Bucket borders `(B0, B1, B2, B3)`, if the mapper uses fixed borders.
    fn borders(&self) -> Option<[f64; 4]> {
        None
    }
}

/// Bucket of `value` given four ascending borders.
///
/// `v < B0` is `XSmall`, `B0 <= v < B1` is `Small`, and so on up to
/// `v >= B3` being `XLarge`.
pub fn bucketize(borders: &[f64; 4], value: f64) -> TextSize {
    match borders.iter().position(|&border| value < border) {
        Some(0) => TextSize::XSmall,
        Some(1) => TextSize::Small,
        Some(2) => TextSize::Middle,
        Some(_) => TextSize::Large,
        None => TextSize::XLarge,
    }
}

/// How the span above the pivot is limited for documents with very large
/// outliers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RightSpanClamp {
    /// `right_span > 2 * pivot` becomes `2 * pivot`
    #[default]
    CapAtTwicePivot,
    /// `right_span > 2 * pivot` is halved
    HalveAboveTwicePivot,
}

impl RightSpanClamp {
    fn apply(self, right_span: f64, pivot: f64) -> f64 {
        if right_span <= 2.0 * pivot {
            return right_span;
        }
        match self {
            RightSpanClamp::CapAtTwicePivot => 2.0 * pivot,
            RightSpanClamp::HalveAboveTwicePivot => right_span / 2.0,
        }
    }
}

/// Tunables of [`PivotLogMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogMapperConfig {
    /// Offset in the step weight `1 - 1/e^(n - offset)`; must stay below 1
    pub weight_offset: f64,

    /// Share of the previous step added to the next one
    pub momentum: f64,

    /// Limit for the span above the pivot
    pub right_span_clamp: RightSpanClamp,
}

impl LogMapperConfig {
    /// Create a configuration with default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrower pivot and halved outlier span, tuned on an older corpus.
    pub fn legacy() -> Self {
        Self {
            weight_offset: 0.5,
            momentum: 0.2,
            right_span_clamp: RightSpanClamp::HalveAboveTwicePivot,
        }
    }

    /// Set the weight offset.
    pub fn with_weight_offset(mut self, offset: f64) -> Self {
        self.weight_offset = offset;
        self
    }

    /// Set the momentum.
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    /// Set the right span clamp.
    pub fn with_right_span_clamp(mut self, clamp: RightSpanClamp) -> Self {
        self.right_span_clamp = clamp;
        self
    }

    fn weight(&self, n: u32) -> f64 {
        1.0 - 1.0 / (f64::from(n) - self.weight_offset).exp()
    }
}

impl Default for LogMapperConfig {
    fn default() -> Self {
        Self {
            weight_offset: 0.2,
            momentum: 0.5,
            right_span_clamp: RightSpanClamp::CapAtTwicePivot,
        }
    }
}

/// Logarithmic mapper anchored at the body text size.
///
/// Walks two steps from the pivot towards the smallest and the largest size.
/// The first step is short and later steps grow, so the `Middle` bucket stays
/// narrow around the body size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotLogMapper {
    borders: [f64; 4],
}

impl PivotLogMapper {
    /// Create a mapper with the default configuration.
    pub fn new(distribution: &StyleDistribution) -> Self {
        Self::with_config(distribution, &LogMapperConfig::default())
    }

    /// Create a mapper with a custom configuration.
    pub fn with_config(distribution: &StyleDistribution, config: &LogMapperConfig) -> Self {
        let pivot = distribution.body_size();
        let mut right_span = config
            .right_span_clamp
            .apply(distribution.max_found_size() - pivot, pivot);
        let mut left_span = pivot - distribution.min_found_size();

        if right_span == 0.0 {
            right_span = FALLBACK_SPAN;
        }
        if left_span == 0.0 {
            left_span = FALLBACK_SPAN;
        }

        let [s1, s2] = Self::steps(left_span, config);
        let [r1, r2] = Self::steps(right_span, config);
        let borders = [pivot - s1 - s2, pivot - s1, pivot + r1, pivot + r1 + r2];

        log::debug!(
            "PivotLogMapper borders: {:.2}, {:.2}, {:.2}, {:.2} (pivot {:.2})",
            borders[0],
            borders[1],
            borders[2],
            borders[3],
            pivot
        );

        Self { borders }
    }

    fn steps(span: f64, config: &LogMapperConfig) -> [f64; 2] {
        let target_steps = BINS / 2.0;
        let mut previous = 0.0;
        let mut steps = [0.0; 2];
        for (i, step) in steps.iter_mut().enumerate() {
            *step = span / target_steps * config.weight(i as u32 + 1) + previous * config.momentum;
            previous = *step;
        }
        steps
    }
}

impl SizeMapper for PivotLogMapper {
    fn translate(&self, size: f64) -> TextSize {
        bucketize(&self.borders, size)
    }

    fn borders(&self) -> Option<[f64; 4]> {
        Some(self.borders)
    }
}

/// Equal quarter steps from the smallest size to the pivot and from the
/// pivot to the largest size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotLinearMapper {
    borders: [f64; 4],
}

impl PivotLinearMapper {
    pub fn new(distribution: &StyleDistribution) -> Self {
        let pivot = distribution.body_size();
        let min = distribution.min_found_size();
        let left_step = (pivot - min) / 4.0;
        let right_step = (distribution.max_found_size() - pivot) / 4.0;

        Self {
            borders: [
                min + left_step,
                min + 2.0 * left_step,
                pivot + right_step,
                pivot + 2.0 * right_step,
            ],
        }
    }
}

impl SizeMapper for PivotLinearMapper {
    fn translate(&self, size: f64) -> TextSize {
        bucketize(&self.borders, size)
    }

    fn borders(&self) -> Option<[f64; 4]> {
        Some(self.borders)
    }
}

/// Linear scale between the smallest and the largest size, ignoring the
/// body size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSizeMapper {
    min: f64,
    max: f64,
}

impl LinearSizeMapper {
    pub fn new(distribution: &StyleDistribution) -> Self {
        Self {
            min: distribution.min_found_size(),
            max: distribution.max_found_size(),
        }
    }
}

impl SizeMapper for LinearSizeMapper {
    fn translate(&self, size: f64) -> TextSize {
        let scaled = (size - self.min) / (self.max - self.min);
        if scaled > 1.0 {
            TextSize::XLarge
        } else if scaled < 0.0 {
            TextSize::XSmall
        } else {
            let ordinal = 1.0 + scaled * (BINS - 1.0);
            TextSize::from_ordinal(ordinal.trunc() as u8)
        }
    }
}

/// Mapper selection for the hierarchy parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapperKind {
    /// [`PivotLogMapper`] with default tunables
    #[default]
    Log,
    /// [`PivotLogMapper`] with [`LogMapperConfig::legacy`]
    LogLegacy,
    /// [`PivotLinearMapper`]
    PivotLinear,
    /// [`LinearSizeMapper`]
    Linear,
}

impl MapperKind {
    /// Build the mapper for a distribution.
    pub fn build(self, distribution: &StyleDistribution) -> Box<dyn SizeMapper> {
        match self {
            MapperKind::Log => Box::new(PivotLogMapper::new(distribution)),
            MapperKind::LogLegacy => Box::new(PivotLogMapper::with_config(
                distribution,
                &LogMapperConfig::legacy(),
            )),
            MapperKind::PivotLinear => Box::new(PivotLinearMapper::new(distribution)),
            MapperKind::Linear => Box::new(LinearSizeMapper::new(distribution)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MapperKind::Log => "log",
            MapperKind::LogLegacy => "log-legacy",
            MapperKind::PivotLinear => "pivot-linear",
            MapperKind::Linear => "linear",
        }
    }
}

impl fmt::Display for MapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapperKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(MapperKind::Log),
            "log-legacy" | "legacy" => Ok(MapperKind::LogLegacy),
            "pivot-linear" => Ok(MapperKind::PivotLinear),
            "linear" => Ok(MapperKind::Linear),
            other => Err(Error::Other(format!("unknown size mapper: {}", other))),
        }
    }
}
