//! Font size statistics and the mapping of sizes onto ordinal buckets.
//!
//! The analysis runs in two stages. [`StyleDistribution`] counts the dominant
//! size of every text line to find the body text size and the size range of
//! a document. A [`SizeMapper`] built from the distribution then translates
//! any size into a [`TextSize`](crate::model::TextSize) bucket, which the
//! [`StyleAnnotator`] attaches to every paragraph.

mod annotate;
mod distribution;
mod size_mapper;

pub use annotate::StyleAnnotator;
pub use distribution::{SizeCount, StyleDistribution};
pub use size_mapper::{
    bucketize, LinearSizeMapper, LogMapperConfig, MapperKind, PivotLinearMapper, PivotLogMapper,
    RightSpanClamp, SizeMapper,
};

/// Truncate a value to `decimals` decimal places.
pub(crate) fn truncate(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).trunc() / factor
}

/// Integer key of a size truncated to hundredths.
pub(crate) fn size_key(size: f64) -> i64 {
    (size * 100.0).trunc() as i64
}

/// Size for an integer key produced by [`size_key`].
pub(crate) fn key_size(key: i64) -> f64 {
    key as f64 / 100.0
}
