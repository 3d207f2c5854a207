//! Font size distribution of a document.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{key_size, size_key, truncate};
use crate::error::{Error, Result};
use crate::source::{TextContainer, TextFragment, DEFAULT_LINE_MARGIN};

/// Number of leading glyphs sampled per line.
const LINE_SAMPLE: usize = 10;

/// A sampled size must occur more often than this within its line.
const MIN_SIZE_OCCURRENCES: usize = 2;

/// Factor between the modal line gap and the derived line margin.
const LINE_MARGIN_FACTOR: f64 = 1.75;

/// Number of occurrences of one font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeCount {
    /// Font size, truncated to hundredths
    pub size: f64,
    /// Number of lines dominated by this size
    pub count: u64,
}

/// Statistics over the dominant font size of every text line.
///
/// Immutable once built. `min_found_size <= body_size <= max_found_size`
/// always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDistribution {
    histogram: Vec<SizeCount>,
    body_size: f64,
    min_found_size: f64,
    max_found_size: f64,
    line_margin: f64,
}

impl StyleDistribution {
    /// Analyse paragraph boxes.
    ///
    /// Returns [`Error::EmptyDocument`] when no line carries a dominant size.
    pub fn analyze<I, C>(containers: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Borrow<TextContainer>,
    {
        let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
        let mut first_seen: BTreeMap<i64, usize> = BTreeMap::new();
        let mut spacing: BTreeMap<(i64, i64), u64> = BTreeMap::new();
        let mut previous: Option<(usize, TextFragment)> = None;

        for container in containers {
            let container = container.borrow();
            for fragment in &container.fragments {
                if fragment.is_empty() {
                    continue;
                }

                if let Some(size) = dominant_size(fragment) {
                    let key = size_key(size);
                    let order = first_seen.len();
                    first_seen.entry(key).or_insert(order);
                    *counts.entry(key).or_insert(0) += 1;
                }

                if let Some((page, prev)) = &previous {
                    if *page == container.page {
                        if let Some(pair) = line_spacing(prev, fragment) {
                            *spacing.entry(pair).or_insert(0) += 1;
                        }
                    }
                }
                previous = Some((container.page, fragment.clone()));
            }
        }

        let mut distribution = Self::from_key_counts(counts, &first_seen)?;
        distribution.line_margin = modal_line_margin(&spacing);
        Ok(distribution)
    }

    /// Build a distribution from an existing size histogram.
    ///
    /// Sizes are truncated to hundredths; counts for equal keys are summed.
    /// Iteration order counts as reading order when breaking ties for the
    /// body size. The line margin is left at its default.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, u64)>,
    {
        let mut keyed: BTreeMap<i64, u64> = BTreeMap::new();
        let mut first_seen: BTreeMap<i64, usize> = BTreeMap::new();
        for (size, count) in counts {
            if count > 0 {
                let key = size_key(size);
                let order = first_seen.len();
                first_seen.entry(key).or_insert(order);
                *keyed.entry(key).or_insert(0) += count;
            }
        }
        Self::from_key_counts(keyed, &first_seen)
    }

    /// `first_seen` maps each key to the position it first occurred at.
    fn from_key_counts(
        counts: BTreeMap<i64, u64>,
        first_seen: &BTreeMap<i64, usize>,
    ) -> Result<Self> {
        let (&first, _) = counts.iter().next().ok_or(Error::EmptyDocument)?;
        let (&last, _) = counts.iter().next_back().ok_or(Error::EmptyDocument)?;

        // Mode; ties go to the size seen first
        let seen = |key: &i64| first_seen.get(key).copied().unwrap_or(usize::MAX);
        let body_key = counts
            .iter()
            .max_by(|(a_key, a_count), (b_key, b_count)| {
                a_count.cmp(b_count).then_with(|| seen(b_key).cmp(&seen(a_key)))
            })
            .map(|(&key, _)| key)
            .unwrap_or(first);

        let body_size = key_size(body_key);
        let mut min_found_size = key_size(first);
        let mut max_found_size = key_size(last);
        if first == last {
            log::debug!(
                "Degenerate size distribution (single size {:.2}), widening range",
                body_size
            );
            min_found_size /= 2.0;
            max_found_size *= 2.0;
        }

        let histogram = counts
            .into_iter()
            .map(|(key, count)| SizeCount {
                size: key_size(key),
                count,
            })
            .collect::<Vec<_>>();

        log::debug!(
            "Style distribution: body={:.2}, min={:.2}, max={:.2}, {} sizes",
            body_size,
            min_found_size,
            max_found_size,
            histogram.len()
        );

        Ok(Self {
            histogram,
            body_size,
            min_found_size,
            max_found_size,
            line_margin: DEFAULT_LINE_MARGIN,
        })
    }

    /// Most common size, taken as the body text size.
    pub fn body_size(&self) -> f64 {
        self.body_size
    }

    /// Smallest observed size (halved for single-size documents).
    pub fn min_found_size(&self) -> f64 {
        self.min_found_size
    }

    /// Largest observed size (doubled for single-size documents).
    pub fn max_found_size(&self) -> f64 {
        self.max_found_size
    }

    /// Relative line margin derived from the modal line spacing.
    pub fn line_margin(&self) -> f64 {
        self.line_margin
    }

    /// Check if the document uses exactly one font size.
    pub fn is_single_size(&self) -> bool {
        self.histogram.len() == 1
    }

    /// Total number of counted lines.
    pub fn amount_values(&self) -> u64 {
        self.histogram.iter().map(|c| c.count).sum()
    }

    /// Number of distinct sizes.
    pub fn amount_sizes(&self) -> usize {
        self.histogram.len()
    }

    /// Size histogram in ascending size order.
    pub fn frequencies(&self) -> &[SizeCount] {
        &self.histogram
    }

    /// Count recorded for a size (truncated to hundredths).
    pub fn count(&self, size: f64) -> u64 {
        let key = size_key(size);
        self.histogram
            .iter()
            .find(|c| size_key(c.size) == key)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    /// Histogram normalised on both axes: sizes relative to the largest size
    /// (truncated to hundredths), counts relative to the total.
    pub fn norm_data(&self) -> Vec<(f64, f64)> {
        let total = self.amount_values() as f64;
        let mut normalised: BTreeMap<i64, f64> = BTreeMap::new();
        for entry in &self.histogram {
            let key = size_key(entry.size / self.max_found_size);
            *normalised.entry(key).or_insert(0.0) += entry.count as f64 / total;
        }
        normalised
            .into_iter()
            .map(|(key, share)| (key_size(key), share))
            .collect()
    }

    /// [`norm_data`](Self::norm_data) snapped onto `bins` equal-width bins
    /// over `[0, 1)`. Every bin is present in the output.
    pub fn norm_data_binned(&self, bins: usize) -> Vec<(f64, f64)> {
        if bins == 0 {
            return Vec::new();
        }

        let step = 1.0 / bins as f64;
        let mut binned: Vec<(f64, f64)> = (0..bins).map(|i| (step * i as f64, 0.0)).collect();
        let total = self.amount_values() as f64;

        for entry in &self.histogram {
            let norm = truncate(entry.size / self.max_found_size, 2);
            let closest = ((norm / step).round() as usize).min(bins - 1);
            binned[closest].1 += entry.count as f64 / total;
        }

        binned
    }
}

/// Largest of the first glyph sizes of a line, if it occurs often enough.
fn dominant_size(fragment: &TextFragment) -> Option<f64> {
    let sizes: Vec<f64> = fragment
        .glyphs()
        .iter()
        .take(LINE_SAMPLE)
        .map(|g| g.size)
        .collect();

    let max = sizes.iter().copied().fold(f64::NAN, f64::max);
    if max.is_nan() {
        return None;
    }

    let occurrences = sizes.iter().filter(|&&s| s == max).count();
    (occurrences > MIN_SIZE_OCCURRENCES).then_some(max)
}

/// `(gap, height)` key of two consecutive lines of equal height.
fn line_spacing(prev: &TextFragment, curr: &TextFragment) -> Option<(i64, i64)> {
    let height = size_key(curr.height());
    if height <= 0 || size_key(prev.height()) != height {
        return None;
    }

    let gap = prev.bbox().y0 - curr.bbox().y1;
    if gap < 0.0 {
        return None;
    }

    Some((size_key(gap), height))
}

fn modal_line_margin(spacing: &BTreeMap<(i64, i64), u64>) -> f64 {
    let mut modal: Option<((i64, i64), u64)> = None;
    for (&pair, &count) in spacing {
        if modal.map_or(true, |(_, best)| count > best) {
            modal = Some((pair, count));
        }
    }

    match modal {
        Some(((gap, height), _)) => {
            let margin = LINE_MARGIN_FACTOR * key_size(gap) / key_size(height);
            let margin = margin.min(DEFAULT_LINE_MARGIN);
            log::debug!("Line margin {:.3} from modal gap {:.2}", margin, key_size(gap));
            margin
        }
        None => DEFAULT_LINE_MARGIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Line, TextFragment};

    fn line(text: &str, size: f64, y: f64) -> TextFragment {
        Line::from_text(text, size, "Times", 0.0, y).into()
    }

    #[test]
    fn test_from_counts() {
        let distribution =
            StyleDistribution::from_counts([(1.0, 1), (5.0, 1), (6.0, 1), (10.0, 4), (20.0, 1), (100.0, 1)])
                .unwrap();

        assert_eq!(distribution.body_size(), 10.0);
        assert_eq!(distribution.min_found_size(), 1.0);
        assert_eq!(distribution.max_found_size(), 100.0);
        assert_eq!(distribution.amount_values(), 9);
        assert_eq!(distribution.amount_sizes(), 6);
        assert_eq!(distribution.count(10.0), 4);
        assert_eq!(distribution.count(11.0), 0);
        assert_eq!(distribution.line_margin(), DEFAULT_LINE_MARGIN);
    }

    #[test]
    fn test_from_counts_empty() {
        let result = StyleDistribution::from_counts(Vec::new());
        assert!(matches!(result, Err(Error::EmptyDocument)));

        let result = StyleDistribution::from_counts([(10.0, 0)]);
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_mode_tie_prefers_first_seen_size() {
        let distribution = StyleDistribution::from_counts([(12.0, 3), (9.0, 3), (20.0, 1)]).unwrap();
        assert_eq!(distribution.body_size(), 12.0);

        let distribution = StyleDistribution::from_counts([(9.0, 3), (12.0, 3), (20.0, 1)]).unwrap();
        assert_eq!(distribution.body_size(), 9.0);
    }

    #[test]
    fn test_analyze_tie_prefers_first_seen_size() {
        let containers = vec![
            TextContainer::single_line("Introduction", 16.0, "Arial-Bold", 0),
            TextContainer::single_line("body text one", 10.0, "Arial", 0),
            TextContainer::single_line("Methods", 16.0, "Arial-Bold", 0),
            TextContainer::single_line("body text two", 10.0, "Arial", 0),
        ];

        let distribution = StyleDistribution::analyze(&containers).unwrap();
        assert_eq!(distribution.body_size(), 16.0);
        assert_eq!(distribution.count(16.0), 2);
        assert_eq!(distribution.count(10.0), 2);
    }

    #[test]
    fn test_single_size_widened() {
        let distribution = StyleDistribution::from_counts([(10.0, 7)]).unwrap();
        assert!(distribution.is_single_size());
        assert_eq!(distribution.body_size(), 10.0);
        assert_eq!(distribution.min_found_size(), 5.0);
        assert_eq!(distribution.max_found_size(), 20.0);
    }

    #[test]
    fn test_analyze_dominant_line_size() {
        let containers = vec![
            TextContainer::new(vec![line("Heading", 16.0, 700.0)], 0),
            TextContainer::new(vec![line("body text one", 10.0, 650.0), line("body text two", 10.0, 638.0)], 0),
            // two glyphs only: not counted
            TextContainer::new(vec![line("ab", 30.0, 600.0)], 0),
        ];

        let distribution = StyleDistribution::analyze(&containers).unwrap();
        assert_eq!(distribution.body_size(), 10.0);
        assert_eq!(distribution.max_found_size(), 16.0);
        assert_eq!(distribution.count(30.0), 0);
        assert_eq!(distribution.amount_values(), 3);
    }

    #[test]
    fn test_analyze_empty() {
        let containers = vec![TextContainer::new(vec![line("   ", 10.0, 100.0)], 0)];
        let result = StyleDistribution::analyze(&containers);
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_analyze_line_margin() {
        // 10pt lines with a 2pt gap: 1.75 * 2 / 10 = 0.35
        let containers = vec![TextContainer::new(
            vec![
                line("first line", 10.0, 100.0),
                line("second line", 10.0, 88.0),
                line("third line", 10.0, 76.0),
            ],
            0,
        )];

        let distribution = StyleDistribution::analyze(&containers).unwrap();
        assert!((distribution.line_margin() - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_line_margin_capped() {
        // 10pt gap would give 1.75, capped at the default
        let containers = vec![
            TextContainer::new(vec![line("first line", 10.0, 100.0)], 0),
            TextContainer::new(vec![line("second line", 10.0, 80.0)], 0),
        ];

        let distribution = StyleDistribution::analyze(&containers).unwrap();
        assert_eq!(distribution.line_margin(), DEFAULT_LINE_MARGIN);
    }

    #[test]
    fn test_analyze_line_margin_ignores_page_change() {
        let containers = vec![
            TextContainer::new(vec![line("first line", 10.0, 100.0)], 0),
            TextContainer::new(vec![line("second line", 10.0, 88.0)], 1),
        ];

        let distribution = StyleDistribution::analyze(&containers).unwrap();
        assert_eq!(distribution.line_margin(), DEFAULT_LINE_MARGIN);
    }

    #[test]
    fn test_norm_data() {
        let distribution = StyleDistribution::from_counts([(5.0, 1), (10.0, 3)]).unwrap();

        let norm = distribution.norm_data();
        assert_eq!(norm, vec![(0.5, 0.25), (1.0, 0.75)]);

        let binned = distribution.norm_data_binned(4);
        assert_eq!(binned.len(), 4);
        assert_eq!(binned[2], (0.5, 0.25));
        // 1.0 snaps onto the last bin
        assert_eq!(binned[3], (0.75, 0.75));
        assert!(distribution.norm_data_binned(0).is_empty());
    }

    #[test]
    fn test_serde_roundtrip_keeps_statistics() {
        let distribution = StyleDistribution::from_counts([(8.0, 2), (10.0, 5), (14.0, 1)]).unwrap();
        let json = serde_json::to_string(&distribution).unwrap();
        let decoded: StyleDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, distribution);
    }
}
