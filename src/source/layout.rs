//! Line-to-box grouping and its tunable parameters.

use serde::{Deserialize, Serialize};

use super::fragment::{Orientation, TextContainer, TextFragment};

/// Default relative line margin for joining lines into one box.
pub const DEFAULT_LINE_MARGIN: f64 = 0.5;

/// Layout analysis parameters handed to a [`Source`](super::Source).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Maximum vertical gap between two lines of the same box, relative to
    /// the smaller line height
    pub line_margin: f64,

    /// Put vertical lines into their own vertical boxes
    pub detect_vertical: bool,
}

impl LayoutParams {
    /// Create layout parameters with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line margin.
    pub fn with_line_margin(mut self, line_margin: f64) -> Self {
        self.line_margin = line_margin;
        self
    }

    /// Enable or disable vertical box detection.
    pub fn with_detect_vertical(mut self, detect: bool) -> Self {
        self.detect_vertical = detect;
        self
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_margin: DEFAULT_LINE_MARGIN,
            detect_vertical: false,
        }
    }
}

/// Lines of one page in reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLines {
    /// Page index (0-based)
    pub index: usize,
    /// Lines on the page
    pub lines: Vec<TextFragment>,
}

impl PageLines {
    /// Create a page from its lines.
    pub fn new(index: usize, lines: Vec<TextFragment>) -> Self {
        Self { index, lines }
    }
}

/// Group page lines into paragraph boxes.
pub fn group_lines(pages: &[PageLines], params: &LayoutParams) -> Vec<TextContainer> {
    let mut containers = Vec::new();

    for page in pages {
        let mut current: Vec<TextFragment> = Vec::new();

        for line in &page.lines {
            if line.is_empty() {
                continue;
            }

            if params.detect_vertical && line.is_vertical() {
                flush(&mut current, page.index, &mut containers);
                containers.push(
                    TextContainer::new(vec![line.clone()], page.index)
                        .with_orientation(Orientation::Vertical),
                );
                continue;
            }

            if let Some(prev) = current.last() {
                if should_break_box(prev, line, params.line_margin) {
                    flush(&mut current, page.index, &mut containers);
                }
            }
            current.push(line.clone());
        }

        flush(&mut current, page.index, &mut containers);
    }

    log::trace!(
        "Grouped {} pages into {} boxes (line_margin={:.3})",
        pages.len(),
        containers.len(),
        params.line_margin
    );

    containers
}

fn flush(current: &mut Vec<TextFragment>, page: usize, out: &mut Vec<TextContainer>) {
    if !current.is_empty() {
        out.push(TextContainer::new(std::mem::take(current), page));
    }
}

/// Determine if `curr` starts a new box after `prev`.
fn should_break_box(prev: &TextFragment, curr: &TextFragment, line_margin: f64) -> bool {
    let prev_box = prev.bbox();
    let curr_box = curr.bbox();

    let min_height = prev_box.height().min(curr_box.height());
    if min_height <= 0.0 {
        return true;
    }

    // Moving upwards means a new column or a new flow
    if curr_box.y1 > prev_box.y1 {
        return true;
    }

    if !prev_box.overlaps_horizontally(&curr_box) {
        return true;
    }

    let gap = prev_box.y0 - curr_box.y1;
    gap > line_margin * min_height
}
