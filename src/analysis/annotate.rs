//! Attaches a [`Style`] to every paragraph box.

use super::{truncate, SizeMapper};
use crate::model::{Style, TextElement};
use crate::source::TextContainer;

/// Turns paragraph boxes into styled [`TextElement`]s.
pub struct StyleAnnotator<'m> {
    mapper: &'m dyn SizeMapper,
}

impl<'m> StyleAnnotator<'m> {
    /// Create an annotator that buckets sizes with `mapper`.
    pub fn new(mapper: &'m dyn SizeMapper) -> Self {
        Self { mapper }
    }

    /// Lazily annotate a stream of boxes.
    ///
    /// Boxes without characters or with only whitespace are dropped.
    pub fn annotate<I>(&self, containers: I) -> impl Iterator<Item = TextElement> + 'm
    where
        I: IntoIterator<Item = TextContainer>,
        I::IntoIter: 'm,
    {
        let mapper = self.mapper;
        containers
            .into_iter()
            .filter_map(move |container| style_container(mapper, container))
    }

    /// Annotate a single box.
    pub fn annotate_one(&self, container: TextContainer) -> Option<TextElement> {
        style_container(self.mapper, container)
    }
}

fn style_container(mapper: &dyn SizeMapper, container: TextContainer) -> Option<TextElement> {
    let mut fonts: Vec<(&str, usize)> = Vec::new();
    let mut sizes: Vec<f64> = Vec::new();

    for glyph in container.glyphs() {
        sizes.push(glyph.size);
        match fonts.iter_mut().find(|(name, _)| *name == glyph.font_name) {
            Some((_, count)) => *count += 1,
            None => fonts.push((glyph.font_name, 1)),
        }
    }

    if sizes.is_empty() || container.text().trim().is_empty() {
        return None;
    }

    // First seen font wins ties
    let mut font_name = "";
    let mut best = 0;
    for &(name, count) in &fonts {
        if count > best {
            font_name = name;
            best = count;
        }
    }
    let font_name = font_name.to_string();

    let max_size = sizes.iter().copied().fold(f64::MIN, f64::max);
    let mean_size = truncate(sizes.iter().sum::<f64>() / sizes.len() as f64, 1);
    let style = Style::from_font(font_name, mapper.translate(max_size), mean_size, max_size);

    log::trace!(
        "Annotated box on page {}: {} {:.1}pt ({})",
        container.page,
        style.mapped_font_size,
        max_size,
        style.font_name
    );

    Some(TextElement::from_container(container, style))
}
