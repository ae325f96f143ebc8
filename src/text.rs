//! Text measurement and fitting

use rusttype::{point, Font, Scale};
use std::path::Path;

use crate::error::{GaugeError, Result};

/// Continuation marker appended to truncated labels
pub const ELLIPSIS: char = '\u{2026}';

/// Vertical font extents relative to the baseline, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Highest extent above the baseline (negative)
    pub top: f32,
    /// Lowest extent below the baseline (positive)
    pub bottom: f32,
}

impl FontMetrics {
    /// Baseline that puts the visual center of a line at `center_y`
    pub fn centered_baseline(&self, center_y: f32) -> f32 {
        center_y + (self.bottom - self.top) / 2.0 - self.bottom
    }
}

/// Anything that can measure a single line of text
pub trait TextMeasure {
    /// Advance width of `text` at `size` pixels
    fn measure(&self, text: &str, size: f32) -> f32;

    fn metrics(&self, size: f32) -> FontMetrics;
}

/// Truncate `text` at the end so it fits in `available` pixels.
///
/// Text that already fits is returned unchanged. Otherwise the longest
/// prefix that still fits with a trailing ellipsis is used; if not even the
/// ellipsis fits the result is empty.
pub fn ellipsize_end<M: TextMeasure + ?Sized>(
    text: &str,
    available: f32,
    size: f32,
    measure: &M,
) -> String {
    if measure.measure(text, size) <= available {
        return text.to_string();
    }
    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    for &end in boundaries.iter().rev() {
        let mut candidate = String::with_capacity(end + ELLIPSIS.len_utf8());
        candidate.push_str(&text[..end]);
        candidate.push(ELLIPSIS);
        if measure.measure(&candidate, size) <= available {
            return candidate;
        }
    }
    String::new()
}

/// A parsed outline font
pub struct GlyphFont {
    font: Font<'static>,
}

impl GlyphFont {
    pub fn from_bytes(data: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(data).map(|font| Self { font })
    }

    /// Load a TrueType/OpenType font file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let font = Self::from_bytes(data)
            .ok_or_else(|| GaugeError::FontLoad(path.display().to_string()))?;
        log::debug!("Loaded font {}", path.display());
        Ok(font)
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }
}

impl TextMeasure for GlyphFont {
    fn measure(&self, text: &str, size: f32) -> f32 {
        self.font
            .layout(text, Scale::uniform(size), point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn metrics(&self, size: f32) -> FontMetrics {
        let v_metrics = self.font.v_metrics(Scale::uniform(size));
        FontMetrics {
            top: -v_metrics.ascent,
            bottom: -v_metrics.descent,
        }
    }
}

/// Fixed-advance measurer for tests: every char is `size / 2` wide
#[cfg(test)]
pub(crate) struct MonoMeasure;

#[cfg(test)]
impl TextMeasure for MonoMeasure {
    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size / 2.0
    }

    fn metrics(&self, size: f32) -> FontMetrics {
        FontMetrics {
            top: -0.8 * size,
            bottom: 0.2 * size,
        }
    }
}
