//! Sizing of text layers while they are edited in place.
//!
//! Text never wraps: each `\n` starts a new line, the ideal width is the widest
//! line and the ideal height is the line count times the line height. Sizes are
//! measured in document units (the layer's font size is a document size); the
//! editor padding is a view-space amount.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use bevy::math::Vec2;

use crate::constants::{MIN_LAYER_SIZE, TEXT_EDIT_PADDING};
use crate::document::LayerRect;

/// Line measurement for a single font at a given size.
pub trait FontMetrics {
    /// Advance width of one line of text.
    fn line_width(&self, line: &str, size: f32) -> f32;
    /// Distance between consecutive baselines.
    fn line_height(&self, size: f32) -> f32;
}

/// Fixed-advance estimate used when no font is available at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxFontMetrics;

impl ApproxFontMetrics {
    const ADVANCE: f32 = 0.6;
    const LINE_HEIGHT: f32 = 1.2;
}

impl FontMetrics for ApproxFontMetrics {
    fn line_width(&self, line: &str, size: f32) -> f32 {
        line.chars().count() as f32 * size * Self::ADVANCE
    }

    fn line_height(&self, size: f32) -> f32 {
        size * Self::LINE_HEIGHT
    }
}

/// Real glyph advances and kerning from a loaded TTF/OTF font.
#[derive(Clone)]
pub struct GlyphMetrics {
    font: FontArc,
}

impl GlyphMetrics {
    pub fn new(font: FontArc) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }
}

impl FontMetrics for GlyphMetrics {
    fn line_width(&self, line: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for c in line.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    fn line_height(&self, size: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(size));
        scaled.height() + scaled.line_gap()
    }
}

/// Tight bounds of `content` without padding, in document units.
pub fn ideal_text_size(content: &str, font_size: f32, metrics: &dyn FontMetrics) -> Vec2 {
    let mut width: f32 = 0.0;
    let mut lines = 0;
    // `split` yields one empty line for empty content, which keeps the caret visible
    for line in content.split('\n') {
        width = width.max(metrics.line_width(line, font_size));
        lines += 1;
    }
    Vec2::new(width, lines as f32 * metrics.line_height(font_size))
}

/// Inline editor rect in view space while editing.
///
/// The editor covers the larger of the layer rect and the padded ideal text
/// size, so it grows with the content but never shrinks below the layer.
pub fn editor_rect(layer_rect: &LayerRect, ideal: Vec2, scale: f32) -> LayerRect {
    let view = layer_rect.to_view(scale);
    let padded = ideal * scale + Vec2::splat(TEXT_EDIT_PADDING);
    LayerRect::new(
        view.x,
        view.y,
        view.width.max(padded.x),
        view.height.max(padded.y),
    )
}

/// Final layer size committed when editing finishes, in document units.
pub fn final_text_size(ideal: Vec2, scale: f32) -> Vec2 {
    (ideal + Vec2::splat(TEXT_EDIT_PADDING / scale)).max(Vec2::splat(MIN_LAYER_SIZE))
}
