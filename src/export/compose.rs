//! Flattening a document into a single raster image.
//!
//! Layers are painted back-to-front onto a white canvas at the target size.
//! Each layer is first drawn upright at its destination size, then composited
//! with inverse-mapped rotation about the destination center, the same way
//! the canvas view rotates layers on screen.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use bevy::log::warn;
use bevy::math::Vec2;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageError, Rgba, RgbaImage};

use crate::document::geometry::{rotated_corners, to_local};
use crate::document::{Document, LayerKind, LayerRect, TextAlignment, TextLayer};
use crate::editor::text_reflow::{FontMetrics, GlyphMetrics};
use crate::error::EditorError;

use super::settings::TargetSize;

/// What a planned layer paints.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedContent {
    Image { source: PathBuf },
    /// Text with its font size already scaled to the target.
    Text(TextLayer),
}

/// One visible layer mapped into target pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedLayer {
    /// Index of the layer in the document (0 = topmost)
    pub index: usize,
    pub rect: LayerRect,
    pub rotation: f32,
    pub content: PlannedContent,
}

/// Visible layers in painting order (bottom first) with destination geometry.
pub fn export_plan(document: &Document, target: TargetSize) -> Vec<PlannedLayer> {
    let (width, height) = target.resolve(document.canvas_size);
    let sx = width as f32 / document.canvas_size.width as f32;
    let sy = height as f32 / document.canvas_size.height as f32;

    document
        .paint_order()
        .filter(|(_, layer)| layer.visible)
        .map(|(index, layer)| {
            let r = layer.rect;
            let rect = LayerRect::new(r.x * sx, r.y * sy, r.width * sx, r.height * sy);
            let content = match &layer.kind {
                LayerKind::Image(image) => PlannedContent::Image {
                    source: image.source.clone(),
                },
                LayerKind::Text(text) => PlannedContent::Text(TextLayer {
                    font_size: text.font_size * sx.min(sy),
                    ..text.clone()
                }),
            };
            PlannedLayer {
                index,
                rect,
                rotation: layer.rotation(),
                content,
            }
        })
        .collect()
}

/// A rendered export plus the layers that could not be drawn.
pub struct RenderedExport {
    pub image: RgbaImage,
    pub warnings: Vec<String>,
}

fn pixel_size(rect: &LayerRect) -> (u32, u32) {
    (
        rect.width.round().max(1.0) as u32,
        rect.height.round().max(1.0) as u32,
    )
}

/// Source-over blend of a straight-alpha pixel.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let value = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Composite an upright layer bitmap onto `canvas` at `rect`, rotated about its center.
fn composite_rotated(canvas: &mut RgbaImage, layer: &RgbaImage, rect: &LayerRect, rotation: f32) {
    let corners = rotated_corners(rect, rotation);
    let (mut min, mut max) = (corners[0], corners[0]);
    for corner in &corners[1..] {
        min = min.min(*corner);
        max = max.max(*corner);
    }

    let x0 = min.x.floor().max(0.0) as u32;
    let y0 = min.y.floor().max(0.0) as u32;
    let x1 = (max.x.ceil().max(0.0) as u32).min(canvas.width());
    let y1 = (max.y.ceil().max(0.0) as u32).min(canvas.height());

    let sx = layer.width() as f32 / rect.width;
    let sy = layer.height() as f32 / rect.height;

    for y in y0..y1 {
        for x in x0..x1 {
            let local = to_local(Vec2::new(x as f32 + 0.5, y as f32 + 0.5), rect, rotation);
            if local.x < 0.0 || local.y < 0.0 || local.x >= rect.width || local.y >= rect.height {
                continue;
            }
            let lx = ((local.x * sx) as u32).min(layer.width() - 1);
            let ly = ((local.y * sy) as u32).min(layer.height() - 1);
            blend(canvas.get_pixel_mut(x, y), *layer.get_pixel(lx, ly));
        }
    }
}

fn render_image_layer(source: &Path, rect: &LayerRect) -> Result<RgbaImage, EditorError> {
    let decoded = image::open(source).map_err(|e| EditorError::image_load(source, e))?;
    let (w, h) = pixel_size(rect);
    Ok(imageops::resize(&decoded.to_rgba8(), w, h, FilterType::Triangle))
}

/// Draw text upright into a transparent bitmap the size of `rect`.
fn render_text_layer(text: &TextLayer, rect: &LayerRect, font: &FontArc) -> RgbaImage {
    let (w, h) = pixel_size(rect);
    let mut bitmap = RgbaImage::new(w, h);
    let metrics = GlyphMetrics::new(font.clone());
    let scale = PxScale::from(text.font_size);
    let scaled = font.as_scaled(scale);
    let line_height = metrics.line_height(text.font_size);
    let [r, g, b] = text.color.to_array();

    for (line_index, line) in text.content.split('\n').enumerate() {
        let line_width = metrics.line_width(line, text.font_size);
        let mut caret = match text.alignment {
            TextAlignment::Left => 0.0,
            TextAlignment::Center => (w as f32 - line_width) / 2.0,
            TextAlignment::Right => w as f32 - line_width,
        };
        let baseline = line_index as f32 * line_height + scaled.ascent();

        let mut previous = None;
        for c in line.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    let x = bounds.min.x as i32 + px as i32;
                    let y = bounds.min.y as i32 + py as i32;
                    if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                        return;
                    }
                    let alpha = (coverage * 255.0).round().clamp(0.0, 255.0) as u8;
                    let pixel = bitmap.get_pixel_mut(x as u32, y as u32);
                    if alpha > pixel[3] {
                        *pixel = Rgba([r, g, b, alpha]);
                    }
                });
            }
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
    }
    bitmap
}

/// Rasterize the visible layers of `document` at the target size.
///
/// A layer that cannot be drawn is skipped with a warning; the remaining
/// layers still render. Text layers need `font`.
pub fn render_export(
    document: &Document,
    target: TargetSize,
    font: Option<&FontArc>,
) -> RenderedExport {
    let (width, height) = target.resolve(document.canvas_size);
    let mut image = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let mut warnings = Vec::new();

    for planned in export_plan(document, target) {
        let bitmap = match &planned.content {
            PlannedContent::Image { source } => {
                render_image_layer(source, &planned.rect).map_err(|e| e.to_string())
            }
            PlannedContent::Text(text) => font
                .map(|font| render_text_layer(text, &planned.rect, font))
                .ok_or_else(|| "no text font available, text not rendered".to_string()),
        };

        match bitmap {
            Ok(bitmap) => composite_rotated(&mut image, &bitmap, &planned.rect, planned.rotation),
            Err(e) => {
                warn!("Skipping layer {} during export: {}", planned.index, e);
                warnings.push(format!("Layer {}: {}", planned.index + 1, e));
            }
        }
    }

    RenderedExport { image, warnings }
}

/// Encode as JPEG and write to `path`. Nothing is written when encoding fails.
pub fn write_jpeg(image: &RgbaImage, path: &Path, quality: u8) -> Result<(), EditorError> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder).map_err(|e| match e {
        ImageError::IoError(io) => EditorError::Io(io),
        other => EditorError::Encode(other.to_string()),
    })?;
    std::fs::write(path, bytes)?;
    Ok(())
}
