//! Painting the canvas, its layers and the selection overlays with egui.
//!
//! The canvas is drawn on egui's background layer inside the space the side
//! panel leaves free, so it never counts as "pointer over UI". Painting only
//! reads the session.

use bevy::prelude::*;
use bevy_egui::egui::{self, epaint, Color32, Pos2, Shape, Stroke};
use bevy_egui::EguiContexts;

use crate::common::ResizeHandle;
use crate::document::geometry::{from_local, rotated_corners};
use crate::document::{Layer, LayerKind, LayerRect, TextAlignment, TextLayer};
use crate::fonts::LoadedTextFont;

use super::hit_test::{resize_handle_local, rotation_handle_center, rotation_handle_local, top_center};
use super::params::CanvasViewport;
use super::session::InteractionMode;
use super::textures::LayerTextures;
use super::EditorSession;

/// Minimum gap between the canvas and the edges of its area
const CANVAS_MARGIN: f32 = 20.0;

const HOVER_COLOR: Color32 = Color32::from_rgb(100, 160, 255);
const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 110, 230);

fn pos(v: Vec2) -> Pos2 {
    egui::pos2(v.x, v.y)
}

fn outline(rect: &LayerRect, rotation: f32) -> Vec<Pos2> {
    rotated_corners(rect, rotation).into_iter().map(pos).collect()
}

/// Screen rect of a local-frame square on a rotated layer.
fn local_square(local: &LayerRect, screen_rect: &LayerRect, rotation: f32) -> Vec<Pos2> {
    [
        local.origin(),
        Vec2::new(local.right(), local.top()),
        Vec2::new(local.right(), local.bottom()),
        Vec2::new(local.left(), local.bottom()),
    ]
    .into_iter()
    .map(|corner| pos(from_local(corner, screen_rect, rotation)))
    .collect()
}

fn paint_image(painter: &egui::Painter, texture: egui::TextureId, rect: &LayerRect, rotation: f32) {
    let uvs = [
        egui::pos2(0.0, 0.0),
        egui::pos2(1.0, 0.0),
        egui::pos2(1.0, 1.0),
        egui::pos2(0.0, 1.0),
    ];
    let mut mesh = egui::Mesh::with_texture(texture);
    for (corner, uv) in rotated_corners(rect, rotation).into_iter().zip(uvs) {
        mesh.vertices.push(epaint::Vertex {
            pos: pos(corner),
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));
}

/// Lay text out line by line inside the layer's local frame, then rotate
/// each line galley about its own top-left corner by the layer rotation.
fn paint_text(
    painter: &egui::Painter,
    text: &TextLayer,
    rect: &LayerRect,
    rotation: f32,
    scale: f32,
    family: &egui::FontFamily,
) {
    let font_id = egui::FontId::new((text.font_size * scale).max(1.0), family.clone());
    let [r, g, b] = text.color.to_array();
    let color = Color32::from_rgb(r, g, b);
    let angle = rotation.to_radians();

    let mut y = 0.0;
    for line in text.content.split('\n') {
        let galley = painter.layout_no_wrap(line.to_string(), font_id.clone(), color);
        let size = galley.size();
        let x = match text.alignment {
            TextAlignment::Left => 0.0,
            TextAlignment::Center => (rect.width - size.x) / 2.0,
            TextAlignment::Right => rect.width - size.x,
        };
        let anchor = from_local(Vec2::new(x, y), rect, rotation);
        painter.add(epaint::TextShape::new(pos(anchor), galley, color).with_angle(angle));
        y += size.y;
    }
}

fn paint_layer(
    painter: &egui::Painter,
    layer: &Layer,
    screen_rect: &LayerRect,
    scale: f32,
    textures: &LayerTextures,
    family: &egui::FontFamily,
) {
    match &layer.kind {
        LayerKind::Image(image) => {
            if let Some(texture) = textures.texture_for(&image.source) {
                paint_image(painter, texture, screen_rect, layer.rotation());
            }
        }
        LayerKind::Text(text) => {
            paint_text(painter, text, screen_rect, layer.rotation(), scale, family);
        }
    }
}

fn paint_selection(painter: &egui::Painter, screen_rect: &LayerRect, rotation: f32, with_handles: bool) {
    let mut points = outline(screen_rect, rotation);
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    painter.extend(Shape::dashed_line(
        &points,
        Stroke::new(1.5, SELECTION_COLOR),
        6.0,
        4.0,
    ));

    if !with_handles {
        return;
    }

    let handle_stroke = Stroke::new(1.0, SELECTION_COLOR);
    for handle in ResizeHandle::ALL {
        let local = resize_handle_local(handle, screen_rect.size());
        painter.add(Shape::convex_polygon(
            local_square(&local, screen_rect, rotation),
            Color32::WHITE,
            handle_stroke,
        ));
    }

    painter.line_segment(
        [
            pos(top_center(screen_rect, rotation)),
            pos(rotation_handle_center(screen_rect, rotation)),
        ],
        handle_stroke,
    );
    let local = rotation_handle_local(screen_rect.size());
    painter.add(Shape::convex_polygon(
        local_square(&local, screen_rect, rotation),
        SELECTION_COLOR,
        handle_stroke,
    ));
}

/// Canvas origin for a canvas of `canvas_size` view pixels centered in `area`.
pub fn canvas_origin(area_min: Vec2, area_size: Vec2, canvas_size: Vec2) -> Vec2 {
    area_min + ((area_size - canvas_size) / 2.0).max(Vec2::splat(CANVAS_MARGIN))
}

/// Paint the canvas and record where it sits for the input systems.
pub fn canvas_ui(
    mut contexts: EguiContexts,
    session: Res<EditorSession>,
    textures: Res<LayerTextures>,
    font: Res<LoadedTextFont>,
    mut viewport: ResMut<CanvasViewport>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let area = ctx.available_rect();
    let area_min = Vec2::new(area.min.x, area.min.y);
    let area_size = Vec2::new(area.width(), area.height());

    let scale = session.scale();
    let document = session.document();
    let origin = canvas_origin(area_min, area_size, document.canvas_size.as_vec2() * scale);
    if viewport.origin != origin || viewport.size != area_size {
        *viewport = CanvasViewport {
            origin,
            size: area_size,
        };
    }

    let painter = ctx
        .layer_painter(egui::LayerId::background())
        .with_clip_rect(area);

    let canvas_rect = LayerRect::new(0.0, 0.0, document.canvas_size.width as f32, document.canvas_size.height as f32)
        .to_view(scale)
        .translated(origin);
    painter.rect_filled(
        egui::Rect::from_min_size(pos(canvas_rect.origin()), egui::vec2(canvas_rect.width, canvas_rect.height)),
        0.0,
        Color32::WHITE,
    );

    // Layers outside the canvas stay visible only within the canvas, as in the export
    let canvas_painter = painter.with_clip_rect(
        egui::Rect::from_min_size(pos(canvas_rect.origin()), egui::vec2(canvas_rect.width, canvas_rect.height))
            .intersect(area),
    );
    let family = font.egui_family();
    let editing = session.editing_text();

    for (index, layer) in document.paint_order() {
        if !layer.visible || editing == Some(index) {
            continue;
        }
        let screen_rect = layer.rect.to_view(scale).translated(origin);
        paint_layer(&canvas_painter, layer, &screen_rect, scale, &textures, &family);
    }

    // Overlays
    if let Some(index) = session.hovered()
        && session.selected() != Some(index)
        && let Some(layer) = document.get(index)
    {
        let screen_rect = layer.rect.to_view(scale).translated(origin);
        painter.add(Shape::closed_line(
            outline(&screen_rect, layer.rotation()),
            Stroke::new(1.0, HOVER_COLOR),
        ));
    }

    if let Some(index) = session.selected()
        && let Some(layer) = document.get(index)
    {
        let screen_rect = layer.rect.to_view(scale).translated(origin);
        let with_handles =
            layer.visible && !matches!(session.mode(), InteractionMode::EditingText { .. });
        paint_selection(&painter, &screen_rect, layer.rotation(), with_handles);
    }

    Ok(())
}
