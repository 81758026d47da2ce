//! Converting documents to and from self-contained project files.
//!
//! Image bytes are embedded as base64. On load each embedded image is written
//! to a kept temporary file which the in-memory layer then points at.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use bevy::log::warn;

use crate::document::{
    Document, ImageLayer, Layer, LayerKind, LayerRect, TextAlignment, TextLayer,
};
use crate::constants::MIN_LAYER_SIZE;
use crate::error::EditorError;

use super::format::{SavedLayer, SavedProject, SavedRect};

/// A parsed project plus the layers that had to be left out.
#[derive(Debug)]
pub struct LoadedProject {
    pub document: Document,
    pub warnings: Vec<String>,
}

/// Lower-cased extension of an image source, `png` when it has none.
pub fn image_format_for(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "png".to_string())
}

fn save_layer(layer: &Layer) -> Result<SavedLayer, EditorError> {
    let rect = SavedRect::from(layer.rect);
    let visible = layer.visible;
    let rotation = layer.rotation();
    Ok(match &layer.kind {
        LayerKind::Image(ImageLayer { source }) => {
            let bytes = std::fs::read(source)?;
            SavedLayer::Image {
                rect,
                visible,
                rotation,
                image_data: general_purpose::STANDARD.encode(&bytes),
                image_format: image_format_for(source),
            }
        }
        LayerKind::Text(text) => SavedLayer::Text {
            rect,
            visible,
            rotation,
            text: text.content.clone(),
            font: text.font_family.clone(),
            font_size: text.font_size,
            color: text.color,
            alignment: text.alignment.to_bits(),
        },
    })
}

/// Serialize a document, reading every image source. Fails on the first
/// unreadable image.
pub fn encode_project(document: &Document) -> Result<String, EditorError> {
    let layers = document
        .layers()
        .iter()
        .map(|layer| {
            let saved = save_layer(layer)?;
            serde_json::to_value(saved).map_err(|e| EditorError::Encode(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let project = SavedProject {
        canvas_size: document.canvas_size.into(),
        layers,
    };
    serde_json::to_string_pretty(&project).map_err(|e| EditorError::Encode(e.to_string()))
}

/// Write a project file. Nothing is written when any image cannot be read.
pub fn save_project(document: &Document, path: &Path) -> Result<(), EditorError> {
    let json = encode_project(document)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write decoded image bytes to a temporary file that outlives this process' handle.
fn materialize_image(bytes: &[u8], format: &str) -> Result<PathBuf, EditorError> {
    let mut file = tempfile::Builder::new()
        .prefix("postcard-layer-")
        .suffix(&format!(".{}", format))
        .tempfile()?;
    file.write_all(bytes)?;
    let (_, path) = file.keep().map_err(|e| EditorError::Io(e.error))?;
    Ok(path)
}

/// Layers are never smaller than the minimum size, whatever the file says.
fn loaded_rect(saved: SavedRect) -> LayerRect {
    let rect = LayerRect::from(saved);
    LayerRect::new(
        rect.x,
        rect.y,
        rect.width.max(MIN_LAYER_SIZE),
        rect.height.max(MIN_LAYER_SIZE),
    )
}

fn load_layer(saved: SavedLayer) -> Result<Layer, EditorError> {
    match saved {
        SavedLayer::Image {
            rect,
            visible,
            rotation,
            image_data,
            image_format,
        } => {
            let bytes = general_purpose::STANDARD
                .decode(image_data.trim())
                .map_err(|e| EditorError::ProjectLoad(format!("bad image data: {}", e)))?;
            let source = materialize_image(&bytes, &image_format)?;
            let mut layer = Layer::image(source, loaded_rect(rect)).with_rotation(rotation);
            layer.visible = visible;
            Ok(layer)
        }
        SavedLayer::Text {
            rect,
            visible,
            rotation,
            text,
            font,
            font_size,
            color,
            alignment,
        } => {
            let text = TextLayer {
                content: text,
                font_family: font,
                font_size,
                color,
                alignment: TextAlignment::from_bits(alignment),
            };
            let mut layer = Layer::text(text, loaded_rect(rect)).with_rotation(rotation);
            layer.visible = visible;
            Ok(layer)
        }
    }
}

/// Parse project JSON. A malformed file is an error; a malformed layer is a warning.
pub fn decode_project(json: &str) -> Result<LoadedProject, EditorError> {
    let project: SavedProject = serde_json::from_str(json)?;
    let mut layers = Vec::with_capacity(project.layers.len());
    let mut warnings = Vec::new();

    for (index, value) in project.layers.into_iter().enumerate() {
        let loaded = serde_json::from_value::<SavedLayer>(value)
            .map_err(EditorError::from)
            .and_then(load_layer);
        match loaded {
            Ok(layer) => layers.push(layer),
            Err(e) => {
                warn!("Skipping layer {} while loading project: {}", index, e);
                warnings.push(format!("Layer {}: {}", index + 1, e));
            }
        }
    }

    Ok(LoadedProject {
        document: Document::with_layers(project.canvas_size.into(), layers),
        warnings,
    })
}

pub fn load_project(path: &Path) -> Result<LoadedProject, EditorError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| EditorError::ProjectLoad(format!("Failed to read {:?}: {}", path, e)))?;
    decode_project(&json)
}
