//! On-disk JSON shape of a project file.
//!
//! Geometry is written as rounded integers and accepted as any JSON number.
//! Layers appear in paint order with the topmost layer first.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::document::{CanvasSize, LayerRect, Rgb, TextAlignment};

fn serialize_rounded<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.round() as i64)
}

fn deserialize_canvas_dimension<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().max(1.0) as u32)
}

fn default_visible() -> bool {
    true
}

fn default_alignment() -> u32 {
    TextAlignment::Left.to_bits()
}

fn default_image_format() -> String {
    "png".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedCanvasSize {
    #[serde(deserialize_with = "deserialize_canvas_dimension")]
    pub width: u32,
    #[serde(deserialize_with = "deserialize_canvas_dimension")]
    pub height: u32,
}

impl From<CanvasSize> for SavedCanvasSize {
    fn from(size: CanvasSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl From<SavedCanvasSize> for CanvasSize {
    fn from(size: SavedCanvasSize) -> Self {
        CanvasSize::new(size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedRect {
    #[serde(serialize_with = "serialize_rounded")]
    pub x: f32,
    #[serde(serialize_with = "serialize_rounded")]
    pub y: f32,
    #[serde(serialize_with = "serialize_rounded")]
    pub width: f32,
    #[serde(serialize_with = "serialize_rounded")]
    pub height: f32,
}

impl From<LayerRect> for SavedRect {
    fn from(rect: LayerRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl From<SavedRect> for LayerRect {
    fn from(rect: SavedRect) -> Self {
        LayerRect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// One saved layer, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SavedLayer {
    Image {
        rect: SavedRect,
        #[serde(default = "default_visible")]
        visible: bool,
        #[serde(default)]
        rotation: f32,
        /// Standard base64 of the original file bytes
        image_data: String,
        #[serde(default = "default_image_format")]
        image_format: String,
    },
    Text {
        rect: SavedRect,
        #[serde(default = "default_visible")]
        visible: bool,
        #[serde(default)]
        rotation: f32,
        text: String,
        font: String,
        #[serde(serialize_with = "serialize_rounded")]
        font_size: f32,
        color: Rgb,
        /// Horizontal flag | top flag
        #[serde(default = "default_alignment")]
        alignment: u32,
    },
}

/// Top-level project file.
///
/// Layers are kept as raw JSON values so one unreadable or unknown layer does
/// not reject the whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProject {
    pub canvas_size: SavedCanvasSize,
    #[serde(default)]
    pub layers: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rect_written_as_integers() {
        let rect = SavedRect::from(LayerRect::new(10.4, 20.6, 30.5, 40.0));
        let value = serde_json::to_value(rect).unwrap();
        assert_eq!(value, json!({"x": 10, "y": 21, "width": 31, "height": 40}));
    }

    #[test]
    fn test_rect_accepts_floats() {
        let rect: SavedRect =
            serde_json::from_value(json!({"x": 1.5, "y": 2, "width": 3.25, "height": 4})).unwrap();
        assert_eq!(LayerRect::from(rect), LayerRect::new(1.5, 2.0, 3.25, 4.0));
    }

    #[test]
    fn test_text_layer_shape() {
        let layer = SavedLayer::Text {
            rect: SavedRect::from(LayerRect::new(100.0, 100.0, 200.0, 100.0)),
            visible: true,
            rotation: 15.0,
            text: "Привет".to_string(),
            font: "Monotype Corsiva Bold".to_string(),
            font_size: 24.0,
            color: Rgb::new(255, 0, 0),
            alignment: TextAlignment::Center.to_bits(),
        };
        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["font_size"], 24);
        assert_eq!(value["color"], "#ff0000");
        assert_eq!(value["alignment"], 0x24);
    }

    #[test]
    fn test_missing_alignment_defaults_to_left_top() {
        let layer: SavedLayer = serde_json::from_value(json!({
            "type": "text",
            "rect": {"x": 0, "y": 0, "width": 50, "height": 20},
            "visible": true,
            "rotation": 0,
            "text": "hi",
            "font": "Arial",
            "font_size": 12,
            "color": "#000000"
        }))
        .unwrap();
        assert!(matches!(layer, SavedLayer::Text { alignment: 0x21, .. }));
    }

    #[test]
    fn test_unknown_layer_type_is_rejected_per_layer() {
        let result = serde_json::from_value::<SavedLayer>(json!({"type": "shape"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_canvas_size_accepts_floats() {
        let size: SavedCanvasSize =
            serde_json::from_value(json!({"width": 800.0, "height": 600})).unwrap();
        assert_eq!(CanvasSize::from(size), CanvasSize::new(800, 600));
    }
}
