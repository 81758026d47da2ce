use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::json;

use crate::document::{CanvasSize, Document, Layer, LayerRect, Rgb, TextAlignment, TextLayer};
use crate::error::EditorError;

use super::io::{decode_project, encode_project, image_format_for, load_project, save_project};

fn write_png(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
    let image = RgbaImage::from_pixel(4, 3, Rgba(color));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn sample_document(dir: &Path) -> Document {
    let source = write_png(dir, "photo.png", [200, 10, 10, 255]);
    let text = TextLayer {
        content: "С днём рождения!\nLine two".to_string(),
        font_family: "Monotype Corsiva Bold".to_string(),
        font_size: 32.0,
        color: Rgb::new(0x12, 0x34, 0x56),
        alignment: TextAlignment::Right,
    };
    let mut hidden = Layer::image(&source, LayerRect::new(50.0, 60.0, 120.0, 90.0));
    hidden.visible = false;

    Document::with_layers(
        CanvasSize::new(1000, 700),
        vec![
            Layer::text(text, LayerRect::new(100.0, 100.0, 300.0, 80.0)).with_rotation(45.0),
            hidden,
            Layer::image(&source, LayerRect::new(0.0, 0.0, 1000.0, 700.0)),
        ],
    )
}

#[test]
fn test_round_trip_preserves_layers() {
    let dir = tempfile::tempdir().unwrap();
    let document = sample_document(dir.path());
    let path = dir.path().join("card.pep");

    save_project(&document, &path).unwrap();
    let loaded = load_project(&path).unwrap();

    assert!(loaded.warnings.is_empty());
    let restored = loaded.document;
    assert_eq!(restored.canvas_size, CanvasSize::new(1000, 700));
    assert_eq!(restored.len(), 3);

    let text_layer = restored.get(0).unwrap();
    assert_eq!(text_layer.rect, LayerRect::new(100.0, 100.0, 300.0, 80.0));
    assert_eq!(text_layer.rotation(), 45.0);
    let text = text_layer.as_text().unwrap();
    assert_eq!(text.content, "С днём рождения!\nLine two");
    assert_eq!(text.font_family, "Monotype Corsiva Bold");
    assert_eq!(text.font_size, 32.0);
    assert_eq!(text.color, Rgb::new(0x12, 0x34, 0x56));
    assert_eq!(text.alignment, TextAlignment::Right);

    let hidden = restored.get(1).unwrap();
    assert!(!hidden.visible);
    assert_eq!(hidden.rect, LayerRect::new(50.0, 60.0, 120.0, 90.0));

    // Image bytes survive through the materialized temp file
    let original = std::fs::read(dir.path().join("photo.png")).unwrap();
    for index in [1, 2] {
        let source = restored.get(index).unwrap().image_source().unwrap();
        assert_ne!(source, dir.path().join("photo.png"));
        assert_eq!(image_format_for(source), "png");
        assert_eq!(std::fs::read(source).unwrap(), original);
        std::fs::remove_file(source).ok();
    }
}

#[test]
fn test_saved_geometry_is_rounded() {
    let text = Layer::text(
        TextLayer::default(),
        LayerRect::new(10.4, 20.6, 99.5, 40.2),
    );
    let document = Document::with_layers(CanvasSize::default(), vec![text]);

    let json = encode_project(&document).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rect = &value["layers"][0]["rect"];
    assert_eq!(rect["x"], 10);
    assert_eq!(rect["y"], 21);
    assert_eq!(rect["width"], 100);
    assert_eq!(rect["height"], 40);
    assert_eq!(value["canvas_size"], json!({"width": 800, "height": 600}));
}

#[test]
fn test_layers_written_topmost_first() {
    let mut document = Document::new(CanvasSize::default());
    document.insert_at_top(Layer::text(
        TextLayer {
            content: "bottom".to_string(),
            ..TextLayer::default()
        },
        LayerRect::new(0.0, 0.0, 50.0, 50.0),
    ));
    document.insert_at_top(Layer::text(
        TextLayer {
            content: "top".to_string(),
            ..TextLayer::default()
        },
        LayerRect::new(0.0, 0.0, 50.0, 50.0),
    ));

    let json = encode_project(&document).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["layers"][0]["text"], "top");
    assert_eq!(value["layers"][1]["text"], "bottom");
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(matches!(
        decode_project("{ this is not json"),
        Err(EditorError::ProjectLoad(_))
    ));
    assert!(matches!(
        decode_project(r#"{"layers": []}"#),
        Err(EditorError::ProjectLoad(_))
    ));
}

#[test]
fn test_missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_project(&dir.path().join("nope.pep"));
    assert!(matches!(result, Err(EditorError::ProjectLoad(_))));
}

#[test]
fn test_bad_layers_are_skipped_with_warnings() {
    let json = json!({
        "canvas_size": {"width": 640, "height": 480},
        "layers": [
            {"type": "shape", "rect": {"x": 0, "y": 0, "width": 10, "height": 10}},
            {
                "type": "image",
                "rect": {"x": 0, "y": 0, "width": 10, "height": 10},
                "image_data": "***not base64***",
                "image_format": "png"
            },
            {
                "type": "text",
                "rect": {"x": 5, "y": 6, "width": 70, "height": 30},
                "visible": true,
                "rotation": 0,
                "text": "kept",
                "font": "Arial",
                "font_size": 12,
                "color": "#000000"
            }
        ]
    })
    .to_string();

    let loaded = decode_project(&json).unwrap();
    assert_eq!(loaded.document.canvas_size, CanvasSize::new(640, 480));
    assert_eq!(loaded.document.len(), 1);
    assert_eq!(loaded.warnings.len(), 2);
    assert!(loaded.warnings[0].starts_with("Layer 1"));
    assert!(loaded.warnings[1].starts_with("Layer 2"));

    let text = loaded.document.get(0).unwrap().as_text().unwrap();
    assert_eq!(text.content, "kept");
    assert_eq!(text.alignment, TextAlignment::Left);
}

#[test]
fn test_undersized_rects_are_raised_to_minimum() {
    let json = json!({
        "canvas_size": {"width": 640, "height": 480},
        "layers": [
            {
                "type": "text",
                "rect": {"x": 5, "y": 6, "width": 0, "height": -15.5},
                "text": "flat",
                "font": "Arial",
                "font_size": 12,
                "color": "#000000"
            },
            {
                "type": "text",
                "rect": {"x": 1, "y": 2, "width": 12.5, "height": 40},
                "text": "narrow",
                "font": "Arial",
                "font_size": 12,
                "color": "#000000"
            }
        ]
    })
    .to_string();

    let loaded = decode_project(&json).unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.document.get(0).unwrap().rect, LayerRect::new(5.0, 6.0, 20.0, 20.0));
    assert_eq!(loaded.document.get(1).unwrap().rect, LayerRect::new(1.0, 2.0, 20.0, 40.0));
}

#[test]
fn test_empty_document_round_trip() {
    let document = Document::new(CanvasSize::new(640, 480));
    let json = encode_project(&document).unwrap();

    let loaded = decode_project(&json).unwrap();
    assert_eq!(loaded.document.canvas_size, CanvasSize::new(640, 480));
    assert!(loaded.document.is_empty());
    assert!(loaded.warnings.is_empty());
}

#[test]
fn test_missing_layers_key_loads_empty_document() {
    let loaded = decode_project(r#"{"canvas_size": {"width": 300, "height": 200}}"#).unwrap();
    assert!(loaded.document.is_empty());
    assert!(loaded.warnings.is_empty());
}

#[test]
fn test_unreadable_image_fails_save_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let document = Document::with_layers(
        CanvasSize::default(),
        vec![Layer::image(
            dir.path().join("vanished.png"),
            LayerRect::new(0.0, 0.0, 10.0, 10.0),
        )],
    );
    let path = dir.path().join("card.pep");

    let result = save_project(&document, &path);
    assert!(matches!(result, Err(EditorError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn test_image_format_follows_extension() {
    assert_eq!(image_format_for(Path::new("/a/b/photo.JPG")), "jpg");
    assert_eq!(image_format_for(Path::new("/a/b/photo.webp")), "webp");
    assert_eq!(image_format_for(Path::new("/a/b/photo")), "png");
}
