use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use crate::document::{CanvasSize, Document, Layer, LayerRect, TextLayer};
use crate::error::EditorError;
use crate::fonts::LoadedTextFont;

use super::compose::{PlannedContent, export_plan, render_export, write_jpeg};
use super::settings::TargetSize;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn solid_png(dir: &Path, name: &str, color: Rgba<u8>) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(8, 8, color).save(&path).unwrap();
    path
}

fn close(a: Rgba<u8>, b: Rgba<u8>) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn test_plan_scales_geometry_and_font() {
    let mut hidden = Layer::text(TextLayer::default(), LayerRect::new(0.0, 0.0, 50.0, 50.0));
    hidden.visible = false;
    let document = Document::with_layers(
        CanvasSize::new(800, 600),
        vec![
            Layer::text(TextLayer::default(), LayerRect::new(100.0, 100.0, 200.0, 100.0))
                .with_rotation(30.0),
            hidden,
            Layer::image("/tmp/bottom.png", LayerRect::new(0.0, 0.0, 800.0, 600.0)),
        ],
    );

    let plan = export_plan(&document, TargetSize::FullHd);
    // Hidden layer is left out and the bottom layer comes first
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].index, 2);
    assert_eq!(plan[1].index, 0);

    assert_eq!(plan[0].rect, LayerRect::new(0.0, 0.0, 1920.0, 1080.0));
    let text = &plan[1];
    assert!((text.rect.x - 240.0).abs() < 1e-3);
    assert!((text.rect.y - 180.0).abs() < 1e-3);
    assert!((text.rect.width - 480.0).abs() < 1e-3);
    assert!((text.rect.height - 180.0).abs() < 1e-3);
    assert_eq!(text.rotation, 30.0);
    match &text.content {
        PlannedContent::Text(layer) => assert!((layer.font_size - 24.0 * 1.8).abs() < 1e-3),
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_render_paints_image_over_white() {
    let dir = tempfile::tempdir().unwrap();
    let red = solid_png(dir.path(), "red.png", RED);
    let document = Document::with_layers(
        CanvasSize::new(100, 80),
        vec![Layer::image(&red, LayerRect::new(10.0, 10.0, 20.0, 20.0))],
    );

    let rendered = render_export(&document, TargetSize::Original, None);
    assert!(rendered.warnings.is_empty());
    assert_eq!(rendered.image.dimensions(), (100, 80));
    assert!(close(*rendered.image.get_pixel(20, 20), RED));
    assert!(close(*rendered.image.get_pixel(5, 5), WHITE));
    assert!(close(*rendered.image.get_pixel(50, 50), WHITE));
}

#[test]
fn test_render_honors_rotation() {
    let dir = tempfile::tempdir().unwrap();
    let red = solid_png(dir.path(), "red.png", RED);
    // A 40x10 bar rotated a quarter turn stands upright around (50, 50)
    let document = Document::with_layers(
        CanvasSize::new(100, 100),
        vec![Layer::image(&red, LayerRect::new(30.0, 45.0, 40.0, 10.0)).with_rotation(90.0)],
    );

    let rendered = render_export(&document, TargetSize::Original, None);
    assert!(close(*rendered.image.get_pixel(50, 35), RED));
    assert!(close(*rendered.image.get_pixel(50, 65), RED));
    assert!(close(*rendered.image.get_pixel(35, 50), WHITE));
    assert!(close(*rendered.image.get_pixel(65, 50), WHITE));
}

#[test]
fn test_render_skips_failed_layers() {
    let dir = tempfile::tempdir().unwrap();
    let red = solid_png(dir.path(), "red.png", RED);
    let document = Document::with_layers(
        CanvasSize::new(60, 60),
        vec![
            Layer::text(TextLayer::default(), LayerRect::new(0.0, 0.0, 60.0, 20.0)),
            Layer::image(dir.path().join("gone.png"), LayerRect::new(0.0, 0.0, 60.0, 60.0)),
            Layer::image(&red, LayerRect::new(0.0, 30.0, 60.0, 30.0)),
        ],
    );

    let rendered = render_export(&document, TargetSize::Original, None);
    assert_eq!(rendered.warnings.len(), 2);
    assert!(rendered.warnings.iter().any(|w| w.starts_with("Layer 2")));
    assert!(rendered.warnings.iter().any(|w| w.starts_with("Layer 1")));
    assert!(close(*rendered.image.get_pixel(30, 45), RED));
    assert!(close(*rendered.image.get_pixel(30, 10), WHITE));
}

#[test]
fn test_half_size_render() {
    let dir = tempfile::tempdir().unwrap();
    let red = solid_png(dir.path(), "red.png", RED);
    let document = Document::with_layers(
        CanvasSize::new(200, 100),
        vec![Layer::image(&red, LayerRect::new(100.0, 0.0, 100.0, 100.0))],
    );

    let rendered = render_export(&document, TargetSize::Half, None);
    assert_eq!(rendered.image.dimensions(), (100, 50));
    assert!(close(*rendered.image.get_pixel(75, 25), RED));
    assert!(close(*rendered.image.get_pixel(25, 25), WHITE));
}

#[test]
fn test_write_jpeg_produces_readable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.jpg");
    let image = RgbaImage::from_pixel(32, 24, RED);

    write_jpeg(&image, &path, 90).unwrap();

    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (32, 24));
}

#[test]
fn test_write_jpeg_to_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("card.jpg");
    let image = RgbaImage::from_pixel(4, 4, WHITE);

    let result = write_jpeg(&image, &path, 95);
    assert!(matches!(result, Err(EditorError::Io(_))));
}

#[test]
fn test_default_text_renders_with_builtin_font() {
    let document = Document::with_layers(CanvasSize::new(800, 600), vec![Layer::default_text()]);
    let font = LoadedTextFont::default();

    let rendered = render_export(&document, TargetSize::Original, font.font());
    assert!(rendered.warnings.is_empty());

    let inked = (100..300)
        .flat_map(|x| (100..200).map(move |y| (x, y)))
        .filter(|&(x, y)| !close(*rendered.image.get_pixel(x, y), WHITE))
        .count();
    assert!(inked > 0);
    // Nothing outside the layer rect
    assert!(close(*rendered.image.get_pixel(50, 50), WHITE));
    assert!(close(*rendered.image.get_pixel(400, 300), WHITE));
}
