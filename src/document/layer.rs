use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT_CONTENT, DEFAULT_TEXT_RECT,
    LABEL_MAX_CHARS,
};

use super::geometry::{LayerRect, normalize_degrees};

/// An sRGB color stored and serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #RRGGBB")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Horizontal text alignment. Text is always anchored to the top of its rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    pub const ALL: [TextAlignment; 3] = [
        TextAlignment::Left,
        TextAlignment::Center,
        TextAlignment::Right,
    ];

    const BIT_LEFT: u32 = 0x01;
    const BIT_RIGHT: u32 = 0x02;
    const BIT_HCENTER: u32 = 0x04;
    const BIT_TOP: u32 = 0x20;

    /// Bitmask used in project files (horizontal flag | top flag).
    pub fn to_bits(self) -> u32 {
        let horizontal = match self {
            TextAlignment::Left => Self::BIT_LEFT,
            TextAlignment::Center => Self::BIT_HCENTER,
            TextAlignment::Right => Self::BIT_RIGHT,
        };
        horizontal | Self::BIT_TOP
    }

    /// Decode a project-file bitmask. Unknown or missing horizontal flags mean left.
    pub fn from_bits(bits: u32) -> Self {
        if bits & Self::BIT_HCENTER != 0 {
            TextAlignment::Center
        } else if bits & Self::BIT_RIGHT != 0 {
            TextAlignment::Right
        } else {
            TextAlignment::Left
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TextAlignment::Left => "Left",
            TextAlignment::Center => "Center",
            TextAlignment::Right => "Right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayer {
    /// File the pixels are read from (a user file or a materialized temp file).
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub content: String,
    pub font_family: String,
    /// Point size in document units
    pub font_size: f32,
    pub color: Rgb,
    pub alignment: TextAlignment,
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            content: DEFAULT_TEXT_CONTENT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: Rgb::BLACK,
            alignment: TextAlignment::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Image(ImageLayer),
    Text(TextLayer),
}

/// One element of the postcard.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub rect: LayerRect,
    /// Degrees in `[0, 360)`, clockwise on screen
    rotation: f32,
    pub visible: bool,
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(rect: LayerRect, kind: LayerKind) -> Self {
        Self {
            rect,
            rotation: 0.0,
            visible: true,
            kind,
        }
    }

    pub fn image(source: impl Into<PathBuf>, rect: LayerRect) -> Self {
        Self::new(
            rect,
            LayerKind::Image(ImageLayer {
                source: source.into(),
            }),
        )
    }

    pub fn text(text: TextLayer, rect: LayerRect) -> Self {
        Self::new(rect, LayerKind::Text(text))
    }

    /// The layer created by "add text".
    pub fn default_text() -> Self {
        let (x, y, w, h) = DEFAULT_TEXT_RECT;
        Self::text(TextLayer::default(), LayerRect::new(x, y, w, h))
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.set_rotation(degrees);
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, LayerKind::Text(_))
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match &self.kind {
            LayerKind::Text(text) => Some(text),
            LayerKind::Image(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLayer> {
        match &mut self.kind {
            LayerKind::Text(text) => Some(text),
            LayerKind::Image(_) => None,
        }
    }

    pub fn image_source(&self) -> Option<&Path> {
        match &self.kind {
            LayerKind::Image(image) => Some(&image.source),
            LayerKind::Text(_) => None,
        }
    }

    /// Name shown in the layers list.
    pub fn label(&self) -> String {
        match &self.kind {
            LayerKind::Text(text) => format!("Текст: {}", truncate_label(&text.content)),
            LayerKind::Image(image) => {
                let name = image
                    .source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("Изображение: {}", name)
            }
        }
    }
}

/// Cut `text` to the label length, adding an ellipsis when something was cut.
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() > LABEL_MAX_CHARS {
        let head: String = text.chars().take(LABEL_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
