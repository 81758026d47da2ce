//! Export target sizes and JPEG quality.

use crate::constants::DEFAULT_EXPORT_QUALITY;
use crate::document::CanvasSize;

/// Output size presets offered by the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetSize {
    #[default]
    Original,
    Half,
    Quarter,
    FullHd,
    Hd,
    Svga,
}

impl TargetSize {
    pub const ALL: [TargetSize; 6] = [
        TargetSize::Original,
        TargetSize::Half,
        TargetSize::Quarter,
        TargetSize::FullHd,
        TargetSize::Hd,
        TargetSize::Svga,
    ];

    /// Pixel size of the exported image for a canvas of the given size.
    pub fn resolve(&self, canvas: CanvasSize) -> (u32, u32) {
        let (w, h) = match self {
            TargetSize::Original => (canvas.width, canvas.height),
            TargetSize::Half => (canvas.width / 2, canvas.height / 2),
            TargetSize::Quarter => (canvas.width / 4, canvas.height / 4),
            TargetSize::FullHd => (1920, 1080),
            TargetSize::Hd => (1280, 720),
            TargetSize::Svga => (800, 600),
        };
        (w.max(1), h.max(1))
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetSize::Original => "Original size",
            TargetSize::Half => "50%",
            TargetSize::Quarter => "25%",
            TargetSize::FullHd => "1920×1080",
            TargetSize::Hd => "1280×720",
            TargetSize::Svga => "800×600",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub target: TargetSize,
    quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new(TargetSize::Original, DEFAULT_EXPORT_QUALITY)
    }
}

impl ExportSettings {
    pub fn new(target: TargetSize, quality: u8) -> Self {
        Self {
            target,
            quality: quality.clamp(1, 100),
        }
    }

    /// JPEG quality in `1..=100`.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn set_quality(&mut self, quality: u8) {
        self.quality = quality.clamp(1, 100);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_presets() {
        let canvas = CanvasSize::new(1000, 700);
        assert_eq!(TargetSize::Original.resolve(canvas), (1000, 700));
        assert_eq!(TargetSize::Half.resolve(canvas), (500, 350));
        assert_eq!(TargetSize::Quarter.resolve(canvas), (250, 175));
        assert_eq!(TargetSize::FullHd.resolve(canvas), (1920, 1080));
        assert_eq!(TargetSize::Hd.resolve(canvas), (1280, 720));
        assert_eq!(TargetSize::Svga.resolve(canvas), (800, 600));
    }

    #[test]
    fn test_percentages_truncate() {
        let canvas = CanvasSize::new(801, 603);
        assert_eq!(TargetSize::Half.resolve(canvas), (400, 301));
        assert_eq!(TargetSize::Quarter.resolve(canvas), (200, 150));
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ExportSettings::new(TargetSize::Hd, 0).quality(), 1);
        assert_eq!(ExportSettings::new(TargetSize::Hd, 250).quality(), 100);

        let mut settings = ExportSettings::default();
        assert_eq!(settings.quality(), 95);
        settings.set_quality(0);
        assert_eq!(settings.quality(), 1);
    }
}
