//! The text font: one user-chosen TTF/OTF file shared by on-screen text,
//! inline-editor sizing and export.
//!
//! Without a configured font, egui's built-in proportional font is used for all
//! three, so exported text matches what the canvas shows. [`ApproxFontMetrics`]
//! only remains for builds without egui's default fonts.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{FontArc, FontVec};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::config::{AppConfig, ConfigLoaded};
use crate::editor::text_reflow::{ApproxFontMetrics, FontMetrics, GlyphMetrics};

/// egui family name the loaded font is registered under
const TEXT_FAMILY: &str = "postcard-text";

/// First font of egui's proportional family, as an ab_glyph font.
fn builtin_font() -> Option<FontArc> {
    let fonts = egui::FontDefinitions::default();
    let name = fonts.families.get(&egui::FontFamily::Proportional)?.first()?;
    let data = fonts.font_data.get(name)?;
    match FontVec::try_from_vec_and_index(data.font.to_vec(), data.index) {
        Ok(font) => Some(FontArc::new(font)),
        Err(e) => {
            warn!("Built-in font {:?} is unusable: {}", name, e);
            None
        }
    }
}

#[derive(Resource)]
pub struct LoadedTextFont {
    path: Option<PathBuf>,
    bytes: Option<Arc<Vec<u8>>>,
    metrics: Option<GlyphMetrics>,
    /// egui's own text font, used when no file is configured
    builtin: Option<GlyphMetrics>,
    /// Last load failure, shown next to the font picker
    pub error: Option<String>,
    /// egui fonts must be rebuilt on the next pass
    egui_dirty: bool,
}

impl Default for LoadedTextFont {
    fn default() -> Self {
        Self {
            path: None,
            bytes: None,
            metrics: None,
            builtin: builtin_font().map(GlyphMetrics::new),
            error: None,
            egui_dirty: false,
        }
    }
}

impl LoadedTextFont {
    fn load(path: &Path) -> Result<(Vec<u8>, FontArc), String> {
        let bytes = std::fs::read(path).map_err(|e| format!("Could not read font: {}", e))?;
        let font = FontArc::try_from_vec(bytes.clone())
            .map_err(|e| format!("Not a usable font file: {}", e))?;
        Ok((bytes, font))
    }

    /// Replace the font with the one at `path`, or drop it for `None`.
    pub fn set_path(&mut self, path: Option<&Path>) {
        self.path = path.map(Path::to_path_buf);
        self.bytes = None;
        self.metrics = None;
        self.error = None;
        self.egui_dirty = true;

        let Some(path) = path else {
            info!("No text font configured");
            return;
        };
        match Self::load(path) {
            Ok((bytes, font)) => {
                info!("Loaded text font {:?}", path);
                self.bytes = Some(Arc::new(bytes));
                self.metrics = Some(GlyphMetrics::new(font));
            }
            Err(e) => {
                warn!("Failed to load text font {:?}: {}", path, e);
                self.error = Some(e);
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// A configured font file is loaded.
    pub fn is_loaded(&self) -> bool {
        self.metrics.is_some()
    }

    fn active(&self) -> Option<&GlyphMetrics> {
        self.metrics.as_ref().or(self.builtin.as_ref())
    }

    /// Font for export text: the configured file, else egui's built-in font.
    pub fn font(&self) -> Option<&FontArc> {
        self.active().map(GlyphMetrics::font)
    }

    /// Metrics for text sizing, matching the font the canvas paints with.
    pub fn metrics(&self) -> &dyn FontMetrics {
        match self.active() {
            Some(metrics) => metrics as &dyn FontMetrics,
            None => &ApproxFontMetrics,
        }
    }

    /// egui family used to paint text layers.
    pub fn egui_family(&self) -> egui::FontFamily {
        if self.is_loaded() {
            egui::FontFamily::Name(TEXT_FAMILY.into())
        } else {
            egui::FontFamily::Proportional
        }
    }

    fn font_definitions(&self) -> egui::FontDefinitions {
        let mut fonts = egui::FontDefinitions::default();
        if let Some(bytes) = &self.bytes {
            fonts.font_data.insert(
                TEXT_FAMILY.to_string(),
                Arc::new(egui::FontData::from_owned(bytes.as_ref().clone())),
            );
            // Built-in fonts stay behind it for glyphs the file lacks
            let mut family = vec![TEXT_FAMILY.to_string()];
            if let Some(proportional) = fonts.families.get(&egui::FontFamily::Proportional) {
                family.extend(proportional.iter().cloned());
            }
            fonts
                .families
                .insert(egui::FontFamily::Name(TEXT_FAMILY.into()), family);
        }
        fonts
    }
}

fn load_font_from_config(config: Res<AppConfig>, mut font: ResMut<LoadedTextFont>) {
    let path = config.data.text_font_path.clone();
    font.set_path(path.as_deref());
}

/// Follow changes of the configured font path.
fn sync_font_with_config(config: Res<AppConfig>, mut font: ResMut<LoadedTextFont>) {
    if !config.is_changed() {
        return;
    }
    let configured = config.data.text_font_path.as_deref();
    if font.path() != configured {
        font.set_path(configured);
    }
}

fn apply_egui_fonts(mut contexts: EguiContexts, mut font: ResMut<LoadedTextFont>) -> Result {
    if !font.egui_dirty {
        return Ok(());
    }
    contexts.ctx_mut()?.set_fonts(font.font_definitions());
    font.egui_dirty = false;
    Ok(())
}

pub struct TextFontPlugin;

impl Plugin for TextFontPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadedTextFont>()
            .add_systems(Startup, load_font_from_config.after(ConfigLoaded))
            .add_systems(Update, sync_font_with_config)
            .add_systems(EguiPrimaryContextPass, apply_egui_fonts);
    }
}
