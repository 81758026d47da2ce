//! GPU textures for image layers, registered with egui for canvas painting.
//!
//! Sources are decoded with the `image` crate the first time a layer refers to
//! them. A source that cannot be decoded is drawn with a red X placeholder.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{egui, EguiTextureHandle, EguiUserTextures};
use image::RgbaImage;

use super::EditorSession;

/// Maximum number of image sources decoded per frame
const MAX_DECODES_PER_FRAME: usize = 2;

/// Placeholder size in pixels.
const PLACEHOLDER_SIZE: u32 = 64;

pub struct LayerTexture {
    pub handle: Handle<Image>,
    pub texture_id: egui::TextureId,
}

#[derive(Resource, Default)]
pub struct LayerTextures {
    loaded: HashMap<PathBuf, LayerTexture>,
    failed: HashSet<PathBuf>,
    placeholder: Option<LayerTexture>,
}

impl LayerTextures {
    /// Texture to paint for `source`: the decoded image, the placeholder when
    /// decoding failed, or nothing while it is still pending.
    pub fn texture_for(&self, source: &Path) -> Option<egui::TextureId> {
        if let Some(texture) = self.loaded.get(source) {
            return Some(texture.texture_id);
        }
        if self.failed.contains(source) {
            return self.placeholder.as_ref().map(|p| p.texture_id);
        }
        None
    }

    fn is_known(&self, source: &Path) -> bool {
        self.loaded.contains_key(source) || self.failed.contains(source)
    }
}

/// Convert decoded pixels into a bevy image.
pub fn rgba_to_image(pixels: RgbaImage) -> Image {
    let (width, height) = pixels.dimensions();
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        pixels.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Create a red placeholder image with an X pattern.
pub fn create_placeholder_image() -> RgbaImage {
    let size = PLACEHOLDER_SIZE;
    let red = image::Rgba([200, 50, 50, 255]);
    let dark_red = image::Rgba([120, 30, 30, 255]);

    RgbaImage::from_fn(size, size, |x, y| {
        // Draw border (2px)
        let is_border = x < 2 || x >= size - 2 || y < 2 || y >= size - 2;

        // Draw X pattern (diagonal lines)
        let on_diagonal = (x as i32 - y as i32).abs() <= 2
            || ((size - 1 - x) as i32 - y as i32).abs() <= 2;

        if is_border || on_diagonal { red } else { dark_red }
    })
}

/// Startup system to create and register the placeholder texture.
pub fn setup_placeholder_texture(
    mut textures: ResMut<LayerTextures>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let handle = images.add(rgba_to_image(create_placeholder_image()));
    let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
    textures.placeholder = Some(LayerTexture { handle, texture_id });
}

/// System that decodes new image sources and registers them with egui.
/// Runs in Update before the egui pass.
pub fn load_layer_textures(
    session: Res<EditorSession>,
    mut textures: ResMut<LayerTextures>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let pending: Vec<PathBuf> = session
        .document()
        .layers()
        .iter()
        .filter_map(|layer| layer.image_source())
        .filter(|source| !textures.is_known(source))
        .map(Path::to_path_buf)
        .collect::<HashSet<_>>()
        .into_iter()
        .take(MAX_DECODES_PER_FRAME)
        .collect();

    for source in pending {
        match image::open(&source) {
            Ok(decoded) => {
                let handle = images.add(rgba_to_image(decoded.to_rgba8()));
                let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
                debug!("Registered texture for {:?}", source);
                textures
                    .loaded
                    .insert(source, LayerTexture { handle, texture_id });
            }
            Err(e) => {
                warn!("Failed to decode layer image {:?}: {}", source, e);
                textures.failed.insert(source);
            }
        }
    }
}

/// Drop textures no longer referenced by the document or any history entry.
pub fn evict_unused_textures(
    session: Res<EditorSession>,
    mut textures: ResMut<LayerTextures>,
    mut images: ResMut<Assets<Image>>,
) {
    let documents = std::iter::once(session.document())
        .chain(session.history().entries().iter().map(|s| &s.document));
    let live: HashSet<&Path> = documents
        .flat_map(|document| document.layers().iter().filter_map(|l| l.image_source()))
        .collect();

    let stale: Vec<PathBuf> = textures
        .loaded
        .keys()
        .filter(|path| !live.contains(path.as_path()))
        .cloned()
        .collect();
    for path in stale {
        if let Some(texture) = textures.loaded.remove(&path) {
            images.remove(&texture.handle);
            debug!("Released texture for {:?}", path);
        }
    }
    textures.failed.retain(|path| live.contains(path.as_path()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_border_and_diagonal() {
        let placeholder = create_placeholder_image();
        assert_eq!(placeholder.dimensions(), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
        let red = image::Rgba([200, 50, 50, 255]);
        assert_eq!(*placeholder.get_pixel(0, 30), red);
        assert_eq!(*placeholder.get_pixel(32, 32), red);
        assert_ne!(*placeholder.get_pixel(32, 10), red);
    }

    #[test]
    fn test_unknown_source_has_no_texture_yet() {
        let textures = LayerTextures::default();
        assert!(textures.texture_for(Path::new("/tmp/a.png")).is_none());
        assert!(!textures.is_known(Path::new("/tmp/a.png")));
    }
}
