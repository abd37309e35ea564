use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::world::BackgroundSource;

/// Owns the single resident background texture.
///
/// Textures borrow the canvas's `TextureCreator`, so the store keeps a
/// reference to it and swaps textures in place as levels change. A new
/// background is always decoded before the old one is dropped; after a
/// failed load the previous level stays fully drawable.
pub struct BackgroundStore<'a> {
    texture_creator: &'a TextureCreator<WindowContext>,
    current: Option<Texture<'a>>,
}

impl<'a> BackgroundStore<'a> {
    pub fn new(texture_creator: &'a TextureCreator<WindowContext>) -> Self {
        BackgroundStore {
            texture_creator,
            current: None,
        }
    }

    /// The texture `DrawCommand::Background` refers to. `None` only before
    /// the first successful `load`.
    pub fn current(&self) -> Option<&Texture<'a>> {
        self.current.as_ref()
    }
}

impl BackgroundSource for BackgroundStore<'_> {
    fn load(&mut self, path: &str) -> Result<(u32, u32), String> {
        let texture = self
            .texture_creator
            .load_texture(path)
            .map_err(|e| format!("Failed to load {}: {}", path, e))?;
        let query = texture.query();
        log::debug!("loaded background {} ({}x{})", path, query.width, query.height);
        // Assigning drops the old texture only now that the new one exists.
        self.current = Some(texture);
        Ok((query.width, query.height))
    }
}
