use crate::player::PLAYER_SIZE;
use sdl2::rect::Rect;

/// World-coordinate offset of the window's top-left corner.
///
/// Each frame the camera recenters on the player and then clamps so the
/// window never shows past the background edges. On an axis where the
/// background is no larger than the window the offset is pinned to 0 and
/// the renderer stretches the image to fill instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

impl Camera {
    pub fn new() -> Self {
        Camera { x: 0, y: 0 }
    }

    /// Drop back to the origin. Used when a level swap invalidates the old
    /// offset; the same frame's `update` recomputes the real one.
    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    /// Center the view on the player, clamped to the background.
    pub fn update(&mut self, player_pos: (i32, i32), background: (u32, u32), window: (u32, u32)) {
        self.x = Camera::axis_offset(player_pos.0, background.0, window.0);
        self.y = Camera::axis_offset(player_pos.1, background.1, window.1);
    }

    fn axis_offset(player: i32, background: u32, window: u32) -> i32 {
        if background <= window {
            return 0;
        }
        let centered = player + (PLAYER_SIZE as i32) / 2 - (window as i32) / 2;
        centered.clamp(0, background as i32 - window as i32)
    }

    /// The background region that fills the window this frame.
    ///
    /// Window-sized at the camera offset on axes the background covers;
    /// the full background extent on axes it does not, which the renderer
    /// stretches to fit.
    pub fn visible_src_rect(&self, background: (u32, u32), window: (u32, u32)) -> Rect {
        let (src_x, src_w) = if background.0 >= window.0 {
            (self.x, window.0)
        } else {
            (0, background.0)
        };
        let (src_y, src_h) = if background.1 >= window.1 {
            (self.y, window.1)
        } else {
            (0, background.1)
        };
        Rect::new(src_x, src_y, src_w, src_h)
    }
}
