use sdl2::rect::Rect;

/// Side length of the player square in world pixels.
pub const PLAYER_SIZE: u32 = 50;

/// The player-controlled square.
///
/// Position is the top-left corner in world coordinates, the same space the
/// background image lives in. The camera decides where it lands on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Player { x, y }
    }

    /// Apply one frame of movement.
    pub fn apply_delta(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Keep the whole square inside the background.
    pub fn keep_in_bounds(&mut self, background_width: u32, background_height: u32) {
        if self.x < 0 {
            self.x = 0;
        }
        if self.y < 0 {
            self.y = 0;
        }
        if self.x > (background_width as i32) - (PLAYER_SIZE as i32) {
            self.x = (background_width as i32) - (PLAYER_SIZE as i32);
        }
        if self.y > (background_height as i32) - (PLAYER_SIZE as i32) {
            self.y = (background_height as i32) - (PLAYER_SIZE as i32);
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// World-space bounds of the square.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}
