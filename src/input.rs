use sdl2::event::Event;
use sdl2::keyboard::Keycode;

/// Pixels per frame contributed by each held direction.
pub const MOVE_SPEED: i32 = 5;

/// Tracks which of the four movement directions are currently held.
///
/// The main loop feeds it raw SDL2 events; key-down sets the matching flag
/// and key-up clears it. WASD and the arrow keys are aliases for the same
/// four flags, so releasing either alias clears the shared direction.
/// Every other event is ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    /// Update the held-direction flags from one SDL2 event.
    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::KeyDown {
                keycode: Some(key), ..
            } => self.set_direction(key, true),
            Event::KeyUp {
                keycode: Some(key), ..
            } => self.set_direction(key, false),
            _ => {
                // Not a keyboard event
            }
        }
    }

    fn set_direction(&mut self, key: Keycode, held: bool) {
        match key {
            Keycode::W | Keycode::Up => self.up = held,
            Keycode::S | Keycode::Down => self.down = held,
            Keycode::A | Keycode::Left => self.left = held,
            Keycode::D | Keycode::Right => self.right = held,
            _ => {
                // Unhandled keys never change movement
            }
        }
    }

    /// Movement for this frame from the currently held directions.
    ///
    /// Axes are independent: opposite directions cancel to zero, and a
    /// diagonal is a full (±5, ±5) with no normalization.
    pub fn movement_delta(&self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= MOVE_SPEED;
        }
        if self.down {
            dy += MOVE_SPEED;
        }
        if self.left {
            dx -= MOVE_SPEED;
        }
        if self.right {
            dx += MOVE_SPEED;
        }
        (dx, dy)
    }
}
