/// Frame rendering as data.
///
/// The world describes each frame as a list of `DrawCommand`s instead of
/// touching the canvas itself. Keeping the commands as plain `Rect`/`Color`
/// data means the whole simulation can run and be asserted on in tests with
/// no window or GPU context; only `draw_frame` needs SDL2.
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// One drawing operation, in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Copy the `src` region of the current background into `dest`,
    /// stretching when the two sizes differ.
    Background { src: Rect, dest: Rect },

    /// Solid filled rectangle.
    Fill { rect: Rect, color: Color },

    /// Unfilled rectangle outline.
    Outline { rect: Rect, color: Color },
}

/// Replay a command list against the canvas.
///
/// `background` is the texture `DrawCommand::Background` refers to. A frame
/// that mentions the background while none is loaded is an error; the world
/// only emits such commands after a successful load.
pub fn draw_frame(
    canvas: &mut Canvas<Window>,
    background: Option<&Texture>,
    commands: &[DrawCommand],
) -> Result<(), String> {
    for command in commands {
        match *command {
            DrawCommand::Background { src, dest } => {
                let texture = background
                    .ok_or_else(|| "Background command with no background loaded".to_string())?;
                canvas.copy(texture, src, dest)?;
            }
            DrawCommand::Fill { rect, color } => {
                canvas.set_draw_color(color);
                canvas.fill_rect(rect)?;
            }
            DrawCommand::Outline { rect, color } => {
                canvas.set_draw_color(color);
                canvas.draw_rect(rect)?;
            }
        }
    }

    Ok(())
}
