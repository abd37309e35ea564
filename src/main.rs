use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;

mod background;
mod camera;
mod input;
mod level;
mod player;
mod render;
mod world;

use background::BackgroundStore;
use input::InputState;
use level::{LevelId, LevelTable};
use render::draw_frame;
use world::GameWorld;

// Window constants
const WINDOW_TITLE: &str = "RPG";
const WINDOW_WIDTH: u32 = 500;
const WINDOW_HEIGHT: u32 = 500;

/// Optional on-disk replacement for the built-in level table.
const LEVEL_CONFIG_PATH: &str = "assets/config/levels.json";

/// Use the level table from disk when one is present and valid, otherwise
/// fall back to the built-in table.
fn load_level_table() -> LevelTable {
    match LevelTable::load_from_file(LEVEL_CONFIG_PATH) {
        Ok(table) => {
            log::info!(
                "loaded level table from {} ({} levels)",
                LEVEL_CONFIG_PATH,
                table.levels.len()
            );
            table
        }
        Err(e) => {
            log::info!("using built-in level table ({}: {})", LEVEL_CONFIG_PATH, e);
            LevelTable::builtin()
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let mut backgrounds = BackgroundStore::new(&texture_creator);
    let mut world = GameWorld::new(
        load_level_table(),
        LevelId(0),
        (WINDOW_WIDTH, WINDOW_HEIGHT),
        &mut backgrounds,
    )?;
    let mut input = InputState::new();

    println!("Controls:");
    println!("WASD / Arrow Keys - Move");
    println!("B - Toggle trigger debug overlay");
    println!("ESC - Quit");

    'running: loop {
        // Handle events
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::B),
                    repeat: false,
                    ..
                } => {
                    world.debug_overlay = !world.debug_overlay;
                    log::info!(
                        "trigger debug overlay {}",
                        if world.debug_overlay { "on" } else { "off" }
                    );
                }
                _ => input.handle_event(&event),
            }
        }

        let commands = world.step(input.movement_delta(), &mut backgrounds);

        canvas.set_draw_color(Color::RGB(255, 255, 255));
        canvas.clear();
        draw_frame(&mut canvas, backgrounds.current(), &commands)?;
        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
