//! Game world state and the per-frame step.
//!
//! `GameWorld` owns everything the simulation needs: the player, the camera,
//! the level table, and the dimensions of the active background. One `step`
//! call advances a frame and returns the draw commands describing it, so the
//! whole loop body is testable without SDL2. Background images reach the
//! world only through the `BackgroundSource` trait; the SDL2-backed store
//! lives in `background.rs` and tests substitute a fake.

use sdl2::pixels::Color;
use sdl2::rect::Rect;

use crate::camera::Camera;
use crate::level::{LevelId, LevelTable, TriggerZone};
use crate::player::{PLAYER_SIZE, Player};
use crate::render::DrawCommand;

/// Supplies background images by asset path.
pub trait BackgroundSource {
    /// Load the image at `path` as the current background, replacing the
    /// previous one, and return its pixel dimensions. On failure the
    /// previous background must stay loaded and usable.
    fn load(&mut self, path: &str) -> Result<(u32, u32), String>;
}

/// All simulation state for one run of the game.
pub struct GameWorld {
    pub player: Player,
    pub camera: Camera,
    /// Draw trigger regions and player bounds as outlines.
    pub debug_overlay: bool,
    levels: LevelTable,
    current_level: LevelId,
    background_size: (u32, u32),
    window_size: (u32, u32),
}

impl GameWorld {
    /// Build the world on `start` and load that level's background.
    /// A failed load here is fatal; there is nothing sensible to show.
    pub fn new(
        levels: LevelTable,
        start: LevelId,
        window_size: (u32, u32),
        backgrounds: &mut dyn BackgroundSource,
    ) -> Result<GameWorld, String> {
        let def = levels.get(start);
        let background_size = backgrounds.load(&def.background)?;
        let (spawn_x, spawn_y) = def.spawn;
        log::info!(
            "starting on level '{}' with a {}x{} background",
            def.name,
            background_size.0,
            background_size.1
        );

        Ok(GameWorld {
            player: Player::new(spawn_x, spawn_y),
            camera: Camera::new(),
            debug_overlay: false,
            levels,
            current_level: start,
            background_size,
            window_size,
        })
    }

    /// Advance the simulation one frame and describe what to draw.
    ///
    /// In order: apply the movement delta, clamp the player to the
    /// background, fire the first matching level trigger (if any), recenter
    /// the camera, then emit this frame's draw commands.
    pub fn step(
        &mut self,
        delta: (i32, i32),
        backgrounds: &mut dyn BackgroundSource,
    ) -> Vec<DrawCommand> {
        self.player.apply_delta(delta.0, delta.1);
        self.player
            .keep_in_bounds(self.background_size.0, self.background_size.1);

        self.check_triggers(backgrounds);

        self.camera
            .update(self.player.position(), self.background_size, self.window_size);

        self.draw_commands()
    }

    /// Walk the current level's triggers in order and act on the first one
    /// whose zone matches the player.
    ///
    /// When the destination background loads, the level, player, and camera
    /// all move at once. When it does not, the transition is abandoned and
    /// the world keeps its current state; the zone still matches next frame,
    /// so the load is retried until it works or the player walks away.
    fn check_triggers(&mut self, backgrounds: &mut dyn BackgroundSource) {
        let current = self.levels.get(self.current_level);
        let fired = current.triggers.iter().find(|trigger| {
            trigger
                .zone
                .matches(self.player.position(), PLAYER_SIZE, self.background_size)
        });
        let Some(trigger) = fired else {
            return;
        };
        let target = trigger.target;
        let spawn = trigger.spawn;

        let destination = self.levels.get(target);
        match backgrounds.load(&destination.background) {
            Ok(size) => {
                log::info!(
                    "entering level '{}' at ({}, {})",
                    destination.name,
                    spawn.0,
                    spawn.1
                );
                self.current_level = target;
                self.background_size = size;
                self.player = Player::new(spawn.0, spawn.1);
                // Stale offsets must not survive the swap; update() picks
                // the real offset later this same frame.
                self.camera.reset();
            }
            Err(e) => {
                log::error!(
                    "failed to load background '{}' for level '{}', staying on '{}': {}",
                    destination.background,
                    destination.name,
                    current.name,
                    e
                );
            }
        }
    }

    /// Background region, player square, then debug outlines when enabled.
    fn draw_commands(&self) -> Vec<DrawCommand> {
        let src = self
            .camera
            .visible_src_rect(self.background_size, self.window_size);
        let dest = Rect::new(0, 0, self.window_size.0, self.window_size.1);

        let mut commands = vec![
            DrawCommand::Background { src, dest },
            DrawCommand::Fill {
                rect: Rect::new(
                    self.player.x - self.camera.x,
                    self.player.y - self.camera.y,
                    PLAYER_SIZE,
                    PLAYER_SIZE,
                ),
                color: Color::RGB(0, 255, 0),
            },
        ];

        if self.debug_overlay {
            self.push_debug_outlines(&mut commands);
        }

        commands
    }

    /// Outline every region trigger on the current level plus the player
    /// bounds. Edge triggers have no box to outline.
    fn push_debug_outlines(&self, commands: &mut Vec<DrawCommand>) {
        for trigger in &self.levels.get(self.current_level).triggers {
            if let TriggerZone::Region(region) = trigger.zone {
                commands.push(DrawCommand::Outline {
                    rect: Rect::new(
                        region.min_x - self.camera.x,
                        region.min_y - self.camera.y,
                        region.width(),
                        region.height(),
                    ),
                    color: Color::RGB(255, 255, 0),
                });
            }
        }

        let bounds = self.player.bounds();
        commands.push(DrawCommand::Outline {
            rect: Rect::new(
                bounds.x() - self.camera.x,
                bounds.y() - self.camera.y,
                bounds.width(),
                bounds.height(),
            ),
            color: Color::RGB(255, 0, 0),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelDef;
    use std::collections::HashMap;

    const WINDOW: (u32, u32) = (500, 500);

    /// Test double that hands out fixed dimensions per path and can be
    /// switched into a failing mode.
    struct FakeBackgrounds {
        sizes: HashMap<String, (u32, u32)>,
        fail: bool,
        loads: Vec<String>,
    }

    impl FakeBackgrounds {
        fn new(sizes: &[(&str, (u32, u32))]) -> Self {
            FakeBackgrounds {
                sizes: sizes
                    .iter()
                    .map(|(path, size)| (path.to_string(), *size))
                    .collect(),
                fail: false,
                loads: Vec::new(),
            }
        }

        fn builtin_pair() -> Self {
            FakeBackgrounds::new(&[
                ("onetown.png", (500, 500)),
                ("overworld_level1.png", (2000, 1250)),
            ])
        }
    }

    impl BackgroundSource for FakeBackgrounds {
        fn load(&mut self, path: &str) -> Result<(u32, u32), String> {
            if self.fail {
                return Err(format!("simulated load failure for {}", path));
            }
            let size = self
                .sizes
                .get(path)
                .copied()
                .ok_or_else(|| format!("no such image: {}", path))?;
            self.loads.push(path.to_string());
            Ok(size)
        }
    }

    /// Single level with no triggers, for tests about movement and drawing.
    fn lone_level(background: (u32, u32), spawn: (i32, i32)) -> (GameWorld, FakeBackgrounds) {
        let table = LevelTable {
            levels: vec![LevelDef {
                name: "meadow".to_string(),
                background: "meadow.png".to_string(),
                spawn,
                triggers: vec![],
            }],
        };
        let mut backgrounds = FakeBackgrounds::new(&[("meadow.png", background)]);
        let world = GameWorld::new(table, LevelId(0), WINDOW, &mut backgrounds).unwrap();
        (world, backgrounds)
    }

    fn builtin_world(start: LevelId) -> (GameWorld, FakeBackgrounds) {
        let mut backgrounds = FakeBackgrounds::builtin_pair();
        let world = GameWorld::new(LevelTable::builtin(), start, WINDOW, &mut backgrounds).unwrap();
        (world, backgrounds)
    }

    #[test]
    fn test_new_spawns_player_and_loads_background() {
        let (world, backgrounds) = builtin_world(LevelId(0));
        assert_eq!(world.current_level, LevelId(0));
        assert_eq!(world.player.position(), (225, 225));
        assert_eq!(world.background_size, (500, 500));
        assert_eq!((world.camera.x, world.camera.y), (0, 0));
        assert_eq!(backgrounds.loads, vec!["onetown.png"]);
    }

    #[test]
    fn test_new_fails_when_background_missing() {
        let table = LevelTable::builtin();
        let mut backgrounds = FakeBackgrounds::new(&[]);
        let result = GameWorld::new(table, LevelId(0), WINDOW, &mut backgrounds);
        assert!(result.is_err());
    }

    #[test]
    fn test_step_applies_delta_then_clamps() {
        let (mut world, mut backgrounds) = lone_level((500, 500), (225, 225));
        world.step((5, -5), &mut backgrounds);
        assert_eq!(world.player.position(), (230, 220));

        // A huge delta still lands inside the background.
        world.step((10_000, -10_000), &mut backgrounds);
        assert_eq!(world.player.position(), (450, 0));
    }

    #[test]
    fn test_zero_delta_step_changes_nothing() {
        let (mut world, mut backgrounds) = lone_level((2000, 1250), (1000, 600));
        let first = world.step((0, 0), &mut backgrounds);
        let player = world.player.position();
        let camera = (world.camera.x, world.camera.y);

        let second = world.step((0, 0), &mut backgrounds);
        assert_eq!(world.player.position(), player);
        assert_eq!((world.camera.x, world.camera.y), camera);
        assert_eq!(first, second);
    }

    #[test]
    fn test_player_never_escapes_background() {
        let (mut world, mut backgrounds) = lone_level((2000, 1250), (1000, 600));
        let deltas = [(-9000, 0), (9000, 0), (0, -9000), (0, 9000), (375, -375)];
        for delta in deltas {
            world.step(delta, &mut backgrounds);
            let (x, y) = world.player.position();
            assert!(x >= 0 && x <= 1950, "x out of range: {}", x);
            assert!(y >= 0 && y <= 1200, "y out of range: {}", y);
        }
    }

    #[test]
    fn test_walking_off_the_top_enters_overworld() {
        let (mut world, mut backgrounds) = builtin_world(LevelId(0));

        // 44 frames of -5 leave the player at y=5, still in town.
        for _ in 0..44 {
            world.step((0, -5), &mut backgrounds);
        }
        assert_eq!(world.current_level, LevelId(0));
        assert_eq!(world.player.position(), (225, 5));

        // Frame 45 reaches y=0 and the top edge fires.
        let commands = world.step((0, -5), &mut backgrounds);
        assert_eq!(world.current_level, LevelId(1));
        assert_eq!(world.player.position(), (1800, 1180));
        assert_eq!(world.background_size, (2000, 1250));
        assert_eq!((world.camera.x, world.camera.y), (1500, 750));
        assert_eq!(
            backgrounds.loads,
            vec!["onetown.png", "overworld_level1.png"]
        );

        // The same frame already draws the new level.
        assert_eq!(
            commands[0],
            DrawCommand::Background {
                src: Rect::new(1500, 750, 500, 500),
                dest: Rect::new(0, 0, 500, 500),
            }
        );
    }

    #[test]
    fn test_walking_off_the_bottom_enters_overworld() {
        let (mut world, mut backgrounds) = builtin_world(LevelId(0));
        for _ in 0..60 {
            world.step((0, 5), &mut backgrounds);
            if world.current_level == LevelId(1) {
                break;
            }
        }
        assert_eq!(world.current_level, LevelId(1));
        assert_eq!(world.player.position(), (1800, 1180));
    }

    #[test]
    fn test_overworld_region_returns_to_town() {
        let (mut world, mut backgrounds) = builtin_world(LevelId(1));
        assert_eq!(world.player.position(), (1800, 1180));

        // Five frames west: x=1775, outside the region with room to spare.
        for _ in 0..5 {
            world.step((-5, 0), &mut backgrounds);
        }
        assert_eq!(world.current_level, LevelId(1));

        // Sixth frame lands on x=1770, inside the region.
        world.step((-5, 0), &mut backgrounds);
        assert_eq!(world.current_level, LevelId(0));
        assert_eq!(world.player.position(), (225, 225));
        assert_eq!(world.background_size, (500, 500));
        assert_eq!((world.camera.x, world.camera.y), (0, 0));
    }

    #[test]
    fn test_failed_transition_keeps_world_state() {
        let (mut world, mut backgrounds) = builtin_world(LevelId(0));

        backgrounds.fail = true;
        for _ in 0..45 {
            world.step((0, -5), &mut backgrounds);
        }
        // The top edge fired but the load failed; nothing moved levels.
        assert_eq!(world.current_level, LevelId(0));
        assert_eq!(world.player.position(), (225, 0));
        assert_eq!(world.background_size, (500, 500));
        assert_eq!((world.camera.x, world.camera.y), (0, 0));

        // The zone still matches, so the next healthy frame completes it.
        backgrounds.fail = false;
        world.step((0, 0), &mut backgrounds);
        assert_eq!(world.current_level, LevelId(1));
        assert_eq!(world.player.position(), (1800, 1180));
    }

    #[test]
    fn test_draw_order_background_then_player() {
        let (mut world, mut backgrounds) = lone_level((2000, 1250), (1000, 600));
        let commands = world.step((0, 0), &mut backgrounds);

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            DrawCommand::Background {
                src: Rect::new(775, 375, 500, 500),
                dest: Rect::new(0, 0, 500, 500),
            }
        );
        // Player sits at world (1000, 600) minus the camera offset.
        assert_eq!(
            commands[1],
            DrawCommand::Fill {
                rect: Rect::new(225, 225, 50, 50),
                color: Color::RGB(0, 255, 0),
            }
        );
    }

    #[test]
    fn test_small_background_is_stretched() {
        let (mut world, mut backgrounds) = lone_level((300, 200), (100, 100));
        let commands = world.step((0, 0), &mut backgrounds);

        assert_eq!((world.camera.x, world.camera.y), (0, 0));
        assert_eq!(
            commands[0],
            DrawCommand::Background {
                src: Rect::new(0, 0, 300, 200),
                dest: Rect::new(0, 0, 500, 500),
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::Fill {
                rect: Rect::new(100, 100, 50, 50),
                color: Color::RGB(0, 255, 0),
            }
        );
    }

    #[test]
    fn test_debug_overlay_outlines_regions_and_player() {
        let (mut world, mut backgrounds) = builtin_world(LevelId(1));
        world.debug_overlay = true;
        let commands = world.step((0, 0), &mut backgrounds);

        // Background, player fill, region outline, player outline.
        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[2],
            DrawCommand::Outline {
                rect: Rect::new(220, 402, 51, 51),
                color: Color::RGB(255, 255, 0),
            }
        );
        assert_eq!(
            commands[3],
            DrawCommand::Outline {
                rect: Rect::new(300, 430, 50, 50),
                color: Color::RGB(255, 0, 0),
            }
        );
    }

    #[test]
    fn test_debug_overlay_off_by_default() {
        let (mut world, mut backgrounds) = builtin_world(LevelId(1));
        let commands = world.step((0, 0), &mut backgrounds);
        assert_eq!(commands.len(), 2);
    }
}
