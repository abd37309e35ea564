//! Level table: which backgrounds exist and how the player moves between them.
//!
//! Levels are rows in a `LevelTable` rather than hardcoded branches. Each row
//! names a background image, a spawn point, and a list of transition triggers.
//! The table ships built in and can be replaced by a JSON file at startup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

/// Index of a level within the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub usize);

/// Edge of the background the player square can rest against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Axis-aligned world-coordinate box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Region {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Width in pixels (bounds are inclusive).
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }
}

/// Where a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerZone {
    /// Fires while the player square rests against this edge of the
    /// background.
    Edge(Edge),

    /// Fires while the player's top-left corner lies inside the region.
    Region(Region),
}

impl TriggerZone {
    /// Whether the zone matches a player at `pos` on a background of
    /// `background` pixels. `pos` is assumed already clamped in bounds.
    pub fn matches(&self, pos: (i32, i32), player_size: u32, background: (u32, u32)) -> bool {
        match *self {
            TriggerZone::Edge(edge) => {
                let (x, y) = pos;
                let size = player_size as i32;
                match edge {
                    Edge::Top => y <= 0,
                    Edge::Bottom => y + size >= background.1 as i32,
                    Edge::Left => x <= 0,
                    Edge::Right => x + size >= background.0 as i32,
                }
            }
            TriggerZone::Region(region) => region.contains(pos.0, pos.1),
        }
    }
}

/// One transition rule: the zone it fires in, the level it leads to, and
/// where the player lands there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDef {
    pub zone: TriggerZone,
    pub target: LevelId,
    pub spawn: (i32, i32),
}

/// One level: a background image plus its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub background: String,
    /// Player position when the game starts on this level.
    pub spawn: (i32, i32),
    pub triggers: Vec<TriggerDef>,
}

/// All levels, indexed by `LevelId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    pub levels: Vec<LevelDef>,
}

/// Errors that can occur loading a level table from disk
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    EmptyTable,
    BadTriggerTarget { level: String, target: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::EmptyTable => write!(f, "Level table has no levels"),
            ConfigError::BadTriggerTarget { level, target } => {
                write!(f, "Level '{}' has a trigger to unknown level {}", level, target)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

impl LevelTable {
    /// The default two-level world: a 500x500 town whose top and bottom
    /// edges both lead out to the overworld, and the overworld with a small
    /// region near its south-east corner that leads back.
    pub fn builtin() -> Self {
        LevelTable {
            levels: vec![
                LevelDef {
                    name: "onetown".to_string(),
                    background: "onetown.png".to_string(),
                    spawn: (225, 225),
                    triggers: vec![
                        TriggerDef {
                            zone: TriggerZone::Edge(Edge::Top),
                            target: LevelId(1),
                            spawn: (1800, 1180),
                        },
                        // Both edge exits land at the same overworld spot.
                        TriggerDef {
                            zone: TriggerZone::Edge(Edge::Bottom),
                            target: LevelId(1),
                            spawn: (1800, 1180),
                        },
                    ],
                },
                LevelDef {
                    name: "overworld_level1".to_string(),
                    background: "overworld_level1.png".to_string(),
                    spawn: (1800, 1180),
                    triggers: vec![TriggerDef {
                        zone: TriggerZone::Region(Region {
                            min_x: 1720,
                            min_y: 1152,
                            max_x: 1770,
                            max_y: 1202,
                        }),
                        target: LevelId(0),
                        spawn: (225, 225),
                    }],
                },
            ],
        }
    }

    /// Load a table from a JSON file, validating it before use.
    pub fn load_from_file(path: &str) -> Result<LevelTable, ConfigError> {
        let content = fs::read_to_string(path)?;
        LevelTable::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<LevelTable, ConfigError> {
        let table: LevelTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Every trigger target must be a row in this table.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        for level in &self.levels {
            for trigger in &level.triggers {
                if trigger.target.0 >= self.levels.len() {
                    return Err(ConfigError::BadTriggerTarget {
                        level: level.name.clone(),
                        target: trigger.target.0,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: LevelId) -> &LevelDef {
        &self.levels[id.0]
    }
}
