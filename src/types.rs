//! Core data types for the city board.
//!
//! This module defines the logical grid coordinates, the projected screen offsets,
//! the building catalog, the persisted building records and the placed objects
//! the board view renders.

use crate::constants;
use serde::{Deserialize, Serialize};

/// A logical cell on the board, identified by column and row.
///
/// Values outside the board are representable; callers bounds-check where needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct GridCoordinate {
    /// Column
    pub gx: i32,
    /// Row
    pub gy: i32,
}

impl GridCoordinate {
    /// Creates a grid coordinate from a column and a row.
    pub const fn new(gx: i32, gy: i32) -> Self {
        Self { gx, gy }
    }

    /// Anti-diagonal index used as the back-to-front render key.
    ///
    /// Widened to `i64` so the sum of any two `i32` components fits.
    pub const fn depth(&self) -> i64 {
        self.gx as i64 + self.gy as i64
    }
}

/// A projected pixel position, relative to the projection of cell (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenOffset {
    /// Horizontal offset in pixels
    pub x: f32,
    /// Vertical offset in pixels, growing downwards
    pub y: f32,
}

impl ScreenOffset {
    /// Creates an offset from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of one isometric tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSize {
    /// Diamond width (tw)
    pub width: f32,
    /// Diamond height (th)
    pub height: f32,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: constants::TILE_W,
            height: constants::TILE_H,
        }
    }
}

/// Fixed geometry of one board: tile size and logical dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardConfig {
    /// Tile dimensions used by the projection
    pub tile: TileSize,
    /// Number of columns (W)
    pub width: i32,
    /// Number of rows (H)
    pub height: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tile: TileSize::default(),
            width: constants::MAP_W,
            height: constants::MAP_H,
        }
    }
}

/// Buildings that can be earned by completing a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    /// Costs 10 coins
    Cathedral,
    /// Costs 5 coins
    House,
    /// Costs 15 coins
    Office,
    /// Costs 25 coins
    Tower,
}

impl BuildingKind {
    /// Every kind in the order the reward picker lists them.
    pub const ALL: [BuildingKind; 4] = [
        BuildingKind::Cathedral,
        BuildingKind::House,
        BuildingKind::Office,
        BuildingKind::Tower,
    ];

    /// Stable identifier written into persisted records.
    pub fn id(&self) -> &'static str {
        match self {
            BuildingKind::Cathedral => "cathedral",
            BuildingKind::House => "house",
            BuildingKind::Office => "office",
            BuildingKind::Tower => "tower",
        }
    }

    /// Looks up a kind by its persisted identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            BuildingKind::Cathedral => "Cathedral",
            BuildingKind::House => "House",
            BuildingKind::Office => "Office",
            BuildingKind::Tower => "Tower",
        }
    }

    /// Emoji shown in the picker and on the sprite.
    pub fn icon(&self) -> &'static str {
        match self {
            BuildingKind::Cathedral => "⛪",
            BuildingKind::House => "🏠",
            BuildingKind::Office => "🏢",
            BuildingKind::Tower => "🗼",
        }
    }

    /// Price in coins, shown in the reward picker and summed into the city value.
    pub fn cost(&self) -> u32 {
        match self {
            BuildingKind::Cathedral => 10,
            BuildingKind::House => 5,
            BuildingKind::Office => 15,
            BuildingKind::Tower => 25,
        }
    }

    /// One-line description shown when hovering the picker entry.
    pub fn description(&self) -> &'static str {
        match self {
            BuildingKind::Cathedral => "A grand cathedral for your city",
            BuildingKind::House => "A cozy residential building",
            BuildingKind::Office => "A modern office building",
            BuildingKind::Tower => "An impressive tower structure",
        }
    }

    /// Sprite size in pixels (width, height).
    pub fn sprite_size(&self) -> (f32, f32) {
        match self {
            BuildingKind::Cathedral => (96.0, 128.0),
            BuildingKind::House => (64.0, 64.0),
            BuildingKind::Office => (64.0, 112.0),
            BuildingKind::Tower => (48.0, 160.0),
        }
    }

    /// Base colour of the procedural sprite as RGB.
    pub fn color(&self) -> [u8; 3] {
        match self {
            BuildingKind::Cathedral => [186, 160, 120],
            BuildingKind::House => [200, 90, 70],
            BuildingKind::Office => [90, 130, 180],
            BuildingKind::Tower => [150, 150, 165],
        }
    }
}

/// One building as persisted in the key-value store.
///
/// Serialized as `{ "id": 1, "type": "house", "x": 2, "y": 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// Unique id, a millisecond timestamp for granted buildings
    pub id: i64,
    /// Building type identifier, see [`BuildingKind::id`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl BuildingRecord {
    /// Creates a record for a catalog building.
    pub fn new(id: i64, kind: BuildingKind, x: i32, y: i32) -> Self {
        Self {
            id,
            kind: kind.id().to_string(),
            x,
            y,
        }
    }

    /// The catalog entry for this record, if its type is known.
    pub fn building_kind(&self) -> Option<BuildingKind> {
        BuildingKind::from_id(&self.kind)
    }
}

/// A building positioned on the board, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    /// Unique, stable identifier
    pub id: i64,
    /// Logical cell the sprite stands on
    pub grid: GridCoordinate,
    /// Sprite width in pixels
    pub width: f32,
    /// Sprite height in pixels
    pub height: f32,
    /// Asset key of the sprite (the building type identifier)
    pub asset: String,
}

impl PlacedObject {
    /// Builds the render object for a persisted record.
    ///
    /// Unknown building types keep their asset key and get a generic sprite size.
    pub fn from_record(record: &BuildingRecord) -> Self {
        let (width, height) = record
            .building_kind()
            .map(|kind| kind.sprite_size())
            .unwrap_or(constants::FALLBACK_SPRITE);
        Self {
            id: record.id,
            grid: GridCoordinate::new(record.x, record.y),
            width,
            height,
            asset: record.kind.clone(),
        }
    }

    /// Placeholder building shown while the city has no buildings yet.
    pub fn demo() -> Self {
        let (width, height) = constants::DEMO_SPRITE;
        Self {
            id: 1,
            grid: GridCoordinate::new(6, 6),
            width,
            height,
            asset: BuildingKind::Cathedral.id().to_string(),
        }
    }

    /// The catalog entry matching this object's asset, if any.
    pub fn building_kind(&self) -> Option<BuildingKind> {
        BuildingKind::from_id(&self.asset)
    }
}
