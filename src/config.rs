//! Runtime configuration.
//!
//! Loaded once at startup from TOML.  Every section falls back to its
//! defaults, so a file only has to name what it changes:
//!
//! ```toml
//! [player]
//! position = [6.0, 2.0]
//!
//! [view]
//! fov = 75.0
//!
//! [caster]
//! strategy = "march"
//!
//! [map]
//! kind = "grid"
//! rows = ["777", "707", "777"]
//! ```
//!
//! Segment maps list `{ from = [x, y], to = [x, y], material = "7" }`
//! entries under `[map] kind = "segments"`.

use std::{fs, io, path::Path};

use glam::{Vec2, vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::caster::Strategy;
use crate::world::{GridMap, Map, MapError, Segment, SegmentMap};

/// Errors that can be encountered while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Underlying I/O failure – propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid map: {0}")]
    Map(#[from] MapError),

    /// A numeric setting outside its usable range.
    #[error("`{name}` must be {rule} (got {value})")]
    OutOfRange {
        name: &'static str,
        rule: &'static str,
        value: f32,
    },

    /// Grid marching was requested on a segment map.
    #[error("the march strategy needs a grid map")]
    MarchNeedsGrid,

    /// A player position the map cannot hold.
    #[error("`{name}` at {point} is {reason}")]
    Placement {
        name: &'static str,
        point: Vec2,
        reason: &'static str,
    },
}

/// The classic 10×5 room.
pub const DEFAULT_ROOM: [&str; 5] = [
    "8888888888",
    "2100000003",
    "2000100003",
    "2000000003",
    "7777777777",
];

/*───────────────────────────── sections ─────────────────────────────*/

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub position: Vec2,
    /// Facing, degrees clockwise from +y.
    pub rot: f32,
    /// World units per millisecond.
    pub speed: f32,
    /// Degrees per millisecond.
    pub rot_speed: f32,
    /// Where an axis is reset to when the player leaves the map extent.
    pub respawn: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position: vec2(6.0, 2.0),
            rot: 0.0,
            speed: 0.002,
            rot_speed: 0.2,
            respawn: vec2(2.0, 2.0),
        }
    }
}

/// Live-tunable projection parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Horizontal spread of the columns, degrees.
    pub fov: f32,
    pub wall_scale: f32,
    pub distance_scale: f32,
    /// Distance at which walls fade out completely.
    pub far_clip: f32,
    /// Use the perpendicular distance for strip height.
    pub fisheye_correction: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            fov: 60.0,
            wall_scale: 40.0,
            distance_scale: 8.0,
            far_clip: 10.0,
            fisheye_correction: true,
        }
    }
}

impl Tunables {
    pub const FOV_STEP: f32 = 5.0;
    pub const FOV_RANGE: (f32, f32) = (10.0, 170.0);
    pub const SCALE_STEP: f32 = 1.1;
    pub const SCALE_RANGE: (f32, f32) = (1.0, 400.0);

    pub fn widen_fov(&mut self, steps: f32) {
        let (lo, hi) = Self::FOV_RANGE;
        self.fov = (self.fov + steps * Self::FOV_STEP).clamp(lo, hi);
    }

    pub fn grow_walls(&mut self, steps: f32) {
        let (lo, hi) = Self::SCALE_RANGE;
        self.wall_scale = (self.wall_scale * Self::SCALE_STEP.powf(steps)).clamp(lo, hi);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasterConfig {
    pub strategy: Strategy,
    /// Marching step in world units.
    pub resolution: f32,
    /// Marching step budget per ray.
    pub max_steps: u32,
    /// Rays report no hit past this distance.
    pub max_range: f32,
}

impl Default for CasterConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Exact,
            resolution: 0.03,
            max_steps: 1_000_000,
            max_range: 100.0,
        }
    }
}

/// Map as written in the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MapSpec {
    Grid { rows: Vec<String> },
    Segments { segments: Vec<Segment> },
}

impl Default for MapSpec {
    fn default() -> Self {
        MapSpec::Grid {
            rows: DEFAULT_ROOM.map(String::from).to_vec(),
        }
    }
}

impl TryFrom<&MapSpec> for Map {
    type Error = MapError;

    fn try_from(spec: &MapSpec) -> Result<Self, Self::Error> {
        Ok(match spec {
            MapSpec::Grid { rows } => Map::Grid(GridMap::new(rows)?),
            MapSpec::Segments { segments } => Map::Segments(SegmentMap::new(segments.clone())?),
        })
    }
}

/*───────────────────────────── document ─────────────────────────────*/

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub view: Tunables,
    pub caster: CasterConfig,
    pub map: MapSpec,
}

impl Config {
    /// Read and validate a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the map described by `[map]`.
    pub fn build_map(&self) -> Result<Map, ConfigError> {
        Ok(Map::try_from(&self.map)?)
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("caster.resolution", self.caster.resolution)?;
        positive("caster.max_range", self.caster.max_range)?;
        positive("view.far_clip", self.view.far_clip)?;
        let (lo, hi) = Tunables::FOV_RANGE;
        if !(lo..=hi).contains(&self.view.fov) {
            return Err(ConfigError::OutOfRange {
                name: "view.fov",
                rule: "between 10 and 170 degrees",
                value: self.view.fov,
            });
        }
        positive("view.distance_scale", self.view.distance_scale)?;
        positive("view.wall_scale", self.view.wall_scale)?;
        non_negative("player.speed", self.player.speed)?;
        non_negative("player.rot_speed", self.player.rot_speed)?;

        let map = self.build_map()?;
        if self.caster.strategy == Strategy::March && map.as_grid().is_none() {
            return Err(ConfigError::MarchNeedsGrid);
        }
        open_floor(&map, "player.position", self.player.position)?;
        open_floor(&map, "player.respawn", self.player.respawn)?;
        Ok(())
    }
}

/// `point` must lie inside the map extent and, on a grid, in an empty cell.
fn open_floor(map: &Map, name: &'static str, point: Vec2) -> Result<(), ConfigError> {
    let placement = |reason| ConfigError::Placement {
        name,
        point,
        reason,
    };
    if !map.bounds().contains(point) {
        return Err(placement("outside the map"));
    }
    if let Some(grid) = map.as_grid() {
        let solid = grid
            .material_at(point.y.round() as i64, point.x.round() as i64)
            .map_or(true, |tile| tile.is_solid());
        if solid {
            return Err(placement("inside a wall"));
        }
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            rule: "a positive number",
            value,
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            rule: "zero or more",
            value,
        })
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
