//! Ray-caster seam.
//!
//! Two interchangeable strategies answer "what does this ray hit first":
//!
//! * [`Marcher`]       – fixed-step march through a [`GridMap`] (legacy).
//! * [`SegmentCaster`] – exact ray/segment intersection (primary).
//!
//! The engine picks one per frame through [`Caster`], which dispatches
//! statically so the per-column loop stays monomorphic.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::engine::intersect::SegmentCaster;
use crate::engine::march::Marcher;
use crate::engine::types::{Hit, Ray};

/// Why a column has no wall.  None of these are fatal: the column is drawn
/// as floor and ceiling only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CastError {
    /// The marching ray would have indexed outside the grid.
    #[error("ray left the grid at row {row}, column {col}")]
    OutOfBounds { row: i64, col: i64 },

    /// Nothing in front of the ray within range: a gap in the boundary.
    #[error("no wall in front of the ray at {angle:.2}° within {max_range} units")]
    NoIntersection { angle: f32, max_range: f32 },

    /// The marching search ran out of steps.
    #[error("no wall after {steps} marching steps")]
    IterationCap { steps: u32 },
}

/// Finds the closest surface along a ray.
pub trait RayCaster {
    fn cast(&self, ray: &Ray) -> Result<Hit, CastError>;
}

/// Which intersection strategy the engine uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exact ray/segment intersection.
    #[default]
    Exact,
    /// Fixed-step grid march; grid maps only.
    March,
}

impl Strategy {
    pub fn toggled(self) -> Self {
        match self {
            Strategy::Exact => Strategy::March,
            Strategy::March => Strategy::Exact,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Exact => "exact",
            Strategy::March => "march",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Strategy::Exact),
            "march" => Ok(Strategy::March),
            other => Err(format!("unknown strategy `{other}` (expected exact|march)")),
        }
    }
}

/// Static dispatch over both strategies.
pub enum Caster<'a> {
    March(Marcher<'a>),
    Exact(SegmentCaster<'a>),
}

impl Caster<'_> {
    pub fn strategy(&self) -> Strategy {
        match self {
            Caster::March(_) => Strategy::March,
            Caster::Exact(_) => Strategy::Exact,
        }
    }
}

impl RayCaster for Caster<'_> {
    #[inline]
    fn cast(&self, ray: &Ray) -> Result<Hit, CastError> {
        match self {
            Caster::March(m) => m.cast(ray),
            Caster::Exact(s) => s.cast(ray),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GridMap;
    use glam::vec2;

    #[test]
    fn strategy_parses_and_prints() {
        assert_eq!("exact".parse::<Strategy>(), Ok(Strategy::Exact));
        assert_eq!("MARCH".parse::<Strategy>(), Ok(Strategy::March));
        assert!("dda".parse::<Strategy>().is_err());
        assert_eq!(Strategy::March.to_string(), "march");
        assert_eq!(Strategy::Exact.toggled(), Strategy::March);
    }

    #[test]
    fn interior_wall_straight_ahead() {
        // bordered room with a lone '2' block three columns west of (6, 2)
        let grid = GridMap::new(&[
            "8888888888",
            "7000000007",
            "7002000007",
            "7000000007",
            "7777777777",
        ])
        .unwrap();
        let segs = grid.to_segments();
        let ray = Ray::new(vec2(6.0, 2.0), 270.0, 100.0);

        // near face of column 3 is x = 3.5
        let exact = Caster::Exact(SegmentCaster::new(&segs)).cast(&ray).unwrap();
        assert_eq!(exact.material.to_char(), '2');
        assert!((exact.distance - 2.5).abs() < 1e-5);

        let march = Caster::March(Marcher::new(&grid, 0.03, 1_000_000))
            .cast(&ray)
            .unwrap();
        assert_eq!(march.material.to_char(), '2');
        assert!((march.distance - 2.5).abs() < 0.05);
    }

    #[test]
    fn both_strategies_agree_on_a_grid() {
        let grid = GridMap::new(&["77777", "70007", "70007", "70007", "77777"]).unwrap();
        let segs = grid.to_segments();
        let exact = Caster::Exact(SegmentCaster::new(&segs));
        let march = Caster::March(Marcher::new(&grid, 0.01, 10_000));
        assert_eq!(exact.strategy(), Strategy::Exact);

        for angle in [0.0, 45.0, 90.0, 135.0, 200.0, 300.0] {
            let ray = Ray::new(vec2(2.0, 2.0), angle, 50.0);
            let a = exact.cast(&ray).unwrap();
            let b = march.cast(&ray).unwrap();
            assert_eq!(a.material, b.material);
            assert!((a.distance - b.distance).abs() < 0.05, "angle {angle}");
        }
    }
}
