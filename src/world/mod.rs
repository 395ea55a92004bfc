pub mod camera;
pub mod geometry;
pub mod map;
pub mod material;

pub use camera::Camera;

pub use geometry::{Aabb, Segment, cross, heading, right_of, to_degrees, to_radians};

pub use map::{GridMap, Map, MapError, SegmentMap};

pub use material::{Material, Tile};
