pub mod caster;
#[allow(clippy::module_inception)]
mod engine;
pub mod intersect;
pub mod march;
pub mod types;

pub use caster::{CastError, Caster, RayCaster, Strategy};
pub use engine::{Engine, FrameReport};
pub use intersect::SegmentCaster;
pub use march::Marcher;
pub use types::{Hit, Ray, RenderColumn, Screen};
