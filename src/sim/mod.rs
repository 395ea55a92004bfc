mod components;
mod player;

pub use components::{Actions, InputCmd};
pub use player::{MAX_FRAME_MS, Player};
