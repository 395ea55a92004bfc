//! Column raycaster.
//!
//! Given a player pose and a static map, [`engine::Engine`] produces one
//! first-person frame of flat-shaded wall strips into any
//! [`renderer::PixelSink`].
//!
//! * `world`    – geometry kernel, map model, per-frame camera.
//! * `engine`   – ray casters (grid march and exact segment intersection)
//!   and the frame driver.
//! * `renderer` – pixel sink, shader, palette, diagnostics overlay.
//! * `sim`      – player state and abstract input.
//! * `config`   – TOML configuration.

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
