//! First-person software view.
//!
//! Controls  W/S = forward/back  A/D = strafe  ←/→ = turn
//!           Tab = diagnostics   M = march/exact   [ ] = fov   - = = wall scale
//!           Q/Esc = quit
//!
//! ```bash
//! cargo run --release -- --config maps/room.toml
//! RUST_LOG=debug cargo run --release -- --strategy march
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use raycast_rs::{
    config::Config,
    engine::{Engine, Strategy},
    renderer::FrameBuffer,
    sim::{Actions, InputCmd},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// TOML configuration (map, player, view); built-in room when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Frame height in pixels
    #[arg(long, default_value_t = 800)]
    height: usize,

    /// Override the configured intersection strategy (exact|march)
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Target frame rate
    #[arg(long, default_value_t = 60)]
    fps: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let mut config = match &opts.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(strategy) = opts.strategy {
        config.caster.strategy = strategy;
    }

    let mut engine = Engine::new(&config)?;
    let mut frame = FrameBuffer::new(opts.width, opts.height);

    let mut win = Window::new(
        "Rust Raycaster Software Render",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(opts.fps);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last
    let mut last_tick = Instant::now();

    while win.is_open() {
        let cmd = read_input(&win);
        if cmd.wants(Actions::QUIT) {
            break;
        }

        let now = Instant::now();
        let elapsed_ms = now.duration_since(last_tick).as_secs_f32() * 1000.0;
        last_tick = now;

        let report = engine.frame(&cmd, elapsed_ms, &mut frame);
        acc_time += now.elapsed();
        acc_frames += 1;

        frame.present(|fb, w, h| win.update_with_buffer(fb, w, h))?;

        if engine.show_diagnostics() && last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            let p = engine.player();
            log::info!(
                "avg render: {:.2} ms ({:.1} FPS)  pos ({:.2}, {:.2}) rot {:.1}°  {} misses/{} cols",
                avg_ms,
                1000.0 / avg_ms,
                p.pos.x,
                p.pos.y,
                p.rot,
                report.misses(),
                report.columns
            );
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}

/// Reduce raw key state to one [`InputCmd`].
fn read_input(win: &Window) -> InputCmd {
    let down = |k: Key| win.is_key_down(k) as i8 as f32;
    let pressed = |k: Key| win.is_key_pressed(k, KeyRepeat::No);

    let mut actions = Actions::empty();
    actions.set(
        Actions::QUIT,
        win.is_key_down(Key::Escape) || win.is_key_down(Key::Q),
    );
    actions.set(Actions::TOGGLE_DIAGNOSTICS, pressed(Key::Tab));
    actions.set(Actions::TOGGLE_STRATEGY, pressed(Key::M));
    actions.set(Actions::WIDEN_FOV, pressed(Key::RightBracket));
    actions.set(Actions::NARROW_FOV, pressed(Key::LeftBracket));
    actions.set(Actions::TALLER_WALLS, pressed(Key::Equal));
    actions.set(Actions::SHORTER_WALLS, pressed(Key::Minus));

    InputCmd {
        forward: down(Key::W) - down(Key::S),
        strafe: down(Key::D) - down(Key::A),
        turn: down(Key::Right) - down(Key::Left),
        actions,
    }
}
