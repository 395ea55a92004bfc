//! Frame driver.
//!
//! One call to [`Engine::frame`] runs the whole pipeline to completion:
//!
//! ```text
//! actions → advance player → snapshot camera → cast every column
//!         → shade every column → (diagnostics overlay)
//! ```
//!
//! Columns are cast in parallel against the immutable camera snapshot and
//! the shared map; each column owns only its own result slot.  Shading then
//! writes the sink column by column.  A column whose cast fails is drawn as
//! background; the frame always completes.

use rayon::prelude::*;

use crate::{
    config::{CasterConfig, Config, ConfigError, Tunables},
    engine::{
        caster::{CastError, Caster, RayCaster, Strategy},
        intersect::SegmentCaster,
        march::Marcher,
        types::{Hit, Ray, RenderColumn, Screen},
    },
    renderer::{PixelSink, overlay, software::Shader},
    sim::{Actions, InputCmd, Player},
    world::{Camera, Map, Segment, to_radians},
};

/// What happened while drawing one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub columns: usize,
    pub hits: usize,
    pub no_intersection: usize,
    pub out_of_bounds: usize,
    pub iteration_capped: usize,
}

impl FrameReport {
    #[inline]
    pub fn misses(&self) -> usize {
        self.no_intersection + self.out_of_bounds + self.iteration_capped
    }

    fn record(&mut self, result: &Result<Hit, CastError>) {
        self.columns += 1;
        match result {
            Ok(_) => self.hits += 1,
            Err(CastError::NoIntersection { .. }) => self.no_intersection += 1,
            Err(CastError::OutOfBounds { .. }) => self.out_of_bounds += 1,
            Err(CastError::IterationCap { .. }) => self.iteration_capped += 1,
        }
    }
}

pub struct Engine {
    map: Map,
    boundary: Vec<Segment>,
    player: Player,
    tunables: Tunables,
    caster: CasterConfig,
    show_diagnostics: bool,
    /* per-column scratch, reused across frames */
    results: Vec<Result<Hit, CastError>>,
}

impl Engine {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = config.build_map()?;
        let boundary = map.boundary();
        log::info!(
            "map ready: {} boundary segments, strategy {}",
            boundary.len(),
            config.caster.strategy
        );

        Ok(Self {
            map,
            boundary,
            player: Player::new(&config.player),
            tunables: config.view,
            caster: config.caster,
            show_diagnostics: false,
            results: Vec::new(),
        })
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[inline]
    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    #[inline]
    pub fn map(&self) -> &Map {
        &self.map
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.caster.strategy
    }

    #[inline]
    pub fn show_diagnostics(&self) -> bool {
        self.show_diagnostics
    }

    /// Switch intersection strategy.  Marching is refused on segment maps.
    pub fn set_strategy(&mut self, strategy: Strategy) -> Result<(), ConfigError> {
        if strategy == Strategy::March && self.map.as_grid().is_none() {
            return Err(ConfigError::MarchNeedsGrid);
        }
        if strategy != self.caster.strategy {
            log::info!("caster strategy: {} → {}", self.caster.strategy, strategy);
        }
        self.caster.strategy = strategy;
        Ok(())
    }

    /// Caster for the current strategy, borrowing the map.
    pub fn caster(&self) -> Caster<'_> {
        match (self.caster.strategy, self.map.as_grid()) {
            (Strategy::March, Some(grid)) => Caster::March(Marcher::new(
                grid,
                self.caster.resolution,
                self.caster.max_steps,
            )),
            _ => Caster::Exact(SegmentCaster::new(&self.boundary)),
        }
    }

    /// Render one frame into `sink`.
    pub fn frame<S: PixelSink + ?Sized>(
        &mut self,
        cmd: &InputCmd,
        elapsed_ms: f32,
        sink: &mut S,
    ) -> FrameReport {
        /* 1. live tunables & toggles ------------------------------------ */
        self.apply_actions(cmd);

        /* 2. player ------------------------------------------------------ */
        self.player.advance(cmd, elapsed_ms, self.map.bounds());

        /* 3. cast -------------------------------------------------------- */
        let screen = Screen::new(sink.width(), sink.height());
        let camera = self.player.camera(self.tunables.fov);
        self.cast_columns(camera, screen);

        /* 4. shade ------------------------------------------------------- */
        let shader = Shader::new(&self.tunables);
        let mut report = FrameReport::default();
        for (x, result) in self.results.iter().enumerate() {
            report.record(result);
            let column = match result {
                Ok(hit) => Some(self.render_column(camera, screen, x, hit)),
                Err(e) => {
                    log::debug!("column {x}: {e}");
                    None
                }
            };
            shader.draw_column(sink, screen, x, column.as_ref());
        }
        if report.misses() > 0 {
            log::trace!("{} of {} columns without a wall", report.misses(), report.columns);
        }

        /* 5. diagnostics ------------------------------------------------- */
        if self.show_diagnostics {
            let centre = self.results.get(screen.w / 2).and_then(|r| r.as_ref().ok());
            overlay::draw_minimap(sink, &self.boundary, self.map.bounds(), camera, centre);
        }

        report
    }

    /// Cast a single column against the current state without drawing.
    pub fn cast_column(&self, camera: Camera, x: usize, width: usize) -> Result<Hit, CastError> {
        let ray = Ray::new(
            camera.pos(),
            camera.column_angle(x, width),
            self.caster.max_range,
        );
        self.caster().cast(&ray)
    }

    fn cast_columns(&mut self, camera: Camera, screen: Screen) {
        let mut results = std::mem::take(&mut self.results);
        let caster = self.caster();
        let max_range = self.caster.max_range;

        (0..screen.w)
            .into_par_iter()
            .map(|x| {
                let ray = Ray::new(camera.pos(), camera.column_angle(x, screen.w), max_range);
                caster.cast(&ray)
            })
            .collect_into_vec(&mut results);
        self.results = results;
    }

    fn render_column(&self, camera: Camera, screen: Screen, x: usize, hit: &Hit) -> RenderColumn {
        let depth = if self.tunables.fisheye_correction {
            hit.distance * to_radians(camera.column_offset(x, screen.w)).cos()
        } else {
            hit.distance
        };
        RenderColumn {
            distance: hit.distance,
            depth,
            material: hit.material,
        }
    }

    fn apply_actions(&mut self, cmd: &InputCmd) {
        if cmd.wants(Actions::TOGGLE_DIAGNOSTICS) {
            self.show_diagnostics = !self.show_diagnostics;
            log::info!(
                "diagnostics {}",
                if self.show_diagnostics { "on" } else { "off" }
            );
        }

        if cmd.wants(Actions::TOGGLE_STRATEGY) {
            let next = self.caster.strategy.toggled();
            if let Err(e) = self.set_strategy(next) {
                log::warn!("cannot switch to {next}: {e}");
            }
        }

        let fov = cmd.axis(Actions::WIDEN_FOV, Actions::NARROW_FOV);
        let walls = cmd.axis(Actions::TALLER_WALLS, Actions::SHORTER_WALLS);
        if fov != 0.0 || walls != 0.0 {
            self.tunables.widen_fov(fov);
            self.tunables.grow_walls(walls);
            log::info!(
                "fov {:.0}°, wall scale {:.1}",
                self.tunables.fov,
                self.tunables.wall_scale
            );
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSpec;
    use crate::renderer::FrameBuffer;
    use crate::world::Material;
    use glam::vec2;

    fn square_config() -> Config {
        let pts = [
            vec2(-5.0, 5.0),
            vec2(5.0, 5.0),
            vec2(5.0, -5.0),
            vec2(-5.0, -5.0),
        ];
        let segments = (0..4)
            .map(|i| Segment::new(pts[i], pts[(i + 1) % 4], Material::Slate))
            .collect();
        let mut cfg = Config {
            map: MapSpec::Segments { segments },
            ..Default::default()
        };
        cfg.player.position = vec2(0.0, 0.0);
        cfg.player.respawn = vec2(0.0, 0.0);
        cfg
    }

    fn press(actions: Actions) -> InputCmd {
        InputCmd {
            actions,
            ..Default::default()
        }
    }

    #[test]
    fn every_column_hits_inside_a_closed_room() {
        let mut engine = Engine::new(&square_config()).unwrap();
        let mut fb = FrameBuffer::new(64, 32);
        let report = engine.frame(&InputCmd::default(), 16.0, &mut fb);
        assert_eq!(report.columns, 64);
        assert_eq!(report.hits, 64);
        assert_eq!(report.misses(), 0);
    }

    #[test]
    fn centre_column_distance_matches_geometry() {
        let engine = Engine::new(&square_config()).unwrap();
        let cam = engine.player().camera(engine.tunables().fov);
        // an odd width puts one column exactly on the view axis
        let hit = engine.cast_column(cam, 50, 101).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-4);
    }

    #[test]
    fn toggles_flip_state() {
        let mut engine = Engine::new(&Config::default()).unwrap();
        let mut fb = FrameBuffer::new(16, 16);

        assert!(!engine.show_diagnostics());
        engine.frame(&press(Actions::TOGGLE_DIAGNOSTICS), 0.0, &mut fb);
        assert!(engine.show_diagnostics());

        assert_eq!(engine.strategy(), Strategy::Exact);
        engine.frame(&press(Actions::TOGGLE_STRATEGY), 0.0, &mut fb);
        assert_eq!(engine.strategy(), Strategy::March);
        assert!(matches!(engine.caster(), Caster::March(_)));
    }

    #[test]
    fn march_toggle_is_refused_on_segment_maps() {
        let mut engine = Engine::new(&square_config()).unwrap();
        let mut fb = FrameBuffer::new(8, 8);
        engine.frame(&press(Actions::TOGGLE_STRATEGY), 0.0, &mut fb);
        assert_eq!(engine.strategy(), Strategy::Exact);
        assert!(matches!(
            engine.set_strategy(Strategy::March),
            Err(ConfigError::MarchNeedsGrid)
        ));
    }

    #[test]
    fn tunables_follow_actions() {
        let mut engine = Engine::new(&Config::default()).unwrap();
        let mut fb = FrameBuffer::new(8, 8);
        engine.frame(&press(Actions::WIDEN_FOV | Actions::TALLER_WALLS), 0.0, &mut fb);
        assert_eq!(engine.tunables().fov, 65.0);
        assert!((engine.tunables().wall_scale - 44.0).abs() < 1e-3);
        engine.frame(&press(Actions::NARROW_FOV), 0.0, &mut fb);
        assert_eq!(engine.tunables().fov, 60.0);
    }

    #[test]
    fn open_map_degrades_to_background() {
        // walls ahead and off to the side; nothing behind
        let mut cfg = square_config();
        cfg.map = MapSpec::Segments {
            segments: vec![
                Segment::new(vec2(-1.0, 3.0), vec2(1.0, 3.0), Material::Brick),
                Segment::new(vec2(10.0, -3.0), vec2(10.0, 3.0), Material::Brick),
            ],
        };
        cfg.player.rot = 180.0;
        let mut engine = Engine::new(&cfg).unwrap();
        let mut fb = FrameBuffer::new(32, 16);
        let report = engine.frame(&InputCmd::default(), 0.0, &mut fb);
        assert_eq!(report.no_intersection, 32);
        assert_eq!(report.hits, 0);
    }

    #[test]
    fn fisheye_correction_flattens_walls() {
        let mut cfg = square_config();
        cfg.view.fov = 90.0;
        let engine = Engine::new(&cfg).unwrap();
        let cam = engine.player().camera(90.0);
        let screen = Screen::new(100, 10);
        let depth = |x: usize| {
            let hit = engine.cast_column(cam, x, screen.w).unwrap();
            engine.render_column(cam, screen, x, &hit).depth
        };
        // a flat wall facing the camera has the same depth in every column
        assert!((depth(10) - depth(50)).abs() < 1e-3);
        assert!((depth(90) - 5.0).abs() < 1e-3);
    }
}
