use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{BodyId, TextureHandle};
use crate::components::body::{Body, BodyDesc};
use crate::components::color::Color;
use crate::core::gravity::{GravityParams, Integrator, G};
use crate::core::store::BodyStore;
use crate::core::time::SimClock;
use crate::error::SimError;
use crate::renderer::camera::Camera2D;
use crate::renderer::picking;
use crate::scenario::{self, AU};

/// Simulation configuration. Every field has a default, so `{}` is a valid
/// config and hosts only send what they want to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravitational constant (default: 6.67430e-11).
    pub g: f64,
    /// Simulated seconds per frame at speed 1 (default: one day).
    pub nominal_step: f64,
    /// Sub-steps per frame (default: 1).
    pub sub_steps: u32,
    /// Speed multiplier applied to `nominal_step` (default: 1).
    pub speed: f64,
    /// Real seconds per simulation frame (default: 1/60).
    pub frame_dt: f64,
    /// Canvas width in pixels (default: 800).
    pub viewport_width: f64,
    /// Canvas height in pixels (default: 600).
    pub viewport_height: f64,
    /// Initial zoom, in pixels per astronomical unit (default: 250).
    pub pixels_per_au: f64,
    /// Lower zoom bound as a fraction of the initial zoom (default: 1/20).
    pub min_zoom: f64,
    /// Upper zoom bound as a multiple of the initial zoom (default: 100).
    pub max_zoom: f64,
    /// Wheel units to log-zoom factor (default: 0.001).
    pub zoom_sensitivity: f64,
    /// Pixels added to every visual radius when picking (default: 5).
    pub hit_tolerance_px: f64,
    /// Clamp floor as a fraction of the summed visual radii (default: 0.1).
    pub softening: f64,
    /// Meters per pixel of visual radius in the clamp (default: AU / 250).
    pub softening_meters_per_pixel: f64,
    /// Maximum number of bodies, and so of render instances (default: 256).
    /// Adds and resets beyond it are rejected.
    pub max_instances: usize,
    /// Maximum number of UI events per frame (default: 32).
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            g: G,
            nominal_step: 86_400.0,
            sub_steps: 1,
            speed: 1.0,
            frame_dt: 1.0 / 60.0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            pixels_per_au: 250.0,
            min_zoom: 1.0 / 20.0,
            max_zoom: 100.0,
            zoom_sensitivity: 0.001,
            hit_tolerance_px: picking::DEFAULT_TOLERANCE_PX,
            softening: 0.1,
            softening_meters_per_pixel: AU / 250.0,
            max_instances: 256,
            max_events: 32,
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl SimConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let checks: [(&str, bool); 13] = [
            ("g", positive(self.g)),
            ("nominal_step", positive(self.nominal_step)),
            ("speed", non_negative(self.speed)),
            ("frame_dt", positive(self.frame_dt)),
            ("viewport_width", positive(self.viewport_width)),
            ("viewport_height", positive(self.viewport_height)),
            ("pixels_per_au", positive(self.pixels_per_au)),
            ("min_zoom", positive(self.min_zoom) && self.min_zoom <= 1.0),
            ("max_zoom", positive(self.max_zoom) && self.max_zoom >= 1.0),
            ("zoom_sensitivity", non_negative(self.zoom_sensitivity)),
            ("hit_tolerance_px", non_negative(self.hit_tolerance_px)),
            ("softening", non_negative(self.softening)),
            ("softening_meters_per_pixel", positive(self.softening_meters_per_pixel)),
        ];
        if let Some((field, _)) = checks.iter().find(|(_, ok)| !ok) {
            return Err(SimError::InvalidConfig(format!("'{field}' is out of range")));
        }
        if !(1..=SimClock::MAX_SUB_STEPS).contains(&self.sub_steps) {
            return Err(SimError::InvalidConfig(format!(
                "'sub_steps' must be between 1 and {}",
                SimClock::MAX_SUB_STEPS
            )));
        }
        if self.max_instances == 0 {
            return Err(SimError::InvalidConfig("'max_instances' must be at least 1".into()));
        }
        Ok(())
    }

    /// Initial camera scale in pixels per meter.
    pub fn base_scale(&self) -> f64 {
        self.pixels_per_au / AU
    }

    pub fn gravity_params(&self) -> GravityParams {
        GravityParams {
            g: self.g,
            meters_per_pixel: self.softening_meters_per_pixel,
            softening: self.softening,
        }
    }

    pub fn camera(&self) -> Camera2D {
        let base = self.base_scale();
        Camera2D::new(
            DVec2::new(self.viewport_width, self.viewport_height),
            base,
            base * self.min_zoom,
            base * self.max_zoom,
        )
        .with_zoom_sensitivity(self.zoom_sensitivity)
    }

    pub fn clock(&self) -> SimClock {
        SimClock::new(self.nominal_step, self.speed, self.sub_steps)
    }
}

/// Read-only view of one body, for inspection panels and the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub name: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub visual_radius: f64,
    pub color: Color,
    pub fixed: bool,
    pub texture: Option<TextureHandle>,
}

impl BodySnapshot {
    fn capture(id: BodyId, body: &Body) -> Self {
        let style = body.style();
        Self {
            id,
            name: body.name().to_owned(),
            position: body.position(),
            velocity: body.velocity(),
            mass: body.mass(),
            visual_radius: body.visual_radius(),
            color: style.color(),
            fixed: body.is_fixed(),
            texture: style.texture(),
        }
    }
}

/// One universe plus the view onto it.
///
/// Owns the body store, the integrator scratch space, the camera and the
/// clock. Nothing here is global; a host may run as many simulations as it
/// likes.
pub struct Simulation {
    config: SimConfig,
    store: BodyStore,
    integrator: Integrator,
    camera: Camera2D,
    clock: SimClock,
}

impl Simulation {
    /// An empty universe.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            store: BodyStore::with_capacity(config.max_instances),
            integrator: Integrator::new(config.gravity_params()),
            camera: config.camera(),
            clock: config.clock(),
            config,
        })
    }

    /// A universe populated from `seed`.
    pub fn with_seed(config: SimConfig, seed: Vec<BodyDesc>) -> Result<Self, SimError> {
        let mut sim = Self::new(config)?;
        sim.reset_universe(seed)?;
        Ok(sim)
    }

    /// The default solar system.
    pub fn solar_system(config: SimConfig) -> Result<Self, SimError> {
        Self::with_seed(config, scenario::solar_system())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Append a body. It joins the next step.
    pub fn add_body(&mut self, desc: BodyDesc) -> Result<BodyId, SimError> {
        if self.store.len() >= self.config.max_instances {
            return Err(SimError::CapacityExceeded {
                max: self.config.max_instances,
            });
        }
        let id = self.store.add_desc(desc)?;
        if let Some(body) = self.store.get(id) {
            log::debug!("added body '{}' at slot {}", body.name(), id.index);
        }
        Ok(id)
    }

    /// Append a body on a circular orbit around the primary (first) body.
    pub fn add_orbiting_body(
        &mut self,
        name: impl Into<String>,
        distance_au: f64,
        radius_px: f64,
        color: Color,
    ) -> Result<BodyId, SimError> {
        let primary = self.store.primary().ok_or(SimError::NoPrimary)?;
        let desc = scenario::orbiting_body(
            self.integrator.params().g,
            primary,
            name,
            distance_au,
            radius_px,
            color,
        )?;
        self.add_body(desc)
    }

    /// Replace every body with `seed`. All-or-nothing: if any entry is
    /// invalid the current universe is left untouched. Previously issued ids
    /// stop resolving and the clock rewinds to zero.
    pub fn reset_universe(&mut self, seed: Vec<BodyDesc>) -> Result<(), SimError> {
        if seed.len() > self.config.max_instances {
            return Err(SimError::CapacityExceeded {
                max: self.config.max_instances,
            });
        }
        self.store.reset(seed)?;
        self.clock.reset();
        log::info!(
            "universe reset: {} bodies (epoch {})",
            self.store.len(),
            self.store.epoch()
        );
        Ok(())
    }

    /// Advance physics by `dt` simulated seconds split into `sub_steps`.
    pub fn step(&mut self, dt: f64, sub_steps: u32) {
        self.integrator.step(&mut self.store, dt, sub_steps);
    }

    /// Run one clock-driven frame. Returns false if the clock is stopped.
    pub fn advance_frame(&mut self) -> bool {
        let Some(dt) = self.clock.frame_delta() else {
            return false;
        };
        self.integrator.step(&mut self.store, dt, self.clock.sub_steps());
        self.clock.record(dt);
        true
    }

    pub fn project(&self, world: DVec2) -> DVec2 {
        self.camera.project(world)
    }

    pub fn unproject(&self, screen: DVec2) -> DVec2 {
        self.camera.unproject(screen)
    }

    /// Topmost body under a screen point, if any.
    pub fn hit_test(&self, screen: DVec2) -> Option<BodyId> {
        picking::pick(&self.store, &self.camera, screen, self.config.hit_tolerance_px)
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.store
            .entries()
            .map(|(id, body)| BodySnapshot::capture(id, body))
            .collect()
    }

    /// Snapshot of a single body. `None` for stale ids.
    pub fn inspect(&self, id: BodyId) -> Option<BodySnapshot> {
        self.store.get(id).map(|body| BodySnapshot::capture(id, body))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.store.get(id)
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    pub fn body_count(&self) -> usize {
        self.store.len()
    }

    /// Most bodies the universe will hold.
    pub fn capacity(&self) -> usize {
        self.config.max_instances
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    /// Simulated seconds since the last reset.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }
}
