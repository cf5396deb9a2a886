use glam::DVec2;
use gravity_engine::renderer::instance::build_render_buffer;
use gravity_engine::{
    scenario, BodyDesc, BodyId, Color, FixedTimestep, InputEvent, InputQueue, RenderBuffer,
    SimConfig, SimError, SimEvent, Simulation,
};

use crate::inspect::Inspection;

/// Pixels the pointer must travel before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// `kind` values for `InputEvent::Custom`, sent by the UI controls.
pub mod commands {
    pub const TOGGLE_PAUSE: u32 = 1;
    /// `a` = speed multiplier.
    pub const SET_SPEED: u32 = 2;
    /// `a` = sub-steps per frame.
    pub const SET_SUB_STEPS: u32 = 3;
    /// `a` = distance (AU), `b` = radius (px), `c` = packed 0xRRGGBB color.
    pub const ADD_BODY: u32 = 4;
    pub const RESET_UNIVERSE: u32 = 5;
    pub const RESET_VIEW: u32 = 6;
    /// `a` = width, `b` = height (px).
    pub const RESIZE: u32 = 99;
}

/// `kind` values of the `SimEvent`s emitted each tick.
pub mod events {
    /// `a` = elapsed days, `b` = speed, `c` = 1 if paused.
    pub const TIME: f32 = 1.0;
    /// `a` = selected slot or -1, `b` = distance (AU), `c` = speed (km/s).
    pub const SELECTION: f32 = 2.0;
    /// `a` = number of bodies.
    pub const BODY_COUNT: f32 = 3.0;
    /// An add request was refused; `a` = requested distance (AU), 0 if unknown.
    pub const ADD_REJECTED: f32 = 4.0;
}

/// Universe mutations requested between frames.
#[derive(Debug)]
enum Command {
    Add(BodyDesc),
    Reset(Vec<BodyDesc>),
}

#[derive(Debug, Default)]
struct Drag {
    start: Option<DVec2>,
    last: DVec2,
    active: bool,
}

/// Drives one [`Simulation`] from the host's animation frames.
///
/// The bridge keeps a single runner in a `thread_local!` and forwards
/// every export to it.
pub struct SimRunner {
    sim: Simulation,
    input: InputQueue,
    pending: Vec<Command>,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    events: Vec<SimEvent>,
    max_events: usize,
    selected: Option<BodyId>,
    drag: Drag,
    added: u32,
}

impl SimRunner {
    /// A runner over the default solar system.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let timestep = FixedTimestep::new(config.frame_dt);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);
        let max_events = config.max_events;
        let sim = Simulation::solar_system(config)?;

        Ok(Self {
            sim,
            input: InputQueue::new(),
            pending: Vec::new(),
            render_buffer,
            timestep,
            events: Vec::with_capacity(max_events),
            max_events,
            selected: None,
            drag: Drag::default(),
            added: 0,
        })
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue a new body on a circular orbit around the primary. The body is
    /// validated now and joins the universe before the next physics frame.
    pub fn request_add_body(
        &mut self,
        name: impl Into<String>,
        distance_au: f64,
        radius_px: f64,
        color: Color,
    ) -> Result<(), SimError> {
        let max = self.sim.capacity();
        if self.projected_body_count() >= max {
            return Err(SimError::CapacityExceeded { max });
        }
        let primary = self.sim.store().primary().ok_or(SimError::NoPrimary)?;
        let desc = scenario::orbiting_body(
            self.sim.config().g,
            primary,
            name,
            distance_au,
            radius_px,
            color,
        )?;
        self.pending.push(Command::Add(desc));
        Ok(())
    }

    /// Queue a reset back to the default solar system.
    pub fn request_reset(&mut self) {
        self.pending.push(Command::Reset(scenario::solar_system()));
    }

    /// Body count once every queued command has been applied.
    fn projected_body_count(&self) -> usize {
        self.pending
            .iter()
            .fold(self.sim.body_count(), |count, command| match command {
                Command::Add(_) => count + 1,
                Command::Reset(seed) => seed.len(),
            })
    }

    /// Run one frame tick: handle input, apply queued changes, advance the
    /// clock, rebuild the render buffer and the UI events.
    ///
    /// Changes queued by this tick's input are applied before its physics
    /// frames run.
    pub fn tick(&mut self, dt: f32) {
        self.events.clear();

        for event in self.input.drain() {
            self.handle_input(event);
        }
        self.apply_pending();

        let frames = self.timestep.accumulate(dt as f64);
        for _ in 0..frames {
            if !self.sim.advance_frame() {
                break;
            }
        }

        if self.selected.is_some_and(|id| self.sim.body(id).is_none()) {
            self.selected = None;
        }

        build_render_buffer(
            self.sim.store(),
            self.sim.camera(),
            self.selected,
            &mut self.render_buffer,
        );
        self.emit_status();
    }

    fn apply_pending(&mut self) {
        for command in std::mem::take(&mut self.pending) {
            match command {
                Command::Add(desc) => {
                    if let Err(e) = self.sim.add_body(desc) {
                        log::warn!("add body rejected: {e}");
                        self.push_event(SimEvent::new(events::ADD_REJECTED, 0.0, 0.0, 0.0));
                    }
                }
                Command::Reset(seed) => match self.sim.reset_universe(seed) {
                    Ok(()) => self.selected = None,
                    Err(e) => log::warn!("reset rejected: {e}"),
                },
            }
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                let at = DVec2::new(x as f64, y as f64);
                self.drag = Drag {
                    start: Some(at),
                    last: at,
                    active: false,
                };
            }
            InputEvent::PointerMove { x, y } => {
                let at = DVec2::new(x as f64, y as f64);
                let Some(start) = self.drag.start else {
                    return;
                };
                if !self.drag.active && at.distance(start) > DRAG_THRESHOLD_PX {
                    self.drag.active = true;
                }
                if self.drag.active {
                    self.sim.camera_mut().pan_by(at - self.drag.last);
                    self.drag.last = at;
                }
            }
            InputEvent::PointerUp { x, y } => {
                let was_drag = self.drag.active;
                let pressed = self.drag.start.is_some();
                self.drag = Drag::default();
                if pressed && !was_drag {
                    self.selected = self.sim.hit_test(DVec2::new(x as f64, y as f64));
                }
            }
            InputEvent::Wheel { delta, x, y } => {
                self.sim
                    .camera_mut()
                    .zoom_at(DVec2::new(x as f64, y as f64), delta as f64);
            }
            InputEvent::Custom { kind, a, b, c } => self.handle_command(kind, a, b, c),
        }
    }

    fn handle_command(&mut self, kind: u32, a: f32, b: f32, c: f32) {
        match kind {
            commands::TOGGLE_PAUSE => {
                let paused = self.sim.clock_mut().toggle_pause();
                log::debug!("paused: {paused}");
            }
            commands::SET_SPEED => {
                self.sim.clock_mut().set_speed(a as f64);
                log::debug!("speed: {}", self.sim.clock().speed());
            }
            commands::SET_SUB_STEPS => {
                self.sim.clock_mut().set_sub_steps(a as u32);
                log::debug!("sub-steps: {}", self.sim.clock().sub_steps());
            }
            commands::ADD_BODY => {
                self.added += 1;
                let name = format!("Planet {}", self.added);
                let color = Color::from_packed(c as u32);
                if let Err(e) = self.request_add_body(name, a as f64, b as f64, color) {
                    log::warn!("add body rejected: {e}");
                    self.push_event(SimEvent::new(events::ADD_REJECTED, a, 0.0, 0.0));
                }
            }
            commands::RESET_UNIVERSE => self.request_reset(),
            commands::RESET_VIEW => self.sim.camera_mut().reset_view(),
            commands::RESIZE => {
                if a > 0.0 && b > 0.0 {
                    self.sim.camera_mut().resize(a as f64, b as f64);
                }
            }
            other => log::warn!("unknown command kind {other}"),
        }
    }

    fn push_event(&mut self, event: SimEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        }
    }

    fn emit_status(&mut self) {
        let clock = self.sim.clock();
        let time = SimEvent::new(
            events::TIME,
            (clock.elapsed() / 86_400.0) as f32,
            clock.speed() as f32,
            if clock.is_paused() { 1.0 } else { 0.0 },
        );
        let count = SimEvent::new(events::BODY_COUNT, self.sim.body_count() as f32, 0.0, 0.0);
        let selection = match self.inspection() {
            Some((id, info)) => SimEvent::new(
                events::SELECTION,
                id.index as f32,
                info.distance_au as f32,
                info.speed_km_s as f32,
            ),
            None => SimEvent::new(events::SELECTION, -1.0, 0.0, 0.0),
        };
        self.push_event(time);
        self.push_event(count);
        self.push_event(selection);
    }

    fn inspection(&self) -> Option<(BodyId, Inspection)> {
        let id = self.selected?;
        let body = self.sim.inspect(id)?;
        let primary = self.sim.store().id_at(0).and_then(|p| self.sim.inspect(p));
        Some((id, Inspection::new(&body, primary.as_ref())))
    }

    /// The selected body's panel data as JSON, `null` when nothing is selected.
    pub fn selection_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.inspection().map(|(_, info)| info))
    }

    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.sim.snapshot())
    }

    // ---- Pointer accessors for host reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn max_instances(&self) -> u32 {
        self.sim.capacity() as u32
    }

    pub fn instances(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }
}
