/// Fixed timestep accumulator.
/// Turns variable real frame times into a whole number of simulation frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Real seconds per simulation frame.
    dt: f64,
    /// Accumulated real time not yet consumed by a frame.
    accumulator: f64,
}

impl FixedTimestep {
    /// Upper bound on frames run per tick, so a stalled tab does not
    /// replay minutes of backlog at once.
    pub const MAX_FRAMES_PER_TICK: u32 = 10;

    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add real frame time. Returns the number of simulation frames to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let steps = (self.accumulator / self.dt) as u32;
        if steps > Self::MAX_FRAMES_PER_TICK {
            log::debug!("dropping {:.3}s of frame backlog", self.accumulator);
            self.accumulator = 0.0;
            return Self::MAX_FRAMES_PER_TICK;
        }
        self.accumulator -= steps as f64 * self.dt;
        steps
    }
}

/// Simulation clock: how much simulated time one frame covers.
///
/// A frame advances `nominal_step * speed` simulated seconds, split into
/// `sub_steps` equal parts. Nothing advances while paused or at speed zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    nominal_step: f64,
    speed: f64,
    sub_steps: u32,
    paused: bool,
    elapsed: f64,
    frames: u64,
}

impl SimClock {
    /// Upper bound on sub-steps per frame.
    pub const MAX_SUB_STEPS: u32 = 64;

    pub fn new(nominal_step: f64, speed: f64, sub_steps: u32) -> Self {
        Self {
            nominal_step,
            speed: speed.max(0.0),
            sub_steps: sub_steps.clamp(1, Self::MAX_SUB_STEPS),
            paused: false,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Simulated seconds the next frame should cover, or `None` if the
    /// clock is stopped.
    pub fn frame_delta(&self) -> Option<f64> {
        if self.paused || self.speed == 0.0 {
            None
        } else {
            Some(self.nominal_step * self.speed)
        }
    }

    /// Record that a frame of `dt` simulated seconds was applied.
    pub fn record(&mut self, dt: f64) {
        self.elapsed += dt;
        self.frames += 1;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Negative and NaN speeds are treated as zero.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed > 0.0 { speed } else { 0.0 };
    }

    pub fn sub_steps(&self) -> u32 {
        self.sub_steps
    }

    /// Clamped to `1..=MAX_SUB_STEPS`.
    pub fn set_sub_steps(&mut self, sub_steps: u32) {
        self.sub_steps = sub_steps.clamp(1, Self::MAX_SUB_STEPS);
    }

    pub fn nominal_step(&self) -> f64 {
        self.nominal_step
    }

    /// Total simulated seconds since the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rewind elapsed time. Pause, speed and sub-steps are kept.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(-5.0), 0);
        // nothing was subtracted from the backlog
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn frame_delta_scales_with_speed() {
        let mut clock = SimClock::new(86_400.0, 1.0, 1);
        assert_eq!(clock.frame_delta(), Some(86_400.0));
        clock.set_speed(2.5);
        assert_eq!(clock.frame_delta(), Some(216_000.0));
    }

    #[test]
    fn paused_or_zero_speed_stops_the_clock() {
        let mut clock = SimClock::new(86_400.0, 1.0, 1);
        assert!(clock.toggle_pause());
        assert_eq!(clock.frame_delta(), None);
        clock.set_paused(false);
        clock.set_speed(0.0);
        assert_eq!(clock.frame_delta(), None);
    }

    #[test]
    fn bad_speed_and_sub_steps_are_sanitised() {
        let mut clock = SimClock::new(1.0, -3.0, 0);
        assert_eq!(clock.speed(), 0.0);
        assert_eq!(clock.sub_steps(), 1);
        clock.set_speed(f64::NAN);
        assert_eq!(clock.speed(), 0.0);
    }

    #[test]
    fn sub_steps_are_capped() {
        let mut clock = SimClock::new(1.0, 1.0, 1_000);
        assert_eq!(clock.sub_steps(), SimClock::MAX_SUB_STEPS);
        clock.set_sub_steps(1_000_000_000);
        assert_eq!(clock.sub_steps(), SimClock::MAX_SUB_STEPS);
        clock.set_sub_steps(64);
        assert_eq!(clock.sub_steps(), 64);
    }

    #[test]
    fn record_and_reset() {
        let mut clock = SimClock::new(10.0, 1.0, 2);
        clock.record(10.0);
        clock.record(10.0);
        assert_eq!(clock.elapsed(), 20.0);
        assert_eq!(clock.frames(), 2);
        clock.set_paused(true);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(clock.is_paused());
        assert_eq!(clock.sub_steps(), 2);
    }
}
