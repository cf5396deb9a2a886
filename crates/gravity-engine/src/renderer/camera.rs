use glam::DVec2;

/// 2D view onto the simulated plane.
///
/// `screen = world * scale + view_center`, where
/// `view_center = viewport / 2 + pan`. `scale` is pixels per meter and is
/// kept inside `[min_scale, max_scale]` by every zoom operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Pixels per meter.
    scale: f64,
    /// Offset of the world origin from the viewport center, in pixels.
    pub pan: DVec2,
    /// Canvas size in pixels.
    pub viewport: DVec2,
    min_scale: f64,
    max_scale: f64,
    /// Wheel units to log-scale factor: `scale *= exp(-delta * sensitivity)`.
    pub zoom_sensitivity: f64,
    /// Scale restored by [`Camera2D::reset_view`].
    home_scale: f64,
}

impl Camera2D {
    pub fn new(viewport: DVec2, scale: f64, min_scale: f64, max_scale: f64) -> Self {
        let scale = scale.clamp(min_scale, max_scale);
        Self {
            scale,
            pan: DVec2::ZERO,
            viewport,
            min_scale,
            max_scale,
            zoom_sensitivity: 0.001,
            home_scale: scale,
        }
    }

    pub fn with_zoom_sensitivity(mut self, sensitivity: f64) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scale_bounds(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Set the scale directly, clamped to the configured range.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            return;
        }
        self.scale = scale.clamp(self.min_scale, self.max_scale);
    }

    /// Screen position of the world origin.
    pub fn view_center(&self) -> DVec2 {
        self.viewport * 0.5 + self.pan
    }

    /// World (meters) to screen (pixels).
    pub fn project(&self, world: DVec2) -> DVec2 {
        world * self.scale + self.view_center()
    }

    /// Screen (pixels) to world (meters). Exact inverse of [`Camera2D::project`].
    pub fn unproject(&self, screen: DVec2) -> DVec2 {
        (screen - self.view_center()) / self.scale
    }

    /// Multiplicative zoom about the view center.
    /// Positive wheel deltas zoom out, negative zoom in.
    pub fn zoom_by_wheel(&mut self, wheel_delta: f64) {
        self.set_scale(self.scale * (-wheel_delta * self.zoom_sensitivity).exp());
    }

    /// Zoom while keeping the world point under `screen` in place.
    pub fn zoom_at(&mut self, screen: DVec2, wheel_delta: f64) {
        let anchor = self.unproject(screen);
        self.zoom_by_wheel(wheel_delta);
        // screen = anchor * scale + viewport / 2 + pan  =>  solve for pan
        self.pan = screen - anchor * self.scale - self.viewport * 0.5;
    }

    /// Shift the view by a screen-space delta (drag-to-pan).
    pub fn pan_by(&mut self, delta: DVec2) {
        self.pan += delta;
    }

    /// Resize the viewport (e.g. on window resize). The world origin stays
    /// at the same offset from the new center.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
    }

    /// Back to the initial scale with the world origin centered.
    pub fn reset_view(&mut self) {
        self.pan = DVec2::ZERO;
        self.scale = self.home_scale;
    }
}
