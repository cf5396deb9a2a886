use glam::DVec2;

use crate::api::types::TextureHandle;
use crate::components::color::Color;
use crate::error::SimError;

/// How a body is drawn. Resolved once when the body is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderStyle {
    /// Filled circle.
    Solid(Color),
    /// Host-loaded image. `tint` is used as the fill until the image is ready.
    Textured { texture: TextureHandle, tint: Color },
}

impl RenderStyle {
    pub fn color(&self) -> Color {
        match *self {
            RenderStyle::Solid(color) => color,
            RenderStyle::Textured { tint, .. } => tint,
        }
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        match *self {
            RenderStyle::Solid(_) => None,
            RenderStyle::Textured { texture, .. } => Some(texture),
        }
    }
}

/// Description of a body before it enters the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub name: String,
    /// Position in meters.
    pub position: DVec2,
    /// Velocity in meters per second. Ignored for fixed bodies.
    pub velocity: DVec2,
    /// Mass in kilograms.
    pub mass: f64,
    /// On-screen radius in pixels.
    pub visual_radius: f64,
    pub color: Color,
    pub texture: Option<TextureHandle>,
    pub fixed: bool,
}

impl BodyDesc {
    pub fn new(name: impl Into<String>, mass: f64, visual_radius: f64) -> Self {
        Self {
            name: name.into(),
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            mass,
            visual_radius,
            color: Color::WHITE,
            texture: None,
            fixed: false,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Pin the body in place. It still attracts everything else.
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Check the construction contract without building anything.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::InvalidMass {
                name: self.name.clone(),
                mass: self.mass,
            });
        }
        if !(self.visual_radius.is_finite() && self.visual_radius > 0.0) {
            return Err(SimError::InvalidRadius {
                name: self.name.clone(),
                radius: self.visual_radius,
            });
        }
        Ok(())
    }
}

/// A point mass. Only constructible through [`Body::from_desc`], which
/// enforces positive mass and visual radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    pub(crate) position: DVec2,
    pub(crate) velocity: DVec2,
    mass: f64,
    visual_radius: f64,
    style: RenderStyle,
    fixed: bool,
}

impl Body {
    pub fn from_desc(desc: BodyDesc) -> Result<Self, SimError> {
        desc.validate()?;
        let style = match desc.texture {
            Some(texture) => RenderStyle::Textured {
                texture,
                tint: desc.color,
            },
            None => RenderStyle::Solid(desc.color),
        };
        // A fixed body never moves, so its stored velocity is zero.
        let velocity = if desc.fixed { DVec2::ZERO } else { desc.velocity };
        Ok(Self {
            name: desc.name,
            position: desc.position,
            velocity,
            mass: desc.mass,
            visual_radius: desc.visual_radius,
            style,
            fixed: desc.fixed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn visual_radius(&self) -> f64 {
        self.visual_radius
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Speed magnitude in m/s.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}
