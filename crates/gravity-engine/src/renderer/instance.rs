use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyId;
use crate::core::store::BodyStore;
use crate::renderer::camera::Camera2D;

/// Per-body render data read by the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// X position in screen pixels.
    pub x: f32,
    /// Y position in screen pixels.
    pub y: f32,
    /// Radius in screen pixels.
    pub radius: f32,
    /// Texture handle, or -1.0 for a plain filled circle.
    pub texture: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Bit set of `FLAG_*` values.
    pub flags: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Fixed body: drawn with a glow.
    pub const FLAG_FIXED: u32 = 1;
    /// Currently selected in the inspection panel.
    pub const FLAG_SELECTED: u32 = 1 << 1;
    /// Draw the name label under the body.
    pub const FLAG_LABEL: u32 = 1 << 2;

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Render buffer holding one instance per body, in draw order.
pub struct RenderBuffer {
    instances: Vec<BodyInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild `buffer` from the store. Insertion order is kept, so later bodies
/// draw on top. Every body is written, on screen or not, so instance `i`
/// always belongs to body `i`.
pub fn build_render_buffer(
    store: &BodyStore,
    camera: &Camera2D,
    selected: Option<BodyId>,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();
    for (id, body) in store.entries() {
        let screen = camera.project(body.position());
        let style = body.style();
        let color = style.color();

        let mut flags = 0;
        if body.is_fixed() {
            flags |= BodyInstance::FLAG_FIXED;
        } else {
            flags |= BodyInstance::FLAG_LABEL;
        }
        if selected == Some(id) {
            flags |= BodyInstance::FLAG_SELECTED;
        }

        buffer.push(BodyInstance {
            x: screen.x as f32,
            y: screen.y as f32,
            radius: body.visual_radius() as f32,
            texture: style.texture().map(|t| t.0 as f32).unwrap_or(-1.0),
            r: color.r,
            g: color.g,
            b: color.b,
            flags: flags as f32,
        });
    }
}
