use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Handle to a body stored in a [`BodyStore`](crate::core::store::BodyStore).
///
/// `index` is the arena slot (insertion order). `epoch` is the store generation
/// the id was issued in; a reset bumps the epoch so stale ids stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BodyId {
    pub index: u32,
    pub epoch: u32,
}

/// Opaque reference to an image loaded by the host.
/// The core never looks inside it; it only knows whether one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(transparent)]
pub struct TextureHandle(pub u32);

/// An event communicated from Rust to the UI layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SimEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
