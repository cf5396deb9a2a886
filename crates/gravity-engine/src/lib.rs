pub mod api;
pub mod core;
pub mod components;
pub mod renderer;
pub mod input;
pub mod scenario;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::sim::{Simulation, SimConfig, BodySnapshot};
pub use api::types::{BodyId, TextureHandle, SimEvent};
pub use components::body::{Body, BodyDesc, RenderStyle};
pub use components::color::Color;
pub use core::store::BodyStore;
pub use core::gravity::{Integrator, GravityParams, PairForce, G};
pub use core::time::{FixedTimestep, SimClock};
pub use renderer::camera::Camera2D;
pub use renderer::instance::{BodyInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use scenario::AU;
pub use error::SimError;
