use thiserror::Error;

/// Things which can go wrong while building or configuring a simulation.
///
/// Numerical trouble during a step is never reported here: coincident bodies
/// are handled by the minimum-separation clamp and an empty universe simply
/// does nothing.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("body '{name}' has invalid mass {mass} (must be positive and finite)")]
    InvalidMass { name: String, mass: f64 },

    #[error("body '{name}' has invalid visual radius {radius} (must be positive and finite)")]
    InvalidRadius { name: String, radius: f64 },

    #[error("'{0}' is not a valid hex color")]
    InvalidColor(String),

    #[error("orbital distance {0} must be positive and finite")]
    InvalidDistance(f64),

    #[error("the universe is empty, there is no primary body to orbit")]
    NoPrimary,

    #[error("the universe is full ({max} bodies)")]
    CapacityExceeded { max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unable to parse configuration")]
    Config(#[from] serde_json::Error),
}
