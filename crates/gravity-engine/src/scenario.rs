//! Default universe: the Sun and the four inner planets.
//!
//! Masses, distances and orbital speeds are real values. Visual radii are in
//! pixels and exaggerated for readability. Planets start on the -x axis and
//! move in +y.

use glam::DVec2;

use crate::components::body::{Body, BodyDesc};
use crate::components::color::Color;
use crate::error::SimError;

/// One astronomical unit in meters.
pub const AU: f64 = 1.496e11;

/// Mass given to bodies created by the "add body" action (about one Earth).
pub const DEFAULT_PLANET_MASS: f64 = 5.97e24;

struct Seed {
    name: &'static str,
    distance_au: f64,
    speed: f64,
    mass: f64,
    radius_px: f64,
    color: u32,
}

const PLANETS: [Seed; 4] = [
    Seed { name: "Earth",   distance_au: 1.0,   speed: 29_780.0, mass: 5.9742e24, radius_px: 10.0, color: 0x22A6B3 },
    Seed { name: "Mars",    distance_au: 1.524, speed: 24_077.0, mass: 6.39e23,   radius_px: 8.0,  color: 0xFF6B6B },
    Seed { name: "Mercury", distance_au: 0.387, speed: 47_362.0, mass: 3.30e23,   radius_px: 6.0,  color: 0xA5A5A5 },
    Seed { name: "Venus",   distance_au: 0.723, speed: 35_020.0, mass: 4.8685e24, radius_px: 9.0,  color: 0xE3BB76 },
];

/// The fixed central star followed by the orbiting planets.
pub fn solar_system() -> Vec<BodyDesc> {
    let mut seed = Vec::with_capacity(PLANETS.len() + 1);
    seed.push(
        BodyDesc::new("Sun", 1.98892e30, 30.0)
            .with_color(Color::from_packed(0xFDB813))
            .fixed(),
    );
    for planet in &PLANETS {
        seed.push(
            BodyDesc::new(planet.name, planet.mass, planet.radius_px)
                .with_position(DVec2::new(-planet.distance_au * AU, 0.0))
                .with_velocity(DVec2::new(0.0, planet.speed))
                .with_color(Color::from_packed(planet.color)),
        );
    }
    seed
}

/// Speed of a circular orbit of radius `distance` (m) around `primary_mass` (kg).
pub fn circular_orbit_speed(g: f64, primary_mass: f64, distance: f64) -> f64 {
    (g * primary_mass / distance).sqrt()
}

/// A planet on a circular orbit around `primary`, placed on the +x side of
/// it and moving in -y.
pub fn orbiting_body(
    g: f64,
    primary: &Body,
    name: impl Into<String>,
    distance_au: f64,
    radius_px: f64,
    color: Color,
) -> Result<BodyDesc, SimError> {
    if !(distance_au.is_finite() && distance_au > 0.0) {
        return Err(SimError::InvalidDistance(distance_au));
    }
    let distance = distance_au * AU;
    let speed = circular_orbit_speed(g, primary.mass(), distance);

    let desc = BodyDesc::new(name, DEFAULT_PLANET_MASS, radius_px)
        .with_position(primary.position() + DVec2::new(distance, 0.0))
        .with_velocity(primary.velocity() + DVec2::new(0.0, -speed))
        .with_color(color);
    desc.validate()?;
    Ok(desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gravity::G;

    #[test]
    fn seed_has_fixed_star_first() {
        let seed = solar_system();
        assert_eq!(seed.len(), 5);
        assert!(seed[0].fixed);
        assert_eq!(seed[0].name, "Sun");
        assert!(seed[1..].iter().all(|b| !b.fixed));
        for desc in &seed {
            desc.validate().unwrap();
        }
    }

    #[test]
    fn earth_speed_is_nearly_circular() {
        let seed = solar_system();
        let v = circular_orbit_speed(G, seed[0].mass, AU);
        assert!((v - seed[1].velocity.y).abs() / v < 0.01, "v_circ = {v}");
    }

    #[test]
    fn orbiting_body_uses_primary_mass() {
        let sun = Body::from_desc(solar_system().remove(0)).unwrap();
        let desc = orbiting_body(G, &sun, "Planet", 1.2, 8.0, Color::WHITE).unwrap();
        assert_eq!(desc.position, DVec2::new(1.2 * AU, 0.0));
        let expected = (G * 1.98892e30 / (1.2 * AU)).sqrt();
        assert!((desc.velocity.y + expected).abs() < 1e-9);
        assert_eq!(desc.velocity.x, 0.0);
        assert_eq!(desc.mass, DEFAULT_PLANET_MASS);
    }

    #[test]
    fn orbiting_body_rejects_bad_input() {
        let sun = Body::from_desc(solar_system().remove(0)).unwrap();
        assert!(matches!(
            orbiting_body(G, &sun, "p", 0.0, 8.0, Color::WHITE),
            Err(SimError::InvalidDistance(_))
        ));
        assert!(matches!(
            orbiting_body(G, &sun, "p", 1.0, 0.0, Color::WHITE),
            Err(SimError::InvalidRadius { .. })
        ));
    }
}
