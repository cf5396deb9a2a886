use gravity_engine::{BodySnapshot, AU};
use serde::Serialize;

/// What the inspection panel shows for the selected body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub name: String,
    /// Distance from the primary body in astronomical units.
    pub distance_au: f64,
    pub speed_km_s: f64,
    pub mass_kg: f64,
    /// Mass in scientific notation, e.g. `"5.974e24 kg"`.
    pub mass_label: String,
    pub fixed: bool,
}

impl Inspection {
    /// Build the panel data for `body`. Distance is measured from `primary`;
    /// with no primary it is zero.
    pub fn new(body: &BodySnapshot, primary: Option<&BodySnapshot>) -> Self {
        let distance_au = primary
            .map(|p| body.position.distance(p.position) / AU)
            .unwrap_or(0.0);
        Self {
            name: body.name.clone(),
            distance_au,
            speed_km_s: body.velocity.length() / 1000.0,
            mass_kg: body.mass,
            mass_label: mass_label(body.mass),
            fixed: body.fixed,
        }
    }
}

pub fn mass_label(mass_kg: f64) -> String {
    format!("{mass_kg:.3e} kg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravity_engine::{SimConfig, Simulation};

    #[test]
    fn mass_label_is_scientific() {
        assert_eq!(mass_label(5.9742e24), "5.974e24 kg");
        assert_eq!(mass_label(1.98892e30), "1.989e30 kg");
    }

    #[test]
    fn earth_inspection() {
        let sim = Simulation::solar_system(SimConfig::default()).unwrap();
        let snapshot = sim.snapshot();
        let info = Inspection::new(&snapshot[1], snapshot.first());
        assert_eq!(info.name, "Earth");
        assert!((info.distance_au - 1.0).abs() < 1e-12);
        assert!((info.speed_km_s - 29.78).abs() < 1e-9);
        assert_eq!(info.mass_label, "5.974e24 kg");
        assert!(!info.fixed);
    }

    #[test]
    fn primary_is_at_zero_distance() {
        let sim = Simulation::solar_system(SimConfig::default()).unwrap();
        let snapshot = sim.snapshot();
        let info = Inspection::new(&snapshot[0], snapshot.first());
        assert_eq!(info.distance_au, 0.0);
        assert_eq!(info.speed_km_s, 0.0);
        assert!(info.fixed);
    }
}
