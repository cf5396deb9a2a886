//! Pairwise Newtonian gravity and the semi-implicit Euler stepper.
//!
//! Every non-fixed body sums the pull of every other body (ordered pairs,
//! O(n²) per sub-step). Velocity deltas are collected into a separate buffer
//! and committed for all bodies before any position moves.

use glam::DVec2;

use crate::components::body::Body;
use crate::core::store::BodyStore;

/// Gravitational constant in m³·kg⁻¹·s⁻².
pub const G: f64 = 6.67430e-11;

/// Force-law parameters, including the minimum-separation clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityParams {
    /// Gravitational constant.
    pub g: f64,
    /// Meters represented by one pixel of visual radius when computing the clamp.
    pub meters_per_pixel: f64,
    /// Fraction of the summed visual radii used as the clamp floor.
    /// Zero disables the clamp.
    pub softening: f64,
}

impl GravityParams {
    /// Distance floor for a pair with the given visual radii (pixels).
    pub fn min_separation(&self, radius_a: f64, radius_b: f64) -> f64 {
        (radius_a + radius_b) * self.meters_per_pixel * self.softening
    }
}

impl Default for GravityParams {
    fn default() -> Self {
        Self {
            g: G,
            meters_per_pixel: crate::scenario::AU / 250.0,
            softening: 0.1,
        }
    }
}

/// Gravitational pull on one body due to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    /// True separation in meters.
    pub raw_distance: f64,
    /// Separation used in the force law (never below the clamp floor).
    pub distance: f64,
    /// Force magnitude in newtons.
    pub magnitude: f64,
    /// Direction of the pull, from the unclamped offset.
    pub angle: f64,
}

impl PairForce {
    /// Force vector in newtons.
    pub fn vector(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin()) * self.magnitude
    }

    /// Whether the minimum-separation floor replaced the true distance.
    pub fn clamped(&self) -> bool {
        self.distance > self.raw_distance
    }
}

/// Force on `a` due to `b`.
pub fn pair_force(params: &GravityParams, a: &Body, b: &Body) -> PairForce {
    let offset = b.position - a.position;
    let raw_distance = offset.length();

    let floor = params.min_separation(a.visual_radius(), b.visual_radius());
    let distance = if raw_distance < floor { floor } else { raw_distance };

    let magnitude = params.g * a.mass() * b.mass() / (distance * distance);
    // Direction comes from the true offset even when the distance is clamped.
    let angle = offset.y.atan2(offset.x);

    PairForce {
        raw_distance,
        distance,
        magnitude,
        angle,
    }
}

/// Fixed-step gravity integrator.
///
/// Keeps a scratch buffer of velocity deltas between calls so stepping does
/// not allocate once the body count settles.
#[derive(Debug, Clone)]
pub struct Integrator {
    params: GravityParams,
    dv: Vec<DVec2>,
}

impl Integrator {
    pub fn new(params: GravityParams) -> Self {
        Self {
            params,
            dv: Vec::new(),
        }
    }

    pub fn params(&self) -> &GravityParams {
        &self.params
    }

    pub fn set_params(&mut self, params: GravityParams) {
        self.params = params;
    }

    /// Advance every body by `dt` seconds using `sub_steps` equal sub-steps.
    /// `sub_steps == 0` is treated as 1. An empty store is left alone.
    pub fn step(&mut self, store: &mut BodyStore, dt: f64, sub_steps: u32) {
        if store.is_empty() {
            return;
        }
        let k = sub_steps.max(1);
        let h = dt / k as f64;
        for _ in 0..k {
            self.sub_step(store.as_mut_slice(), h);
        }
    }

    fn sub_step(&mut self, bodies: &mut [Body], h: f64) {
        let n = bodies.len();
        self.dv.clear();
        self.dv.resize(n, DVec2::ZERO);

        // Velocity deltas from the positions at the start of the sub-step
        for i in 0..n {
            let bi = &bodies[i];
            if bi.is_fixed() {
                continue;
            }
            let mut dv = DVec2::ZERO;
            for (j, bj) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                let f = pair_force(&self.params, bi, bj);
                let accel = f.magnitude / bi.mass();
                dv.x += f.angle.cos() * accel * h;
                dv.y += f.angle.sin() * accel * h;
            }
            self.dv[i] = dv;
        }

        // Commit every velocity before any position moves
        for (body, dv) in bodies.iter_mut().zip(self.dv.iter()) {
            if !body.is_fixed() {
                body.velocity += *dv;
            }
        }

        for body in bodies.iter_mut() {
            if !body.is_fixed() {
                body.position += body.velocity * h;
            }
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(GravityParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::BodyDesc;
    use crate::scenario::AU;

    fn body(desc: BodyDesc) -> Body {
        Body::from_desc(desc).unwrap()
    }

    #[test]
    fn pair_force_is_equal_and_opposite() {
        let params = GravityParams::default();
        let a = body(BodyDesc::new("a", 5.0e24, 10.0).with_position(DVec2::new(0.3 * AU, -0.2 * AU)));
        let b = body(BodyDesc::new("b", 7.0e23, 6.0).with_position(DVec2::new(-1.1 * AU, 0.9 * AU)));

        let ab = pair_force(&params, &a, &b);
        let ba = pair_force(&params, &b, &a);
        assert!(!ab.clamped() && !ba.clamped());

        let sum = ab.vector() + ba.vector();
        let scale = ab.magnitude;
        assert!(sum.length() / scale < 1e-12, "net force {sum:?} vs {scale}");
        assert!((ab.magnitude - ba.magnitude).abs() / scale < 1e-15);
    }

    #[test]
    fn pair_force_matches_newton() {
        let params = GravityParams::default();
        let a = body(BodyDesc::new("a", 2.0e30, 30.0));
        let b = body(BodyDesc::new("b", 6.0e24, 10.0).with_position(DVec2::new(AU, 0.0)));
        let f = pair_force(&params, &a, &b);
        let expected = G * 2.0e30 * 6.0e24 / (AU * AU);
        assert!((f.magnitude - expected).abs() / expected < 1e-12);
        assert!(f.angle.abs() < 1e-15, "pull should point along +x");
    }

    #[test]
    fn clamp_uses_floor_but_keeps_direction() {
        let params = GravityParams::default();
        let a = body(BodyDesc::new("a", 1.0e24, 10.0));
        let b = body(BodyDesc::new("b", 1.0e24, 10.0).with_position(DVec2::new(0.0, 1.0e6)));
        let f = pair_force(&params, &a, &b);
        let floor = params.min_separation(10.0, 10.0);
        assert!(f.clamped());
        assert_eq!(f.distance, floor);
        assert!((f.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn coincident_bodies_stay_finite() {
        let mut store = BodyStore::new();
        store.add_desc(BodyDesc::new("a", 5.0e24, 10.0)).unwrap();
        store.add_desc(BodyDesc::new("b", 5.0e24, 10.0)).unwrap();

        let params = GravityParams::default();
        let f = pair_force(&params, &store.as_slice()[0], &store.as_slice()[1]);
        assert_eq!(f.raw_distance, 0.0);
        assert!(f.distance >= params.min_separation(10.0, 10.0));

        let mut integrator = Integrator::new(params);
        for _ in 0..10 {
            integrator.step(&mut store, 86_400.0, 4);
        }
        for b in store.iter() {
            assert!(b.position().is_finite(), "position blew up: {:?}", b.position());
            assert!(b.velocity().is_finite(), "velocity blew up: {:?}", b.velocity());
        }
    }

    #[test]
    fn fixed_body_never_moves() {
        let mut store = BodyStore::new();
        let sun = store
            .add_desc(BodyDesc::new("sun", 1.0, 5.0).with_position(DVec2::new(3.0, 4.0)).fixed())
            .unwrap();
        // Heavy neighbour right on top of it
        store
            .add_desc(BodyDesc::new("heavy", 1.0e35, 5.0).with_position(DVec2::new(3.0, 4.5)))
            .unwrap();

        let before = store.get(sun).unwrap().clone();
        let mut integrator = Integrator::default();
        for dt in [1.0, 3600.0, 86_400.0, -50.0] {
            integrator.step(&mut store, dt, 3);
        }
        let after = store.get(sun).unwrap();
        assert_eq!(after.position(), before.position());
        assert_eq!(after.velocity(), before.velocity());
    }

    #[test]
    fn single_body_only_drifts() {
        let mut store = BodyStore::new();
        let id = store
            .add_desc(BodyDesc::new("lone", 1.0e20, 3.0).with_velocity(DVec2::new(10.0, -2.0)))
            .unwrap();
        let mut integrator = Integrator::default();
        integrator.step(&mut store, 100.0, 4);

        let b = store.get(id).unwrap();
        assert_eq!(b.velocity(), DVec2::new(10.0, -2.0));
        assert!((b.position() - DVec2::new(1000.0, -200.0)).length() < 1e-9);
    }

    #[test]
    fn single_body_at_rest_stays_put() {
        let mut store = BodyStore::new();
        let id = store.add_desc(BodyDesc::new("rock", 1.0, 1.0)).unwrap();
        Integrator::default().step(&mut store, 1.0e6, 2);
        assert_eq!(store.get(id).unwrap().position(), DVec2::ZERO);
    }

    #[test]
    fn empty_store_is_a_no_op() {
        let mut store = BodyStore::new();
        Integrator::default().step(&mut store, 1.0, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn zero_sub_steps_behaves_like_one() {
        let seed = || {
            let mut store = BodyStore::new();
            store.add_desc(BodyDesc::new("sun", 2.0e30, 30.0).fixed()).unwrap();
            store
                .add_desc(
                    BodyDesc::new("p", 6.0e24, 10.0)
                        .with_position(DVec2::new(AU, 0.0))
                        .with_velocity(DVec2::new(0.0, 29_780.0)),
                )
                .unwrap();
            store
        };
        let mut a = seed();
        let mut b = seed();
        Integrator::default().step(&mut a, 86_400.0, 0);
        Integrator::default().step(&mut b, 86_400.0, 1);
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn velocity_pass_completes_before_positions_move() {
        // Two free bodies: each must feel the other's *old* position.
        let mut store = BodyStore::new();
        store
            .add_desc(BodyDesc::new("a", 1.0e24, 1.0).with_position(DVec2::new(-AU, 0.0)))
            .unwrap();
        store
            .add_desc(BodyDesc::new("b", 1.0e24, 1.0).with_position(DVec2::new(AU, 0.0)))
            .unwrap();
        Integrator::default().step(&mut store, 86_400.0, 1);

        let [a, b] = store.as_slice() else { unreachable!() };
        // Symmetric start => mirror-symmetric result
        assert!((a.velocity().x + b.velocity().x).abs() < 1e-12);
        assert!((a.position().x + b.position().x).abs() < 1e-3);
        assert!(a.velocity().x > 0.0);
    }

    #[test]
    fn sub_stepping_tracks_the_same_orbit() {
        // Solar mass, so 29780 m/s is a near-circular orbit. With a 1e30 kg
        // primary the same start is barely bound and k=1 and k=4 drift apart
        // by about 2% of r within a year.
        let seed = || {
            let mut store = BodyStore::new();
            store.add_desc(BodyDesc::new("primary", 1.98892e30, 30.0).fixed()).unwrap();
            store
                .add_desc(
                    BodyDesc::new("planet", 5.97e24, 10.0)
                        .with_position(DVec2::new(1.496e11, 0.0))
                        .with_velocity(DVec2::new(0.0, 29_780.0)),
                )
                .unwrap();
            store
        };

        let radius = 1.496e11;
        let mut coarse = seed();
        let mut fine = seed();
        let mut integrator = Integrator::default();
        for _ in 0..365 {
            integrator.step(&mut coarse, 86_400.0, 1);
            integrator.step(&mut fine, 86_400.0, 4);

            for store in [&coarse, &fine] {
                let r = store.as_slice()[1].position().length();
                assert!((r - radius).abs() < 0.05 * radius, "orbit drifted to {r}");
            }
        }

        let gap = (coarse.as_slice()[1].position() - fine.as_slice()[1].position()).length();
        assert!(gap < 0.01 * radius, "k=1 and k=4 diverged by {gap} m");
    }
}
