use glam::DVec2;

use crate::api::types::BodyId;
use crate::core::store::BodyStore;
use crate::renderer::camera::Camera2D;

/// Extra slack, in pixels, added to every body's visual radius when picking.
pub const DEFAULT_TOLERANCE_PX: f64 = 5.0;

/// Find the body under a screen-space point.
///
/// Bodies are tested topmost first (reverse insertion order), so on overlap
/// the most recently added body wins. Visual radii are in pixels and do not
/// scale with zoom.
pub fn pick(store: &BodyStore, camera: &Camera2D, screen: DVec2, tolerance_px: f64) -> Option<BodyId> {
    store
        .entries()
        .rev()
        .find(|(_, body)| {
            let on_screen = camera.project(body.position());
            on_screen.distance(screen) < body.visual_radius() + tolerance_px
        })
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::BodyDesc;

    fn camera() -> Camera2D {
        // 1 pixel per meter keeps the arithmetic readable
        Camera2D::new(DVec2::new(200.0, 200.0), 1.0, 0.01, 100.0)
    }

    #[test]
    fn last_inserted_wins_on_overlap() {
        let mut store = BodyStore::new();
        let _a = store.add_desc(BodyDesc::new("A", 1.0, 10.0)).unwrap();
        let b = store
            .add_desc(BodyDesc::new("B", 1.0, 10.0).with_position(DVec2::new(4.0, 0.0)))
            .unwrap();
        let click = DVec2::new(102.0, 100.0);
        assert_eq!(pick(&store, &camera(), click, DEFAULT_TOLERANCE_PX), Some(b));
    }

    #[test]
    fn tolerance_extends_hit_radius() {
        let mut store = BodyStore::new();
        let a = store.add_desc(BodyDesc::new("A", 1.0, 10.0)).unwrap();
        let cam = camera();
        // 14 px from center: outside radius, inside radius + 5
        assert_eq!(pick(&store, &cam, DVec2::new(114.0, 100.0), 5.0), Some(a));
        assert_eq!(pick(&store, &cam, DVec2::new(114.0, 100.0), 0.0), None);
        // boundary is exclusive
        assert_eq!(pick(&store, &cam, DVec2::new(115.0, 100.0), 5.0), None);
    }

    #[test]
    fn miss_returns_none() {
        let mut store = BodyStore::new();
        store.add_desc(BodyDesc::new("A", 1.0, 3.0)).unwrap();
        assert_eq!(pick(&store, &camera(), DVec2::new(0.0, 0.0), 5.0), None);
    }

    #[test]
    fn empty_store_picks_nothing() {
        let store = BodyStore::new();
        assert_eq!(pick(&store, &camera(), DVec2::new(100.0, 100.0), 5.0), None);
    }

    #[test]
    fn hit_radius_ignores_zoom() {
        let mut store = BodyStore::new();
        let a = store
            .add_desc(BodyDesc::new("A", 1.0, 10.0).with_position(DVec2::new(50.0, 0.0)))
            .unwrap();
        let mut cam = camera();
        cam.set_scale(0.1);
        // world x=50 lands at 100 + 5 = 105
        assert_eq!(pick(&store, &cam, DVec2::new(118.0, 100.0), 5.0), Some(a));
        assert_eq!(pick(&store, &cam, DVec2::new(121.0, 100.0), 5.0), None);
    }
}
