use glam::{Mat4, Vec3};

use super::{Rect, Viewport};

/// Orthographic pixel-to-NDC projection.
///
/// Maps `(0, 0)..(width, height)` in logical pixels (top-left origin, +Y down)
/// onto the `[-1, 1]` clip cube with Y inverted, so pixel "down" is screen
/// "down". Call [`update`](Self::update) on window creation and on every
/// resize before drawing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    viewport: Viewport,
    matrix: Mat4,
}

impl Projection {
    /// Builds a projection for `viewport`.
    ///
    /// An invalid viewport yields the identity matrix until the next valid
    /// `update`.
    pub fn new(viewport: Viewport) -> Self {
        let mut projection = Self {
            viewport: Viewport::default(),
            matrix: Mat4::IDENTITY,
        };
        projection.update(viewport);
        projection
    }

    /// Recomputes the matrix for a new window size.
    ///
    /// Zero-sized (minimized) or non-finite viewports keep the previous
    /// matrix. Returns whether the matrix changed.
    pub fn update(&mut self, viewport: Viewport) -> bool {
        if !viewport.is_valid() || viewport == self.viewport {
            return false;
        }

        self.viewport = viewport;
        self.matrix = Mat4::orthographic_rh_gl(
            0.0,
            viewport.width,
            viewport.height, // bottom
            0.0,             // top
            -1.0,
            1.0,
        );
        true
    }

    #[inline]
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}

/// Model matrix taking the unit quad `[0,1]²` onto `rect` in pixel space.
///
/// Column-vector form of `scale(w, h)` followed by `translate(x, y)`.
pub fn rect_model(rect: Rect) -> Mat4 {
    let r = rect.normalized();
    Mat4::from_translation(Vec3::new(r.origin.x, r.origin.y, 0.0))
        * Mat4::from_scale(Vec3::new(r.size.x, r.size.y, 1.0))
}

/// Combined model-view-projection for one rectangle. There is no camera, so
/// view is the identity.
pub fn rect_mvp(rect: Rect, projection: &Mat4) -> Mat4 {
    *projection * rect_model(rect)
}

#[cfg(test)]
mod tests {
    use glam::{Vec2 as GVec2, Vec4};

    use super::*;

    const EPS: f32 = 1e-5;

    fn to_ndc(m: &Mat4, x: f32, y: f32) -> GVec2 {
        let clip = *m * Vec4::new(x, y, 0.0, 1.0);
        GVec2::new(clip.x / clip.w, clip.y / clip.w)
    }

    fn assert_near(actual: GVec2, expected: GVec2) {
        assert!(
            (actual - expected).abs().max_element() < EPS,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn window_corners_map_to_ndc_corners_with_y_inverted() {
        for (w, h) in [(1280.0, 720.0), (800.0, 600.0), (1.0, 1.0), (333.0, 1999.0)] {
            let p = Projection::new(Viewport::new(w, h));
            let m = p.matrix();
            assert_near(to_ndc(m, 0.0, 0.0), GVec2::new(-1.0, 1.0));
            assert_near(to_ndc(m, w, 0.0), GVec2::new(1.0, 1.0));
            assert_near(to_ndc(m, 0.0, h), GVec2::new(-1.0, -1.0));
            assert_near(to_ndc(m, w, h), GVec2::new(1.0, -1.0));
        }
    }

    #[test]
    fn window_center_maps_to_origin() {
        let p = Projection::new(Viewport::new(1280.0, 720.0));
        assert_near(to_ndc(p.matrix(), 640.0, 360.0), GVec2::ZERO);
    }

    #[test]
    fn invalid_viewport_keeps_previous_matrix() {
        let mut p = Projection::new(Viewport::new(640.0, 480.0));
        let before = *p.matrix();

        assert!(!p.update(Viewport::new(0.0, 480.0)));
        assert!(!p.update(Viewport::new(f32::NAN, 480.0)));
        assert_eq!(*p.matrix(), before);
    }

    #[test]
    fn update_reports_changes() {
        let mut p = Projection::new(Viewport::new(640.0, 480.0));
        assert!(!p.update(Viewport::new(640.0, 480.0)));
        assert!(p.update(Viewport::new(1024.0, 768.0)));
    }

    #[test]
    fn model_maps_unit_quad_onto_rect() {
        let m = rect_model(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_near(to_ndc(&m, 0.0, 0.0), GVec2::new(10.0, 20.0));
        assert_near(to_ndc(&m, 1.0, 0.0), GVec2::new(40.0, 20.0));
        assert_near(to_ndc(&m, 1.0, 1.0), GVec2::new(40.0, 60.0));
        assert_near(to_ndc(&m, 0.0, 1.0), GVec2::new(10.0, 60.0));
    }

    #[test]
    fn mvp_covering_window_fills_clip_space() {
        let p = Projection::new(Viewport::new(800.0, 600.0));
        let mvp = rect_mvp(Rect::new(0.0, 0.0, 800.0, 600.0), p.matrix());
        assert_near(to_ndc(&mvp, 0.0, 0.0), GVec2::new(-1.0, 1.0));
        assert_near(to_ndc(&mvp, 1.0, 1.0), GVec2::new(1.0, -1.0));
    }
}
