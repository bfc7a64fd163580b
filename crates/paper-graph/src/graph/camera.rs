//! Camera2D - bounded pan/zoom with world/screen coordinate transforms.
//!
//! Camera state is UI-local and has exactly one owner; updates are
//! synchronous and the transform is a pure function of (center, zoom).
//! Zoom bounds differ per view: cluster maps allow 50-200%, flat citation
//! graphs 30-300%. Stepped zoom moves by a fixed 10% increment, clamped.

use egui::{Pos2, Rect, Vec2};

/// Fixed increment for stepped zoom in/out.
pub const ZOOM_STEP: f32 = 0.1;

/// 2D camera with clamped pan/zoom
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// World position shown at the screen center (the pan offset)
    center: Pos2,
    /// Zoom level - 1.0 = 100%
    zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::for_citation_graph()
    }
}

impl Camera2D {
    /// Camera for the flat citation graph view (30-300%).
    pub fn for_citation_graph() -> Self {
        Self {
            center: Pos2::ZERO,
            zoom: 1.0,
            min_zoom: 0.3,
            max_zoom: 3.0,
        }
    }

    /// Camera for the cluster research-map view (50-200%).
    pub fn for_cluster_map() -> Self {
        Self {
            center: Pos2::ZERO,
            zoom: 1.0,
            min_zoom: 0.5,
            max_zoom: 2.0,
        }
    }

    // =========================================================================
    // CURRENT VALUES
    // =========================================================================

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom as a percentage for toolbar display.
    pub fn zoom_percent(&self) -> f32 {
        self.zoom * 100.0
    }

    // =========================================================================
    // CAMERA CONTROLS
    // =========================================================================

    /// Step zoom in by the fixed increment, clamped to bounds.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Step zoom out by the fixed increment, clamped to bounds.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom by factor, keeping `screen_pos` fixed in view (wheel zoom).
    pub fn zoom_at(&mut self, factor: f32, screen_pos: Pos2, screen_rect: Rect) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() <= f32::EPSILON {
            return;
        }

        let offset_from_center = screen_pos - screen_rect.center();
        let world_offset_old = offset_from_center / old_zoom;
        let world_offset_new = offset_from_center / new_zoom;

        self.center += world_offset_old - world_offset_new;
        self.zoom = new_zoom;
    }

    /// Pan by a delta in screen coordinates (dragging content with the pointer).
    pub fn pan_by_screen_delta(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.center = center;
    }

    /// Reset to the canonical view: zoom 100%, pan (0,0).
    ///
    /// Unconditional and idempotent regardless of prior drag history.
    pub fn reset(&mut self) {
        self.center = Pos2::ZERO;
        self.zoom = 1.0;
    }

    // =========================================================================
    // COORDINATE TRANSFORMS
    // =========================================================================

    /// Transform world position to screen position.
    pub fn world_to_screen(&self, world_pos: Pos2, screen_rect: Rect) -> Pos2 {
        let offset = (world_pos - self.center) * self.zoom;
        screen_rect.center() + offset
    }

    /// Transform screen position to world position.
    pub fn screen_to_world(&self, screen_pos: Pos2, screen_rect: Rect) -> Pos2 {
        let offset = (screen_pos - screen_rect.center()) / self.zoom;
        self.center + offset
    }

    /// World-space rect currently visible in `screen_rect`.
    pub fn visible_bounds(&self, screen_rect: Rect) -> Rect {
        let size = Vec2::new(
            screen_rect.width() / self.zoom,
            screen_rect.height() / self.zoom,
        );
        Rect::from_center_size(self.center, size)
    }

    /// Check if a world-space rect is visible.
    pub fn is_visible(&self, world_rect: Rect, screen_rect: Rect) -> bool {
        self.visible_bounds(screen_rect).intersects(world_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_zoom_in_out_is_symmetric() {
        let mut camera = Camera2D::for_citation_graph();
        for _ in 0..4 {
            camera.zoom_in();
        }
        for _ in 0..4 {
            camera.zoom_out();
        }
        assert!((camera.zoom() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_clamps_to_bounds() {
        let mut camera = Camera2D::for_cluster_map();
        for _ in 0..100 {
            camera.zoom_in();
        }
        assert_eq!(camera.zoom(), 2.0);
        for _ in 0..100 {
            camera.zoom_out();
        }
        assert_eq!(camera.zoom(), 0.5);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut camera = Camera2D::for_citation_graph();
        camera.set_zoom(2.4);
        camera.pan_by_screen_delta(Vec2::new(120.0, -60.0));

        camera.reset();
        let first = camera.clone();
        camera.reset();
        assert_eq!(camera, first);
        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.center(), Pos2::ZERO);
    }

    #[test]
    fn test_transform_roundtrip() {
        let mut camera = Camera2D::for_citation_graph();
        camera.set_zoom(1.7);
        camera.set_center(Pos2::new(50.0, -30.0));

        let world = Pos2::new(123.0, 456.0);
        let screen_pos = camera.world_to_screen(world, screen());
        let back = camera.screen_to_world(screen_pos, screen());
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn test_zoom_at_keeps_cursor_stable() {
        let mut camera = Camera2D::for_citation_graph();
        let cursor = Pos2::new(600.0, 150.0);
        let before = camera.screen_to_world(cursor, screen());

        camera.zoom_at(1.5, cursor, screen());
        let after = camera.screen_to_world(cursor, screen());
        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn test_pan_moves_visible_bounds() {
        let mut camera = Camera2D::for_citation_graph();
        let before = camera.visible_bounds(screen());
        camera.pan_by_screen_delta(Vec2::new(-100.0, 0.0));
        let after = camera.visible_bounds(screen());
        assert!(after.center().x > before.center().x);
    }
}
