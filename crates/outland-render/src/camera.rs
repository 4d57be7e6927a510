//! Screen-space pan offset and the drag gesture that moves it.

/// `screen = world_block * block_size * zoom + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn world_to_screen(&self, world_x: f64, world_y: f64, block_size: f64) -> (f64, f64) {
        let scale = block_size * self.zoom;
        (world_x * scale + self.x, world_y * scale + self.y)
    }

    /// World block position (fractional) under a screen pixel.
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64, block_size: f64) -> (f64, f64) {
        let scale = block_size * self.zoom;
        ((screen_x - self.x) / scale, (screen_y - self.y) / scale)
    }
}

/// Anchor-based drag: the offset is always `pointer - anchor`, so missed
/// move events cannot accumulate drift.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragController {
    anchor: Option<(f64, f64)>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Begin a drag. A second start while dragging replaces the anchor.
    pub fn start_drag(&mut self, camera: &Camera, px: f64, py: f64) {
        self.anchor = Some((px - camera.x, py - camera.y));
    }

    /// Move the camera to follow the pointer. Returns the new offset, or
    /// `None` when no drag is active.
    pub fn update_drag(&mut self, camera: &mut Camera, px: f64, py: f64) -> Option<(f64, f64)> {
        let (ax, ay) = self.anchor?;
        camera.x = px - ax;
        camera.y = py - ay;
        Some(camera.offset())
    }

    pub fn end_drag(&mut self) {
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_follows_pointer() {
        let mut camera = Camera::new(10.0, -5.0);
        let mut drag = DragController::new();
        drag.start_drag(&camera, 100.0, 100.0);
        assert!(drag.is_dragging());

        assert_eq!(drag.update_drag(&mut camera, 130.0, 90.0), Some((40.0, -15.0)));
        assert_eq!(drag.update_drag(&mut camera, 100.0, 100.0), Some((10.0, -5.0)));

        drag.end_drag();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update_drag(&mut camera, 500.0, 500.0), None);
        assert_eq!(camera.offset(), (10.0, -5.0));
    }

    #[test]
    fn offset_depends_only_on_latest_pointer() {
        let mut a = Camera::default();
        let mut b = Camera::default();
        let mut drag_a = DragController::new();
        let mut drag_b = DragController::new();
        drag_a.start_drag(&a, 0.0, 0.0);
        drag_b.start_drag(&b, 0.0, 0.0);

        for step in 1..=50 {
            drag_a.update_drag(&mut a, step as f64 * 3.0, step as f64 * -2.0);
        }
        // b skips every intermediate event
        drag_b.update_drag(&mut b, 150.0, -100.0);
        assert_eq!(a, b);
    }

    #[test]
    fn restart_overwrites_anchor() {
        let mut camera = Camera::default();
        let mut drag = DragController::new();
        drag.start_drag(&camera, 0.0, 0.0);
        drag.update_drag(&mut camera, 20.0, 0.0);
        drag.start_drag(&camera, 50.0, 50.0);
        assert_eq!(drag.update_drag(&mut camera, 60.0, 50.0), Some((30.0, 0.0)));
    }

    #[test]
    fn screen_world_round_trip() {
        let camera = Camera {
            x: 37.0,
            y: -12.0,
            zoom: 2.0,
        };
        let (sx, sy) = camera.world_to_screen(-8.0, 5.0, 2.0);
        assert_eq!((sx, sy), (5.0, 8.0));
        assert_eq!(camera.screen_to_world(sx, sy, 2.0), (-8.0, 5.0));
    }
}
