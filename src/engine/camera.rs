use eframe::egui::{Pos2, Rect, Vec2, vec2};

use super::model::Viewport;

/// Maps layout coordinates into the drawing area: `screen = origin + offset + world * zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
    pub min: f32,
    pub max: f32,
}

impl ZoomBounds {
    pub fn clamp(self, zoom: f32) -> f32 {
        zoom.clamp(self.min, self.max)
    }
}

impl Camera {
    pub fn world_to_screen(self, origin: Pos2, world: Pos2) -> Pos2 {
        origin + self.offset + world.to_vec2() * self.zoom
    }

    pub fn screen_to_world(self, origin: Pos2, screen: Pos2) -> Pos2 {
        ((screen - origin - self.offset) / self.zoom).to_pos2()
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.offset += delta;
        }
    }

    pub fn zoom_around(&mut self, origin: Pos2, pointer: Pos2, factor: f32, bounds: ZoomBounds) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let world_before = self.screen_to_world(origin, pointer);
        self.zoom = bounds.clamp(self.zoom * factor);
        self.offset = pointer - origin - world_before.to_vec2() * self.zoom;
    }

    pub fn fit(
        points: impl IntoIterator<Item = Pos2>,
        viewport: Viewport,
        margin: f32,
        bounds: ZoomBounds,
    ) -> Option<Self> {
        let mut extent = Rect::NOTHING;
        for point in points {
            if point.is_finite() {
                extent.extend_with(point);
            }
        }
        if !extent.is_finite() || extent.min.x > extent.max.x || !viewport.is_usable() {
            return None;
        }

        let usable = vec2(
            (viewport.width - 2.0 * margin).max(1.0),
            (viewport.height - 2.0 * margin).max(1.0),
        );
        let size = extent.size();
        let zoom_x = if size.x > f32::EPSILON {
            usable.x / size.x
        } else {
            f32::INFINITY
        };
        let zoom_y = if size.y > f32::EPSILON {
            usable.y / size.y
        } else {
            f32::INFINITY
        };
        let zoom = bounds.clamp(zoom_x.min(zoom_y).min(bounds.max));
        let offset = viewport.center().to_vec2() - extent.center().to_vec2() * zoom;

        Some(Self { offset, zoom })
    }

    fn lerp(self, target: Self, t: f32) -> Self {
        Self {
            offset: self.offset + (target.offset - self.offset) * t,
            zoom: self.zoom + (target.zoom - self.zoom) * t,
        }
    }
}

pub(crate) fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CameraTween {
    from: Camera,
    to: Camera,
    started_at: f64,
    duration_secs: f64,
}

impl CameraTween {
    pub(crate) fn new(from: Camera, to: Camera, started_at: f64, duration_secs: f64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration_secs,
        }
    }

    pub(crate) fn sample(&self, now: f64) -> (Camera, bool) {
        if !(self.duration_secs > 0.0) {
            return (self.to, true);
        }
        let t = ((now - self.started_at) / self.duration_secs).clamp(0.0, 1.0) as f32;
        if t >= 1.0 {
            (self.to, true)
        } else {
            (self.from.lerp(self.to, ease_out_cubic(t)), false)
        }
    }
}
