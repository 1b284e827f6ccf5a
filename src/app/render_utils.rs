use std::f32::consts::TAU;

use eframe::egui::epaint::{Mesh, QuadraticBezierShape};
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, vec2};

use crate::engine::camera::Camera;
use crate::engine::render::{DrawCommand, DrawTarget, Frame, TextAnchor};
use crate::engine::style::{BACKGROUND, TEXT_PRIMARY};

const GLOW_SEGMENTS: usize = 48;
const HOVER_LIFT: f32 = 0.35;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;
    let [r, g, b, a] = base.to_srgba_unmultiplied();
    let [or, og, ob, _] = overlay.to_srgba_unmultiplied();

    Color32::from_rgba_unmultiplied(
        ((r as f32 * inverse) + (or as f32 * amount)) as u8,
        ((g as f32 * inverse) + (og as f32 * amount)) as u8,
        ((b as f32 * inverse) + (ob as f32 * amount)) as u8,
        a,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, camera: Camera) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let step = (56.0 * camera.zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.min + camera.offset;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 40));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn paint_frame(painter: &Painter, frame: &Frame, hovered: Option<&DrawTarget>) {
    let clip = painter.clip_rect();

    for item in frame.iter() {
        let lift = if hovered == Some(&item.target) {
            HOVER_LIFT
        } else {
            0.0
        };

        match &item.command {
            DrawCommand::Glow {
                center,
                radius,
                spread,
                color,
            } => {
                if circle_visible(clip, *center, radius + spread) {
                    painter.add(glow_mesh(*center, *radius, *spread, *color));
                }
            }
            DrawCommand::Disc {
                center,
                radius,
                fill,
            } => {
                if circle_visible(clip, *center, *radius) {
                    painter.circle_filled(*center, *radius, blend_color(*fill, TEXT_PRIMARY, lift));
                }
            }
            DrawCommand::Outline {
                center,
                radius,
                width,
                color,
            } => {
                if circle_visible(clip, *center, radius + width) {
                    painter.circle_stroke(*center, *radius, Stroke::new(*width, *color));
                }
            }
            DrawCommand::Text {
                pos,
                anchor,
                text,
                size,
                color,
                shadow,
            } => {
                if *size < 1.0 {
                    continue;
                }
                let align = match anchor {
                    TextAnchor::Center => Align2::CENTER_CENTER,
                    TextAnchor::Top => Align2::CENTER_TOP,
                };
                let font = FontId::proportional(*size);
                if let Some(shadow) = shadow {
                    painter.text(*pos + vec2(1.0, 1.0), align, text, font.clone(), *shadow);
                }
                painter.text(*pos, align, text, font, *color);
            }
            DrawCommand::Curve {
                from,
                control,
                to,
                width,
                color,
            } => {
                let color = blend_color(*color, TEXT_PRIMARY, lift);
                painter.add(QuadraticBezierShape::from_points_stroke(
                    [*from, *control, *to],
                    false,
                    Color32::TRANSPARENT,
                    Stroke::new(width + lift * 2.0, color),
                ));
            }
        }
    }
}

fn glow_mesh(center: Pos2, radius: f32, spread: f32, color: Color32) -> Shape {
    let mut mesh = Mesh::default();
    let outer = radius + spread.max(0.0);

    for segment in 0..GLOW_SEGMENTS {
        let angle = TAU * segment as f32 / GLOW_SEGMENTS as f32;
        let direction = vec2(angle.cos(), angle.sin());
        mesh.colored_vertex(center + direction * radius, color);
        mesh.colored_vertex(center + direction * outer, Color32::TRANSPARENT);
    }

    let count = GLOW_SEGMENTS as u32;
    for segment in 0..count {
        let inner = segment * 2;
        let next = ((segment + 1) % count) * 2;
        mesh.add_triangle(inner, inner + 1, next);
        mesh.add_triangle(next, inner + 1, next + 1);
    }

    Shape::mesh(mesh)
}
