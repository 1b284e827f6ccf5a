use std::time::Instant;

use eframe::egui::{Align2, FontId, Sense, Ui};

use crate::engine::HoverTarget;
use crate::engine::model::Viewport;
use crate::engine::render::DrawTarget;
use crate::engine::style::TEXT_PRIMARY;

use super::super::ViewModel;
use super::super::render_utils::{draw_background, paint_frame};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let viewport = Viewport::new(rect.width(), rect.height());

        if !viewport.is_usable() {
            self.engine.detach();
            return;
        }

        let now = ui.input(|input| input.time);
        self.engine.attach();
        self.engine.observe_viewport(rect.min, viewport, now);
        self.handle_graph_input(ui, &response);

        let started = Instant::now();
        self.engine.advance(now);
        let frame = self.engine.render(&self.interaction);
        self.frame_build_ms = started.elapsed().as_secs_f32() * 1000.0;
        self.frame_items = frame.len();

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.engine.camera());

        let hovered = self.engine.hovered().map(|target| match target {
            HoverTarget::Node(id) => DrawTarget::Node(id.clone()),
            HoverTarget::Edge(id) => DrawTarget::Edge(id.clone()),
        });
        paint_frame(&painter, &frame, hovered.as_ref());

        if frame.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "This network has nobody in it yet",
                FontId::proportional(16.0),
                TEXT_PRIMARY.gamma_multiply(0.6),
            );
        }

        if self.engine.needs_repaint() || response.dragged() {
            ui.ctx().request_repaint();
        }
    }
}
