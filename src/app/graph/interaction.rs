use eframe::egui::{CursorIcon, PointerButton, Response, Ui};

use crate::engine::GraphEvent;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn handle_graph_input(&mut self, ui: &Ui, response: &Response) {
        self.handle_graph_zoom(ui, response);
        self.handle_graph_drag(response);

        let pointer = if response.dragged() {
            None
        } else {
            response.hover_pos()
        };
        if self.engine.hover(pointer).is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        } else if response.dragged_by(PointerButton::Primary) {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        }

        if response.clicked()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let event = self.engine.click(pointer);
            self.apply_graph_event(event);
        }
    }

    fn handle_graph_zoom(&mut self, ui: &Ui, response: &Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| response.rect.center());
        self.engine.zoom_at(pointer, scroll);
    }

    fn handle_graph_drag(&mut self, response: &Response) {
        if response.drag_started_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.engine.press(pointer);
        }

        if response.dragged_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.engine.drag(pointer, response.drag_delta());
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            self.engine.release();
        }
    }

    pub(in crate::app) fn apply_graph_event(&mut self, event: Option<GraphEvent>) {
        match event {
            Some(GraphEvent::NodeClicked(node)) => {
                log::debug!("selected {}", node.id);
                self.interaction.selected_node_id = Some(node.id);
                self.selected_edge = None;
            }
            Some(GraphEvent::EdgeClicked(edge)) => {
                log::debug!("selected connection {}", edge.id);
                self.interaction.selected_node_id = None;
                self.selected_edge = Some(edge.id);
            }
            None => self.clear_selection(),
        }
    }
}
