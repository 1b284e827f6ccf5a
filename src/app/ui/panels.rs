use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout};

use crate::config::{EngineConfig, LayoutMode};
use crate::engine::GraphEngine;
use crate::engine::model::InteractionState;
use crate::engine::style::StyleTable;
use crate::network::{GraphSource, NetworkGraph};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(graph: NetworkGraph, config: EngineConfig) -> Self {
        let mut engine = GraphEngine::new(config, StyleTable::default());
        engine.set_graph(graph.nodes(), graph.edges.clone());

        Self {
            available_tags: graph.available_tags(),
            graph,
            engine,
            interaction: InteractionState::default(),
            selected_edge: None,
            tag_search: String::new(),
            frame_build_ms: 0.0,
            frame_items: 0,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn replace_graph(&mut self, graph: NetworkGraph) {
        self.engine.set_graph(graph.nodes(), graph.edges.clone());
        self.available_tags = graph.available_tags();

        if let Some(id) = &self.interaction.selected_node_id
            && graph.person(id).is_none()
        {
            self.interaction.selected_node_id = None;
        }
        if let Some(id) = &self.selected_edge
            && graph.edge(id).is_none()
        {
            self.selected_edge = None;
        }
        let available = &self.available_tags;
        self.interaction
            .highlighted_tags
            .retain(|tag| available.binary_search(tag).is_ok());

        self.graph = graph;
    }

    pub(in crate::app) fn clear_selection(&mut self) {
        self.interaction.selected_node_id = None;
        self.selected_edge = None;
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &GraphSource,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("trust-graph");
                    ui.separator();
                    ui.label(format!("source: {source}"));
                    ui.label(format!("people: {}", self.graph.people.len()));
                    ui.label(format!("connections: {}", self.graph.edges.len()));
                    ui.separator();

                    let mut mode = self.engine.layout_mode();
                    ui.selectable_value(&mut mode, LayoutMode::Radial, "Radial")
                        .on_hover_text("Fixed rings around you.");
                    ui.selectable_value(&mut mode, LayoutMode::Relaxation, "Relaxed")
                        .on_hover_text("Rings relax under link forces; drag people around.");
                    self.engine.set_layout_mode(mode);

                    if ui.button("Fit").clicked() {
                        let now = ui.input(|input| input.time);
                        self.engine.request_fit(now);
                    }

                    let reload_button = ui.add_enabled(!is_loading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if is_loading {
                        ui.spinner();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
