use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::config::EngineConfig;
use crate::engine::GraphEngine;
use crate::engine::model::{EdgeId, InteractionState};
use crate::network::{GraphSource, NetworkGraph, load_network};

mod graph;
mod render_utils;
mod ui;

type LoadResult = Result<NetworkGraph, String>;

pub struct TrustGraphApp {
    source: GraphSource,
    config: EngineConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: NetworkGraph,
    engine: GraphEngine,
    interaction: InteractionState,
    selected_edge: Option<EdgeId>,
    available_tags: Vec<String>,
    tag_search: String,
    frame_build_ms: f32,
    frame_items: usize,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl TrustGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: GraphSource, config: EngineConfig) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: GraphSource) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_network(&source).map_err(|error| {
                log::error!("failed to load {source}: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: GraphSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for TrustGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(graph) => {
                                AppState::Ready(Box::new(ViewModel::new(graph, self.config.clone())))
                            }
                            Err(error) => AppState::Error(error),
                        });
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading trust network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the trust network");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(graph)) => model.replace_graph(graph),
                        Ok(Err(error)) => transition = Some(AppState::Error(error)),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
