use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Fixed concentric rings, every node pinned.
    #[default]
    Radial,
    /// Rings seed a force simulation; nodes can be dragged.
    Relaxation,
}

impl LayoutMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Relaxation => "relaxation",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout_mode: LayoutMode,
    pub first_ring_fraction: f32,
    pub second_ring_fraction: f32,
    pub relaxation: RelaxationConfig,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub label_min_zoom: f32,
    pub fit_delay_secs: f64,
    pub fit_margin: f32,
    pub fit_duration_secs: f64,
    pub edge_curvature: f32,
    pub node_pick_padding: f32,
    pub edge_pick_width: f32,
    pub resize_tolerance: f32,
    pub resize_debounce_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::Radial,
            first_ring_fraction: 0.25,
            second_ring_fraction: 0.42,
            relaxation: RelaxationConfig::default(),
            min_zoom: 0.3,
            max_zoom: 6.0,
            label_min_zoom: 0.3,
            fit_delay_secs: 0.1,
            fit_margin: 50.0,
            fit_duration_secs: 0.3,
            edge_curvature: 0.15,
            node_pick_padding: 8.0,
            edge_pick_width: 15.0,
            resize_tolerance: 1.0,
            resize_debounce_secs: 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RelaxationConfig {
    pub alpha_decay: f32,
    pub alpha_min: f32,
    pub velocity_decay: f32,
    pub warmup_ticks: usize,
    pub ticks_per_frame: usize,
    pub max_iterations: usize,
    pub rest_speed: f32,
    pub link_distance: f32,
    pub link_strength: f32,
    pub repulsion: f32,
    pub softening: f32,
    pub center_pull: f32,
    pub max_speed: f32,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            alpha_decay: 0.08,
            alpha_min: 0.001,
            velocity_decay: 0.5,
            warmup_ticks: 30,
            ticks_per_frame: 2,
            max_iterations: 300,
            rest_speed: 0.01,
            link_distance: 120.0,
            link_strength: 0.08,
            repulsion: 2_400.0,
            softening: 100.0,
            center_pull: 0.002,
            max_speed: 40.0,
        }
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: EngineConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config.sanitized())
}

impl EngineConfig {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            self.min_zoom = defaults.min_zoom;
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            self.max_zoom = defaults.max_zoom.max(self.min_zoom);
        }
        repair(&mut self.first_ring_fraction, defaults.first_ring_fraction);
        repair(&mut self.second_ring_fraction, defaults.second_ring_fraction);
        repair(&mut self.label_min_zoom, defaults.label_min_zoom);
        repair(&mut self.fit_margin, defaults.fit_margin);
        repair(&mut self.edge_curvature, defaults.edge_curvature);
        repair(&mut self.node_pick_padding, defaults.node_pick_padding);
        repair(&mut self.edge_pick_width, defaults.edge_pick_width);
        repair(&mut self.resize_tolerance, defaults.resize_tolerance);
        repair_secs(&mut self.fit_delay_secs, defaults.fit_delay_secs);
        repair_secs(&mut self.fit_duration_secs, defaults.fit_duration_secs);
        repair_secs(&mut self.resize_debounce_secs, defaults.resize_debounce_secs);
        self.relaxation = self.relaxation.sanitized();
        self
    }
}

impl RelaxationConfig {
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.max_iterations = self.max_iterations.max(1);
        self.ticks_per_frame = self.ticks_per_frame.max(1);
        repair(&mut self.alpha_decay, defaults.alpha_decay);
        repair(&mut self.alpha_min, defaults.alpha_min);
        repair(&mut self.velocity_decay, defaults.velocity_decay);
        repair(&mut self.rest_speed, defaults.rest_speed);
        repair(&mut self.link_distance, defaults.link_distance);
        repair(&mut self.link_strength, defaults.link_strength);
        repair(&mut self.repulsion, defaults.repulsion);
        repair(&mut self.softening, defaults.softening);
        repair(&mut self.center_pull, defaults.center_pull);
        repair(&mut self.max_speed, defaults.max_speed);
        self.alpha_decay = self.alpha_decay.clamp(0.0001, 1.0);
        self.velocity_decay = self.velocity_decay.clamp(0.0, 1.0);
        self
    }
}

fn repair(value: &mut f32, fallback: f32) {
    if !(value.is_finite() && *value >= 0.0) {
        *value = fallback;
    }
}

fn repair_secs(value: &mut f64, fallback: f64) {
    if !(value.is_finite() && *value >= 0.0) {
        *value = fallback;
    }
}
