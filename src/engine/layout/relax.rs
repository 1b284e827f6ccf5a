use eframe::egui::{Pos2, Vec2, vec2};

use crate::config::RelaxationConfig;

use super::super::model::PositionedNode;

const DRAG_REHEAT_ALPHA: f32 = 0.3;

pub(crate) struct Relaxation {
    config: RelaxationConfig,
    center: Pos2,
    alpha: f32,
    iterations: usize,
    velocities: Vec<Vec2>,
    forces: Vec<Vec2>,
    settled: bool,
}

impl Relaxation {
    pub(crate) fn new(config: RelaxationConfig, center: Pos2, node_count: usize) -> Self {
        Self {
            config,
            center,
            alpha: 1.0,
            iterations: 0,
            velocities: vec![Vec2::ZERO; node_count],
            forces: Vec::with_capacity(node_count),
            settled: node_count < 2,
        }
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.settled
    }

    pub(crate) fn iterations(&self) -> usize {
        self.iterations
    }

    pub(crate) fn reheat(&mut self) {
        if self.velocities.len() < 2 {
            return;
        }
        self.alpha = self.alpha.max(DRAG_REHEAT_ALPHA);
        self.iterations = 0;
        self.settled = false;
    }

    pub(crate) fn warm_up(&mut self, nodes: &mut [PositionedNode], links: &[(usize, usize)]) {
        self.run(nodes, links, self.config.warmup_ticks);
    }

    pub(crate) fn run(
        &mut self,
        nodes: &mut [PositionedNode],
        links: &[(usize, usize)],
        ticks: usize,
    ) -> bool {
        for _ in 0..ticks {
            if !self.step(nodes, links) {
                break;
            }
        }
        !self.settled
    }

    pub(crate) fn step(&mut self, nodes: &mut [PositionedNode], links: &[(usize, usize)]) -> bool {
        let node_count = nodes.len();
        if self.settled || node_count < 2 || self.velocities.len() != node_count {
            self.settled = true;
            return false;
        }

        let config = &self.config;
        self.forces.clear();
        self.forces.resize(node_count, Vec2::ZERO);
        let forces = &mut self.forces;

        for i in 0..node_count {
            if !nodes[i].is_finite() {
                continue;
            }
            for j in (i + 1)..node_count {
                if !nodes[j].is_finite() {
                    continue;
                }

                let delta = nodes[i].pos() - nodes[j].pos();
                let distance_sq = delta.length_sq();
                let distance = distance_sq.sqrt();
                let direction = if distance > 0.0001 {
                    delta / distance
                } else {
                    let angle =
                        ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
                    vec2(angle.cos(), angle.sin())
                };

                let repulsion = config.repulsion / (distance_sq + config.softening);
                forces[i] += direction * repulsion;
                forces[j] -= direction * repulsion;
            }
        }

        for &(from, to) in links {
            if from >= node_count || to >= node_count || from == to {
                continue;
            }
            if !nodes[from].is_finite() || !nodes[to].is_finite() {
                continue;
            }

            let delta = nodes[from].pos() - nodes[to].pos();
            let distance = delta.length();
            if distance <= 0.0001 {
                continue;
            }
            let direction = delta / distance;
            let correction = direction * ((distance - config.link_distance) * config.link_strength);

            forces[from] -= correction;
            forces[to] += correction;
        }

        let decay = 1.0 - config.velocity_decay;
        let mut peak_speed = 0.0_f32;
        for (index, node) in nodes.iter_mut().enumerate() {
            if node.placement.pinned || !node.is_finite() {
                self.velocities[index] = Vec2::ZERO;
                continue;
            }

            let force = forces[index] + (self.center - node.pos()) * config.center_pull;
            let mut velocity = (self.velocities[index] + force * self.alpha) * decay;
            let speed = velocity.length();
            if speed > config.max_speed {
                velocity *= config.max_speed / speed;
            }

            self.velocities[index] = velocity;
            node.placement.x += velocity.x;
            node.placement.y += velocity.y;
            peak_speed = peak_speed.max(velocity.length());
        }

        self.alpha *= 1.0 - config.alpha_decay;
        self.iterations += 1;

        let cooled = self.alpha < config.alpha_min;
        let capped = self.iterations >= config.max_iterations;
        let resting = self.iterations >= config.warmup_ticks && peak_speed < config.rest_speed;
        if cooled || capped || resting {
            self.settled = true;
            log::debug!(
                "relaxation settled after {} iterations (alpha {:.4}, peak speed {:.4})",
                self.iterations,
                self.alpha,
                peak_speed
            );
        }

        !self.settled
    }
}
