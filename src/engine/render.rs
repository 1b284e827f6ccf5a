use eframe::egui::{Color32, Pos2, vec2};

use crate::config::EngineConfig;

use super::camera::Camera;
use super::model::{Edge, EdgeId, InteractionState, NodeId, PositionedNode, initials};
use super::pick::{curve_control, position_index};
use super::style::{Emphasis, StyleTable};

const TEXT_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawTarget {
    Node(NodeId),
    Edge(EdgeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Center,
    Top,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Glow {
        center: Pos2,
        radius: f32,
        spread: f32,
        color: Color32,
    },
    Disc {
        center: Pos2,
        radius: f32,
        fill: Color32,
    },
    Outline {
        center: Pos2,
        radius: f32,
        width: f32,
        color: Color32,
    },
    Text {
        pos: Pos2,
        anchor: TextAnchor,
        text: String,
        size: f32,
        color: Color32,
        shadow: Option<Color32>,
    },
    Curve {
        from: Pos2,
        control: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub target: DrawTarget,
    pub command: DrawCommand,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub items: Vec<DrawItem>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawItem> {
        self.items.iter()
    }

    #[cfg(test)]
    pub(crate) fn commands_for(&self, target: DrawTarget) -> impl Iterator<Item = &DrawCommand> {
        self.items
            .iter()
            .filter(move |item| item.target == target)
            .map(|item| &item.command)
    }

    fn push(&mut self, target: &DrawTarget, command: DrawCommand) {
        self.items.push(DrawItem {
            target: target.clone(),
            command,
        });
    }
}

pub fn render_frame(
    nodes: &[PositionedNode],
    edges: &[Edge],
    interaction: &InteractionState,
    camera: Camera,
    origin: Pos2,
    styles: &StyleTable,
    config: &EngineConfig,
) -> Frame {
    let mut frame = Frame::default();
    if nodes.is_empty() {
        return frame;
    }

    let zoom = camera.zoom;
    let positions = position_index(nodes);

    for edge in edges {
        let (Some(&from), Some(&to)) = (
            positions.get(edge.source.as_str()),
            positions.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let style = styles.edge(edge.clamped_trust());
        let control = curve_control(from, to, config.edge_curvature);
        frame.push(
            &DrawTarget::Edge(edge.id.clone()),
            DrawCommand::Curve {
                from: camera.world_to_screen(origin, from),
                control: camera.world_to_screen(origin, control),
                to: camera.world_to_screen(origin, to),
                width: style.width * zoom,
                color: style.color,
            },
        );
    }

    let show_labels = zoom > config.label_min_zoom;
    let label_size = styles.label_size(zoom);

    for positioned in nodes {
        if !positioned.is_finite() {
            continue;
        }
        let node = &positioned.node;
        let ring = node.ring();
        let emphasis = if node.matches_any_tag(&interaction.highlighted_tags) {
            Emphasis::Normal
        } else {
            Emphasis::Dimmed
        };
        let style = styles.node(ring, emphasis);
        let center = camera.world_to_screen(origin, positioned.pos());
        let radius = style.radius * zoom;
        let target = DrawTarget::Node(node.id.clone());

        if let Some(glow) = style.glow {
            frame.push(
                &target,
                DrawCommand::Glow {
                    center,
                    radius,
                    spread: glow.spread * zoom,
                    color: glow.color,
                },
            );
        }

        frame.push(
            &target,
            DrawCommand::Disc {
                center,
                radius,
                fill: style.fill,
            },
        );

        if interaction.selected_node_id.as_deref() == Some(node.id.as_str()) {
            frame.push(
                &target,
                DrawCommand::Outline {
                    center,
                    radius,
                    width: styles.selection_outline_width * zoom,
                    color: styles.selection_outline,
                },
            );
        }

        let letters = initials(&node.name);
        if !letters.is_empty() {
            frame.push(
                &target,
                DrawCommand::Text {
                    pos: center,
                    anchor: TextAnchor::Center,
                    text: letters,
                    size: styles.initials_size(style.radius) * zoom,
                    color: style.initials_color,
                    shadow: None,
                },
            );
        }

        if show_labels && !node.name.trim().is_empty() {
            frame.push(
                &target,
                DrawCommand::Text {
                    pos: center + vec2(0.0, radius + styles.label_gap * zoom),
                    anchor: TextAnchor::Top,
                    text: node.name.clone(),
                    size: label_size * zoom,
                    color: style.label_color,
                    shadow: Some(TEXT_SHADOW),
                },
            );
        }
    }

    frame
}
