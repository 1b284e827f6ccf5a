use std::collections::HashMap;

use eframe::egui::{Pos2, Vec2, pos2};

use crate::config::EngineConfig;

use super::model::{Edge, PositionedNode};
use super::style::StyleTable;

const CURVE_SEGMENTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit<'a> {
    Node(&'a PositionedNode),
    Edge(&'a Edge),
}

pub fn position_index(nodes: &[PositionedNode]) -> HashMap<&str, Pos2> {
    let mut positions = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if node.is_finite() {
            positions.entry(node.node.id.as_str()).or_insert(node.pos());
        }
    }
    positions
}

pub fn curve_control(from: Pos2, to: Pos2, curvature: f32) -> Pos2 {
    let mid = from + (to - from) * 0.5;
    let chord = to - from;
    pos2(mid.x - chord.y * curvature, mid.y + chord.x * curvature)
}

pub fn curve_point(from: Pos2, control: Pos2, to: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let x = u * u * from.x + 2.0 * u * t * control.x + t * t * to.x;
    let y = u * u * from.y + 2.0 * u * t * control.y + t * t * to.y;
    pos2(x, y)
}

pub fn distance_to_curve(point: Pos2, from: Pos2, control: Pos2, to: Pos2) -> f32 {
    let mut best = f32::INFINITY;
    let mut previous = from;
    for step in 1..=CURVE_SEGMENTS {
        let next = curve_point(from, control, to, step as f32 / CURVE_SEGMENTS as f32);
        best = best.min(distance_to_segment(point, previous, next));
        previous = next;
    }
    best
}

fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment: Vec2 = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    point.distance(start + segment * t)
}

/// Resolves a pointer in world coordinates against the pick geometry.
///
/// Nodes are tested first and short-circuit edges. Node pick circles use the
/// role's nominal radius plus padding, so emphasis never changes what is
/// clickable. Within each kind the closest hit wins. Dangling edges and
/// non-finite elements are never hit.
pub fn hit_test<'a>(
    pointer: Pos2,
    nodes: &'a [PositionedNode],
    edges: &'a [Edge],
    styles: &StyleTable,
    config: &EngineConfig,
) -> Option<Hit<'a>> {
    if !pointer.is_finite() {
        return None;
    }

    let node_hit = nodes
        .iter()
        .filter(|node| node.is_finite())
        .filter_map(|node| {
            let reach = styles.nominal_radius(node.node.ring()) + config.node_pick_padding;
            let distance = node.pos().distance(pointer);
            (distance <= reach).then_some((node, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((node, _)) = node_hit {
        return Some(Hit::Node(node));
    }

    let positions = position_index(nodes);
    let half_width = config.edge_pick_width * 0.5;
    edges
        .iter()
        .filter_map(|edge| {
            let from = *positions.get(edge.source.as_str())?;
            let to = *positions.get(edge.target.as_str())?;
            let control = curve_control(from, to, config.edge_curvature);
            let distance = distance_to_curve(pointer, from, control, to);
            (distance <= half_width).then_some((edge, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(edge, _)| Hit::Edge(edge))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::super::model::{Node, Placement};
    use super::*;

    fn positioned(id: &str, degree: u32, x: f32, y: f32) -> PositionedNode {
        PositionedNode {
            node: Node {
                id: id.to_owned(),
                name: id.to_owned(),
                tags: BTreeSet::new(),
                is_user: degree == 0,
                degree,
            },
            placement: Placement { x, y, pinned: true },
        }
    }

    fn edge(id: &str, source: &str, target: &str) -> Edge {
        Edge {
            id: id.to_owned(),
            source: source.to_owned(),
            target: target.to_owned(),
            trust_level: 3,
            context: None,
        }
    }

    fn hit_id(hit: Option<Hit<'_>>) -> Option<String> {
        hit.map(|hit| match hit {
            Hit::Node(node) => format!("node:{}", node.node.id),
            Hit::Edge(edge) => format!("edge:{}", edge.id),
        })
    }

    #[test]
    fn node_pick_includes_padding() {
        let nodes = [positioned("a", 1, 100.0, 100.0)];
        let styles = StyleTable::default();
        let config = EngineConfig::default();

        let inside = hit_test(pos2(129.0, 100.0), &nodes, &[], &styles, &config);
        let outside = hit_test(pos2(131.0, 100.0), &nodes, &[], &styles, &config);
        assert_eq!(hit_id(inside).as_deref(), Some("node:a"));
        assert_eq!(outside, None);
    }

    #[test]
    fn shrinking_the_drawn_disc_never_loses_a_hit() {
        let nodes = [positioned("a", 1, 0.0, 0.0), positioned("b", 2, 60.0, 0.0)];
        let edges = [edge("ab", "a", "b")];
        let config = EngineConfig::default();
        let full = StyleTable::default();
        let shrunk = StyleTable {
            dimmed_radius_scale: 0.5,
            ..Default::default()
        };

        for x in -40..=100 {
            for y in -40..=40 {
                let pointer = pos2(x as f32, y as f32);
                let before = hit_id(hit_test(pointer, &nodes, &edges, &full, &config));
                let after = hit_id(hit_test(pointer, &nodes, &edges, &shrunk, &config));
                if before.is_some() {
                    assert_eq!(before, after, "lost hit at {pointer:?}");
                }
            }
        }
    }

    #[test]
    fn nodes_win_over_edges_and_closest_node_wins() {
        let nodes = [positioned("a", 1, 0.0, 0.0), positioned("b", 1, 40.0, 0.0)];
        let edges = [edge("ab", "a", "b")];
        let styles = StyleTable::default();
        let config = EngineConfig::default();

        let hit = hit_test(pos2(25.0, 0.0), &nodes, &edges, &styles, &config);
        assert_eq!(hit_id(hit).as_deref(), Some("node:b"));
        let hit = hit_test(pos2(12.0, 0.0), &nodes, &edges, &styles, &config);
        assert_eq!(hit_id(hit).as_deref(), Some("node:a"));
    }

    #[test]
    fn edge_is_picked_along_its_curve() {
        let nodes = [positioned("a", 1, 0.0, 0.0), positioned("b", 1, 400.0, 0.0)];
        let edges = [edge("ab", "a", "b")];
        let styles = StyleTable::default();
        let config = EngineConfig::default();

        let control = curve_control(nodes[0].pos(), nodes[1].pos(), config.edge_curvature);
        let apex = curve_point(nodes[0].pos(), control, nodes[1].pos(), 0.5);
        assert!((apex.y - 30.0).abs() < 1e-3);

        let on_curve = hit_test(apex, &nodes, &edges, &styles, &config);
        assert_eq!(hit_id(on_curve).as_deref(), Some("edge:ab"));
        let on_chord = hit_test(pos2(200.0, 0.0), &nodes, &edges, &styles, &config);
        assert_eq!(on_chord, None);
    }

    #[test]
    fn dangling_edge_is_never_hit() {
        let nodes = [positioned("a", 1, 0.0, 0.0)];
        let edges = [edge("az", "a", "z")];
        let styles = StyleTable::default();
        let config = EngineConfig::default();

        for x in 40..400 {
            let pointer = pos2(x as f32, 0.0);
            assert_eq!(hit_test(pointer, &nodes, &edges, &styles, &config), None);
        }
    }

    #[test]
    fn non_finite_nodes_are_skipped() {
        let nodes = [
            positioned("a", 1, f32::NAN, 0.0),
            positioned("b", 1, 100.0, 0.0),
        ];
        let edges = [edge("ab", "a", "b")];
        let styles = StyleTable::default();
        let config = EngineConfig::default();

        assert_eq!(hit_test(pos2(0.0, 0.0), &nodes, &edges, &styles, &config), None);
        assert_eq!(hit_test(pos2(50.0, 10.0), &nodes, &edges, &styles, &config), None);
        assert_eq!(position_index(&nodes).len(), 1);
    }
}
