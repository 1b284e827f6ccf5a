use std::borrow::Borrow;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::super::model::{Node, Placement, Ring, Viewport};
use super::Layout;

#[derive(Clone, Copy, Debug)]
pub(crate) struct RingFractions {
    pub(crate) first: f32,
    pub(crate) second: f32,
}

pub(crate) fn ring_angle(index: usize, count: usize) -> f32 {
    TAU * index as f32 / count as f32 - FRAC_PI_2
}

pub(crate) fn radial_layout<N: Borrow<Node>>(
    nodes: &[N],
    viewport: Viewport,
    fractions: RingFractions,
) -> Layout {
    let center = viewport.center();
    let min_side = viewport.min_side();
    let first_radius = min_side * fractions.first;
    let second_radius = min_side * fractions.second;

    let rings = nodes.iter().map(|node| Borrow::<Node>::borrow(node).ring());
    let first_count = rings.clone().filter(|ring| *ring == Ring::First).count();
    let second_count = rings.filter(|ring| *ring == Ring::Second).count();

    let mut first_index = 0usize;
    let mut second_index = 0usize;
    let mut layout = Layout::with_capacity(nodes.len());

    for node in nodes {
        let node: &Node = node.borrow();
        let (radius, index, count) = match node.ring() {
            Ring::Center => (0.0, 0, 0),
            Ring::First => {
                first_index += 1;
                (first_radius, first_index - 1, first_count)
            }
            Ring::Second => {
                second_index += 1;
                (second_radius, second_index - 1, second_count)
            }
        };

        let (x, y) = if count == 0 {
            (center.x, center.y)
        } else {
            let angle = ring_angle(index, count);
            (
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        };

        layout.insert(
            node.id.clone(),
            Placement {
                x,
                y,
                pinned: true,
            },
        );
    }

    layout
}
