mod radial;
mod relax;

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::config::{EngineConfig, LayoutMode};

use super::model::{Node, NodeId, Placement, Viewport};
pub(crate) use radial::{RingFractions, radial_layout};
pub(crate) use relax::Relaxation;

pub type Layout = HashMap<NodeId, Placement>;

pub fn layout<N: Borrow<Node>>(nodes: &[N], viewport: Viewport, config: &EngineConfig) -> Layout {
    let fractions = RingFractions {
        first: config.first_ring_fraction,
        second: config.second_ring_fraction,
    };
    let mut layout = radial_layout(nodes, viewport, fractions);

    if config.layout_mode == LayoutMode::Relaxation {
        for placement in layout.values_mut() {
            placement.pinned = false;
        }
    }

    layout
}
