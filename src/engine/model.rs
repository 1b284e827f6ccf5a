use std::borrow::Borrow;
use std::collections::BTreeSet;

use eframe::egui::{Pos2, pos2};
use serde::Deserialize;

pub type NodeId = String;
pub type EdgeId = String;

pub const MIN_TRUST: u8 = 1;
pub const MAX_TRUST: u8 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub tags: BTreeSet<String>,
    pub is_user: bool,
    pub degree: u32,
}

impl Node {
    pub fn ring(&self) -> Ring {
        Ring::classify(self.is_user, self.degree)
    }

    pub fn matches_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        tags.is_empty() || self.tags.iter().any(|tag| tags.contains(tag))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub trust_level: u8,
    #[serde(default)]
    pub context: Option<String>,
}

impl Edge {
    pub fn clamped_trust(&self) -> u8 {
        self.trust_level.clamp(MIN_TRUST, MAX_TRUST)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ring {
    Center,
    First,
    Second,
}

impl Ring {
    pub fn classify(is_user: bool, degree: u32) -> Self {
        match degree {
            _ if is_user => Self::Center,
            0 => Self::Center,
            1 => Self::First,
            _ => Self::Second,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub pinned: bool,
}

impl Placement {
    pub fn pos(self) -> Pos2 {
        pos2(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PositionedNode {
    pub node: Node,
    pub placement: Placement,
}

impl Borrow<Node> for PositionedNode {
    fn borrow(&self) -> &Node {
        &self.node
    }
}

impl PositionedNode {
    pub fn pos(&self) -> Pos2 {
        self.placement.pos()
    }

    pub fn is_finite(&self) -> bool {
        self.placement.is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Pos2 {
        pos2(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }

    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn differs_from(self, other: Viewport, tolerance: f32) -> bool {
        (self.width - other.width).abs() > tolerance || (self.height - other.height).abs() > tolerance
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub selected_node_id: Option<NodeId>,
    pub highlighted_tags: BTreeSet<String>,
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
