pub mod camera;
pub mod layout;
pub mod model;
pub mod pick;
pub mod render;
mod schedule;
pub mod style;
mod viewport;

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use eframe::egui::{Pos2, Vec2};

use crate::config::{EngineConfig, LayoutMode};

use camera::{Camera, CameraTween, ZoomBounds};
use layout::Relaxation;
use model::{Edge, EdgeId, InteractionState, Node, NodeId, Placement, PositionedNode, Ring, Viewport};
use pick::Hit;
use render::Frame;
use schedule::Deferred;
use style::StyleTable;
use viewport::ViewportManager;

const SCROLL_ZOOM_RATE: f32 = 0.0018;

#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
    NodeClicked(Node),
    EdgeClicked(Edge),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverTarget {
    Node(NodeId),
    Edge(EdgeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drag {
    Idle,
    Node(usize),
    Pan,
}

pub struct GraphEngine {
    config: EngineConfig,
    styles: StyleTable,
    nodes: Vec<PositionedNode>,
    edges: Vec<Edge>,
    links: Vec<(usize, usize)>,
    index_by_id: HashMap<NodeId, usize>,
    signature: Option<u64>,
    viewports: ViewportManager,
    origin: Pos2,
    needs_layout: bool,
    relaxation: Option<Relaxation>,
    camera: Camera,
    tween: Option<CameraTween>,
    fit: Deferred<()>,
    drag: Drag,
    hovered: Option<HoverTarget>,
}

impl GraphEngine {
    pub fn new(config: EngineConfig, styles: StyleTable) -> Self {
        let viewports = ViewportManager::new(config.resize_tolerance, config.resize_debounce_secs);
        Self {
            config,
            styles,
            nodes: Vec::new(),
            edges: Vec::new(),
            links: Vec::new(),
            index_by_id: HashMap::new(),
            signature: None,
            viewports,
            origin: Pos2::ZERO,
            needs_layout: false,
            relaxation: None,
            camera: Camera::default(),
            tween: None,
            fit: Deferred::default(),
            drag: Drag::Idle,
            hovered: None,
        }
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.index_by_id.get(id).and_then(|&index| self.nodes.get(index))
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewports.current()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.config.layout_mode
    }

    pub fn hovered(&self) -> Option<&HoverTarget> {
        self.hovered.as_ref()
    }

    pub fn is_relaxing(&self) -> bool {
        self.relaxation
            .as_ref()
            .is_some_and(|relaxation| !relaxation.is_settled())
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_layout
            || self.is_relaxing()
            || self.tween.is_some()
            || self.fit.is_pending()
            || self.viewports.has_pending()
    }

    /// Replaces the node and edge lists.
    ///
    /// Repeated node ids keep their first record. Positions survive when the
    /// ordered `(id, degree)` sequence is unchanged; otherwise a relayout is
    /// queued for the next [`advance`](Self::advance).
    pub fn set_graph(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) {
        let mut seen = HashSet::with_capacity(nodes.len());
        let nodes = nodes
            .into_iter()
            .filter(|node| {
                let fresh = seen.insert(node.id.clone());
                if !fresh {
                    log::warn!("ignoring duplicate node id {}", node.id);
                }
                fresh
            })
            .collect::<Vec<_>>();

        let centers = nodes.iter().filter(|node| node.ring() == Ring::Center).count();
        if centers > 1 {
            log::warn!("{centers} nodes sit on the center ring and will overlap");
        }

        let signature = node_set_signature(&nodes);
        if self.signature == Some(signature) {
            for (positioned, node) in self.nodes.iter_mut().zip(nodes) {
                positioned.node = node;
            }
        } else {
            self.signature = Some(signature);
            self.nodes = nodes
                .into_iter()
                .map(|node| PositionedNode {
                    node,
                    placement: Placement {
                        x: f32::NAN,
                        y: f32::NAN,
                        pinned: false,
                    },
                })
                .collect();
            self.relaxation = None;
            self.drag = Drag::Idle;
            self.needs_layout = true;
        }

        self.index_by_id = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, positioned)| (positioned.node.id.clone(), index))
            .collect();
        self.edges = edges;
        self.rebuild_links();
        self.hovered = None;
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        if self.config.layout_mode != mode {
            self.config.layout_mode = mode;
            self.drag = Drag::Idle;
            self.needs_layout = true;
        }
    }

    pub fn attach(&mut self) {
        self.viewports.attach();
    }

    pub fn detach(&mut self) {
        self.viewports.detach();
        self.fit.cancel();
        self.tween = None;
    }

    pub fn observe_viewport(&mut self, origin: Pos2, size: Viewport, now: f64) {
        self.origin = origin;
        if self.viewports.observe(size, now).is_some() {
            self.needs_layout = true;
        }
    }

    pub fn advance(&mut self, now: f64) {
        if self.needs_layout
            && let Some(viewport) = self.viewports.current()
        {
            self.relayout(viewport, now);
        }

        if let Some(relaxation) = self.relaxation.as_mut()
            && !relaxation.is_settled()
        {
            let ticks = self.config.relaxation.ticks_per_frame;
            let moving = relaxation.run(&mut self.nodes, &self.links, ticks);
            if !moving && self.drag == Drag::Idle {
                log::debug!("relaxation settled after {} iterations", relaxation.iterations());
                self.schedule_fit(now, self.config.fit_delay_secs);
            }
        }

        if self.fit.poll(now).is_some() {
            self.start_fit(now);
        }

        if let Some(tween) = self.tween {
            let (camera, done) = tween.sample(now);
            self.camera = camera;
            if done {
                self.tween = None;
            }
        }
    }

    pub fn render(&self, interaction: &InteractionState) -> Frame {
        render::render_frame(
            &self.nodes,
            &self.edges,
            interaction,
            self.camera,
            self.origin,
            &self.styles,
            &self.config,
        )
    }

    pub fn request_fit(&mut self, now: f64) {
        self.schedule_fit(now, 0.0);
    }

    pub fn hit_test(&self, pointer: Pos2) -> Option<Hit<'_>> {
        let world = self.camera.screen_to_world(self.origin, pointer);
        pick::hit_test(world, &self.nodes, &self.edges, &self.styles, &self.config)
    }

    pub fn click(&self, pointer: Pos2) -> Option<GraphEvent> {
        self.hit_test(pointer).map(|hit| match hit {
            Hit::Node(positioned) => GraphEvent::NodeClicked(positioned.node.clone()),
            Hit::Edge(edge) => GraphEvent::EdgeClicked(edge.clone()),
        })
    }

    pub fn hover(&mut self, pointer: Option<Pos2>) -> Option<&HoverTarget> {
        self.hovered = pointer
            .and_then(|pointer| self.hit_test(pointer))
            .map(|hit| match hit {
                Hit::Node(positioned) => HoverTarget::Node(positioned.node.id.clone()),
                Hit::Edge(edge) => HoverTarget::Edge(edge.id.clone()),
            });
        self.hovered.as_ref()
    }

    pub fn press(&mut self, pointer: Pos2) {
        let grabbed = if self.config.layout_mode == LayoutMode::Relaxation {
            match self.hit_test(pointer) {
                Some(Hit::Node(positioned)) => self.index_by_id.get(&positioned.node.id).copied(),
                _ => None,
            }
        } else {
            None
        };

        self.drag = match grabbed {
            Some(index) => {
                self.move_node(index, pointer);
                Drag::Node(index)
            }
            None => Drag::Pan,
        };
    }

    pub fn drag(&mut self, pointer: Pos2, delta: Vec2) {
        match self.drag {
            Drag::Node(index) => self.move_node(index, pointer),
            Drag::Pan => {
                self.camera.pan_by(delta);
                self.tween = None;
                self.fit.cancel();
            }
            Drag::Idle => {}
        }
    }

    pub fn release(&mut self) {
        self.drag = Drag::Idle;
    }

    pub fn zoom_at(&mut self, pointer: Pos2, scroll: f32) {
        if scroll.abs() <= f32::EPSILON {
            return;
        }
        let factor = (1.0 + scroll * SCROLL_ZOOM_RATE).clamp(0.85, 1.15);
        self.camera
            .zoom_around(self.origin, pointer, factor, self.zoom_bounds());
        self.tween = None;
        self.fit.cancel();
    }

    fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds {
            min: self.config.min_zoom,
            max: self.config.max_zoom,
        }
    }

    fn move_node(&mut self, index: usize, pointer: Pos2) {
        let world = self.camera.screen_to_world(self.origin, pointer);
        if !world.is_finite() {
            return;
        }
        if let Some(positioned) = self.nodes.get_mut(index) {
            positioned.placement = Placement {
                x: world.x,
                y: world.y,
                pinned: true,
            };
        }
        if let Some(relaxation) = self.relaxation.as_mut() {
            relaxation.reheat();
        }
    }

    fn rebuild_links(&mut self) {
        let mut dangling = 0usize;
        self.links = self
            .edges
            .iter()
            .filter_map(|edge| {
                let source = self.index_by_id.get(&edge.source);
                let target = self.index_by_id.get(&edge.target);
                match (source, target) {
                    (Some(&source), Some(&target)) => Some((source, target)),
                    _ => {
                        dangling += 1;
                        None
                    }
                }
            })
            .collect();

        if dangling > 0 {
            log::warn!("{dangling} edges reference unknown nodes and will not be drawn");
        }
    }

    fn relayout(&mut self, viewport: Viewport, now: f64) {
        self.needs_layout = false;
        let placements = layout::layout(&self.nodes, viewport, &self.config);
        for positioned in &mut self.nodes {
            if let Some(placement) = placements.get(&positioned.node.id) {
                positioned.placement = *placement;
            }
        }

        self.relaxation = match self.config.layout_mode {
            LayoutMode::Radial => None,
            LayoutMode::Relaxation => {
                let mut relaxation = Relaxation::new(
                    self.config.relaxation.clone(),
                    viewport.center(),
                    self.nodes.len(),
                );
                relaxation.warm_up(&mut self.nodes, &self.links);
                Some(relaxation)
            }
        };

        log::info!(
            "laid out {} nodes ({} layout) in {:.0}x{:.0}",
            self.nodes.len(),
            self.config.layout_mode.label(),
            viewport.width,
            viewport.height
        );
        self.schedule_fit(now, self.config.fit_delay_secs);
    }

    fn schedule_fit(&mut self, now: f64, delay_secs: f64) {
        if self.fit.schedule(now, delay_secs, ()) {
            log::debug!("superseded pending zoom-to-fit");
        }
    }

    fn start_fit(&mut self, now: f64) {
        let Some(viewport) = self.viewports.current() else {
            return;
        };
        let target = Camera::fit(
            self.nodes.iter().map(PositionedNode::pos),
            viewport,
            self.config.fit_margin,
            self.zoom_bounds(),
        );
        if let Some(target) = target {
            self.tween = Some(CameraTween::new(
                self.camera,
                target,
                now,
                self.config.fit_duration_secs,
            ));
        }
    }
}

fn node_set_signature(nodes: &[Node]) -> u64 {
    let mut hasher = DefaultHasher::new();
    nodes.len().hash(&mut hasher);
    for node in nodes {
        node.id.hash(&mut hasher);
        node.degree.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use eframe::egui::{pos2, vec2};

    use crate::config::RelaxationConfig;

    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn node(id: &str, degree: u32) -> Node {
        Node {
            id: id.to_owned(),
            name: format!("Person {id}"),
            tags: BTreeSet::new(),
            is_user: degree == 0,
            degree,
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

    fn engine(nodes: Vec<Node>, edges: Vec<Edge>, mode: LayoutMode) -> GraphEngine {
        let config = EngineConfig {
            layout_mode: mode,
            ..Default::default()
        };
        let mut engine = GraphEngine::new(config, StyleTable::default());
        engine.attach();
        engine.set_graph(nodes, edges);
        engine.observe_viewport(Pos2::ZERO, Viewport::new(400.0, 400.0), 0.0);
        engine.advance(0.0);
        engine
    }

    fn uab() -> GraphEngine {
        engine(
            vec![node("u", 0), node("a", 1), node("b", 1)],
            vec![edge("ua", "u", "a"), edge("ub", "u", "b")],
            LayoutMode::Radial,
        )
    }

    fn position(engine: &GraphEngine, id: &str) -> Pos2 {
        engine.node(id).unwrap().pos()
    }

    #[test]
    fn lays_out_the_three_node_scenario() {
        let engine = uab();
        assert!(position(&engine, "u").distance(pos2(200.0, 200.0)) < 1e-3);
        assert!(position(&engine, "a").distance(pos2(200.0, 100.0)) < 1e-3);
        assert!(position(&engine, "b").distance(pos2(200.0, 300.0)) < 1e-3);
        assert!(engine.nodes().iter().all(|node| node.placement.pinned));
    }

    #[test]
    fn empty_graph_renders_an_empty_frame() {
        let engine = engine(Vec::new(), Vec::new(), LayoutMode::Radial);
        assert!(engine.render(&InteractionState::default()).is_empty());
        assert_eq!(engine.click(pos2(200.0, 200.0)), None);
    }

    #[test]
    fn nothing_is_drawn_before_the_viewport_is_known() {
        let mut engine = GraphEngine::new(EngineConfig::default(), StyleTable::default());
        engine.set_graph(vec![node("u", 0)], Vec::new());
        engine.advance(0.0);
        assert!(engine.render(&InteractionState::default()).is_empty());
        assert!(engine.needs_repaint());
    }

    #[test]
    fn same_node_set_keeps_positions() {
        let mut engine = uab();
        engine.request_fit(0.0);
        engine.advance(1.0);
        engine.advance(2.0);
        let before = position(&engine, "a");

        let mut renamed = node("a", 1);
        renamed.name = "Alex Chen".to_owned();
        engine.set_graph(vec![node("u", 0), renamed, node("b", 1)], Vec::new());

        assert_eq!(position(&engine, "a"), before);
        assert_eq!(engine.node("a").unwrap().node.name, "Alex Chen");
        assert!(!engine.needs_repaint());
    }

    #[test]
    fn changed_degree_triggers_relayout() {
        let mut engine = uab();
        engine.set_graph(vec![node("u", 0), node("a", 1), node("b", 2)], Vec::new());
        assert!(engine.needs_repaint());
        assert!(!engine.node("b").unwrap().is_finite());

        engine.advance(0.5);
        // 400x400 outer ring radius is 168
        assert!(position(&engine, "b").distance(pos2(200.0, 32.0)) < 1e-3);
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let mut first = node("a", 1);
        first.name = "First".to_owned();
        let mut second = node("a", 2);
        second.name = "Second".to_owned();
        let engine = engine(vec![node("u", 0), first, second], Vec::new(), LayoutMode::Radial);

        assert_eq!(engine.nodes().len(), 2);
        assert_eq!(engine.node("a").unwrap().node.name, "First");
    }

    #[test]
    fn click_reports_nodes_and_edges() {
        let engine = uab();

        match engine.click(pos2(200.0, 100.0)) {
            Some(GraphEvent::NodeClicked(node)) => assert_eq!(node.id, "a"),
            other => panic!("expected node click, got {other:?}"),
        }
        match engine.click(pos2(207.5, 150.0)) {
            Some(GraphEvent::EdgeClicked(edge)) => assert_eq!(edge.id, "ua"),
            other => panic!("expected edge click, got {other:?}"),
        }
        assert_eq!(engine.click(pos2(20.0, 20.0)), None);
    }

    #[test]
    fn dangling_edge_is_neither_drawn_nor_clickable() {
        let engine = engine(
            vec![node("u", 0), node("a", 1)],
            vec![edge("ua", "u", "a"), edge("az", "a", "z")],
            LayoutMode::Radial,
        );
        let frame = engine.render(&InteractionState::default());

        let dangling = render::DrawTarget::Edge("az".to_owned());
        assert_eq!(frame.commands_for(dangling).count(), 0);
        assert_eq!(engine.links, vec![(0, 1)]);
    }

    #[test]
    fn hover_tracks_the_target_under_the_pointer() {
        let mut engine = uab();
        assert_eq!(
            engine.hover(Some(pos2(200.0, 300.0))),
            Some(&HoverTarget::Node("b".to_owned()))
        );
        assert_eq!(engine.hover(Some(pos2(10.0, 10.0))), None);
        assert_eq!(engine.hover(None), None);
    }

    #[test]
    fn zoom_to_fit_runs_after_the_delay() {
        let mut engine = uab();
        let initial = engine.camera();

        engine.advance(0.05);
        assert_eq!(engine.camera(), initial);

        let mut now = 0.05;
        while engine.needs_repaint() && now < 2.0 {
            now += FRAME;
            engine.advance(now);
        }
        let camera = engine.camera();
        assert!(camera.zoom > 1.0);
        for positioned in engine.nodes() {
            let screen = camera.world_to_screen(Pos2::ZERO, positioned.pos());
            assert!(screen.y >= 50.0 - 1e-2 && screen.y <= 350.0 + 1e-2);
        }
    }

    #[test]
    fn relayout_supersedes_a_pending_fit() {
        let mut engine = uab();
        assert!(engine.fit.is_pending());
        let initial = engine.camera();

        engine.set_graph(
            vec![node("u", 0), node("a", 1), node("b", 2)],
            vec![edge("ua", "u", "a")],
        );
        engine.advance(0.05);
        assert!(engine.fit.is_pending());

        engine.advance(0.12);
        assert!(engine.tween.is_none());
        assert_eq!(engine.camera(), initial);

        let mut starts = 0;
        let mut now = 0.12;
        while engine.needs_repaint() && now < 2.0 {
            now += FRAME;
            let idle = engine.tween.is_none();
            engine.advance(now);
            if idle && engine.tween.is_some() {
                starts += 1;
            }
        }
        assert_eq!(starts, 1);
        assert!(!engine.fit.is_pending());
        assert_ne!(engine.camera(), initial);
    }

    #[test]
    fn non_finite_fit_duration_snaps_the_camera() {
        let config = EngineConfig {
            fit_duration_secs: f64::NAN,
            ..Default::default()
        };
        let mut engine = GraphEngine::new(config, StyleTable::default());
        engine.attach();
        engine.set_graph(vec![node("u", 0), node("a", 1)], vec![edge("ua", "u", "a")]);
        engine.observe_viewport(Pos2::ZERO, Viewport::new(400.0, 400.0), 0.0);
        engine.advance(0.0);
        engine.request_fit(0.0);
        engine.advance(FRAME);

        let camera = engine.camera();
        assert!(camera.zoom.is_finite() && camera.offset.is_finite());
        assert!(engine.tween.is_none());
        assert!(!engine.needs_repaint());
    }

    #[test]
    fn user_interaction_cancels_pending_fit() {
        let mut engine = uab();
        engine.zoom_at(pos2(200.0, 200.0), 50.0);
        let zoomed = engine.camera();
        engine.advance(1.0);
        assert_eq!(engine.camera(), zoomed);
    }

    #[test]
    fn zoom_stays_in_bounds() {
        let mut engine = uab();
        for _ in 0..100 {
            engine.zoom_at(pos2(150.0, 120.0), 500.0);
        }
        assert_eq!(engine.camera().zoom, 6.0);
        for _ in 0..200 {
            engine.zoom_at(pos2(150.0, 120.0), -500.0);
        }
        assert_eq!(engine.camera().zoom, 0.3);
    }

    #[test]
    fn dragging_in_radial_mode_pans() {
        let mut engine = uab();
        engine.press(pos2(200.0, 100.0));
        engine.drag(pos2(210.0, 100.0), vec2(10.0, 0.0));
        engine.release();

        assert_eq!(engine.camera().offset, vec2(10.0, 0.0));
        assert!(position(&engine, "a").distance(pos2(200.0, 100.0)) < 1e-3);
    }

    #[test]
    fn two_connected_nodes_settle_in_relaxation_mode() {
        let mut engine = engine(
            vec![node("u", 0), node("a", 1)],
            vec![edge("ua", "u", "a")],
            LayoutMode::Relaxation,
        );
        assert!(engine.nodes().iter().all(|node| !node.placement.pinned));

        let mut now = 0.0;
        let mut frames = 0;
        while engine.is_relaxing() {
            now += FRAME;
            frames += 1;
            engine.advance(now);
            assert!(frames <= 300, "relaxation did not settle");
        }
        assert!(engine.nodes().iter().all(PositionedNode::is_finite));
        assert!(engine.fit.is_pending() || engine.tween.is_some());
    }

    #[test]
    fn dragged_node_stays_pinned_after_release() {
        let mut engine = engine(
            vec![node("u", 0), node("a", 1), node("b", 2)],
            vec![edge("ua", "u", "a"), edge("ab", "a", "b")],
            LayoutMode::Relaxation,
        );
        let grab = engine.camera().world_to_screen(Pos2::ZERO, position(&engine, "a"));

        engine.press(grab);
        engine.drag(pos2(50.0, 60.0), pos2(50.0, 60.0) - grab);
        engine.release();
        assert!(engine.is_relaxing());

        let mut now = 0.0;
        for _ in 0..120 {
            now += FRAME;
            engine.advance(now);
        }
        let dragged = engine.node("a").unwrap();
        assert!(dragged.placement.pinned);
        assert_eq!(dragged.pos(), pos2(50.0, 60.0));
        assert!(!engine.node("b").unwrap().placement.pinned);
    }

    #[test]
    fn new_node_set_drops_a_running_relaxation() {
        let config = EngineConfig {
            layout_mode: LayoutMode::Relaxation,
            relaxation: RelaxationConfig {
                alpha_decay: 0.0001,
                rest_speed: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut engine = GraphEngine::new(config, StyleTable::default());
        engine.attach();
        engine.set_graph(
            vec![node("u", 0), node("a", 1), node("b", 1), node("c", 2)],
            vec![edge("ua", "u", "a"), edge("ub", "u", "b"), edge("bc", "b", "c")],
        );
        engine.observe_viewport(Pos2::ZERO, Viewport::new(400.0, 400.0), 0.0);
        engine.advance(0.0);
        assert!(engine.is_relaxing());

        engine.set_graph(vec![node("u", 0), node("a", 1)], vec![edge("ua", "u", "a")]);
        assert!(!engine.is_relaxing());
        assert!(engine.nodes().iter().all(|node| !node.is_finite()));

        engine.advance(FRAME);
        assert_eq!(engine.nodes().len(), 2);
        assert!(engine.nodes().iter().all(PositionedNode::is_finite));
        assert!(engine.relaxation.as_ref().is_some_and(|run| run.iterations() > 0));
    }

    #[test]
    fn switching_layout_mode_relays_out() {
        let mut engine = uab();
        engine.set_layout_mode(LayoutMode::Relaxation);
        assert!(engine.needs_repaint());
        engine.advance(0.2);
        assert!(engine.nodes().iter().all(|node| !node.placement.pinned));
        assert_eq!(engine.layout_mode(), LayoutMode::Relaxation);
    }

    #[test]
    fn settled_resize_relays_out_and_detach_cancels() {
        let mut engine = uab();
        engine.observe_viewport(Pos2::ZERO, Viewport::new(800.0, 400.0), 1.0);
        engine.advance(1.0);
        assert_eq!(engine.viewport(), Some(Viewport::new(400.0, 400.0)));

        engine.observe_viewport(Pos2::ZERO, Viewport::new(800.0, 400.0), 1.2);
        engine.advance(1.2);
        assert_eq!(engine.viewport(), Some(Viewport::new(800.0, 400.0)));
        assert!(position(&engine, "u").distance(pos2(400.0, 200.0)) < 1e-3);

        engine.observe_viewport(Pos2::ZERO, Viewport::new(500.0, 400.0), 2.0);
        engine.detach();
        engine.observe_viewport(Pos2::ZERO, Viewport::new(500.0, 400.0), 3.0);
        engine.advance(3.0);
        assert_eq!(engine.viewport(), Some(Viewport::new(800.0, 400.0)));
        assert!(!engine.fit.is_pending());
    }
}
