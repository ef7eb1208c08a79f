// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The diagram registry.
//!
//! ## Overview
//!
//! [`Diagram`] owns every node and link, the paint/pick order, the bucket grid
//! and the two gesture machines. All mutation goes through it, so the grid
//! can be kept in step with node positions.
//!
//! ## Ordering
//!
//! Links are inserted at the front of the figure order and nodes are appended
//! at the back. Painting walks front→back, so links are drawn under nodes;
//! picking walks back→front, so the most recently placed node wins.
//!
//! ## Grid staleness during drags
//!
//! The dragged node stays filed under the bucket of its drag-start corner
//! until the drag ends, when it is refiled once. Its own checks exclude it by
//! key; any other check made meanwhile, such as a double-click placement,
//! tests it directly instead of trusting its bucket.

use kurbo::Line;
use tracing::{debug, trace};
use weft_event_state::drag::{DragResolution, DragState, DragStep};
use weft_event_state::link::{LinkGesture, LinkOutcome, PendingLink};
use weft_index::{BucketGrid, IRect, IVec2};
use weft_precise_hit::stroke::Segment;
use weft_precise_hit::{HitParams, to_point};

use crate::arena::Arena;
use crate::config::DiagramConfig;
use crate::error::{InvariantViolation, PlacementError};
use crate::event::{Button, InputEvent, Key};
use crate::host::{Canvas, Host};
use crate::hover::HoverState;
use crate::render::{FigureRef, Hint, Surface, to_rect};
use crate::types::{FigureId, FigureKind, LINK_COLOR, Link, LinkId, Node, NodeId, PALETTE};
use crate::validator::Validator;

/// Nodes, links and interaction state for one canvas.
pub struct Diagram<H = Canvas> {
    host: H,
    config: DiagramConfig,
    nodes: Arena<NodeId, Node>,
    links: Arena<LinkId, Link>,
    figures: Vec<FigureId>,
    grid: BucketGrid<NodeId>,
    current_link: LinkGesture<NodeId>,
    drag: DragState<NodeId>,
    hover: HoverState<FigureId>,
    pointer: Option<IVec2>,
    next_color: usize,
}

impl<H> core::fmt::Debug for Diagram<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Diagram")
            .field("config", &self.config)
            .field("nodes", &self.nodes.len())
            .field("links", &self.links.len())
            .field("grid", &self.grid)
            .field("current_link", &self.current_link.pending())
            .field("dragging", &self.drag.target())
            .finish_non_exhaustive()
    }
}

impl<H: Host> Diagram<H> {
    /// An empty diagram with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, DiagramConfig::default())
    }

    /// An empty diagram.
    pub fn with_config(host: H, config: DiagramConfig) -> Self {
        Self {
            host,
            grid: BucketGrid::new(config.bucket_size()),
            config,
            nodes: Arena::new(),
            links: Arena::new(),
            figures: Vec::new(),
            current_link: LinkGesture::new(),
            drag: DragState::new(),
            hover: HoverState::new(),
            pointer: None,
            next_color: 0,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably; resize the canvas through this.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The bucket grid, for overlays and inspection.
    pub fn grid(&self) -> &BucketGrid<NodeId> {
        &self.grid
    }

    /// Current canvas size, as reported by the host.
    pub fn canvas_size(&self) -> IVec2 {
        self.host.canvas_size()
    }

    fn validator(&self) -> Validator<'_> {
        Validator {
            nodes: &self.nodes,
            grid: &self.grid,
            canvas: self.host.canvas_size(),
            in_flight: self.drag.target(),
        }
    }

    // --- placement ---

    /// A node-sized rectangle with its top-left corner at `origin`.
    ///
    /// `None` when the far corner does not fit in the coordinate range.
    pub fn node_rect_at(&self, origin: IVec2) -> Option<IRect> {
        IRect::checked_from_origin_size(origin, self.config.node_size())
    }

    /// A node-sized rectangle centered on `center`.
    ///
    /// `None` when a corner does not fit in the coordinate range.
    pub fn node_rect_centered(&self, center: IVec2) -> Option<IRect> {
        IRect::from_origin_size(IVec2::ZERO, self.config.node_size())
            .checked_with_center(center)
    }

    /// Why `rect` may not be occupied, ignoring the node `exclude`.
    pub fn check_position(
        &self,
        rect: &IRect,
        exclude: Option<NodeId>,
    ) -> Result<(), PlacementError> {
        self.validator().check(rect, exclude)
    }

    /// Whether `rect` lies inside the canvas and clear of every node other
    /// than `exclude`. Touching edges count as overlap.
    pub fn is_valid_position(&self, rect: &IRect, exclude: Option<NodeId>) -> bool {
        self.check_position(rect, exclude).is_ok()
    }

    /// Like [`check_position`](Self::check_position) for a fresh node, but a
    /// failure is also reported to the host.
    pub fn can_place(&mut self, rect: &IRect) -> Result<(), PlacementError> {
        let result = self.check_position(rect, None);
        if let Err(error) = &result {
            debug!(?rect, %error, "placement rejected");
            self.host.placement_rejected(error);
        }
        result
    }

    /// Place a node centered on `center`.
    pub fn place_node(&mut self, center: IVec2) -> Result<NodeId, PlacementError> {
        let rect = self.node_rect_centered(center);
        self.place_rect(rect)
    }

    /// Place a node with its top-left corner at `origin`.
    pub fn place_node_at(&mut self, origin: IVec2) -> Result<NodeId, PlacementError> {
        let rect = self.node_rect_at(origin);
        self.place_rect(rect)
    }

    fn place_rect(&mut self, rect: Option<IRect>) -> Result<NodeId, PlacementError> {
        let Some(rect) = rect else {
            let error = PlacementError::OutOfBounds;
            debug!(%error, "placement rejected: coordinates overflow");
            self.host.placement_rejected(&error);
            return Err(error);
        };
        self.can_place(&rect)?;
        Ok(self.insert_node(rect))
    }

    fn insert_node(&mut self, rect: IRect) -> NodeId {
        let color = PALETTE[self.next_color % PALETTE.len()];
        self.next_color = self.next_color.wrapping_add(1);
        let id = self.nodes.insert(Node::new(rect, color));
        self.figures.push(FigureId::Node(id));
        let bucket = self.grid.insert(id, rect.origin());
        debug!(?id, x = rect.min_x, y = rect.min_y, ?bucket, "node placed");
        id
    }

    /// Tile the canvas with nodes, half a node width apart and from the edges.
    ///
    /// Cells that would overlap an existing node or leave the canvas are
    /// skipped without reporting to the host. Returns how many were placed.
    pub fn fill_canvas(&mut self) -> usize {
        let size = self.config.node_size();
        let margin = IVec2::new(size.x / 2, size.x / 2);
        let cell = size + margin;
        let canvas = self.canvas_size();

        let mut placed = 0;
        let mut y = 0;
        while y <= canvas.y - size.y {
            let mut x = 0;
            while x <= canvas.x - size.x {
                let rect = self.node_rect_at(IVec2::new(x, y) + margin);
                if let Some(rect) = rect
                    && self.is_valid_position(&rect, None)
                {
                    self.insert_node(rect);
                    placed += 1;
                }
                x += cell.x;
            }
            y += cell.y;
        }
        debug!(placed, "canvas filled");
        placed
    }

    // --- removal ---

    /// Remove a node and every link touching it.
    ///
    /// A drag on the node is abandoned and a link being drawn from it is
    /// dropped. Returns `false` for a stale handle.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(id) else {
            return false;
        };

        // A dragged node is still filed under its drag-start corner.
        let drag_origin = self
            .drag
            .drag()
            .filter(|d| d.target == id)
            .map(|d| d.origin);
        if drag_origin.is_some() {
            self.drag.cancel();
        }
        self.grid.remove(id, drag_origin.unwrap_or(node.pos()));
        self.figures.retain(|f| *f != FigureId::Node(id));

        let attached: Vec<LinkId> = self
            .links
            .iter()
            .filter(|(_, link)| link.touches(id))
            .map(|(link_id, _)| link_id)
            .collect();
        for link_id in &attached {
            self.links.remove(*link_id);
        }
        if !attached.is_empty() {
            self.figures
                .retain(|f| !matches!(f, FigureId::Link(l) if attached.contains(l)));
        }

        if self.current_link.pending().is_some_and(|p| p.first == id) {
            self.current_link.cancel();
        }
        debug!(?id, links = attached.len(), "node removed");
        true
    }

    /// Remove a finalized link. Its nodes are untouched.
    pub fn remove_link(&mut self, id: LinkId) -> bool {
        if self.links.remove(id).is_none() {
            return false;
        }
        self.figures.retain(|f| *f != FigureId::Link(id));
        debug!(?id, "link removed");
        true
    }

    /// Remove whichever figure `id` names.
    pub fn remove_figure(&mut self, id: FigureId) -> bool {
        match id {
            FigureId::Node(node) => self.remove_node(node),
            FigureId::Link(link) => self.remove_link(link),
        }
    }

    /// Figures in paint order (back of the slice is on top).
    pub fn figures(&self) -> &[FigureId] {
        &self.figures
    }

    /// A node record.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// A link record.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// All live nodes, in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
    }

    /// All finalized links, in storage order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of finalized links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Whether `a` and `b` are linked, in either direction.
    pub fn link_exists(&self, a: NodeId, b: NodeId) -> bool {
        self.links.iter().any(|(_, link)| link.connects(a, b))
    }

    fn segment_between(&self, a: NodeId, b: NodeId) -> Option<Segment> {
        let a = self.nodes.get(a)?.center();
        let b = self.nodes.get(b)?.center();
        Some(Segment::new(a, b))
    }

    /// The segment a link is drawn along, between its nodes' centers.
    pub fn link_endpoints(&self, id: LinkId) -> Option<Segment> {
        let link = self.links.get(id)?;
        self.segment_between(link.first(), link.second())
    }

    /// A view of one figure.
    pub fn figure(&self, id: FigureId) -> Option<FigureRef<'_>> {
        match id {
            FigureId::Node(node_id) => self
                .nodes
                .get(node_id)
                .map(|node| FigureRef::Node(node_id, node)),
            FigureId::Link(link_id) => {
                let link = self.links.get(link_id)?;
                let segment = self.segment_between(link.first(), link.second())?;
                Some(FigureRef::Link(link_id, link, segment))
            }
        }
    }

    /// Views of every figure in paint order.
    pub fn iter_figures(&self) -> impl Iterator<Item = FigureRef<'_>> + '_ {
        self.figures.iter().filter_map(|&id| self.figure(id))
    }

    // --- picking ---

    /// Topmost figure under `point` that passes `filter`.
    ///
    /// Nodes hit when `point` is strictly inside them; `tolerance` only
    /// applies to links, which hit when strictly closer than it.
    pub fn pick_topmost(
        &self,
        point: IVec2,
        filter: Option<FigureKind>,
        tolerance: f64,
    ) -> Option<FigureId> {
        self.pick_with(point, filter, &HitParams::with_stroke_tolerance(tolerance))
    }

    fn pick_with(
        &self,
        point: IVec2,
        filter: Option<FigureKind>,
        params: &HitParams,
    ) -> Option<FigureId> {
        self.figures
            .iter()
            .rev()
            .copied()
            .filter(|id| filter.is_none_or(|kind| id.kind() == kind))
            .find(|&id| {
                self.figure(id)
                    .and_then(|figure| figure.hit_test(point, params))
                    .is_some()
            })
    }

    /// [`pick_topmost`](Self::pick_topmost) with the configured tolerance.
    pub fn pick(&self, point: IVec2, filter: Option<FigureKind>) -> Option<FigureId> {
        self.pick_with(point, filter, &self.config.hit_params())
    }

    /// Topmost node strictly containing `point`.
    pub fn node_at(&self, point: IVec2) -> Option<NodeId> {
        self.pick_with(point, Some(FigureKind::Node), &HitParams::default())
            .and_then(FigureId::as_node)
    }

    // --- links ---

    /// The link being drawn, if any.
    pub fn current_link(&self) -> Option<&PendingLink<NodeId>> {
        self.current_link.pending()
    }

    /// The segment from the pending link's node to its floating end.
    pub fn pending_segment(&self) -> Option<Segment> {
        let pending = self.current_link.pending()?;
        let start = self.nodes.get(pending.first)?.center();
        Some(Segment::new(start, pending.temp_point))
    }

    /// Start drawing a link from the node under `point`.
    ///
    /// Replaces a link already being drawn. Returns `false`, leaving any
    /// pending link alone, when no node is under `point`.
    pub fn start_link(&mut self, point: IVec2) -> bool {
        let Some(first) = self.node_at(point) else {
            debug!(?point, "link not started: no node under pointer");
            return false;
        };
        let Some(anchor) = self.nodes.get(first).map(Node::center) else {
            return false;
        };
        if let Some(previous) = self.current_link.start(first, anchor) {
            debug!(first = ?previous.first, "pending link replaced");
        }
        debug!(?first, "link started");
        true
    }

    /// Move the pending link's floating end. Returns whether a link is pending.
    pub fn track_link(&mut self, point: IVec2) -> bool {
        self.current_link.track(point)
    }

    /// Finish the pending link on the node under `point`.
    ///
    /// A finalized link goes to the front of the figure order. A release over
    /// nothing, over the starting node, or over an already linked node drops
    /// the link silently.
    pub fn finish_link(&mut self, point: IVec2) -> LinkOutcome<NodeId> {
        let target = self.node_at(point);
        let links = &self.links;
        let outcome = self.current_link.finish(target, |a, b| {
            links.iter().any(|(_, link)| link.connects(a, b))
        });
        match outcome {
            LinkOutcome::Finalized { first, second } => {
                let id = self.links.insert(Link::new(first, second));
                self.figures.insert(0, FigureId::Link(id));
                debug!(?id, ?first, ?second, "link created");
            }
            LinkOutcome::Discarded { first, reason } => {
                debug!(?first, ?reason, "link discarded");
            }
            LinkOutcome::Idle => {}
        }
        outcome
    }

    /// Drop the pending link. Returns whether there was one.
    pub fn cancel_link(&mut self) -> bool {
        let cancelled = self.current_link.cancel();
        if let Some(pending) = &cancelled {
            debug!(first = ?pending.first, "link cancelled");
        }
        cancelled.is_some()
    }

    // --- dragging ---

    /// The node being dragged, if any.
    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.target()
    }

    /// Start dragging the node under the clamped `point`.
    ///
    /// A drag already in progress is finished first.
    pub fn begin_drag(&mut self, point: IVec2) -> bool {
        if self.drag.is_dragging() {
            self.end_drag();
        }
        let canvas = self.canvas_size();
        let pointer = point.clamp_to(canvas);
        let Some(id) = self.node_at(pointer) else {
            return false;
        };
        let Some(rect) = self.nodes.get(id).map(Node::rect) else {
            return false;
        };
        let started = self.drag.on_down(id, rect, pointer, canvas);
        if started {
            debug!(?id, "drag started");
        }
        started
    }

    /// Move the dragged node toward `point`.
    ///
    /// Tries the pointer position, then the last valid position shifted by the
    /// pointer's movement, then stays put. The grid is not touched.
    pub fn drag_to(&mut self, point: IVec2) -> Option<DragStep<NodeId>> {
        let id = self.drag.target()?;
        let Some(rect) = self.nodes.get(id).map(Node::rect) else {
            self.drag.cancel();
            return None;
        };
        let validator = Validator {
            nodes: &self.nodes,
            grid: &self.grid,
            canvas: self.host.canvas_size(),
            in_flight: Some(id),
        };
        let step = self
            .drag
            .on_move(rect, point, validator.canvas, |candidate| {
                validator.check(candidate, Some(id)).is_ok()
            })?;

        if let Some(node) = self.nodes.get_mut(id) {
            node.rect = step.rect;
        }
        match step.resolution {
            DragResolution::Reverted => debug!(?id, ?point, "drag step reverted"),
            resolution => trace!(
                ?id,
                ?resolution,
                x = step.rect.min_x,
                y = step.rect.min_y,
                "drag step"
            ),
        }
        Some(step)
    }

    /// Finish the drag and refile the node in the grid.
    pub fn end_drag(&mut self) -> bool {
        let Some(end) = self.drag.on_up() else {
            return false;
        };
        let Some(pos) = self.nodes.get(end.target).map(Node::pos) else {
            return false;
        };
        let rebucketed = self.grid.relocate(end.target, end.origin, pos);
        debug!(id = ?end.target, rebucketed, "drag finished");
        true
    }

    // --- input ---

    /// Last pointer position seen.
    pub fn pointer(&self) -> Option<IVec2> {
        self.pointer
    }

    /// The figure under the pointer as of the last event.
    pub fn hovered(&self) -> Option<FigureId> {
        self.hover.current()
    }

    /// Route one input event. Returns whether anything visible changed.
    ///
    /// Diagram-wide gestures run first (create, link start/finish, removal),
    /// then the pending link and the node drag see the event.
    pub fn process_input(&mut self, event: &InputEvent) -> bool {
        if let Some(position) = event.position() {
            self.pointer = Some(position);
        }

        let mut changed = false;
        match *event {
            InputEvent::DoubleClick {
                button: Button::Left,
                position,
            } => changed |= self.place_node(position).is_ok(),
            InputEvent::PointerDown {
                button: Button::Right,
                position,
            } => {
                self.start_link(position);
                changed = true;
            }
            InputEvent::PointerDown {
                button: Button::Middle,
                position,
            } => {
                if let Some(figure) = self.pick(position, None) {
                    changed |= self.remove_figure(figure);
                }
            }
            InputEvent::PointerUp {
                button: Button::Right,
                position,
            } if self.current_link.is_active() => {
                self.finish_link(position);
                changed = true;
            }
            InputEvent::KeyRelease { key: Key::Delete } => {
                if let Some(figure) = self.pointer.and_then(|p| self.pick(p, None)) {
                    changed |= self.remove_figure(figure);
                }
            }
            InputEvent::KeyRelease { key: Key::Escape } => changed |= self.cancel_link(),
            _ => {}
        }

        match *event {
            InputEvent::PointerMove { position, .. } => {
                changed |= self.track_link(position);
                changed |= self.drag_to(position).is_some();
            }
            InputEvent::PointerDown {
                button: Button::Left,
                position,
            } => changed |= self.begin_drag(position),
            InputEvent::PointerUp {
                button: Button::Left,
                ..
            } => changed |= self.end_drag(),
            _ => {}
        }

        changed | self.refresh_hover()
    }

    fn refresh_hover(&mut self) -> bool {
        let next = self.pointer.and_then(|p| self.pick(p, None));
        let transitions = self.hover.update(next);
        for transition in &transitions {
            trace!(?transition, "hover");
        }
        !transitions.is_empty()
    }

    // --- rendering ---

    /// Describe every figure, then the pending link on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for figure in self.iter_figures() {
            figure.render(surface);
        }
        if let Some(segment) = self.pending_segment() {
            surface.stroke_line(segment.to_line(), LINK_COLOR);
        }
    }

    /// Draw the bucket boundaries.
    pub fn render_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let canvas = self.canvas_size();
        for x in self.grid.bucket_lines(canvas.x) {
            surface.grid_line(Line::new(
                to_point(IVec2::new(x, 0)),
                to_point(IVec2::new(x, canvas.y)),
            ));
        }
        for y in self.grid.bucket_lines(canvas.y) {
            surface.grid_line(Line::new(
                to_point(IVec2::new(0, y)),
                to_point(IVec2::new(canvas.x, y)),
            ));
        }
    }

    /// Hint for the figure under the last pointer position.
    pub fn hover_hint(&self) -> Option<Hint> {
        let pointer = self.pointer?;
        let figure = self.pick(pointer, None)?;
        let text = self.figure(figure)?.hint();
        let origin = pointer.checked_add(self.config.hint_offset)?;
        Some(Hint {
            figure,
            text,
            frame: IRect::checked_from_origin_size(origin, self.config.hint_size)?,
        })
    }

    /// Draw the hover hint, if any.
    pub fn render_hint<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(hint) = self.hover_hint() {
            surface.draw_hint(to_rect(hint.frame), hint.text);
        }
    }

    /// Check the resting-state rules, returning the first one broken.
    ///
    /// Every live figure is listed once with links ahead of nodes, each node
    /// is inside the canvas and clear of the others, each node is filed under
    /// the bucket of its anchor (the drag-start corner while dragged), and
    /// every link's nodes exist.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.figures.len() != self.nodes.len() + self.links.len() {
            return Err(InvariantViolation::FigureOrder);
        }
        let mut seen_node = false;
        for &figure in &self.figures {
            let live = match figure {
                FigureId::Node(id) => {
                    seen_node = true;
                    self.nodes.contains(id)
                }
                FigureId::Link(id) => !seen_node && self.links.contains(id),
            };
            if !live {
                return Err(InvariantViolation::FigureOrder);
            }
        }
        if self
            .nodes
            .iter()
            .any(|(id, _)| !self.figures.contains(&FigureId::Node(id)))
            || self
                .links
                .iter()
                .any(|(id, _)| !self.figures.contains(&FigureId::Link(id)))
        {
            return Err(InvariantViolation::FigureOrder);
        }

        if self.grid.len() != self.nodes.len() {
            return Err(InvariantViolation::GridSize {
                grid: self.grid.len(),
                nodes: self.nodes.len(),
            });
        }

        let bounds = IRect::from_origin_size(IVec2::ZERO, self.canvas_size());
        let drag = self.drag.drag();
        let nodes: Vec<(NodeId, &Node)> = self.nodes.iter().collect();
        for (i, &(id, node)) in nodes.iter().enumerate() {
            if !bounds.contains_rect(&node.rect) {
                return Err(InvariantViolation::OutOfBounds(id));
            }
            let anchor = drag
                .filter(|d| d.target == id)
                .map_or(node.pos(), |d| d.origin);
            let expected = self.grid.bucket_of(anchor);
            if !self.grid.contains(id, expected) {
                return Err(InvariantViolation::StaleBucket { node: id, expected });
            }
            for &(other, other_node) in &nodes[i + 1..] {
                if node.rect.overlaps(&other_node.rect) {
                    return Err(InvariantViolation::Overlap(id, other));
                }
            }
        }

        for (id, link) in self.links.iter() {
            if !self.nodes.contains(link.first()) || !self.nodes.contains(link.second()) {
                return Err(InvariantViolation::DanglingLink(id));
            }
        }
        Ok(())
    }
}
