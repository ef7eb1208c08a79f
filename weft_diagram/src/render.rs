// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render contract.
//!
//! The diagram never draws pixels. It walks its figures in paint order and
//! describes each one to a [`Surface`] using `kurbo` shapes; the surface
//! decides what that looks like.

use kurbo::{Line, Rect};
use weft_index::{IRect, IVec2};
use weft_precise_hit::stroke::Segment;
use weft_precise_hit::{HitParams, HitScore, PreciseHitTest, to_point};

use crate::types::{Color, FigureId, FigureKind, LINK_COLOR, Link, LinkId, Node, NodeId};

/// Hint shown while hovering a node.
pub const NODE_HINT: &str =
    "Drag LMB to drag node\nDrag RMB to create link\nPress middle mouse button to remove";

/// Hint shown while hovering a link.
pub const LINK_HINT: &str = "Press middle mouse button to remove";

/// Drawing target for a diagram.
pub trait Surface {
    /// Fill a node rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a link.
    fn stroke_line(&mut self, line: Line, color: Color);

    /// Draw a hint frame with `text` inside.
    fn draw_hint(&mut self, frame: Rect, text: &str) {
        let _ = (frame, text);
    }

    /// Draw one line of the bucket overlay.
    fn grid_line(&mut self, line: Line) {
        let _ = line;
    }
}

/// Convert an integer rectangle to a kurbo rectangle.
pub fn to_rect(rect: IRect) -> Rect {
    Rect::from_points(
        to_point(rect.origin()),
        to_point(IVec2::new(rect.max_x, rect.max_y)),
    )
}

/// A borrowed view of one figure, with link endpoints already resolved.
#[derive(Copy, Clone, Debug)]
pub enum FigureRef<'a> {
    /// A node and its record.
    Node(NodeId, &'a Node),
    /// A link, its record, and the segment between its node centers.
    Link(LinkId, &'a Link, Segment),
}

impl FigureRef<'_> {
    /// The figure's handle.
    pub fn id(&self) -> FigureId {
        match *self {
            Self::Node(id, _) => FigureId::Node(id),
            Self::Link(id, _, _) => FigureId::Link(id),
        }
    }

    /// The figure's kind.
    pub fn kind(&self) -> FigureKind {
        self.id().kind()
    }

    /// Hit test. Nodes use the open rectangle and ignore tolerance; links hit
    /// strictly within `params.stroke_tolerance`.
    pub fn hit_test(&self, pt: IVec2, params: &HitParams) -> Option<HitScore> {
        match self {
            Self::Node(_, node) => node.rect.hit_test(pt, params),
            Self::Link(_, _, segment) => segment.hit_test(pt, params),
        }
    }

    /// Describe the figure to `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        match self {
            Self::Node(_, node) => surface.fill_rect(to_rect(node.rect), node.color()),
            Self::Link(_, _, segment) => surface.stroke_line(segment.to_line(), LINK_COLOR),
        }
    }

    /// Hover hint text.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Node(..) => NODE_HINT,
            Self::Link(..) => LINK_HINT,
        }
    }
}

/// Hover hint for the figure under the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    /// The hovered figure.
    pub figure: FigureId,
    /// Text to show.
    pub text: &'static str,
    /// Where to draw the hint box.
    pub frame: IRect,
}
