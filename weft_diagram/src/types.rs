// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles and stored records for diagram figures.

use weft_index::{IRect, IVec2};

use crate::arena::Handle;

/// Handle to a node owned by a [`Diagram`](crate::Diagram).
///
/// Handles are generational: once the node is removed, the handle never
/// resolves again, even if its slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32, u32);

/// Handle to a finalized link owned by a [`Diagram`](crate::Diagram).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct LinkId(u32, u32);

macro_rules! impl_handle {
    ($ty:ident) => {
        impl Handle for $ty {
            fn from_parts(idx: u32, generation: u32) -> Self {
                Self(idx, generation)
            }
            fn idx(self) -> usize {
                self.0 as usize
            }
            fn generation(self) -> u32 {
                self.1
            }
        }

        impl $ty {
            /// Slot index, stable while the handle is live.
            pub const fn index(self) -> u32 {
                self.0
            }
        }
    };
}

impl_handle!(NodeId);
impl_handle!(LinkId);

/// Either kind of figure in the diagram's paint/pick order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FigureId {
    /// A node.
    Node(NodeId),
    /// A finalized link.
    Link(LinkId),
}

impl FigureId {
    /// The figure's kind.
    pub const fn kind(self) -> FigureKind {
        match self {
            Self::Node(_) => FigureKind::Node,
            Self::Link(_) => FigureKind::Link,
        }
    }

    /// The node handle, if this is a node.
    pub const fn as_node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::Link(_) => None,
        }
    }

    /// The link handle, if this is a link.
    pub const fn as_link(self) -> Option<LinkId> {
        match self {
            Self::Link(id) => Some(id),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeId> for FigureId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<LinkId> for FigureId {
    fn from(id: LinkId) -> Self {
        Self::Link(id)
    }
}

/// Figure kind, used as a pick filter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FigureKind {
    /// Nodes only.
    Node,
    /// Links only.
    Link,
}

/// An opaque 8-bit RGB color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    /// Build a color from its components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    #[allow(clippy::cast_possible_truncation, reason = "Masked to a byte first.")]
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgb8(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    /// Pure black.
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
}

/// Node fill colors, handed out in turn as nodes are created.
pub const PALETTE: [Color; 15] = [
    Color::from_hex(0xe6ccff),
    Color::from_hex(0x9999ff),
    Color::from_hex(0x99c2ff),
    Color::from_hex(0x99ebff),
    Color::from_hex(0x66ffcc),
    Color::from_hex(0x98e698),
    Color::from_hex(0xdfbf9f),
    Color::from_hex(0xffdd99),
    Color::from_hex(0xffaa80),
    Color::from_hex(0xffb3cc),
    Color::from_hex(0xdf9fbf),
    Color::from_hex(0xc2c2d6),
    Color::from_hex(0xb3d9ff),
    Color::from_hex(0xdddddd),
    Color::from_hex(0xff9999),
];

/// Stroke color for links, finalized or pending.
pub const LINK_COLOR: Color = Color::BLACK;

/// A fixed-size rectangular diagram element.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) rect: IRect,
    color: Color,
}

impl Node {
    pub(crate) fn new(rect: IRect, color: Color) -> Self {
        Self { rect, color }
    }

    /// Current bounds.
    pub fn rect(&self) -> IRect {
        self.rect
    }

    /// Top-left corner.
    pub fn pos(&self) -> IVec2 {
        self.rect.origin()
    }

    /// Center point; links attach here.
    pub fn center(&self) -> IVec2 {
        self.rect.center()
    }

    /// Fill color, fixed at creation.
    pub fn color(&self) -> Color {
        self.color
    }
}

/// A finalized connection between two distinct nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Link {
    first: NodeId,
    second: NodeId,
}

impl Link {
    pub(crate) fn new(first: NodeId, second: NodeId) -> Self {
        Self { first, second }
    }

    /// Node the gesture started on.
    pub fn first(&self) -> NodeId {
        self.first
    }

    /// Node the gesture finished on.
    pub fn second(&self) -> NodeId {
        self.second
    }

    /// Whether this link joins `a` and `b`, in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        weft_event_state::link::is_same_pair(&self.first, &self.second, &a, &b)
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.first == node || self.second == node
    }
}
