// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete input events fed to [`Diagram::process_input`](crate::Diagram::process_input).

use weft_index::IVec2;

/// A single pointer button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    /// Primary button: drag nodes, double-click to create.
    Left,
    /// Secondary button: draw links.
    Right,
    /// Middle button: remove figures.
    Middle,
}

bitflags::bitflags! {
    /// Set of pointer buttons held during a move.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Buttons: u8 {
        /// Left button held.
        const LEFT = 1 << 0;
        /// Right button held.
        const RIGHT = 1 << 1;
        /// Middle button held.
        const MIDDLE = 1 << 2;
    }
}

impl From<Button> for Buttons {
    fn from(button: Button) -> Self {
        match button {
            Button::Left => Self::LEFT,
            Button::Right => Self::RIGHT,
            Button::Middle => Self::MIDDLE,
        }
    }
}

/// Keys the diagram reacts to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Remove the figure under the pointer.
    Delete,
    /// Drop the link being drawn.
    Escape,
    /// Any other key; ignored.
    Other(char),
}

/// An input event in canvas coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// A button went down.
    PointerDown {
        /// Which button.
        button: Button,
        /// Pointer position.
        position: IVec2,
    },
    /// The pointer moved.
    PointerMove {
        /// Buttons held during the move.
        buttons: Buttons,
        /// Pointer position.
        position: IVec2,
    },
    /// A button was released.
    PointerUp {
        /// Which button.
        button: Button,
        /// Pointer position.
        position: IVec2,
    },
    /// A double click.
    DoubleClick {
        /// Which button.
        button: Button,
        /// Pointer position.
        position: IVec2,
    },
    /// A key was released.
    KeyRelease {
        /// Which key.
        key: Key,
    },
}

impl InputEvent {
    /// Button press at `position`.
    pub fn down(button: Button, position: impl Into<IVec2>) -> Self {
        Self::PointerDown {
            button,
            position: position.into(),
        }
    }

    /// Button release at `position`.
    pub fn up(button: Button, position: impl Into<IVec2>) -> Self {
        Self::PointerUp {
            button,
            position: position.into(),
        }
    }

    /// Pointer move to `position` with `buttons` held.
    pub fn moved(buttons: Buttons, position: impl Into<IVec2>) -> Self {
        Self::PointerMove {
            buttons,
            position: position.into(),
        }
    }

    /// Double click at `position`.
    pub fn double_click(button: Button, position: impl Into<IVec2>) -> Self {
        Self::DoubleClick {
            button,
            position: position.into(),
        }
    }

    /// Key release.
    pub fn key(key: Key) -> Self {
        Self::KeyRelease { key }
    }

    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<IVec2> {
        match *self {
            Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. }
            | Self::DoubleClick { position, .. } => Some(position),
            Self::KeyRelease { .. } => None,
        }
    }
}
