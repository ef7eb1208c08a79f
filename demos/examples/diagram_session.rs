// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted editing session fed through `Diagram::process_input`.
//!
//! This example shows:
//! - placing nodes with double clicks, and a rejected placement,
//! - drawing links with the right button, including discarded gestures,
//! - dragging a node into a neighbor and watching it slide instead,
//! - removing a node and the links attached to it.
//!
//! Run:
//! - `cargo run -p weft_demos --example diagram_session`

use weft_diagram::{Button, Buttons, Diagram, FigureId, Host, InputEvent, Key, PlacementError};
use weft_index::IVec2;

/// Host that prints diagnostics the way a status bar would show them.
struct StatusBar {
    size: IVec2,
}

impl Host for StatusBar {
    fn canvas_size(&self) -> IVec2 {
        self.size
    }

    fn placement_rejected(&mut self, error: &PlacementError) {
        println!("  status: {error}");
    }
}

fn describe(diagram: &Diagram<StatusBar>) {
    for id in diagram.figures() {
        match *id {
            FigureId::Node(node_id) => {
                if let Some(node) = diagram.node(node_id) {
                    let c = node.center();
                    println!("    node  {:>2} at ({}, {})", node_id.index(), c.x, c.y);
                }
            }
            FigureId::Link(link_id) => {
                if let Some(link) = diagram.link(link_id) {
                    println!(
                        "    link  {:>2}: {} <-> {}",
                        link_id.index(),
                        link.first().index(),
                        link.second().index()
                    );
                }
            }
        }
    }
    let check = diagram.check_invariants();
    println!("    consistent: {}", check.is_ok());
}

fn main() {
    let mut diagram = Diagram::new(StatusBar {
        size: IVec2::new(900, 600),
    });

    let script: &[(&str, InputEvent)] = &[
        ("double-click at (200, 300)", InputEvent::double_click(Button::Left, (200, 300))),
        ("double-click at (400, 300)", InputEvent::double_click(Button::Left, (400, 300))),
        ("double-click at (600, 450)", InputEvent::double_click(Button::Left, (600, 450))),
        ("double-click at (420, 310)", InputEvent::double_click(Button::Left, (420, 310))),
        ("right press on first node", InputEvent::down(Button::Right, (200, 300))),
        ("right drag across canvas", InputEvent::moved(Buttons::RIGHT, (300, 380))),
        ("right release on second node", InputEvent::up(Button::Right, (400, 300))),
        ("right press on first node", InputEvent::down(Button::Right, (200, 300))),
        ("right release on second node again", InputEvent::up(Button::Right, (400, 300))),
        ("right press on second node", InputEvent::down(Button::Right, (400, 300))),
        ("right release on third node", InputEvent::up(Button::Right, (600, 450))),
        ("left press on first node", InputEvent::down(Button::Left, (200, 300))),
        ("drag toward second node", InputEvent::moved(Buttons::LEFT, (330, 300))),
        ("drag into second node", InputEvent::moved(Buttons::LEFT, (345, 310))),
        ("drag up past it", InputEvent::moved(Buttons::LEFT, (345, 280))),
        ("left release", InputEvent::up(Button::Left, (345, 280))),
        ("hover the second node", InputEvent::moved(Buttons::empty(), (400, 300))),
        ("press Delete", InputEvent::key(Key::Delete)),
    ];

    for (label, event) in script {
        let repaint = diagram.process_input(event);
        println!("\n== {label} ==");
        println!("  repaint: {repaint}");
        if let Some(pending) = diagram.current_link() {
            println!(
                "  drawing link from node {} to ({}, {})",
                pending.first.index(),
                pending.temp_point.x,
                pending.temp_point.y
            );
        }
        if let Some(hint) = diagram.hover_hint() {
            println!("  hint: {}", hint.text.replace('\n', " / "));
        }
        describe(&diagram);
    }
}
