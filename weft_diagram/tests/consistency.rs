// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resting-state rules, picking and the render contract.

use kurbo::{Line, Rect};
use weft_diagram::render::{LINK_HINT, NODE_HINT};
use weft_diagram::{
    Button, Buttons, Canvas, Color, Diagram, DiagramConfig, FigureId, FigureKind, InputEvent, Key,
    LINK_COLOR, PlacementError, Surface,
};
use weft_index::{IRect, IVec2};

fn diagram() -> Diagram {
    Diagram::new(Canvas::new(900, 600))
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Fill(Rect, Color),
    Stroke(Line, Color),
    Hint(Rect, String),
    Grid(Line),
}

#[derive(Debug, Default)]
struct Recording(Vec<Op>);

impl Surface for Recording {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.0.push(Op::Fill(rect, color));
    }

    fn stroke_line(&mut self, line: Line, color: Color) {
        self.0.push(Op::Stroke(line, color));
    }

    fn draw_hint(&mut self, frame: Rect, text: &str) {
        self.0.push(Op::Hint(frame, text.to_owned()));
    }

    fn grid_line(&mut self, line: Line) {
        self.0.push(Op::Grid(line));
    }
}

#[test]
fn one_pixel_gap_is_valid_touching_is_not() {
    let mut d = diagram();
    let a = d.place_node_at(IVec2::new(100, 100)).unwrap();

    assert!(d.place_node_at(IVec2::new(161, 100)).is_ok(), "1px gap to the right");
    assert_eq!(
        d.place_node_at(IVec2::new(160, 200)).map(|_| ()),
        Ok(()),
        "different row, no contact"
    );
    assert_eq!(
        d.place_node_at(IVec2::new(100, 130)),
        Err(PlacementError::Overlaps(a)),
        "touching the bottom edge overlaps"
    );
    assert!(d.place_node_at(IVec2::new(100, 131)).is_ok(), "1px gap below");
    assert!(matches!(
        d.place_node_at(IVec2::new(40, 100)),
        Err(PlacementError::Overlaps(_))
    ));
    assert!(d.place_node_at(IVec2::new(39, 100)).is_ok(), "1px gap to the left");
    assert!(d.check_invariants().is_ok());
}

#[test]
fn nodes_may_sit_flush_with_the_canvas_edges() {
    let mut d = diagram();
    assert!(d.place_node_at(IVec2::new(0, 0)).is_ok());
    assert!(d.place_node_at(IVec2::new(840, 570)).is_ok());
    assert_eq!(
        d.place_node_at(IVec2::new(840, 571)),
        Err(PlacementError::OutOfBounds)
    );
    assert!(d.check_invariants().is_ok());
}

#[test]
fn shrinking_the_canvas_is_visible_to_the_invariant_check() {
    let mut d = diagram();
    let a = d.place_node_at(IVec2::new(800, 500)).unwrap();
    d.host_mut().resize(600, 400);
    assert_eq!(
        d.check_invariants(),
        Err(weft_diagram::InvariantViolation::OutOfBounds(a))
    );
}

#[test]
fn picking_is_idempotent_and_link_existence_symmetric() {
    let mut d = diagram();
    d.fill_canvas();
    let ids: Vec<_> = d.nodes().map(|(id, _)| id).collect();
    for pair in ids.windows(2).step_by(3) {
        let (a, b) = (pair[0], pair[1]);
        let (ca, cb) = (d.node(a).unwrap().center(), d.node(b).unwrap().center());
        d.start_link(ca);
        d.finish_link(cb);
    }
    assert!(d.link_count() > 0);

    for x in (0..900).step_by(7) {
        for y in (0..600).step_by(11) {
            let p = IVec2::new(x, y);
            assert_eq!(d.pick(p, None), d.pick(p, None), "pick at {p:?} changed");
        }
    }
    for &a in &ids {
        for &b in &ids {
            assert_eq!(d.link_exists(a, b), d.link_exists(b, a));
        }
    }
}

#[test]
fn render_paints_links_under_nodes_and_pending_link_last() {
    let mut d = diagram();
    let a = d.place_node(IVec2::new(300, 300)).unwrap();
    let b = d.place_node(IVec2::new(500, 300)).unwrap();
    d.start_link(IVec2::new(300, 300));
    d.finish_link(IVec2::new(500, 300));
    d.process_input(&InputEvent::down(Button::Right, (500, 300)));
    d.process_input(&InputEvent::moved(Buttons::RIGHT, (700, 100)));

    let mut surface = Recording::default();
    d.render(&mut surface);

    let expected = vec![
        Op::Stroke(Line::new((300.0, 300.0), (500.0, 300.0)), LINK_COLOR),
        Op::Fill(
            Rect::new(270.0, 285.0, 330.0, 315.0),
            d.node(a).unwrap().color(),
        ),
        Op::Fill(
            Rect::new(470.0, 285.0, 530.0, 315.0),
            d.node(b).unwrap().color(),
        ),
        Op::Stroke(Line::new((500.0, 300.0), (700.0, 100.0)), LINK_COLOR),
    ];
    assert_eq!(surface.0, expected);
}

#[test]
fn link_endpoints_follow_dragged_nodes() {
    let mut d = diagram();
    let a = d.place_node(IVec2::new(300, 300)).unwrap();
    d.place_node(IVec2::new(500, 300)).unwrap();
    d.start_link(IVec2::new(300, 300));
    d.finish_link(IVec2::new(500, 300));
    let link = d.figures()[0].as_link().unwrap();

    d.begin_drag(IVec2::new(300, 300));
    d.drag_to(IVec2::new(300, 100));
    d.end_drag();
    assert_eq!(d.node(a).unwrap().center(), IVec2::new(300, 100));
    let segment = d.link_endpoints(link).unwrap();
    assert_eq!(segment.p0, IVec2::new(300, 100));
    assert_eq!(segment.p1, IVec2::new(500, 300));
}

#[test]
fn hover_hint_tracks_the_figure_under_the_pointer() {
    let mut d = diagram();
    let a = d.place_node(IVec2::new(300, 300)).unwrap();
    d.place_node(IVec2::new(500, 300)).unwrap();
    d.start_link(IVec2::new(300, 300));
    d.finish_link(IVec2::new(500, 300));

    assert!(d.hover_hint().is_none(), "no pointer seen yet");

    d.process_input(&InputEvent::moved(Buttons::empty(), (300, 300)));
    let hint = d.hover_hint().unwrap();
    assert_eq!(hint.figure, FigureId::Node(a));
    assert_eq!(hint.text, NODE_HINT);
    assert_eq!(hint.frame, IRect::new(310, 310, 510, 360));

    d.process_input(&InputEvent::moved(Buttons::empty(), (400, 302)));
    let hint = d.hover_hint().unwrap();
    assert_eq!(hint.figure.kind(), FigureKind::Link);
    assert_eq!(hint.text, LINK_HINT);

    let mut surface = Recording::default();
    d.render_hint(&mut surface);
    assert_eq!(
        surface.0,
        vec![Op::Hint(
            Rect::new(410.0, 312.0, 610.0, 362.0),
            LINK_HINT.to_owned()
        )]
    );
}

#[test]
fn grid_overlay_marks_every_bucket_boundary() {
    let d = diagram();
    let mut surface = Recording::default();
    d.render_grid(&mut surface);
    // Buckets are 120 wide: 8 vertical lines over 900, 5 horizontal over 600.
    assert_eq!(surface.0.len(), 8 + 5);
    assert_eq!(
        surface.0[1],
        Op::Grid(Line::new((120.0, 0.0), (120.0, 600.0)))
    );
    assert_eq!(
        surface.0[8],
        Op::Grid(Line::new((0.0, 0.0), (900.0, 0.0)))
    );
}

#[test]
fn custom_sizes_flow_through_placement_and_grid() {
    let config = DiagramConfig::default()
        .with_node_height(10)
        .with_bucket_factor(3);
    let mut d = Diagram::with_config(Canvas::new(200, 100), config);
    let a = d.place_node_at(IVec2::new(0, 0)).unwrap();
    assert_eq!(d.node(a).unwrap().rect(), IRect::new(0, 0, 20, 10));
    assert_eq!(d.grid().bucket_size(), 60);
    assert!(d.place_node_at(IVec2::new(21, 0)).is_ok());
    assert!(d.place_node_at(IVec2::new(20, 11)).is_ok());
    assert!(d.place_node_at(IVec2::new(20, 10)).is_err());
}

#[test]
fn configured_pick_tolerance_widens_links_only() {
    let config = DiagramConfig::default().with_pick_tolerance(10.0);
    let mut d = Diagram::with_config(Canvas::new(900, 600), config);
    let a = d.place_node(IVec2::new(300, 300)).unwrap();
    d.place_node(IVec2::new(500, 300)).unwrap();
    d.start_link(IVec2::new(300, 300));
    d.finish_link(IVec2::new(500, 300));

    assert_eq!(
        d.pick(IVec2::new(400, 309), None).map(|f| f.kind()),
        Some(FigureKind::Link)
    );
    assert_eq!(d.pick(IVec2::new(400, 310), None), None);
    // Node edges stay tight whatever the tolerance.
    assert_eq!(d.pick(IVec2::new(330, 300), Some(FigureKind::Node)), None);
    assert_eq!(d.pick(IVec2::new(329, 300), None), Some(FigureId::Node(a)));
}

/// Small deterministic generator for event soup.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> i64 {
        i64::try_from(self.next() % n).unwrap()
    }
}

#[test]
fn random_sessions_keep_every_rule() {
    for seed in 1..=8 {
        let mut rng = Lcg(seed);
        let mut d = diagram();
        for step in 0..1500 {
            let pos = (rng.below(1000) - 50, rng.below(700) - 50);
            let event = match rng.below(10) {
                0 | 1 => InputEvent::double_click(Button::Left, pos),
                2 => InputEvent::down(Button::Left, pos),
                3 | 4 => InputEvent::moved(Buttons::LEFT, pos),
                5 => InputEvent::up(Button::Left, pos),
                6 => InputEvent::down(Button::Right, pos),
                7 => InputEvent::up(Button::Right, pos),
                8 => InputEvent::down(Button::Middle, pos),
                _ => InputEvent::key(if rng.below(2) == 0 {
                    Key::Delete
                } else {
                    Key::Escape
                }),
            };
            d.process_input(&event);
            if let Err(violation) = d.check_invariants() {
                panic!("seed {seed}, step {step}, after {event:?}: {violation}");
            }
        }
        d.process_input(&InputEvent::up(Button::Left, (0, 0)));
        assert!(d.dragging().is_none());
        assert!(d.check_invariants().is_ok());
    }
}
