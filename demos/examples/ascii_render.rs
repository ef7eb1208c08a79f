// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render a diagram through a `Surface` that rasterizes to characters.
//!
//! Each character cell covers 10×20 canvas units. Nodes are drawn with `#`,
//! links with `.`, and the bucket overlay with `+`.
//!
//! Run:
//! - `cargo run -p weft_demos --example ascii_render`

use kurbo::{Line, ParamCurve, Rect};
use weft_diagram::{Canvas, Color, Diagram, Surface};
use weft_index::IVec2;

const CELL_W: f64 = 10.0;
const CELL_H: f64 = 20.0;

struct Ascii {
    rows: Vec<Vec<char>>,
}

impl Ascii {
    fn new(size: IVec2) -> Self {
        let cols = usize::try_from(size.x).unwrap_or(0) / CELL_W as usize;
        let rows = usize::try_from(size.y).unwrap_or(0) / CELL_H as usize;
        Self {
            rows: vec![vec![' '; cols]; rows],
        }
    }

    fn plot(&mut self, x: f64, y: f64, ch: char) {
        let (col, row) = ((x / CELL_W) as usize, (y / CELL_H) as usize);
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = ch;
        }
    }

    fn trace(&mut self, line: Line, ch: char) {
        let steps = (line.p0.distance(line.p1) / 4.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = line.eval(i as f64 / steps as f64);
            self.plot(p.x, p.y, ch);
        }
    }
}

impl Surface for Ascii {
    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        let mut y = rect.y0;
        while y < rect.y1 {
            let mut x = rect.x0;
            while x < rect.x1 {
                self.plot(x, y, '#');
                x += CELL_W / 2.0;
            }
            y += CELL_H / 2.0;
        }
    }

    fn stroke_line(&mut self, line: Line, _color: Color) {
        self.trace(line, '.');
    }

    fn grid_line(&mut self, line: Line) {
        self.trace(line, '+');
    }
}

fn main() {
    let mut diagram = Diagram::new(Canvas::new(600, 400));
    let placed = diagram.fill_canvas();
    println!("fill_canvas placed {placed} nodes");

    // Thin the tiling out and link the survivors in a chain.
    let ids: Vec<_> = diagram.nodes().map(|(id, _)| id).collect();
    for (i, id) in ids.iter().enumerate() {
        if i % 3 != 0 {
            diagram.remove_node(*id);
        }
    }
    let centers: Vec<IVec2> = diagram.nodes().map(|(_, n)| n.center()).collect();
    for pair in centers.windows(2) {
        diagram.start_link(pair[0]);
        diagram.finish_link(pair[1]);
    }
    println!(
        "{} nodes, {} links, consistent: {}",
        diagram.node_count(),
        diagram.link_count(),
        diagram.check_invariants().is_ok()
    );

    let mut surface = Ascii::new(diagram.canvas_size());
    diagram.render_grid(&mut surface);
    diagram.render(&mut surface);
    for row in &surface.rows {
        println!("{}", row.iter().collect::<String>());
    }
}
