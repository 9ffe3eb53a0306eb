// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a `ResizeSession` with a scripted pointer gesture.
//!
//! Two columns share a divider that runs the whole height, even though the
//! left column is split into two rows. Grabbing the divider next to either row
//! moves it for every cell on the line.
//!
//! Run:
//! - `cargo run -p understory_tiling_demos --example drag_session`

use kurbo::{Point, Size, Vec2};
use tracing::Level;
use understory_tiling::{Direction, Grid, MoveOutcome, PressOutcome, ResizeSession};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_target(false)
        .init();

    let mut grid = Grid::new(Size::new(800.0, 400.0));
    let left = grid.add_cell(0.0, 0.0, 0.0, 0.0);
    let Ok(right) = grid.split(left, Direction::Right, 0.5) else {
        return;
    };
    let Ok(lower_left) = grid.split(left, Direction::Bottom, 0.5) else {
        return;
    };

    let mut session = ResizeSession::new();
    // Near the divider at x = 400, inside the lower left cell.
    let press = session.on_press(&grid, Point::new(396.0, 300.0));
    match press {
        PressOutcome::Started(edge) => {
            println!("grabbed {} edge of {:?}", edge.direction(), edge.cell());
        }
        other => {
            println!("press did not start a drag: {other:?}");
            return;
        }
    }
    if let Some(ctx) = session.context() {
        println!(
            "moving {} cell(s) on the low side and {} on the high side",
            ctx.lower.len(),
            ctx.higher.len()
        );
    }

    // Drag right in steps; the last one would squash the right column.
    for delta in [
        Vec2::new(50.0, 4.0),
        Vec2::new(120.0, -2.0),
        Vec2::new(300.0, 0.0),
        Vec2::new(-40.0, 0.0),
    ] {
        let outcome = session.on_move(&mut grid, delta);
        let x = grid.cell_rect(right).map_or(f64::NAN, |r| r.x0);
        match outcome {
            MoveOutcome::Resized => println!("moved by {:>6.1}: divider at x = {x:.1}", delta.x),
            MoveOutcome::Blocked => println!("moved by {:>6.1}: blocked at x = {x:.1}", delta.x),
            MoveOutcome::Idle | MoveOutcome::Cancelled => break,
        }
    }
    session.on_release();

    for (name, id) in [("left", left), ("lower left", lower_left), ("right", right)] {
        if let Some(r) = grid.cell_rect(id) {
            println!("{name:<10} {:>6.1}..{:<6.1} x {:>6.1}..{:<6.1}", r.x0, r.x1, r.y0, r.y1);
        }
    }
}
