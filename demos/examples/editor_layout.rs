// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build an IDE-style panel layout by splitting, then resize the window and
//! close a panel.
//!
//! Run:
//! - `cargo run -p understory_tiling_demos --example editor_layout`

use kurbo::Size;
use tracing::Level;
use understory_tiling::{CellId, Direction, Grid, TilingError};

fn print_layout(grid: &Grid, panels: &[(&str, CellId)]) {
    println!("container {}x{}", grid.size().width, grid.size().height);
    for (name, id) in panels {
        match grid.cell_rect(*id) {
            Some(r) => println!(
                "  {name:<10} x {:>6.1}..{:<6.1} y {:>6.1}..{:<6.1}",
                r.x0, r.x1, r.y0, r.y1
            ),
            None => println!("  {name:<10} (closed)"),
        }
    }
}

fn main() -> Result<(), TilingError> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    let mut grid = Grid::new(Size::new(1000.0, 600.0));
    let main = grid.add_cell(0.0, 0.0, 0.0, 0.0);

    // File tree on the left fifth, log along the bottom of the rest.
    let tree = grid.split(main, Direction::Left, 0.2)?;
    let log = grid.split(main, Direction::Bottom, 0.3)?;
    // Properties on the right, with an actions strip above them.
    let properties = grid.split(main, Direction::Right, 0.375)?;
    let actions = grid.split(properties, Direction::Top, 0.5)?;

    let panels = [
        ("main", main),
        ("tree", tree),
        ("log", log),
        ("properties", properties),
        ("actions", actions),
    ];
    print_layout(&grid, &panels);
    let changes = grid.take_changes();
    println!(
        "{} added, {} updated",
        changes.added.len(),
        changes.updated.len()
    );

    // Offsets are fractional, so a window resize keeps the proportions.
    grid.set_size(Size::new(1400.0, 900.0));
    print_layout(&grid, &panels);
    grid.take_changes();

    // The file tree spans the full height; its neighbors across the right
    // edge (main and log) cover exactly that span and absorb it.
    grid.delete(tree)?;
    print_layout(&grid, &panels);
    let changes = grid.take_changes();
    println!(
        "removed {:?}, updated {:?}",
        changes.removed, changes.updated
    );

    if let Err(violation) = grid.check_partition() {
        tracing::error!(%violation, "layout no longer tiles the container");
    }
    Ok(())
}
