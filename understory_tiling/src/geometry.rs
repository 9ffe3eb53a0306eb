// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers for pointer hit testing.

use kurbo::{Point, Rect};

use crate::direction::Direction;

/// Whether `point` lies strictly inside `rect`.
///
/// Points on the boundary are outside, so a point exactly on a line shared by
/// two cells hits neither of them.
pub fn is_point_in_rect(point: Point, rect: Rect) -> bool {
    rect.x0 < point.x && point.x < rect.x1 && rect.y0 < point.y && point.y < rect.y1
}

/// The side of `rect` nearest to `point`, which is expected to lie inside it.
///
/// Ties between left and right go to right, ties between top and bottom go to
/// bottom, and a tie between the nearest of left/right and the nearest of
/// top/bottom goes to top or bottom.
pub fn closest_side(point: Point, rect: Rect) -> Direction {
    let l_dist = point.x - rect.x0;
    let r_dist = rect.x1 - point.x;
    let (h_closest, h_min) = if l_dist < r_dist {
        (Direction::Left, l_dist)
    } else {
        (Direction::Right, r_dist)
    };
    let t_dist = point.y - rect.y0;
    let b_dist = rect.y1 - point.y;
    let (v_closest, v_min) = if t_dist < b_dist {
        (Direction::Top, t_dist)
    } else {
        (Direction::Bottom, b_dist)
    };
    if h_min < v_min { h_closest } else { v_closest }
}
