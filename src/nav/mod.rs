// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Cursor navigation over the active layout.
//!
//! Everything here is a pure function of (layout, cursor): callers apply the
//! returned target only when it exists in the layout, so navigation is total
//! and never fails.

use smallvec::SmallVec;

use crate::layout::ring;
use crate::model::{GridLayout, Pos};


/// The target of a directional step, when it exists in the layout.
pub fn step(layout: &GridLayout, cursor: Pos, dx: i32, dy: i32) -> Option<Pos> {
    let target = cursor + Pos::new(dx, dy);
    layout.contains(target).then_some(target)
}

/// The positions of ring `r mod (max_distance + 1)` that are present in
/// `layout`, in ring order.
///
/// The modulo makes ring-wise traversal wrap around the outermost visible
/// ring; negative `r` wraps backwards.
pub fn visible_ring(layout: &GridLayout, r: i32) -> SmallVec<[Pos; 8]> {
    let modulus = layout.max_distance() + 1;
    ring(r.rem_euclid(modulus))
        .into_iter()
        .filter(|pos| layout.contains(*pos))
        .collect()
}

/// The position after `cursor` in ring traversal order.
///
/// Within the cursor's visible ring this advances by one; past the end it
/// jumps to the first position of the next visible ring (the modulo in
/// [`visible_ring`] wraps the outermost ring back to the innermost), falling
/// back to the layout's origin cell when that ring is empty.
pub fn next(layout: &GridLayout, cursor: Pos) -> Pos {
    let distance = cursor.manhattan();
    let current = visible_ring(layout, distance);
    match current.iter().position(|&pos| pos == cursor) {
        Some(idx) if idx + 1 < current.len() => current[idx + 1],
        _ => visible_ring(layout, distance + 1)
            .first()
            .copied()
            .unwrap_or_else(|| origin_cell(layout, cursor)),
    }
}

/// The position before `cursor` in ring traversal order; symmetric to
/// [`next`].
pub fn prev(layout: &GridLayout, cursor: Pos) -> Pos {
    let distance = cursor.manhattan();
    let current = visible_ring(layout, distance);
    match current.iter().position(|&pos| pos == cursor) {
        Some(idx) if idx > 0 => current[idx - 1],
        _ => visible_ring(layout, distance - 1)
            .last()
            .copied()
            .unwrap_or_else(|| origin_cell(layout, cursor)),
    }
}

/// The layout's origin cell: its start position (the first spiral position
/// that survived clipping, i.e. the translated grid origin when visible).
fn origin_cell(layout: &GridLayout, cursor: Pos) -> Pos {
    layout.start().unwrap_or(cursor)
}

/// The minimum-x position on the cursor's row.
pub fn line_begin(layout: &GridLayout, cursor: Pos) -> Pos {
    row_extremum(layout, cursor, true)
}

/// The maximum-x position on the cursor's row.
pub fn line_end(layout: &GridLayout, cursor: Pos) -> Pos {
    row_extremum(layout, cursor, false)
}

fn row_extremum(layout: &GridLayout, cursor: Pos, minimum: bool) -> Pos {
    let row = layout.cells().map(|(pos, _)| pos).filter(|pos| pos.y == cursor.y);
    let found = if minimum {
        row.min_by_key(|pos| pos.x)
    } else {
        row.max_by_key(|pos| pos.x)
    };
    found.unwrap_or(cursor)
}
