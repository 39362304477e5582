// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Diamond layout generation.
//!
//! Positions are generated in expanding rings of increasing Manhattan radius,
//! forming a spiral over the integer plane. The spiral is truncated, shifted
//! towards the configured origin, clipped to the viewport, and zipped with the
//! element sequence.

use smallvec::SmallVec;

use crate::model::{GridLayout, Pos};

/// How many spiral positions are generated before clipping.
///
/// Viewports with more than this many visible cells leave the excess
/// elements unreachable.
pub const SPIRAL_CANDIDATE_CAP: usize = 1000;

/// Grid geometry for one session, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondParams {
    pub viewport_width: u16,
    pub viewport_height: u16,
    pub cell_width: u16,
    pub cell_height: u16,
    pub origin_fraction_x: f64,
    pub origin_fraction_y: f64,
}

impl DiamondParams {
    pub fn restrict_x(&self) -> i32 {
        restrict(self.viewport_width, self.cell_width)
    }

    pub fn restrict_y(&self) -> i32 {
        restrict(self.viewport_height, self.cell_height)
    }

    pub fn origin_offset(&self) -> Pos {
        Pos::new(
            origin_offset(self.origin_fraction_x, self.restrict_x()),
            origin_offset(self.origin_fraction_y, self.restrict_y()),
        )
    }
}

/// The maximum grid offset (in cells) that fits the viewport on one axis.
fn restrict(viewport: u16, cell: u16) -> i32 {
    if cell == 0 {
        return 0;
    }
    (i32::from(viewport / cell) - 1).div_euclid(2).max(0)
}

/// Maps a fractional origin in `[0, 1]` (0.5 = centered) into
/// `[-restrict, restrict]`.
fn origin_offset(fraction: f64, restrict: i32) -> i32 {
    ((fraction - 0.5) * 2.0 * f64::from(restrict)).floor() as i32
}

/// The diamond ring at Manhattan radius `r`: the single origin cell for
/// `r = 0`, otherwise exactly `4r` positions starting at `(r, 0)` and sweeping
/// the four diamond edges in a fixed rotational order.
pub fn ring(r: i32) -> SmallVec<[Pos; 8]> {
    if r <= 0 {
        return SmallVec::from_slice(&[Pos::ORIGIN]);
    }
    let mut positions = SmallVec::with_capacity(4 * r as usize);
    for i in 0..4 * r {
        let quadrant = i / r;
        let step = i % r;
        let pos = match quadrant {
            0 => Pos::new(r - step, step),
            1 => Pos::new(-step, r - step),
            2 => Pos::new(-(r - step), -step),
            _ => Pos::new(step, -(r - step)),
        };
        positions.push(pos);
    }
    positions
}

/// The infinite spiral: rings concatenated by increasing radius.
pub fn spiral() -> impl Iterator<Item = Pos> {
    (0i32..).flat_map(ring)
}

/// Produces the layout for `element_indices` under `params`.
///
/// Element indices refer to the full session list; pass the filtered subset in
/// input order. Elements beyond the generated/visible positions receive no
/// cell and are unreachable for the session.
pub fn layout(element_indices: &[usize], params: &DiamondParams) -> GridLayout {
    let restrict_x = params.restrict_x();
    let restrict_y = params.restrict_y();
    let offset = params.origin_offset();

    let cells = spiral()
        .take(SPIRAL_CANDIDATE_CAP)
        .map(|pos| pos + offset)
        .filter(|pos| pos.x.abs() <= restrict_x && pos.y.abs() <= restrict_y)
        .zip(element_indices.iter().copied())
        .collect();
    GridLayout::from_cells(cells)
}

/// Top-left viewport coordinates of the cell at `pos`. May fall outside the
/// viewport for positions beyond the restrict bounds.
pub fn cell_origin(pos: Pos, params: &DiamondParams) -> (i32, i32) {
    let vw = i32::from(params.viewport_width);
    let vh = i32::from(params.viewport_height);
    let cw = i32::from(params.cell_width);
    let ch = i32::from(params.cell_height);
    (vw / 2 - cw / 2 + pos.x * cw, vh / 2 - ch / 2 + pos.y * ch)
}

/// The grid position covering the viewport coordinate `(column, row)`.
///
/// Exact inverse of [`cell_origin`] over each cell's extent, so pointer
/// releases resolve to the same geometry the layout was drawn with.
pub fn pos_at(column: u16, row: u16, params: &DiamondParams) -> Pos {
    let cw = i32::from(params.cell_width).max(1);
    let ch = i32::from(params.cell_height).max(1);
    let (left0, top0) = cell_origin(Pos::ORIGIN, params);
    Pos::new(
        (i32::from(column) - left0).div_euclid(cw),
        (i32::from(row) - top0).div_euclid(ch),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(vw: u16, vh: u16, cw: u16, ch: u16) -> DiamondParams {
        DiamondParams {
            viewport_width: vw,
            viewport_height: vh,
            cell_width: cw,
            cell_height: ch,
            origin_fraction_x: 0.5,
            origin_fraction_y: 0.5,
        }
    }

    #[test]
    fn ring_zero_is_the_origin() {
        assert_eq!(ring(0).as_slice(), &[Pos::ORIGIN]);
    }

    #[test]
    fn rings_have_4n_positions_at_distance_n() {
        for n in 1..=6 {
            let positions = ring(n);
            assert_eq!(positions.len(), 4 * n as usize, "ring {n}");
            for pos in &positions {
                assert_eq!(pos.manhattan(), n, "ring {n} position {pos}");
            }
            let mut unique = positions.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), positions.len(), "ring {n} duplicates");
        }
    }

    #[test]
    fn ring_one_sweeps_the_four_corners_in_order() {
        let positions = ring(1);
        assert_eq!(
            positions.as_slice(),
            &[Pos::new(1, 0), Pos::new(0, 1), Pos::new(-1, 0), Pos::new(0, -1)]
        );
    }

    #[test]
    fn spiral_starts_at_origin_and_expands() {
        let positions: Vec<Pos> = spiral().take(13).collect();
        assert_eq!(positions[0], Pos::ORIGIN);
        assert_eq!(positions.len(), 13);
        // Radii are non-decreasing: ring 0, then 1, then 2.
        let radii: Vec<i32> = positions.iter().map(Pos::manhattan).collect();
        assert_eq!(radii, vec![0, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn restrict_follows_viewport_and_cell_size() {
        assert_eq!(restrict(80, 10), 3);
        assert_eq!(restrict(80, 20), 1);
        assert_eq!(restrict(30, 10), 1);
        assert_eq!(restrict(10, 10), 0);
        assert_eq!(restrict(5, 10), 0);
        assert_eq!(restrict(5, 0), 0);
    }

    #[test]
    fn origin_offset_maps_fraction_range() {
        assert_eq!(origin_offset(0.5, 3), 0);
        assert_eq!(origin_offset(0.0, 3), -3);
        assert_eq!(origin_offset(1.0, 3), 3);
        assert_eq!(origin_offset(0.25, 4), -2);
    }

    #[test]
    fn layout_zips_positions_with_elements_in_order() {
        // 3x1 cells visible: restrict_x = 1, restrict_y = 0.
        let p = params(30, 3, 10, 3);
        let indices = [0usize, 1, 2];
        let grid = layout(&indices, &p);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.element_at(Pos::ORIGIN), Some(0));
        assert_eq!(grid.element_at(Pos::new(1, 0)), Some(1));
        assert_eq!(grid.element_at(Pos::new(-1, 0)), Some(2));
        assert_eq!(grid.start(), Some(Pos::ORIGIN));
    }

    #[test]
    fn layout_clips_to_the_viewport() {
        let p = params(30, 3, 10, 3);
        let indices: Vec<usize> = (0..10).collect();
        let grid = layout(&indices, &p);
        // Only 3 cells fit; the rest of the elements are unreachable.
        assert_eq!(grid.len(), 3);
        for (pos, _) in grid.cells() {
            assert!(pos.x.abs() <= 1 && pos.y == 0);
        }
    }

    #[test]
    fn degenerate_viewport_still_shows_the_origin_cell() {
        // Viewport narrower than one cell: restrict clamps at 0 instead of
        // going negative, so the origin cell stays visible.
        let p = params(5, 3, 10, 3);
        assert_eq!(p.restrict_x(), 0);
        let grid = layout(&[0, 1], &p);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.element_at(Pos::ORIGIN), Some(0));
    }

    #[test]
    fn layout_is_capped_at_one_thousand_candidates() {
        let p = params(1000, 1000, 2, 2);
        let indices: Vec<usize> = (0..5000).collect();
        let grid = layout(&indices, &p);
        assert!(grid.len() <= SPIRAL_CANDIDATE_CAP);
    }

    #[test]
    fn off_center_origin_shifts_the_start_position() {
        let p = DiamondParams {
            origin_fraction_x: 0.0,
            origin_fraction_y: 0.5,
            ..params(70, 3, 10, 3)
        };
        let indices: Vec<usize> = (0..7).collect();
        let grid = layout(&indices, &p);
        // restrict_x = 3, offset_x = -3: the first spiral position lands on
        // the left edge of the visible band.
        assert_eq!(grid.start(), Some(Pos::new(-3, 0)));
        assert_eq!(grid.element_at(Pos::new(-3, 0)), Some(0));
    }

    #[test]
    fn pos_at_inverts_cell_origin() {
        let p = params(80, 24, 10, 3);
        for x in -3..=3 {
            for y in -3..=3 {
                let pos = Pos::new(x, y);
                let (left, top) = cell_origin(pos, &p);
                if left < 0 || top < 0 {
                    continue;
                }
                for dx in 0..10 {
                    for dy in 0..3 {
                        let column = (left + dx) as u16;
                        let row = (top + dy) as u16;
                        assert_eq!(pos_at(column, row, &p), pos);
                    }
                }
            }
        }
    }
}
