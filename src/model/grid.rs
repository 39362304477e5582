// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Grid positions and layouts.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Sub};

/// A position on the unbounded logical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance from the grid origin.
    pub fn manhattan(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, other: Pos) -> Pos {
        Pos::new(self.x - other.x, self.y - other.y)
    }
}

/// An ordered association of unique positions to element indices.
///
/// Order is generation (spiral) order; the first cell is the layout's start
/// position. Element indices refer to the session's full element list, so a
/// filtered layout still identifies elements unambiguously.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    cells: Vec<(Pos, usize)>,
    by_pos: HashMap<Pos, usize>,
}

impl GridLayout {
    /// Builds a layout from cells in generation order.
    ///
    /// Positions are unique by construction of the spiral; a duplicate would
    /// indicate a generator bug, so later duplicates are ignored.
    pub fn from_cells(cells: Vec<(Pos, usize)>) -> Self {
        let mut unique = Vec::with_capacity(cells.len());
        let mut by_pos = HashMap::with_capacity(cells.len());
        for (pos, element) in cells {
            if by_pos.insert(pos, element).is_none() {
                unique.push((pos, element));
            }
        }
        Self {
            cells: unique,
            by_pos,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.by_pos.contains_key(&pos)
    }

    /// The element index occupying `pos`, if any.
    pub fn element_at(&self, pos: Pos) -> Option<usize> {
        self.by_pos.get(&pos).copied()
    }

    /// The designated start position: the first cell in generation order.
    pub fn start(&self) -> Option<Pos> {
        self.cells.first().map(|(pos, _)| *pos)
    }

    /// Cells in generation order.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, usize)> + '_ {
        self.cells.iter().copied()
    }

    /// The maximum Manhattan distance over the layout's positions (0 when the
    /// layout has at most one entry).
    pub fn max_distance(&self) -> i32 {
        self.cells.iter().map(|(pos, _)| pos.manhattan()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(Pos::ORIGIN.manhattan(), 0);
        assert_eq!(Pos::new(2, -3).manhattan(), 5);
        assert_eq!(Pos::new(-1, 0).manhattan(), 1);
    }

    #[test]
    fn layout_preserves_order_and_lookup() {
        let layout = GridLayout::from_cells(vec![
            (Pos::new(0, 0), 7),
            (Pos::new(1, 0), 3),
            (Pos::new(0, 1), 9),
        ]);
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.start(), Some(Pos::ORIGIN));
        assert_eq!(layout.element_at(Pos::new(1, 0)), Some(3));
        assert_eq!(layout.element_at(Pos::new(5, 5)), None);
        assert!(layout.contains(Pos::new(0, 1)));
        assert_eq!(layout.max_distance(), 1);
    }

    #[test]
    fn empty_layout_has_no_start() {
        let layout = GridLayout::default();
        assert!(layout.is_empty());
        assert_eq!(layout.start(), None);
        assert_eq!(layout.max_distance(), 0);
    }
}
