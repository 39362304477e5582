// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Core data model.
//!
//! Elements are the immutable items being picked; grid types describe where
//! they sit on the unbounded logical plane.

pub mod element;
pub mod grid;

pub use element::{Action, ColorPair, Element};
pub use grid::{GridLayout, Pos};
