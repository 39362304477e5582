// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Lozenge — interactive diamond-grid terminal picker.
//!
//! Elements are laid out on an expanding diamond grid, narrowed with stackable
//! substring filters, and navigated ring-wise until one of them is committed.

pub mod filter;
pub mod layout;
pub mod model;
pub mod nav;
pub mod session;
pub mod source;
pub mod tui;
