// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Key bindings.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

/// An engine action a key chord can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(i32, i32),
    Next,
    Prev,
    LineBegin,
    LineEnd,
    SolidifyInclude,
    SolidifyExclude,
    Backspace,
    ClearUncommitted,
    Confirm,
    Cancel,
}

/// A user-configurable map from (modifier mask, key code) to an [`Action`].
///
/// Chars not covered by the map fall through to literal filter input.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), Action>,
}

impl Keymap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Binds a chord, replacing any previous binding for it.
    pub fn bind(&mut self, modifiers: KeyModifiers, code: KeyCode, action: Action) {
        self.bindings.insert((modifiers, code), action);
    }

    pub fn lookup(&self, modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
        self.bindings.get(&(modifiers, code)).copied()
    }

    /// The stock bindings: arrow / emacs-style movement, Tab-cycling through
    /// rings, line jumps, filter commits, and session exits.
    pub fn standard() -> Self {
        let mut map = Self::empty();
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        map.bind(none, KeyCode::Left, Action::Move(-1, 0));
        map.bind(none, KeyCode::Right, Action::Move(1, 0));
        map.bind(none, KeyCode::Up, Action::Move(0, -1));
        map.bind(none, KeyCode::Down, Action::Move(0, 1));
        map.bind(ctrl, KeyCode::Char('b'), Action::Move(-1, 0));
        map.bind(ctrl, KeyCode::Char('f'), Action::Move(1, 0));

        map.bind(none, KeyCode::Tab, Action::Next);
        map.bind(KeyModifiers::SHIFT, KeyCode::BackTab, Action::Prev);
        map.bind(none, KeyCode::BackTab, Action::Prev);
        map.bind(ctrl, KeyCode::Char('n'), Action::Next);
        map.bind(ctrl, KeyCode::Char('p'), Action::Prev);

        map.bind(none, KeyCode::Home, Action::LineBegin);
        map.bind(none, KeyCode::End, Action::LineEnd);
        map.bind(ctrl, KeyCode::Char('a'), Action::LineBegin);
        map.bind(ctrl, KeyCode::Char('e'), Action::LineEnd);

        map.bind(ctrl, KeyCode::Char('s'), Action::SolidifyInclude);
        map.bind(ctrl, KeyCode::Char('x'), Action::SolidifyExclude);
        map.bind(none, KeyCode::Backspace, Action::Backspace);
        map.bind(ctrl, KeyCode::Char('h'), Action::Backspace);
        map.bind(ctrl, KeyCode::Char('u'), Action::ClearUncommitted);

        map.bind(none, KeyCode::Enter, Action::Confirm);
        map.bind(none, KeyCode::Esc, Action::Cancel);
        map.bind(ctrl, KeyCode::Char('c'), Action::Cancel);

        map
    }
}
