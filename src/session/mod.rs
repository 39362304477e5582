// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! The session state machine.
//!
//! A session owns the element list, the grid geometry, the filter stack, and
//! the cursor, and consumes input events until a selection is committed or the
//! session is cancelled. Rendering goes through the [`Renderer`] contract so
//! the engine stays independent of the terminal backend.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::filter::{Commit, FilterStack};
use crate::layout::{self, DiamondParams};
use crate::model::{Element, GridLayout, Pos};
use crate::nav;

pub mod keymap;

pub use keymap::{Action, Keymap};


/// One input event from the external event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Pointer button released at viewport cell coordinates.
    PointerRelease { column: u16, row: u16 },
    /// Damage/expose notification with the number of further pending reports.
    Damage { pending: usize },
    Other,
}

/// The committed element: its index in the input order and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub value: String,
}

/// Session lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Committed(Selection),
    Cancelled,
}

/// Read-only snapshot handed to the renderer.
pub struct SessionView<'a> {
    pub layout: &'a GridLayout,
    pub elements: &'a [Element],
    pub cursor: Option<Pos>,
    pub params: &'a DiamondParams,
}

/// Rendering backend contract.
///
/// All three calls are idempotent and cheap enough to issue after every
/// state-changing operation. `redraw_cells` is an optimization hint; a
/// backend may fall back to a full redraw.
pub trait Renderer {
    fn redraw_all(&mut self, view: &SessionView<'_>) -> io::Result<()>;
    fn redraw_cells(&mut self, view: &SessionView<'_>, cells: &[Pos]) -> io::Result<()>;
    fn update_filter_bar(&mut self, text: &str) -> io::Result<()>;
}

/// One interactive picking session.
pub struct Session {
    elements: Vec<Element>,
    params: DiamondParams,
    keymap: Keymap,
    base_layout: GridLayout,
    filters: FilterStack,
    cursor: Option<Pos>,
    status: Status,
}

impl Session {
    pub fn new(elements: Vec<Element>, params: DiamondParams, keymap: Keymap) -> Self {
        let indices: Vec<usize> = (0..elements.len()).collect();
        let base_layout = layout::layout(&indices, &params);
        let cursor = base_layout.start();
        Self {
            elements,
            params,
            keymap,
            base_layout,
            filters: FilterStack::new(),
            cursor,
            status: Status::Running,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, Status::Running)
    }

    pub fn cursor(&self) -> Option<Pos> {
        self.cursor
    }

    pub fn params(&self) -> &DiamondParams {
        &self.params
    }

    pub fn filters(&self) -> &FilterStack {
        &self.filters
    }

    /// The layout of the topmost filter frame, or the unfiltered layout.
    pub fn active_layout(&self) -> &GridLayout {
        self.filters.active_layout().unwrap_or(&self.base_layout)
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            layout: self.active_layout(),
            elements: &self.elements,
            cursor: self.cursor,
            params: &self.params,
        }
    }

    /// The unconditional full paint issued before the first event.
    pub fn paint(&self, renderer: &mut dyn Renderer) -> io::Result<()> {
        renderer.redraw_all(&self.view())?;
        renderer.update_filter_bar(&self.filters.display())
    }

    /// Dispatches one event. Terminal states ignore further events.
    pub fn handle(&mut self, event: Event, renderer: &mut dyn Renderer) -> io::Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        match event {
            Event::Key(key) => self.handle_key(key, renderer),
            Event::PointerRelease { column, row } => {
                let pos = layout::pos_at(column, row, &self.params);
                self.confirm_at(pos);
                Ok(())
            }
            Event::Damage { pending: 0 } => self.paint(renderer),
            Event::Damage { .. } | Event::Other => Ok(()),
        }
    }

    /// Recomputes every layout for a new viewport and repaints.
    pub fn resize(
        &mut self,
        viewport_width: u16,
        viewport_height: u16,
        renderer: &mut dyn Renderer,
    ) -> io::Result<()> {
        self.params.viewport_width = viewport_width;
        self.params.viewport_height = viewport_height;
        let indices: Vec<usize> = (0..self.elements.len()).collect();
        self.base_layout = layout::layout(&indices, &self.params);
        self.filters.relayout(&self.params);
        self.cursor = self.active_layout().start();
        self.paint(renderer)
    }

    fn handle_key(&mut self, key: KeyEvent, renderer: &mut dyn Renderer) -> io::Result<()> {
        if let Some(action) = self.keymap.lookup(key.modifiers, key.code) {
            return self.apply(action, renderer);
        }
        match key.code {
            // Built-in fallbacks for unmapped exits.
            KeyCode::Esc => {
                self.status = Status::Cancelled;
                Ok(())
            }
            KeyCode::Enter => {
                self.confirm();
                Ok(())
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
                    && !ch.is_control() =>
            {
                let changed = self
                    .filters
                    .input(ch.encode_utf8(&mut [0u8; 4]), &self.elements, &self.params);
                self.after_stack_change(changed, renderer)
            }
            _ => Ok(()),
        }
    }

    fn apply(&mut self, action: Action, renderer: &mut dyn Renderer) -> io::Result<()> {
        match action {
            Action::Move(dx, dy) => self.step(dx, dy, renderer),
            Action::Next => {
                let target = self.cursor.map(|cursor| nav::next(self.active_layout(), cursor));
                self.move_to(target, renderer)
            }
            Action::Prev => {
                let target = self.cursor.map(|cursor| nav::prev(self.active_layout(), cursor));
                self.move_to(target, renderer)
            }
            Action::LineBegin => {
                let target =
                    self.cursor.map(|cursor| nav::line_begin(self.active_layout(), cursor));
                self.move_to(target, renderer)
            }
            Action::LineEnd => {
                let target = self.cursor.map(|cursor| nav::line_end(self.active_layout(), cursor));
                self.move_to(target, renderer)
            }
            Action::SolidifyInclude => {
                let changed = self.filters.solidify(Commit::Include, &self.elements, &self.params);
                self.after_stack_change(changed, renderer)
            }
            Action::SolidifyExclude => {
                let changed = self.filters.solidify(Commit::Exclude, &self.elements, &self.params);
                self.after_stack_change(changed, renderer)
            }
            Action::Backspace => {
                let changed = self.filters.backspace(&self.elements, &self.params);
                self.after_stack_change(changed, renderer)
            }
            Action::ClearUncommitted => {
                let changed = self.filters.pop_uncommitted();
                self.after_stack_change(changed, renderer)
            }
            Action::Confirm => {
                self.confirm();
                Ok(())
            }
            Action::Cancel => {
                self.status = Status::Cancelled;
                Ok(())
            }
        }
    }

    fn step(&mut self, dx: i32, dy: i32, renderer: &mut dyn Renderer) -> io::Result<()> {
        let Some(cursor) = self.cursor else {
            return Ok(());
        };
        match nav::step(self.active_layout(), cursor, dx, dy) {
            Some(target) => {
                self.cursor = Some(target);
                renderer.redraw_cells(&self.view(), &[cursor, target])
            }
            None => Ok(()),
        }
    }

    fn move_to(&mut self, target: Option<Pos>, renderer: &mut dyn Renderer) -> io::Result<()> {
        let (Some(cursor), Some(target)) = (self.cursor, target) else {
            return Ok(());
        };
        if target == cursor || !self.active_layout().contains(target) {
            return Ok(());
        }
        self.cursor = Some(target);
        renderer.redraw_cells(&self.view(), &[cursor, target])
    }

    fn confirm(&mut self) {
        if let Some(cursor) = self.cursor {
            self.confirm_at(cursor);
        }
    }

    /// Commit attempt at `pos`: no element or an inert action keeps the
    /// session running.
    fn confirm_at(&mut self, pos: Pos) {
        let Some(index) = self.active_layout().element_at(pos) else {
            return;
        };
        if let Some(value) = self.elements[index].action().invoke() {
            self.status = Status::Committed(Selection { index, value });
        }
    }

    /// Cursor reset, full redraw, and filter bar refresh after every
    /// stack-changing operation. Filter edge cases that left the stack
    /// untouched stay no-ops all the way through, including the cursor.
    fn after_stack_change(&mut self, changed: bool, renderer: &mut dyn Renderer) -> io::Result<()> {
        if !changed {
            return Ok(());
        }
        self.cursor = self.active_layout().start();
        renderer.redraw_all(&self.view())?;
        renderer.update_filter_bar(&self.filters.display())
    }
}
