// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! The filter stack.
//!
//! Filters compose by narrowing: each frame keeps the subset of the frame
//! beneath it, together with the layout generated for that subset. Typed text
//! accumulates as uncommitted `Running` frames, one per input call, so undo is
//! one call (one character) at a time. Committing turns the whole typed text
//! into a single `Include`/`Exclude` frame; deleting a committed frame
//! rematerializes its text back into per-character running frames.

use crate::layout::{self, DiamondParams};
use crate::model::{Element, GridLayout};

/// A single filter over the element set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Uncommitted, still-being-typed substring query.
    Running(String),
    /// Committed: keep elements matching the text.
    Include(String),
    /// Committed: keep elements NOT matching the text.
    Exclude(String),
}

impl Filter {
    pub fn text(&self) -> &str {
        match self {
            Self::Running(text) | Self::Include(text) | Self::Exclude(text) => text,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// Whether `element` survives this filter.
    pub fn keeps(&self, element: &Element) -> bool {
        match self {
            Self::Running(text) | Self::Include(text) => element.matches(text),
            Self::Exclude(text) => !element.matches(text),
        }
    }
}

/// The committed filter kinds a running filter can solidify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Include,
    Exclude,
}

impl Commit {
    fn apply(self, text: String) -> Filter {
        match self {
            Self::Include => Filter::Include(text),
            Self::Exclude => Filter::Exclude(text),
        }
    }
}

/// A filter plus the subset and layout it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFrame {
    filter: Filter,
    elements: Vec<usize>,
    layout: GridLayout,
}

impl FilterFrame {
    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn elements(&self) -> &[usize] {
        &self.elements
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
}

/// Ordered filter frames, most recent last; empty means no filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStack {
    frames: Vec<FilterFrame>,
}

impl FilterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The topmost filter, if any.
    pub fn top(&self) -> Option<&Filter> {
        self.frames.last().map(FilterFrame::filter)
    }

    /// The layout of the topmost frame; `None` means the unfiltered layout
    /// applies.
    pub fn active_layout(&self) -> Option<&GridLayout> {
        self.frames.last().map(FilterFrame::layout)
    }

    /// The element subset of the topmost frame; `None` means the full set.
    pub fn active_elements(&self) -> Option<&[usize]> {
        self.frames.last().map(FilterFrame::elements)
    }

    /// Evaluates `filter` against the active subset and pushes the resulting
    /// frame.
    pub fn push(&mut self, filter: Filter, elements: &[Element], params: &DiamondParams) {
        let subset: Vec<usize> = match self.active_elements() {
            Some(active) => active
                .iter()
                .copied()
                .filter(|&idx| filter.keeps(&elements[idx]))
                .collect(),
            None => (0..elements.len())
                .filter(|&idx| filter.keeps(&elements[idx]))
                .collect(),
        };
        let layout = layout::layout(&subset, params);
        self.frames.push(FilterFrame {
            filter,
            elements: subset,
            layout,
        });
    }

    /// Discards the top frame; no-op when empty.
    pub fn pop(&mut self) -> Option<FilterFrame> {
        self.frames.pop()
    }

    /// Handles literally typed text. Returns whether the stack changed.
    ///
    /// The new running frame carries the accumulated text (previous running
    /// text plus `text`); the previous frames stay on the stack so each input
    /// call can be undone individually.
    pub fn input(&mut self, text: &str, elements: &[Element], params: &DiamondParams) -> bool {
        if text.is_empty() {
            return false;
        }
        let accumulated = match self.top() {
            Some(Filter::Running(current)) => {
                let mut accumulated = current.clone();
                accumulated.push_str(text);
                accumulated
            }
            _ => text.to_owned(),
        };
        self.push(Filter::Running(accumulated), elements, params);
        true
    }

    /// Commits the running text: discards every contiguous running frame at
    /// the top and pushes a single committed frame with the accumulated text.
    /// Returns whether the stack changed; `false` when the top frame is not
    /// running.
    pub fn solidify(&mut self, kind: Commit, elements: &[Element], params: &DiamondParams) -> bool {
        let text = match self.top() {
            Some(Filter::Running(text)) => text.clone(),
            _ => return false,
        };
        while matches!(self.top(), Some(Filter::Running(_))) {
            self.frames.pop();
        }
        self.push(kind.apply(text), elements, params);
        true
    }

    /// Removes one step of filter history. Returns whether the stack changed;
    /// `false` only when the stack was already empty.
    ///
    /// A running frame is popped as-is. A committed frame is popped and its
    /// text rematerialized into one running frame per prefix; the final
    /// prefix is then dropped so this backspace, like every other, deletes
    /// exactly one character.
    pub fn backspace(&mut self, elements: &[Element], params: &DiamondParams) -> bool {
        match self.top() {
            None => false,
            Some(Filter::Running(_)) => {
                self.frames.pop();
                true
            }
            Some(Filter::Include(text)) | Some(Filter::Exclude(text)) => {
                let text = text.clone();
                self.frames.pop();
                for (end, _) in text.char_indices().skip(1) {
                    self.push(Filter::Running(text[..end].to_owned()), elements, params);
                }
                true
            }
        }
    }

    /// Clears the in-progress typed text in one step, or pops exactly one
    /// committed frame when nothing is being typed. Returns whether the stack
    /// changed.
    pub fn pop_uncommitted(&mut self) -> bool {
        if matches!(self.top(), Some(Filter::Running(_))) {
            while matches!(self.top(), Some(Filter::Running(_))) {
                self.frames.pop();
            }
            true
        } else {
            self.frames.pop().is_some()
        }
    }

    /// Recomputes every frame's layout bottom-up for new grid geometry.
    ///
    /// Subsets are unchanged; only the viewport changed.
    pub fn relayout(&mut self, params: &DiamondParams) {
        for frame in &mut self.frames {
            frame.layout = layout::layout(&frame.elements, params);
        }
    }

    /// The filter bar text: frames bottom-to-top, committed includes as
    /// `text/`, excludes as `¬text/`, and each running frame as the characters
    /// it added relative to the running frame beneath it.
    pub fn display(&self) -> String {
        let mut out = String::new();
        let mut running_below: Option<&str> = None;
        for frame in &self.frames {
            match frame.filter() {
                Filter::Include(text) => {
                    out.push_str(text);
                    out.push('/');
                    running_below = None;
                }
                Filter::Exclude(text) => {
                    out.push('¬');
                    out.push_str(text);
                    out.push('/');
                    running_below = None;
                }
                Filter::Running(text) => {
                    let added = match running_below {
                        Some(below) if text.starts_with(below) => &text[below.len()..],
                        _ => text.as_str(),
                    };
                    out.push_str(added);
                    running_below = Some(text);
                }
            }
        }
        out
    }
}
