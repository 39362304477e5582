// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Selectable elements.

use smol_str::SmolStr;

/// Foreground/background color names, resolved by the renderer.
///
/// Names are kept symbolic so the engine stays independent of any particular
/// backend's color type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: SmolStr,
    pub bg: SmolStr,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: SmolStr::new_static("default"),
            bg: SmolStr::new_static("default"),
        }
    }
}

/// What committing an element yields.
///
/// `Nothing` models elements whose value is derived elsewhere; committing them
/// leaves the session running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Emit(String),
    Nothing,
}

impl Action {
    /// Runs the action, returning the payload if there is one.
    pub fn invoke(&self) -> Option<String> {
        match self {
            Self::Emit(value) => Some(value.clone()),
            Self::Nothing => None,
        }
    }
}

/// A single pickable item: label, tags, colors, and a commit action.
///
/// Immutable once loaded; the session never mutates elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    label: String,
    tags: Vec<SmolStr>,
    colors: ColorPair,
    action: Action,
}

impl Element {
    /// An element whose payload is its own label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let action = Action::Emit(label.clone());
        Self {
            label,
            tags: Vec::new(),
            colors: ColorPair::default(),
            action,
        }
    }

    pub fn with_tags(mut self, tags: Vec<SmolStr>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tags(&self) -> &[SmolStr] {
        &self.tags
    }

    pub fn colors(&self) -> &ColorPair {
        &self.colors
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Case-insensitive substring match against the label or any tag.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if self.label.to_lowercase().contains(&needle) {
            return true;
        }
        self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}
