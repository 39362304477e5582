// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Element loading.
//!
//! Two input formats: simple mode takes one label per line (the payload is
//! the label), complex mode takes one JSON record per line with optional
//! tags, colors, payload value, and an inert marker. Parsing happens before
//! the session starts; a malformed record aborts the whole load.

use std::fmt;
use std::io::{self, BufRead};

use serde::Deserialize;
use smol_str::SmolStr;

use crate::model::{Action, ColorPair, Element};

/// Background hues assigned to tagged elements, by tag hash.
const TAG_HUES: [&str; 8] = [
    "red", "green", "yellow", "blue", "magenta", "cyan", "light-red", "light-blue",
];

#[derive(Debug)]
pub enum SourceError {
    Io(io::Error),
    /// A complex-mode record failed to parse; `line` is 1-based.
    Record { line: usize, source: serde_json::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed reading element input: {err}"),
            Self::Record { line, source } => {
                write!(f, "malformed element record on line {line}: {source}")
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Record { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for SourceError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// One line of complex-mode input.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementRecord {
    label: String,
    #[serde(default)]
    tags: Vec<SmolStr>,
    #[serde(default)]
    fg: Option<SmolStr>,
    #[serde(default)]
    bg: Option<SmolStr>,
    /// Payload printed on commit; defaults to the label.
    #[serde(default)]
    value: Option<String>,
    /// Inert elements stay on the grid but commit to nothing.
    #[serde(default)]
    inert: bool,
}

impl ElementRecord {
    fn into_element(self) -> Element {
        let colors = record_colors(self.fg, self.bg, &self.tags);
        let action = if self.inert {
            Action::Nothing
        } else {
            Action::Emit(self.value.unwrap_or_else(|| self.label.clone()))
        };
        Element::new(self.label)
            .with_tags(self.tags)
            .with_colors(colors)
            .with_action(action)
    }
}

/// Simple mode: every non-empty line is an element labeled by the line.
pub fn parse_simple(reader: impl BufRead) -> Result<Vec<Element>, SourceError> {
    let mut elements = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        elements.push(Element::new(line));
    }
    Ok(elements)
}

/// Complex mode: every non-empty line is a JSON [`ElementRecord`].
pub fn parse_complex(reader: impl BufRead) -> Result<Vec<Element>, SourceError> {
    let mut elements = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: ElementRecord = serde_json::from_str(&line).map_err(|source| {
            SourceError::Record {
                line: idx + 1,
                source,
            }
        })?;
        elements.push(record.into_element());
    }
    Ok(elements)
}

/// Explicit colors win; otherwise tagged elements get a hue hashed from
/// their first tag so related entries share a color. Untagged elements keep
/// the neutral scheme.
fn record_colors(fg: Option<SmolStr>, bg: Option<SmolStr>, tags: &[SmolStr]) -> ColorPair {
    let defaults = match tags.first() {
        Some(tag) if fg.is_none() && bg.is_none() => ColorPair {
            fg: SmolStr::new_static("black"),
            bg: SmolStr::new(TAG_HUES[tag_hash(tag) % TAG_HUES.len()]),
        },
        _ => ColorPair::default(),
    };
    ColorPair {
        fg: fg.unwrap_or(defaults.fg),
        bg: bg.unwrap_or(defaults.bg),
    }
}

/// Stable FNV-1a over the tag text; must not change across sessions so
/// colors stay predictable.
fn tag_hash(tag: &str) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in tag.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash as usize
}
