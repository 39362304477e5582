// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Color resolution for the terminal renderer.

use std::collections::HashMap;

use ratatui::style::{Color, Modifier, Style};
use smol_str::SmolStr;

use crate::model::ColorPair;

/// Resolves symbolic color names to terminal colors.
///
/// Resolved handles are cached per name for the lifetime of one renderer and
/// released with it; the session never re-resolves a name it has seen.
#[derive(Debug, Default)]
pub(crate) struct ColorCache {
    resolved: HashMap<SmolStr, Color>,
}

impl ColorCache {
    pub(crate) fn resolve(&mut self, name: &SmolStr) -> Color {
        if let Some(color) = self.resolved.get(name) {
            return *color;
        }
        let color = parse_color(name);
        self.resolved.insert(name.clone(), color);
        color
    }

    pub(crate) fn cell_style(&mut self, colors: &ColorPair) -> Style {
        Style::default().fg(self.resolve(&colors.fg)).bg(self.resolve(&colors.bg))
    }
}

pub(crate) fn cursor_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

pub(crate) fn filter_bar_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Accepts the ANSI-16 names (with `light-`/`dark-` prefixes where they
/// exist), `default`, and `#rrggbb`; anything else falls back to the
/// terminal default.
fn parse_color(name: &str) -> Color {
    if let Some(rgb) = parse_hex_color(name) {
        return rgb;
    }
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "dark-gray" | "dark-grey" => Color::DarkGray,
        "light-red" => Color::LightRed,
        "light-green" => Color::LightGreen,
        "light-yellow" => Color::LightYellow,
        "light-blue" => Color::LightBlue,
        "light-magenta" => Color::LightMagenta,
        "light-cyan" => Color::LightCyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

fn parse_hex_color(name: &str) -> Option<Color> {
    let hex = name.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
