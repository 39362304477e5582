// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! Terminal frontend.
//!
//! Owns the raw-mode/alternate-screen lifecycle, renders the diamond grid
//! with ratatui, and pumps crossterm events into a [`Session`] until it
//! reaches a terminal state. The bottom row of the terminal is reserved for
//! the filter bar; the grid gets everything above it.

use std::error::Error;
use std::io;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as InputEvent, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::layout::{self, DiamondParams};
use crate::model::Pos;
use crate::session::{Event, Keymap, Renderer, Session, SessionView, Status};

mod theme;

use theme::ColorCache;

/// Rows reserved below the grid for the filter bar.
const FILTER_BAR_HEIGHT: u16 = 1;

/// Everything the frontend needs besides the elements themselves.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub cell_width: u16,
    pub cell_height: u16,
    /// Columns trimmed from each side of a label before it is centered.
    pub cell_padding: u16,
    pub origin_fraction_x: f64,
    pub origin_fraction_y: f64,
    pub keymap: Keymap,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            cell_width: 20,
            cell_height: 3,
            cell_padding: 1,
            origin_fraction_x: 0.5,
            origin_fraction_y: 0.5,
            keymap: Keymap::standard(),
        }
    }
}

/// Runs one picking session on the controlling terminal and returns its
/// final status. The terminal is restored on every exit path, including
/// setup failures and panics unwinding through the guard.
pub fn run(elements: Vec<crate::model::Element>, options: TuiOptions) -> Result<Status, Box<dyn Error>> {
    let terminal = TerminalSession::new()?;
    let viewport = terminal.size()?;
    let params = DiamondParams {
        viewport_width: viewport.width,
        viewport_height: viewport.height.saturating_sub(FILTER_BAR_HEIGHT),
        cell_width: options.cell_width,
        cell_height: options.cell_height,
        origin_fraction_x: options.origin_fraction_x,
        origin_fraction_y: options.origin_fraction_y,
    };
    let mut renderer = TuiRenderer::new(terminal, params, options.cell_padding);
    let mut session = Session::new(elements, params, options.keymap);
    session.paint(&mut renderer)?;

    while session.is_running() {
        match event::read()? {
            InputEvent::Key(key) if key.kind == KeyEventKind::Press => {
                session.handle(Event::Key(key), &mut renderer)?;
            }
            InputEvent::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) =>
            {
                let event = Event::PointerRelease {
                    column: mouse.column,
                    row: mouse.row,
                };
                session.handle(event, &mut renderer)?;
            }
            InputEvent::Resize(width, height) => {
                session.resize(width, height.saturating_sub(FILTER_BAR_HEIGHT), &mut renderer)?;
            }
            InputEvent::FocusGained => {
                session.handle(Event::Damage { pending: 0 }, &mut renderer)?;
            }
            _ => {
                session.handle(Event::Other, &mut renderer)?;
            }
        }
    }

    Ok(session.status().clone())
}

/// One cell's paint-ready state, captured from the last session view.
///
/// The renderer keeps these so the filter bar can be refreshed without the
/// session handing over a fresh view.
#[derive(Debug, Clone)]
struct CellSprite {
    pos: Pos,
    label: String,
    style: Style,
}

struct TuiRenderer {
    session: TerminalSession,
    colors: ColorCache,
    cell_padding: u16,
    params: DiamondParams,
    sprites: Vec<CellSprite>,
    cursor: Option<Pos>,
    filter_text: String,
}

impl TuiRenderer {
    fn new(session: TerminalSession, params: DiamondParams, cell_padding: u16) -> Self {
        Self {
            session,
            colors: ColorCache::default(),
            cell_padding,
            params,
            sprites: Vec::new(),
            cursor: None,
            filter_text: String::new(),
        }
    }

    fn capture(&mut self, view: &SessionView<'_>) {
        self.params = *view.params;
        self.cursor = view.cursor;
        let colors = &mut self.colors;
        self.sprites = view
            .layout
            .cells()
            .map(|(pos, index)| {
                let element = &view.elements[index];
                CellSprite {
                    pos,
                    label: element.label().to_owned(),
                    style: colors.cell_style(element.colors()),
                }
            })
            .collect();
    }

    fn paint(&mut self) -> io::Result<()> {
        let Self {
            session,
            cell_padding,
            params,
            sprites,
            cursor,
            filter_text,
            ..
        } = self;
        session.draw(|frame| {
            let area = frame.size();
            for sprite in sprites.iter() {
                let style = if Some(sprite.pos) == *cursor {
                    theme::cursor_style(sprite.style)
                } else {
                    sprite.style
                };
                draw_cell(frame, area, sprite, style, params, *cell_padding);
            }
            if area.height > 0 {
                let bar = Rect::new(0, area.height - FILTER_BAR_HEIGHT, area.width, FILTER_BAR_HEIGHT);
                frame.render_widget(
                    Paragraph::new(filter_text.as_str()).style(theme::filter_bar_style()),
                    bar,
                );
            }
        })
    }
}

impl Renderer for TuiRenderer {
    fn redraw_all(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        self.capture(view);
        self.paint()
    }

    // The terminal buffer diffs frames itself, so a cell-scoped redraw is
    // just a full frame from refreshed state.
    fn redraw_cells(&mut self, view: &SessionView<'_>, _cells: &[Pos]) -> io::Result<()> {
        self.capture(view);
        self.paint()
    }

    fn update_filter_bar(&mut self, text: &str) -> io::Result<()> {
        self.filter_text = text.to_owned();
        self.paint()
    }
}

fn draw_cell(
    frame: &mut Frame<'_>,
    area: Rect,
    sprite: &CellSprite,
    style: Style,
    params: &DiamondParams,
    cell_padding: u16,
) {
    let (left, top) = layout::cell_origin(sprite.pos, params);
    let Some(cell) = clip_rect(left, top, params.cell_width, params.cell_height, area) else {
        return;
    };
    frame.render_widget(Block::default().style(style), cell);

    let pad = cell_padding.min(cell.width / 2);
    let label_area = Rect::new(
        cell.x + pad,
        cell.y + cell.height / 2,
        cell.width - 2 * pad,
        1,
    );
    frame.render_widget(
        Paragraph::new(sprite.label.as_str())
            .style(style)
            .alignment(Alignment::Center),
        label_area,
    );
}

/// Clips a cell rectangle to the grid area above the filter bar. Cells that
/// survived layout clipping fit entirely, but a resize between layout and
/// paint can leave stale geometry for one frame.
fn clip_rect(left: i32, top: i32, width: u16, height: u16, area: Rect) -> Option<Rect> {
    let grid_bottom = i32::from(area.height.saturating_sub(FILTER_BAR_HEIGHT));
    let right = (left + i32::from(width)).min(i32::from(area.width));
    let bottom = (top + i32::from(height)).min(grid_bottom);
    let left = left.max(0);
    let top = top.max(0);
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn size(&self) -> io::Result<Rect> {
        self.terminal.size()
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_fully_visible_cells() {
        let area = Rect::new(0, 0, 40, 11);
        let cell = clip_rect(10, 3, 10, 3, area).expect("visible");
        assert_eq!(cell, Rect::new(10, 3, 10, 3));
    }

    #[test]
    fn clip_trims_cells_crossing_the_edges() {
        let area = Rect::new(0, 0, 40, 11);
        assert_eq!(clip_rect(-4, 0, 10, 3, area), Some(Rect::new(0, 0, 6, 3)));
        assert_eq!(clip_rect(36, 0, 10, 3, area), Some(Rect::new(36, 0, 4, 3)));
    }

    #[test]
    fn clip_rejects_cells_outside_the_grid_rows() {
        let area = Rect::new(0, 0, 40, 11);
        // The bottom row belongs to the filter bar.
        assert_eq!(clip_rect(0, 10, 10, 3, area), None);
        assert_eq!(clip_rect(0, -3, 10, 3, area), None);
        assert_eq!(clip_rect(50, 0, 10, 3, area), None);
    }
}
