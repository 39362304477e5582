// SPDX-FileCopyrightText: 2026 Lozenge contributors
// SPDX-License-Identifier: MIT
//
// This file is part of Lozenge.

//! End-to-end session runs over the public API: parse elements, feed a
//! scripted event stream, and check the final selection.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use lozenge::layout::DiamondParams;
use lozenge::model::Pos;
use lozenge::session::{Event, Keymap, Renderer, Selection, Session, SessionView, Status};
use lozenge::source;

/// A renderer that only counts paints; these tests assert on session state.
#[derive(Debug, Default)]
struct NullRenderer {
    paints: usize,
}

impl Renderer for NullRenderer {
    fn redraw_all(&mut self, _view: &SessionView<'_>) -> io::Result<()> {
        self.paints += 1;
        Ok(())
    }

    fn redraw_cells(&mut self, _view: &SessionView<'_>, _cells: &[Pos]) -> io::Result<()> {
        self.paints += 1;
        Ok(())
    }

    fn update_filter_bar(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }
}

fn params() -> DiamondParams {
    DiamondParams {
        viewport_width: 120,
        viewport_height: 33,
        cell_width: 12,
        cell_height: 3,
        origin_fraction_x: 0.5,
        origin_fraction_y: 0.5,
    }
}

fn run_script(session: &mut Session, script: &[Event]) {
    let mut renderer = NullRenderer::default();
    session.paint(&mut renderer).expect("initial paint");
    for event in script {
        session.handle(event.clone(), &mut renderer).expect("handle event");
    }
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

fn typed(text: &str) -> Vec<Event> {
    text.chars().map(|ch| key(KeyCode::Char(ch))).collect()
}

const APPS: &str = "firefox\nthunderbird\nemacs\nalacritty\nfiles\n";

fn app_session() -> Session {
    let elements = source::parse_simple(APPS.as_bytes()).expect("parse simple input");
    Session::new(elements, params(), Keymap::standard())
}

#[test]
fn filter_then_commit_picks_the_narrowed_element() {
    let mut session = app_session();

    let mut script = typed("thun");
    script.push(key(KeyCode::Enter));
    run_script(&mut session, &script);

    assert_eq!(
        session.status(),
        &Status::Committed(Selection {
            index: 1,
            value: "thunderbird".to_owned(),
        })
    );
}

#[test]
fn committed_filters_survive_further_typing_and_undo() {
    let mut session = app_session();

    // Keep everything containing "fi", then narrow to firefox and back off.
    let mut script = typed("fi");
    script.push(ctrl('s'));
    script.extend(typed("refox"));
    script.extend(std::iter::repeat(key(KeyCode::Backspace)).take(5));
    run_script(&mut session, &script);

    assert!(session.is_running());
    assert_eq!(session.filters().display(), "fi/");
    assert_eq!(session.active_layout().len(), 2);
}

#[test]
fn exclude_filter_commits_to_the_remaining_elements() {
    let mut session = app_session();

    // Drop everything containing "fi"; commit whatever sits at the origin.
    let mut script = typed("fi");
    script.push(ctrl('x'));
    script.push(key(KeyCode::Enter));
    run_script(&mut session, &script);

    match session.status() {
        Status::Committed(selection) => {
            assert_eq!(selection.index, 1);
            assert_eq!(selection.value, "thunderbird");
        }
        other => panic!("expected a commit, got {other:?}"),
    }
}

#[test]
fn complex_records_commit_their_payload_not_their_label() {
    let input = r#"{"label":"firefox","tags":["web"],"value":"exec firefox --new-window"}
{"label":"emacs","value":"exec emacsclient -c"}
"#;
    let elements = source::parse_complex(input.as_bytes()).expect("parse complex input");
    let mut session = Session::new(elements, params(), Keymap::standard());

    let mut script = typed("ema");
    script.push(key(KeyCode::Enter));
    run_script(&mut session, &script);

    assert_eq!(
        session.status(),
        &Status::Committed(Selection {
            index: 1,
            value: "exec emacsclient -c".to_owned(),
        })
    );
}

#[test]
fn over_narrowed_filters_block_commits_until_undone() {
    let mut session = app_session();

    let mut script = typed("zzz");
    script.push(key(KeyCode::Enter));
    run_script(&mut session, &script);
    assert!(session.is_running());
    assert!(session.active_layout().is_empty());
    assert_eq!(session.cursor(), None);

    let mut renderer = NullRenderer::default();
    session.handle(ctrl('u'), &mut renderer).expect("clear filters");
    session.handle(key(KeyCode::Enter), &mut renderer).expect("confirm");
    assert_eq!(
        session.status(),
        &Status::Committed(Selection {
            index: 0,
            value: "firefox".to_owned(),
        })
    );
}

#[test]
fn cancel_wins_regardless_of_filter_state() {
    let mut session = app_session();

    let mut script = typed("fire");
    script.push(key(KeyCode::Esc));
    run_script(&mut session, &script);

    assert_eq!(session.status(), &Status::Cancelled);
}

#[test]
fn ring_navigation_commits_a_neighbor() {
    let mut session = app_session();

    // Input order spirals outward, so ring 1 starts at the second element.
    let script = [key(KeyCode::Tab), key(KeyCode::Enter)];
    run_script(&mut session, &script);

    assert_eq!(
        session.status(),
        &Status::Committed(Selection {
            index: 1,
            value: "thunderbird".to_owned(),
        })
    );
}
