// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use super::*;
use crate::model::ContextState;

fn test_app() -> (App, UnboundedReceiver<WorkerRequest>) {
    let (request_tx, request_rx) = unbounded_channel();
    let (_event_tx, event_rx) = unbounded_channel();
    let app = App::new(
        source::demo_documents(),
        DocumentOrigin::Demo,
        TuiTheme::default(),
        request_tx,
        event_rx,
    );
    (app, request_rx)
}

fn event_tx_app() -> (App, UnboundedSender<WorkerEvent>, UnboundedReceiver<WorkerRequest>) {
    let (request_tx, request_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel();
    let app = App::new(
        source::demo_documents(),
        DocumentOrigin::Demo,
        TuiTheme::default(),
        request_tx,
        event_rx,
    );
    (app, event_tx, request_rx)
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn starts_with_greeting_and_pending_context() {
    let (app, _requests) = test_app();

    assert_eq!(app.context.session().context_state(), ContextState::Pending);
    let transcript = app.context.session().transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role(), Role::Assistant);
    assert!(transcript[0].text().contains("3 file(s)"));
}

#[test]
fn typing_edits_the_input_line() {
    let (mut app, _requests) = test_app();

    app.handle_key(press(KeyCode::Char('h')));
    app.handle_key(press(KeyCode::Char('i')));
    assert_eq!(app.input, "hi");

    app.handle_key(press(KeyCode::Backspace));
    assert_eq!(app.input, "h");

    app.handle_key(press(KeyCode::Esc));
    assert_eq!(app.input, "");
}

#[test]
fn enter_submits_and_sends_a_chat_request() {
    let (mut app, mut requests) = test_app();

    app.input = "explain main.js".to_owned();
    app.handle_key(press(KeyCode::Enter));

    assert_eq!(app.input, "");
    assert_eq!(app.in_flight, Some(InFlight::Chat));
    assert_eq!(app.context.session().context_state(), ContextState::Sent);

    let Some(WorkerRequest::Chat { generation, payload, .. }) = requests.try_recv().ok() else {
        panic!("expected a chat request");
    };
    assert_eq!(generation, app.generation);
    assert!(payload.contains("Analyzing the following files:"));
    assert!(payload.contains("User query: explain main.js"));
}

#[test]
fn empty_submission_is_refused_with_a_toast() {
    let (mut app, mut requests) = test_app();

    app.input = "   ".to_owned();
    app.handle_key(press(KeyCode::Enter));

    assert!(app.in_flight.is_none());
    assert!(requests.try_recv().is_err());
    assert_eq!(app.context.session().context_state(), ContextState::Pending);
    assert!(app.toast.is_some());
}

#[test]
fn second_submission_is_refused_while_a_request_is_in_flight() {
    let (mut app, mut requests) = test_app();

    app.input = "first".to_owned();
    app.handle_key(press(KeyCode::Enter));
    assert!(requests.try_recv().is_ok());

    app.input = "second".to_owned();
    app.handle_key(press(KeyCode::Enter));

    assert!(requests.try_recv().is_err());
    assert_eq!(app.input, "second");
}

#[test]
fn chat_reply_lands_in_the_transcript() {
    let (mut app, event_tx, _requests) = event_tx_app();

    app.input = "hello".to_owned();
    app.submit_message();
    event_tx
        .send(WorkerEvent::ChatReply {
            generation: app.generation,
            result: Ok("That file wires up the UI.".to_owned()),
        })
        .unwrap();
    app.drain_worker_events();

    assert!(app.in_flight.is_none());
    let last = app.context.session().transcript().last().unwrap();
    assert_eq!(last.role(), Role::Assistant);
    assert_eq!(last.text(), "That file wires up the UI.");
}

#[test]
fn stale_generation_reply_is_dropped() {
    let (mut app, event_tx, _requests) = event_tx_app();

    app.input = "hello".to_owned();
    app.submit_message();
    let stale = app.generation;
    app.replace_documents(source::demo_documents());

    event_tx
        .send(WorkerEvent::ChatReply {
            generation: stale,
            result: Ok("late reply".to_owned()),
        })
        .unwrap();
    app.drain_worker_events();

    assert!(app.in_flight.is_none());
    assert!(app
        .context
        .session()
        .transcript()
        .iter()
        .all(|exchange| exchange.text() != "late reply"));
}

#[test]
fn replacing_documents_restarts_the_session() {
    let (mut app, _requests) = test_app();

    app.input = "hello".to_owned();
    app.submit_message();
    let old_handle = app.session_handle;
    app.context.note_diagram_generated("classDiagram");
    app.viewport
        .attach(DiagramSurface::from_source("classDiagram"))
        .unwrap();

    app.replace_documents(source::demo_documents());

    assert_eq!(app.context.session().context_state(), ContextState::Pending);
    assert!(app.context.session().cached_diagram_source().is_none());
    assert_ne!(app.session_handle, old_handle);
    assert!(app.viewport.surface().is_none());
    assert!(app.viewport.transform().is_identity());
}

#[test]
fn diagram_reply_installs_the_surface_and_dependencies() {
    let (mut app, event_tx, mut requests) = event_tx_app();

    app.generate_diagram();
    assert_eq!(app.tab, Tab::Diagram);
    assert!(matches!(requests.try_recv(), Ok(WorkerRequest::Diagram { .. })));

    event_tx
        .send(WorkerEvent::DiagramReady {
            generation: app.generation,
            graph: Ok("```mermaid\nclassDiagram\n  class Calculator\n```".to_owned()),
            dependencies: Ok(
                r#"[{"name":"express","version":"4.18.0","description":"HTTP framework"}]"#
                    .to_owned(),
            ),
        })
        .unwrap();
    app.drain_worker_events();

    assert!(app.viewport.surface().is_some());
    assert_eq!(
        app.context.session().cached_diagram_source(),
        Some("classDiagram\n  class Calculator")
    );
    assert_eq!(app.dependencies.len(), 1);
    assert_eq!(app.dependencies[0].name, "express");
}

#[test]
fn mouse_drag_inside_the_diagram_pans_the_viewport() {
    let (mut app, _requests) = test_app();
    app.tab = Tab::Diagram;
    app.diagram_area = Some(Rect::new(0, 0, 40, 20));
    app.viewport
        .attach(DiagramSurface::from_source("classDiagram"))
        .unwrap();

    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 10,
        row: 10,
        modifiers: KeyModifiers::NONE,
    });
    assert!(app.viewport.is_panning());

    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Drag(MouseButton::Left),
        column: 15,
        row: 12,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(app.viewport.transform().translate_x(), 5.0);
    assert_eq!(app.viewport.transform().translate_y(), 2.0);

    // Dragging past the pane edge ends the pan rather than leaving it stuck.
    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::Drag(MouseButton::Left),
        column: 50,
        row: 12,
        modifiers: KeyModifiers::NONE,
    });
    assert!(!app.viewport.is_panning());
    assert_eq!(app.viewport.transform().translate_x(), 5.0);
}

#[test]
fn wheel_zooms_only_inside_the_diagram_pane() {
    let (mut app, _requests) = test_app();
    app.tab = Tab::Diagram;
    app.diagram_area = Some(Rect::new(0, 0, 40, 20));

    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::ScrollUp,
        column: 5,
        row: 5,
        modifiers: KeyModifiers::NONE,
    });
    assert!((app.viewport.transform().scale() - 1.1).abs() < 1e-9);

    app.handle_mouse(MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 50,
        row: 5,
        modifiers: KeyModifiers::NONE,
    });
    assert!((app.viewport.transform().scale() - 1.1).abs() < 1e-9);
}

#[test]
fn arrow_keys_nudge_the_diagram() {
    let (mut app, _requests) = test_app();
    app.tab = Tab::Diagram;

    app.handle_key(press(KeyCode::Left));
    app.handle_key(press(KeyCode::Up));
    assert_eq!(app.viewport.transform().translate_x(), KEY_PAN_STEP);
    assert_eq!(app.viewport.transform().translate_y(), KEY_PAN_STEP);
    assert!(!app.viewport.is_panning());

    app.handle_key(press(KeyCode::Char('0')));
    assert!(app.viewport.transform().is_identity());
}

#[test]
fn tab_key_cycles_panels() {
    let (mut app, _requests) = test_app();

    app.handle_key(press(KeyCode::Tab));
    assert_eq!(app.tab, Tab::Diagram);
    app.handle_key(press(KeyCode::Tab));
    assert_eq!(app.tab, Tab::Dependencies);
    app.handle_key(press(KeyCode::Tab));
    assert_eq!(app.tab, Tab::Chat);
}

#[test]
fn wrap_text_honors_width_and_newlines() {
    assert_eq!(wrap_text("abcdef", 4), vec!["abcd", "ef"]);
    assert_eq!(wrap_text("ab\n\ncd", 10), vec!["ab", "", "cd"]);
    assert_eq!(wrap_text("", 10), vec![""]);
}
