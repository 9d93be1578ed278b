// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::explorer::app::{App, AppState};

/// Handle user key events. Different paths will be taken depending on the
/// current state
pub fn handle_key_event(key_event: KeyEvent, app: &mut App) {
    match app.app_state() {
        AppState::ShowHelp => app.restore_app_state(),
        AppState::EntryEditing => handle_key_event_entry(key_event, app),
        AppState::ComponentSelection => handle_key_event_components(key_event, app),
        AppState::ResultsViewing => {
            if !handle_common_key_event(key_event, app) {
                app.results().handle_key_event(key_event);
            }
        }
        AppState::ViewMessages => {
            if !handle_common_key_event(key_event, app) {
                app.logger().messages.handle_key_event(key_event);
            }
        }
    }
}

/// Keys that act the same in every pane outside the entry form. Returns
/// whether the key was used.
fn handle_common_key_event(key_event: KeyEvent, app: &mut App) -> bool {
    if key_event.modifiers == KeyModifiers::CONTROL {
        return false;
    }
    match key_event.code {
        KeyCode::Esc => app.exit(),
        KeyCode::Tab => app.set_app_state(app.app_state().next()),
        KeyCode::BackTab => app.set_app_state(app.app_state().previous()),
        KeyCode::Char('?') => app.set_app_state(AppState::ShowHelp),
        KeyCode::Char('s') => app.start_worked_problem(),
        KeyCode::Char('c') => app.compare_predefined(),
        KeyCode::Char('x') => app.clear_session(),
        _ => return false,
    }
    true
}

fn handle_key_event_components(key_event: KeyEvent, app: &mut App) {
    if handle_common_key_event(key_event, app) {
        return;
    }
    match key_event.code {
        KeyCode::Enter => app.show_selected_component(),
        _ => app.predefined().handle_key_event(key_event),
    }
}

fn handle_key_event_entry(key_event: KeyEvent, app: &mut App) {
    if key_event.modifiers == KeyModifiers::CONTROL {
        app.focused_field().handle_key_event(key_event);
        return;
    }
    match key_event.code {
        KeyCode::Enter => app.add_entry(),
        KeyCode::Esc => app.set_app_state(AppState::ComponentSelection),
        KeyCode::Tab => app.set_app_state(AppState::EntryEditing.next()),
        KeyCode::BackTab => app.set_app_state(AppState::EntryEditing.previous()),
        KeyCode::Up => app.focus_previous_field(),
        KeyCode::Down => app.focus_next_field(),
        _ => app.focused_field().handle_key_event(key_event),
    }
}
