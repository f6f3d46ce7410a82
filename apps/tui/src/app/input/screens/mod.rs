use crate::app::state::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod dialog;
mod form;

pub fn dispatch_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // Keys are ignored while a lookup is in flight
    if app.looking_up || app.lookup_requested {
        return;
    }

    if app.dialog.is_some() {
        dialog::handle_dialog_input(app, key.code);
    } else {
        form::handle_form_input(app, key.code);
    }
}
