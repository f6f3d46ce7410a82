// UI module for precinct_lookup
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::form::render_form(app, f);

    if app.looking_up {
        widgets::popup::render_lookup_progress(app, f);
    } else if let Some(dialog) = &app.dialog {
        widgets::popup::render_dialog(dialog, f);
    }
}
