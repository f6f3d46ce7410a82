use crate::app::state::{App, FormFocus};
use crossterm::event::KeyCode;

pub fn handle_form_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.focus = app.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.focus = app.focus.prev();
        }
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Backspace => {
            if let Some(field) = app.focused_field() {
                app.form.get_mut(field).pop();
            }
        }
        KeyCode::Char(c) => match app.focus {
            FormFocus::Field(field) => app.form.get_mut(field).push(c),
            FormFocus::Button => {
                if c == ' ' {
                    app.submit();
                }
            }
        },
        _ => {}
    }
}
