use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::domain::{AddressField, AddressInput};
use crate::error::LookupError;
use crate::lookup::PrecinctLookup;
use crate::summary::PrecinctSummary;
use throbber_widgets_tui::ThrobberState;

/// Which control on the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(AddressField),
    Button,
}

impl FormFocus {
    const COUNT: usize = AddressField::ALL.len() + 1;

    const fn index(self) -> usize {
        match self {
            Self::Field(field) => field.index(),
            Self::Button => AddressField::ALL.len(),
        }
    }

    const fn from_index(index: usize) -> Self {
        match AddressField::from_index(index) {
            Some(field) => Self::Field(field),
            None => Self::Button,
        }
    }

    pub const fn next(self) -> Self {
        Self::from_index(wrap_increment(self.index(), Self::COUNT))
    }

    pub const fn prev(self) -> Self {
        Self::from_index(wrap_decrement(self.index(), Self::COUNT))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Info,
}

/// A modal message shown over the form until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn from_outcome(outcome: &Result<PrecinctSummary, LookupError>) -> Self {
        match outcome {
            Ok(summary) => Self::info("Precinct Information", summary.to_string()),
            Err(e) => Self::error(e.title(), e.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub form: AddressInput,
    pub focus: FormFocus,
    pub dialog: Option<Dialog>,
    pub status_message: String,
    /// Set by the submit key, consumed by the event loop.
    pub lookup_requested: bool,
    pub looking_up: bool,
    pub throbber_state: ThrobberState,
    pub lookup: PrecinctLookup,
}

impl App {
    pub fn new(lookup: PrecinctLookup) -> Self {
        Self {
            running: true,
            form: AddressInput::default(),
            focus: FormFocus::Field(AddressField::Street),
            dialog: None,
            status_message: String::new(),
            lookup_requested: false,
            looking_up: false,
            throbber_state: ThrobberState::default(),
            lookup,
        }
    }

    /// Validates the form and queues a lookup, or opens the input error dialog.
    pub fn submit(&mut self) {
        match self.form.validate() {
            Ok(_) => {
                self.lookup_requested = true;
            }
            Err(e) => {
                log::warn!("Rejected submission: {e}");
                self.dialog = Some(Dialog::error(e.title(), e.to_string()));
            }
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn focused_field(&self) -> Option<AddressField> {
        match self.focus {
            FormFocus::Field(field) => Some(field),
            FormFocus::Button => None,
        }
    }
}
