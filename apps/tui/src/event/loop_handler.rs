use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;

use crate::app::{handle_input, App, Dialog, DialogKind};
use crate::domain::AddressInput;
use crate::lookup::PrecinctLookup;
use crate::summary::PrecinctSummary;
use crate::ui;

// Define states for a precinct lookup
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LookupState {
    Idle,
    LookingUp,
}

impl fmt::Display for LookupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::LookingUp => write!(f, "LookingUp"),
        }
    }
}

// Define events for a precinct lookup
#[derive(Clone, Debug)]
enum LookupEvent {
    Submit,
    Completed(Dialog),
}

impl fmt::Display for LookupEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "Submit"),
            Self::Completed(dialog) => write!(f, "Completed({})", dialog.title),
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: LookupState,
    event: LookupEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct LookupMachine {
    state: LookupState,
}

impl LookupMachine {
    const fn new(initial_state: LookupState) -> Self {
        Self {
            state: initial_state,
        }
    }

    const fn state(&self) -> LookupState {
        self.state
    }

    // Process an event and update the state machine and app
    fn process_event(
        &mut self,
        event: &LookupEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        log::debug!("Lookup state {} -> {} on {event}", self.state, next_state.0);
        self.state = next_state.0;

        Ok(())
    }
}

struct NextState(LookupState);

impl TryFrom<(LookupState, &LookupEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (LookupState, &LookupEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (LookupState::Idle, LookupEvent::Submit) => {
                app.status_message = "Looking up precinct...".to_string();
                app.looking_up = true;
                Ok(Self(LookupState::LookingUp))
            }
            (LookupState::LookingUp, LookupEvent::Completed(dialog)) => {
                app.status_message = match dialog.kind {
                    DialogKind::Info => "Lookup complete".to_string(),
                    DialogKind::Error => format!("Lookup failed: {}", dialog.message),
                };
                app.looking_up = false;
                app.dialog = Some(dialog.clone());
                Ok(Self(LookupState::Idle))
            }
            _ => Err(StateTransitionError {
                from: current_state,
                event: event.clone(),
            }),
        }
    }
}

/// Drives one submit through the machine, calling `redraw` after each transition
async fn run_lookup<F>(
    machine: &mut LookupMachine,
    app: &mut App,
    mut redraw: F,
) -> std::result::Result<(), StateTransitionError>
where
    F: FnMut(&App),
{
    app.lookup_requested = false;
    machine.process_event(&LookupEvent::Submit, app)?;
    app.throbber_state.calc_next();
    redraw(app);

    let outcome = app.lookup.run(&app.form).await;
    machine.process_event(&LookupEvent::Completed(Dialog::from_outcome(&outcome)), app)?;
    redraw(app);

    Ok(())
}

/// Run a single lookup without the UI and print the result
pub async fn run_headless(lookup: &PrecinctLookup, input: &AddressInput, json: bool) -> Result<()> {
    let summary = lookup.run(input).await?;

    if json {
        render_headless_json(&summary)?;
    } else {
        render_headless_summary(&summary);
    }

    Ok(())
}

fn render_headless_summary(summary: &PrecinctSummary) {
    println!("{summary}");
}

fn render_headless_json(summary: &PrecinctSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{json}");
    Ok(())
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut lookup_machine = LookupMachine::new(LookupState::Idle);

    loop {
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }

        if app.lookup_requested && lookup_machine.state() == LookupState::Idle {
            let result = run_lookup(&mut lookup_machine, app, |app| {
                if terminal.draw(|f| ui::ui(app, f)).is_err() {
                    // Non-fatal redraw error
                }
            })
            .await;

            if let Err(e) = result {
                log::error!("{e}");
                lookup_machine = LookupMachine::new(LookupState::Idle);
                app.looking_up = false;
            }
        }
    }
    Ok(())
}
