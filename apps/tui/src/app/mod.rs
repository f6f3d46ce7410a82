// App module for precinct_lookup
// Handles form state and key handling

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, Dialog, DialogKind, FormFocus};
