// Export our modules for use in the binary and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod features;
pub mod geocode;
pub mod logging;
pub mod lookup;
pub mod summary;
pub mod terminal;
pub mod ui;

pub use domain::{AddressField, AddressInput, GeoPoint, PrecinctAttributes};
pub use error::{GeocodeError, LookupError, QueryError};
pub use summary::PrecinctSummary;
