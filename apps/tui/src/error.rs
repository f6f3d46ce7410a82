use std::error::Error as StdError;
use thiserror::Error;

/// Display text of an error followed by each of its causes.
pub fn describe_chain(e: &dyn StdError) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoding error: {0}")]
    Service(String),
    #[error("Address could not be geocoded.")]
    NotFound,
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Service(describe_chain(&e))
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Error querying ArcGIS: {0}")]
    Request(String),
    #[error("Error querying ArcGIS: {message} (code {code})")]
    Service { code: i64, message: String },
    #[error("No precinct found.")]
    NoPrecinct,
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(describe_chain(&e))
    }
}

/// Everything a single lookup can fail with, as shown to the user.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please fill in all address fields.")]
    Validation,
    #[error(transparent)]
    Geocoding(#[from] GeocodeError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl LookupError {
    /// Title of the dialog the error is reported in.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation => "Input Error",
            Self::Geocoding(_) | Self::Query(_) => "Lookup Error",
        }
    }
}
