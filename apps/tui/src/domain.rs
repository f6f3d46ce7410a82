use serde_json::{Map, Value};

use crate::error::LookupError;

/// One of the four inputs on the lookup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Street,
    City,
    State,
    Zip,
}

impl AddressField {
    pub const ALL: [Self; 4] = [Self::Street, Self::City, Self::State, Self::Zip];

    pub const fn index(self) -> usize {
        match self {
            Self::Street => 0,
            Self::City => 1,
            Self::State => 2,
            Self::Zip => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Street),
            1 => Some(Self::City),
            2 => Some(Self::State),
            3 => Some(Self::Zip),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Street => "Street Address:",
            Self::City => "City:",
            Self::State => "State:",
            Self::Zip => "ZIP Code:",
        }
    }

    /// Visible width of the input box, in columns.
    pub const fn width(self) -> u16 {
        match self {
            Self::Street | Self::City => 40,
            Self::State | Self::Zip => 10,
        }
    }
}

/// The four free-text values read off the form for a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressInput {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip: zip.into(),
        }
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Zip => &self.zip,
        }
    }

    pub fn get_mut(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Zip => &mut self.zip,
        }
    }

    /// Trims every field and rejects the input if any of them ends up empty.
    pub fn validate(&self) -> Result<ValidAddress, LookupError> {
        let street = self.street.trim();
        let city = self.city.trim();
        let state = self.state.trim();
        let zip = self.zip.trim();

        if [street, city, state, zip].iter().any(|value| value.is_empty()) {
            return Err(LookupError::Validation);
        }

        Ok(ValidAddress {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
        })
    }
}

/// An address whose fields are all trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAddress {
    street: String,
    city: String,
    state: String,
    zip: String,
}

impl ValidAddress {
    /// Free-text query sent to the geocoder.
    pub fn query(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Attribute map of a single precinct feature, keyed by service field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecinctAttributes(Map<String, Value>);

impl PrecinctAttributes {
    pub const fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Text form of an attribute. Missing keys and `null` both read as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for PrecinctAttributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
