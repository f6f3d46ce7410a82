use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::GeoPoint;
use crate::error::GeocodeError;

/// Turns a free-text address into coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<GeoPoint, GeocodeError>;
}

/// A single search hit. Nominatim encodes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    url: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeoPoint, GeocodeError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;

        let places: Vec<NominatimPlace> = response.json().await?;
        first_point(&places)
    }
}

pub fn first_point(places: &[NominatimPlace]) -> Result<GeoPoint, GeocodeError> {
    let place = places.first().ok_or(GeocodeError::NotFound)?;

    if let Some(name) = &place.display_name {
        log::debug!("Geocoder matched: {name}");
    }

    let lat = parse_coordinate("latitude", &place.lat)?;
    let lon = parse_coordinate("longitude", &place.lon)?;
    Ok(GeoPoint { lat, lon })
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse()
        .map_err(|e| GeocodeError::Service(format!("invalid {name} '{raw}': {e}")))
}
