use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::{GeoPoint, PrecinctAttributes};
use crate::error::QueryError;

/// Looks up the precinct feature containing a point.
#[async_trait]
pub trait FeatureService: Send + Sync {
    async fn query_point(&self, point: GeoPoint) -> Result<PrecinctAttributes, QueryError>;
}

#[derive(Debug, Default, Deserialize)]
pub struct FeatureQueryResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
    /// ArcGIS reports some failures as a 200 with an `error` body.
    #[serde(default)]
    pub error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ArcGisFeatureService {
    client: reqwest::Client,
    url: String,
}

impl ArcGisFeatureService {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeatureService for ArcGisFeatureService {
    async fn query_point(&self, point: GeoPoint) -> Result<PrecinctAttributes, QueryError> {
        log::info!("Querying ArcGIS API...");

        let response = self
            .client
            .get(&self.url)
            .query(&query_params(point))
            .send()
            .await?
            .error_for_status()?;

        let data: FeatureQueryResponse = response.json().await?;
        first_feature_attributes(data)
    }
}

/// Point-in-polygon query against the layer, all fields, no geometry, EPSG:4326 in and out.
pub fn query_params(point: GeoPoint) -> [(&'static str, String); 8] {
    [
        ("f", "json".to_string()),
        ("geometryType", "esriGeometryPoint".to_string()),
        ("geometry", format!("{{x:{},y:{}}}", point.lon, point.lat)),
        ("spatialRel", "esriSpatialRelIntersects".to_string()),
        ("inSR", "4326".to_string()),
        ("outFields", "*".to_string()),
        ("returnGeometry", "false".to_string()),
        ("outSR", "4326".to_string()),
    ]
}

pub fn first_feature_attributes(
    data: FeatureQueryResponse,
) -> Result<PrecinctAttributes, QueryError> {
    if let Some(error) = data.error {
        return Err(QueryError::Service {
            code: error.code,
            message: error.message,
        });
    }

    if data.features.len() > 1 {
        log::warn!(
            "Feature service returned {} features; using the first",
            data.features.len()
        );
    }

    data.features
        .into_iter()
        .next()
        .map(|feature| PrecinctAttributes::new(feature.attributes))
        .ok_or(QueryError::NoPrecinct)
}
