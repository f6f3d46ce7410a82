use crate::config::AppConfig;
use crate::domain::AddressInput;
use crate::error::LookupError;
use crate::features::{ArcGisFeatureService, FeatureService};
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::summary::PrecinctSummary;

/// Address → coordinates → precinct feature → summary.
pub struct PrecinctLookup {
    geocoder: Box<dyn Geocoder>,
    features: Box<dyn FeatureService>,
}

impl std::fmt::Debug for PrecinctLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecinctLookup").finish_non_exhaustive()
    }
}

impl PrecinctLookup {
    pub fn new(geocoder: Box<dyn Geocoder>, features: Box<dyn FeatureService>) -> Self {
        Self { geocoder, features }
    }

    /// Nominatim + ArcGIS clients sharing one HTTP client.
    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::new(
            Box::new(NominatimGeocoder::new(
                client.clone(),
                config.geocoder_url.clone(),
            )),
            Box::new(ArcGisFeatureService::new(
                client,
                config.feature_service_url.clone(),
            )),
        ))
    }

    pub async fn run(&self, input: &AddressInput) -> Result<PrecinctSummary, LookupError> {
        let address = input.validate()?;
        let query = address.query();
        log::info!("Geocoding address: {query}");

        let point = self.geocoder.geocode(&query).await.inspect_err(|e| {
            log::error!("{e}");
        })?;
        log::info!("Obtained coordinates: ({:.6}, {:.6})", point.lat, point.lon);

        let attributes = self.features.query_point(point).await.inspect_err(|e| {
            log::error!("{e}");
        })?;

        Ok(PrecinctSummary::from_attributes(&attributes))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{GeoPoint, PrecinctAttributes};
    use crate::error::{GeocodeError, QueryError};
    use crate::features::{first_feature_attributes, FeatureQueryResponse};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    pub struct StubGeocoder {
        pub point: Option<GeoPoint>,
        pub calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, _query: &str) -> Result<GeoPoint, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.point.ok_or(GeocodeError::NotFound)
        }
    }

    /// Serves a canned feature-service body through the real response handling.
    pub struct StubFeatures {
        pub body: Value,
        pub calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl FeatureService for StubFeatures {
        async fn query_point(&self, _point: GeoPoint) -> Result<PrecinctAttributes, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let data: FeatureQueryResponse = serde_json::from_value(self.body.clone())
                .map_err(|e| QueryError::Request(e.to_string()))?;
            first_feature_attributes(data)
        }
    }

    /// Wraps attribute maps into a `{"features": [{"attributes": ..}]}` body.
    pub fn features_body(features: Vec<Value>) -> Value {
        let features: Vec<Value> = features
            .into_iter()
            .map(|attributes| json!({ "attributes": attributes }))
            .collect();
        json!({ "features": features })
    }

    pub struct Harness {
        pub lookup: PrecinctLookup,
        pub geocode_calls: Arc<AtomicUsize>,
        pub query_calls: Arc<AtomicUsize>,
    }

    pub fn harness(point: Option<GeoPoint>, features: Vec<Value>) -> Harness {
        let geocode_calls = Arc::new(AtomicUsize::new(0));
        let query_calls = Arc::new(AtomicUsize::new(0));
        let lookup = PrecinctLookup::new(
            Box::new(StubGeocoder {
                point,
                calls: Arc::clone(&geocode_calls),
            }),
            Box::new(StubFeatures {
                body: features_body(features),
                calls: Arc::clone(&query_calls),
            }),
        );
        Harness {
            lookup,
            geocode_calls,
            query_calls,
        }
    }

    pub const DALLAS: GeoPoint = GeoPoint {
        lat: 32.7808,
        lon: -96.7977,
    };

    pub fn precinct_three() -> Value {
        json!({
            "PRECINCT": "3",
            "TITLE1": "Judge",
            "FIRSTNAME1": "Jane",
            "LASTNAME1": "Doe",
            "ADDRESS1": "100 Main St",
            "CITY1": "Dallas",
            "STATE1": "TX",
            "ZIP1": "75201",
            "TEL1": "214-555-0100"
        })
    }

    fn main_street() -> AddressInput {
        AddressInput::new("100 Main St", "Dallas", "TX", "75201")
    }

    #[tokio::test]
    async fn test_blank_field_never_touches_network() {
        let h = harness(Some(DALLAS), vec![precinct_three()]);
        let input = AddressInput::new("100 Main St", " ", "TX", "75201");

        let result = h.lookup.run(&input).await;

        assert!(matches!(result, Err(LookupError::Validation)));
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.query_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_ungeocodable_address_skips_feature_query() {
        let h = harness(None, vec![precinct_three()]);

        let err = h.lookup.run(&main_street()).await.unwrap_err();

        assert_eq!(err.to_string(), "Address could not be geocoded.");
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.query_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_features_reports_no_precinct() {
        let h = harness(Some(DALLAS), Vec::new());

        let err = h.lookup.run(&main_street()).await.unwrap_err();

        assert!(matches!(err, LookupError::Query(QueryError::NoPrecinct)));
        assert_eq!(err.to_string(), "No precinct found.");
    }

    #[tokio::test]
    async fn test_repeated_lookup_is_stable() {
        let h = harness(Some(DALLAS), vec![precinct_three()]);

        let first = h.lookup.run(&main_street()).await.unwrap();
        let second = h.lookup.run(&main_street()).await.unwrap();

        assert_eq!(first, second);
        assert!(first.to_string().starts_with("Precinct Number: 3\nJudge: Judge Jane Doe\n"));
        assert_eq!(h.geocode_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.query_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feature_body_with_error_is_query_error() {
        let geocode_calls = Arc::new(AtomicUsize::new(0));
        let query_calls = Arc::new(AtomicUsize::new(0));
        let lookup = PrecinctLookup::new(
            Box::new(StubGeocoder {
                point: Some(DALLAS),
                calls: Arc::clone(&geocode_calls),
            }),
            Box::new(StubFeatures {
                body: json!({ "error": { "code": 498, "message": "Invalid token." } }),
                calls: Arc::clone(&query_calls),
            }),
        );

        let err = lookup.run(&main_street()).await.unwrap_err();

        assert!(matches!(
            err,
            LookupError::Query(QueryError::Service { code: 498, .. })
        ));
        assert_eq!(query_calls.load(Ordering::SeqCst), 1);
    }

    /// How the local test server answers one route.
    #[derive(Clone, Copy)]
    enum Reply {
        Json(u16, &'static str),
        Hang,
    }

    struct TestServer {
        addr: SocketAddr,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl TestServer {
        /// Request lines (`GET /path?query HTTP/1.1`) seen so far.
        fn request_lines(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        fn config(&self, request_timeout: Option<Duration>) -> AppConfig {
            AppConfig {
                geocoder_url: format!("http://{}/search", self.addr),
                feature_service_url: format!("http://{}/query", self.addr),
                request_timeout,
                ..AppConfig::default()
            }
        }
    }

    /// Serves `/search` with `geocode` and every other path with `query`.
    async fn serve(geocode: Reply, query: Reply) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let seen = Arc::clone(&seen);
                tokio::spawn(answer(socket, geocode, query, seen));
            }
        });

        TestServer { addr, requests }
    }

    async fn answer(
        mut socket: TcpStream,
        geocode: Reply,
        query: Reply,
        seen: Arc<Mutex<Vec<String>>>,
    ) {
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let text = String::from_utf8_lossy(&request);
        let line = text.lines().next().unwrap_or_default().to_string();
        let reply = if line.starts_with("GET /search") {
            geocode
        } else {
            query
        };
        seen.lock().unwrap().push(line);

        match reply {
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
            }
            Reply::Json(status, body) => {
                let reason = if status == 200 { "OK" } else { "Internal Server Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        }
    }

    const FOUND: Reply = Reply::Json(200, r#"[{"lat": "32.78", "lon": "-96.8"}]"#);

    #[tokio::test]
    async fn test_http_lookup_sends_fixed_query() {
        let server = serve(
            FOUND,
            Reply::Json(
                200,
                r#"{"features": [{"attributes": {"PRECINCT": "3", "TEL1": "214-555-0100"}}]}"#,
            ),
        )
        .await;
        let lookup = PrecinctLookup::from_config(&server.config(None)).unwrap();

        let summary = lookup.run(&main_street()).await.unwrap();

        assert_eq!(summary.precinct, "3");
        assert_eq!(summary.phone, "214-555-0100");

        let lines = server.request_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("GET /search?q=100+Main+St%2C+Dallas%2C+TX+75201&format=json&limit=1 "));
        assert!(lines[1].starts_with(
            "GET /query?f=json&geometryType=esriGeometryPoint&geometry=%7Bx%3A-96.8%2Cy%3A32.78%7D&spatialRel=esriSpatialRelIntersects&inSR=4326&outFields=*&returnGeometry=false&outSR=4326 "
        ));
    }

    #[tokio::test]
    async fn test_http_server_error_is_query_error() {
        let server = serve(FOUND, Reply::Json(500, r#"{"detail": "boom"}"#)).await;
        let lookup = PrecinctLookup::from_config(&server.config(None)).unwrap();

        let err = lookup.run(&main_street()).await.unwrap_err();

        assert!(
            matches!(&err, LookupError::Query(QueryError::Request(msg)) if msg.contains("500")),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_http_empty_geocode_skips_feature_query() {
        let server = serve(Reply::Json(200, "[]"), Reply::Hang).await;
        let lookup = PrecinctLookup::from_config(&server.config(None)).unwrap();

        let err = lookup.run(&main_street()).await.unwrap_err();

        assert_eq!(err.to_string(), "Address could not be geocoded.");
        assert_eq!(server.request_lines().len(), 1);
    }

    #[tokio::test]
    async fn test_http_empty_features_is_no_precinct() {
        let server = serve(FOUND, Reply::Json(200, r#"{"features": []}"#)).await;
        let lookup = PrecinctLookup::from_config(&server.config(None)).unwrap();

        let err = lookup.run(&main_street()).await.unwrap_err();

        assert_eq!(err.to_string(), "No precinct found.");
    }

    #[tokio::test]
    async fn test_http_timeout_bounds_hung_query() {
        let server = serve(FOUND, Reply::Hang).await;
        let lookup =
            PrecinctLookup::from_config(&server.config(Some(Duration::from_secs(1)))).unwrap();

        let started = std::time::Instant::now();
        let err = lookup.run(&main_street()).await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(10));
        match err {
            LookupError::Query(QueryError::Request(msg)) => {
                assert!(msg.contains("timed out"), "cause missing from: {msg}");
            }
            other => panic!("expected query error, got {other:?}"),
        }
    }
}
