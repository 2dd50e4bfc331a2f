//! LocationIQ adapter. Implements GeocoderPort via the `search.php` endpoint.

use crate::domain::{DomainError, GeoPoint};
use crate::ports::{GeocoderPort, HttpPort, HttpRequest};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Forward geocoder returning the single top match for a query.
pub struct LocationIqAdapter {
    http: Arc<dyn HttpPort>,
    api_key: Option<String>,
    url: String,
}

impl LocationIqAdapter {
    /// # Arguments
    /// * `api_key` - LocationIQ key; when `None` every lookup fails without a network call
    /// * `url` - Search endpoint (e.g. "https://us1.locationiq.com/v1/search.php")
    pub fn new(http: Arc<dyn HttpPort>, api_key: Option<String>, url: String) -> Self {
        Self { http, api_key, url }
    }
}

/// One search hit. LocationIQ sends coordinates as strings.
#[derive(Deserialize)]
struct Place {
    lat: serde_json::Value,
    lon: serde_json::Value,
}

fn coordinate(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[async_trait::async_trait]
impl GeocoderPort for LocationIqAdapter {
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::Config("LOCATIONIQ_KEY is missing".to_string()))?;

        let request = HttpRequest::get(&self.url)
            .query("key", api_key)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1");
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            warn!(status = response.status, body = %response.body, "geocoding request failed");
            return Err(DomainError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let places: Vec<Place> = serde_json::from_str(&response.body)
            .map_err(|e| DomainError::InvalidResponse(format!("geocode response: {}", e)))?;
        let Some(place) = places.first() else {
            debug!(query, "no geocoding results");
            return Ok(None);
        };

        match (coordinate(&place.lat), coordinate(&place.lon)) {
            (Some(lat), Some(lng)) => Ok(Some(GeoPoint::new(lat, lng))),
            _ => Err(DomainError::InvalidResponse(format!(
                "unparsable coordinates: lat={} lon={}",
                place.lat, place.lon
            ))),
        }
    }
}
