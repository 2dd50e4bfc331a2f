//! Google Geocoding adapter. Implements ReverseGeocoderPort (coordinate → country).

use crate::domain::{CountryInfo, DomainError, GeoPoint};
use crate::ports::{HttpPort, HttpRequest, ReverseGeocoderPort};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

pub struct GoogleReverseGeocoder {
    http: Arc<dyn HttpPort>,
    api_key: Option<String>,
    url: String,
}

impl GoogleReverseGeocoder {
    pub fn new(http: Arc<dyn HttpPort>, api_key: Option<String>, url: String) -> Self {
        Self { http, api_key, url }
    }

    async fn try_lookup(&self, point: GeoPoint) -> Result<CountryInfo, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::Config("GOOGLE_MAPS_API_KEY is missing".to_string()))?;

        let request = HttpRequest::get(&self.url)
            .query("latlng", format!("{},{}", point.lat, point.lng))
            .query("key", api_key);
        let response = self.http.execute(request).await?;
        if !response.is_success() {
            return Err(DomainError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let parsed: ReverseResponse = serde_json::from_str(&response.body)
            .map_err(|e| DomainError::InvalidResponse(format!("reverse geocode response: {}", e)))?;
        Ok(parsed.into_country_info())
    }
}

#[derive(Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    results: Vec<ReverseResult>,
}

#[derive(Deserialize)]
struct ReverseResult {
    #[serde(default)]
    address_components: Option<Vec<AddressComponent>>,
    #[serde(default)]
    formatted_address: Option<String>,
}

#[derive(Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

impl ReverseResponse {
    fn into_country_info(self) -> CountryInfo {
        let Some(result) = self.results.into_iter().next() else {
            return CountryInfo::unknown();
        };
        let Some(components) = result.address_components else {
            return CountryInfo::unknown();
        };

        let country = components
            .into_iter()
            .find(|c| c.types.iter().any(|t| t == "country"))
            .map(|c| c.long_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| CountryInfo::UNKNOWN_COUNTRY.to_string());

        CountryInfo {
            country,
            formatted_address: result
                .formatted_address
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| CountryInfo::UNKNOWN_ADDRESS.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl ReverseGeocoderPort for GoogleReverseGeocoder {
    async fn lookup(&self, point: GeoPoint) -> CountryInfo {
        match self.try_lookup(point).await {
            Ok(info) => info,
            Err(e) => {
                warn!(lat = point.lat, lng = point.lng, error = %e, "reverse geocoding failed");
                CountryInfo::unknown()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockHttp;
    use serde_json::json;

    fn geocoder(http: Arc<MockHttp>) -> GoogleReverseGeocoder {
        GoogleReverseGeocoder::new(
            http,
            Some("maps-key".to_string()),
            "http://maps.test/geocode/json".to_string(),
        )
    }

    #[tokio::test]
    async fn test_finds_country_component() {
        let http = Arc::new(MockHttp::always_json(
            200,
            json!({
                "results": [{
                    "formatted_address": "Shahbag, Dhaka, Bangladesh",
                    "address_components": [
                        {"long_name": "Dhaka", "short_name": "Dhaka", "types": ["locality", "political"]},
                        {"long_name": "Bangladesh", "short_name": "BD", "types": ["country", "political"]}
                    ]
                }]
            }),
        ));
        let info = geocoder(http.clone())
            .lookup(GeoPoint::new(23.8103, 90.4125))
            .await;

        assert_eq!(info.country, "Bangladesh");
        assert_eq!(info.formatted_address, "Shahbag, Dhaka, Bangladesh");
        assert_eq!(http.calls()[0].query_value("latlng"), Some("23.8103,90.4125"));
    }

    #[tokio::test]
    async fn test_no_country_component() {
        let http = Arc::new(MockHttp::always_json(
            200,
            json!({"results": [{"address_components": [{"long_name": "Ocean", "types": ["natural_feature"]}]}]}),
        ));
        let info = geocoder(http).lookup(GeoPoint::new(0.0, 0.0)).await;

        assert_eq!(info.country, "Unknown");
        assert_eq!(info.formatted_address, "Unknown address");
    }

    #[tokio::test]
    async fn test_empty_results_is_unknown() {
        let http = Arc::new(MockHttp::always_json(200, json!({"results": [], "status": "ZERO_RESULTS"})));
        let info = geocoder(http).lookup(GeoPoint::new(0.0, 0.0)).await;
        assert_eq!(info, CountryInfo::unknown());
    }

    #[tokio::test]
    async fn test_missing_key_is_unknown_without_call() {
        let http = Arc::new(MockHttp::always_json(200, json!({"results": []})));
        let geocoder = GoogleReverseGeocoder::new(http.clone(), None, "http://maps.test".into());

        let info = geocoder.lookup(GeoPoint::new(1.0, 2.0)).await;

        assert_eq!(info, CountryInfo::unknown());
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_unknown() {
        let http = Arc::new(MockHttp::unreachable());
        let info = geocoder(http).lookup(GeoPoint::new(1.0, 2.0)).await;
        assert_eq!(info, CountryInfo::unknown());
    }
}
