//! Address resolution with a fallback chain.
//!
//! Tries the full address, then progressively shorter comma-separated suffixes,
//! and finally a fixed default coordinate. Never fails.

use crate::domain::GeoPoint;
use crate::ports::GeocoderPort;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Used when no attempt resolves (Dhaka, Bangladesh).
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint::new(23.8103, 90.4125);

/// Ordered queries for one address: the address as given, then
/// `parts[i..].join(", ")` for every `i`, starting with all trimmed components.
pub fn fallback_queries(address: &str) -> Vec<String> {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    std::iter::once(address.to_string())
        .chain((0..parts.len()).map(|i| parts[i..].join(", ")))
        .collect()
}

pub struct AddressResolver {
    geocoder: Arc<dyn GeocoderPort>,
}

impl AddressResolver {
    pub fn new(geocoder: Arc<dyn GeocoderPort>) -> Self {
        Self { geocoder }
    }

    /// Resolve `address` to coordinates. Attempts run strictly in sequence and
    /// stop at the first hit; errors of any kind just move on to the next query.
    pub async fn resolve(&self, address: &str) -> GeoPoint {
        for (attempt, query) in fallback_queries(address).iter().enumerate() {
            match self.geocoder.geocode(query).await {
                Ok(Some(point)) => {
                    info!(
                        attempt = attempt + 1,
                        query = %query,
                        lat = point.lat,
                        lng = point.lng,
                        "address resolved"
                    );
                    return point;
                }
                Ok(None) => debug!(attempt = attempt + 1, query = %query, "no geocoding match"),
                Err(e) => debug!(attempt = attempt + 1, query = %query, error = %e, "geocoding attempt failed"),
            }
        }

        warn!(
            address,
            "No geocoding results for address, using default location"
        );
        DEFAULT_LOCATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::geo::LocationIqAdapter;
    use crate::adapters::http::MockHttp;
    use crate::domain::DomainError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Geocoder answering from a fixed table and recording every query.
    struct TableGeocoder {
        hits: HashMap<String, GeoPoint>,
        queries: Mutex<Vec<String>>,
    }

    impl TableGeocoder {
        fn new(hits: &[(&str, GeoPoint)]) -> Self {
            Self {
                hits: hits.iter().map(|(q, p)| (q.to_string(), *p)).collect(),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl GeocoderPort for TableGeocoder {
        async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, DomainError> {
            self.queries.lock().unwrap().push(query.to_string());
            if query.is_empty() {
                return Err(DomainError::Upstream {
                    status: 400,
                    body: "empty query".to_string(),
                });
            }
            Ok(self.hits.get(query).copied())
        }
    }

    #[test]
    fn test_fallback_queries_drop_leading_components() {
        assert_eq!(
            fallback_queries("Suite 5, Main Street, Springfield"),
            vec![
                "Suite 5, Main Street, Springfield",
                "Suite 5, Main Street, Springfield",
                "Main Street, Springfield",
                "Springfield"
            ]
        );
    }

    #[test]
    fn test_fallback_queries_normalise_spacing() {
        assert_eq!(
            fallback_queries("Louvre,Paris"),
            vec!["Louvre,Paris", "Louvre, Paris", "Paris"]
        );
    }

    #[test]
    fn test_fallback_queries_no_commas() {
        assert_eq!(
            fallback_queries("Springfield"),
            vec!["Springfield", "Springfield"]
        );
        assert_eq!(fallback_queries(" Springfield "), vec![" Springfield ", "Springfield"]);
    }

    #[test]
    fn test_fallback_queries_keep_empty_segments() {
        assert_eq!(fallback_queries("A,,B"), vec!["A,,B", "A, , B", ", B", "B"]);
    }

    #[tokio::test]
    async fn test_first_attempt_success_makes_one_call() {
        let paris = GeoPoint::new(48.8566, 2.3522);
        let geocoder = Arc::new(TableGeocoder::new(&[("Paris, France", paris)]));
        let resolver = AddressResolver::new(geocoder.clone());

        assert_eq!(resolver.resolve("Paris, France").await, paris);
        assert_eq!(geocoder.queries(), vec!["Paris, France"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_suffix() {
        let springfield = GeoPoint::new(39.7817, -89.6501);
        let geocoder = Arc::new(TableGeocoder::new(&[("Springfield", springfield)]));
        let resolver = AddressResolver::new(geocoder.clone());

        let point = resolver.resolve("Suite 5, Main Street, Springfield").await;

        assert_eq!(point, springfield);
        assert_eq!(
            geocoder.queries(),
            vec![
                "Suite 5, Main Street, Springfield",
                "Suite 5, Main Street, Springfield",
                "Main Street, Springfield",
                "Springfield"
            ]
        );
    }

    #[tokio::test]
    async fn test_all_attempts_fail_returns_default() {
        let geocoder = Arc::new(TableGeocoder::new(&[]));
        let resolver = AddressResolver::new(geocoder.clone());

        let point = resolver.resolve("Nowhere, Atlantis").await;

        assert_eq!(point, GeoPoint::new(23.8103, 90.4125));
        assert_eq!(
            geocoder.queries(),
            vec!["Nowhere, Atlantis", "Nowhere, Atlantis", "Atlantis"]
        );
    }

    #[tokio::test]
    async fn test_empty_address_returns_default() {
        let geocoder = Arc::new(TableGeocoder::new(&[]));
        let resolver = AddressResolver::new(geocoder.clone());

        assert_eq!(resolver.resolve("").await, DEFAULT_LOCATION);
        assert_eq!(geocoder.queries(), vec!["", ""]);
    }

    #[tokio::test]
    async fn test_repeated_resolution_is_identical() {
        let rome = GeoPoint::new(41.9028, 12.4964);
        let geocoder = Arc::new(TableGeocoder::new(&[("Rome", rome)]));
        let resolver = AddressResolver::new(geocoder);

        let first = resolver.resolve("Trastevere, Rome").await;
        let second = resolver.resolve("Trastevere, Rome").await;

        assert_eq!(first, rome);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_key_always_default_without_network() {
        let http = Arc::new(MockHttp::always_json(
            200,
            serde_json::json!([{"lat": "1", "lon": "2"}]),
        ));
        let geocoder = LocationIqAdapter::new(http.clone(), None, "http://geo.test".to_string());
        let resolver = AddressResolver::new(Arc::new(geocoder));

        assert_eq!(resolver.resolve("Main Street, Springfield").await, DEFAULT_LOCATION);
        assert_eq!(http.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_component_address_makes_two_attempts() {
        let http = Arc::new(MockHttp::always_json(200, serde_json::json!([])));
        let geocoder = LocationIqAdapter::new(http.clone(), Some("k".into()), "http://geo.test".into());
        let resolver = AddressResolver::new(Arc::new(geocoder));

        assert_eq!(resolver.resolve("Springfield").await, DEFAULT_LOCATION);
        assert_eq!(http.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_failures_fall_through() {
        let http = Arc::new(MockHttp::new(|req| {
            if req.query_value("q") == Some("Dhaka") {
                Ok(crate::ports::HttpResponse::json(
                    200,
                    serde_json::json!([{"lat": "23.7", "lon": "90.4"}]),
                ))
            } else {
                Err(DomainError::Transport("timeout".to_string()))
            }
        }));
        let geocoder = LocationIqAdapter::new(http.clone(), Some("k".into()), "http://geo.test".into());
        let resolver = AddressResolver::new(Arc::new(geocoder));

        let point = resolver.resolve("Road 12, Banani, Dhaka").await;

        assert_eq!(point, GeoPoint::new(23.7, 90.4));
        assert_eq!(http.call_count(), 4);
    }
}
