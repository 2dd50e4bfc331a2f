//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    ChatReply, CountryInfo, DomainError, GeoPoint, Location, PreparedConversation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Description of one outbound HTTP call.
///
/// Query parameters are kept apart from `url` so adapters can log the endpoint
/// without leaking API keys.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub json: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            query: Vec::new(),
            json: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            query: Vec::new(),
            json: Some(body),
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-call capability. Any status code is a successful call; only
/// transport failures are errors.
#[async_trait::async_trait]
pub trait HttpPort: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DomainError>;
}

/// Generative-language model. One round trip per call.
#[async_trait::async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, conversation: &PreparedConversation)
    -> Result<ChatReply, DomainError>;
}

/// Forward geocoding: one top result for a free-text query.
#[async_trait::async_trait]
pub trait GeocoderPort: Send + Sync {
    /// `Ok(None)` when the service had no match.
    async fn geocode(&self, query: &str) -> Result<Option<GeoPoint>, DomainError>;
}

/// Reverse geocoding. Implementations absorb their own failures.
#[async_trait::async_trait]
pub trait ReverseGeocoderPort: Send + Sync {
    async fn lookup(&self, point: GeoPoint) -> CountryInfo;
}

/// Location store. Persist itinerary stops per trip.
#[async_trait::async_trait]
pub trait LocationRepoPort: Send + Sync {
    /// Number of locations the trip currently has.
    async fn count(&self, trip_id: &str) -> Result<usize, DomainError>;

    async fn insert(&self, location: Location) -> Result<(), DomainError>;

    /// Locations of a trip ordered by `order`.
    async fn list(&self, trip_id: &str) -> Result<Vec<Location>, DomainError>;
}
