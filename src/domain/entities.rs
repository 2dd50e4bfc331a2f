//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here; adapters map wire shapes into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One turn of a chat exchange. Order within a conversation is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Role of an upstream model turn. The generative API calls the assistant `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// Upstream-shaped turn: `{"role": "model", "parts": [{"text": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTurn {
    pub role: ModelRole,
    pub parts: Vec<TextPart>,
}

impl ModelTurn {
    pub fn text(role: ModelRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![TextPart { text: text.into() }],
        }
    }
}

/// Resolved coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A geocoded stop of a trip itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub trip_id: String,
    /// Address exactly as the user entered it.
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    /// 0-based position within the trip.
    pub order: usize,
    pub created_at: DateTime<Utc>,
}

/// Reverse-geocoded country and address for a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub country: String,
    pub formatted_address: String,
}

impl CountryInfo {
    pub const UNKNOWN_COUNTRY: &'static str = "Unknown";
    pub const UNKNOWN_ADDRESS: &'static str = "Unknown address";
    pub const NOT_FOUND: &'static str = "Location not found";

    /// Returned when nothing could be resolved for the coordinate.
    pub fn unknown() -> Self {
        Self {
            country: Self::UNKNOWN_COUNTRY.to_string(),
            formatted_address: Self::NOT_FOUND.to_string(),
        }
    }
}
