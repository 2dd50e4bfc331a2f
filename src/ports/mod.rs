//! Port traits. API boundaries for the hexagon.
//!
//! Outbound only: the application calls into infrastructure (HTTP, storage).
//! The web adapter drives use cases directly.

pub mod outbound;

pub use outbound::{
    GeocoderPort, HttpMethod, HttpPort, HttpRequest, HttpResponse, LlmPort, LocationRepoPort,
    ReverseGeocoderPort,
};
