use crate::ports::ReverseGeocoderPort;
use crate::usecases::{ChatService, LocationService};
use std::sync::Arc;

/// Shared services handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub locations: Arc<LocationService>,
    pub reverse_geocoder: Arc<dyn ReverseGeocoderPort>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chat", &"Arc<ChatService>")
            .field("locations", &"Arc<LocationService>")
            .field("reverse_geocoder", &"Arc<dyn ReverseGeocoderPort>")
            .finish()
    }
}
