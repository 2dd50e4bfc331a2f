//! Itinerary locations: geocode an address and append it to a trip.

use crate::domain::{DomainError, Location};
use crate::ports::LocationRepoPort;
use crate::usecases::address_resolver::AddressResolver;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct LocationService {
    resolver: Arc<AddressResolver>,
    repo: Arc<dyn LocationRepoPort>,
    /// Serializes count + insert so two concurrent adds never share an order.
    append_lock: Mutex<()>,
}

impl LocationService {
    pub fn new(resolver: Arc<AddressResolver>, repo: Arc<dyn LocationRepoPort>) -> Self {
        Self {
            resolver,
            repo,
            append_lock: Mutex::new(()),
        }
    }

    /// Resolve `address` and store it as the last stop of `trip_id`.
    ///
    /// Geocoding never fails (default coordinate at worst); only validation
    /// and storage errors are returned.
    pub async fn add_location(&self, trip_id: &str, address: &str) -> Result<Location, DomainError> {
        let trip_id = trip_id.trim();
        if trip_id.is_empty() {
            return Err(DomainError::Validation("Missing trip id".to_string()));
        }
        let address = address.trim();
        if address.is_empty() {
            return Err(DomainError::Validation("Missing address".to_string()));
        }

        let point = self.resolver.resolve(address).await;

        let _guard = self.append_lock.lock().await;
        let order = self.repo.count(trip_id).await?;
        let location = Location {
            id: uuid::Uuid::new_v4().to_string(),
            trip_id: trip_id.to_string(),
            title: address.to_string(),
            lat: point.lat,
            lng: point.lng,
            order,
            created_at: Utc::now(),
        };
        self.repo.insert(location.clone()).await?;

        info!(
            trip_id,
            location_id = %location.id,
            order,
            "location added to trip"
        );
        Ok(location)
    }

    pub async fn list_locations(&self, trip_id: &str) -> Result<Vec<Location>, DomainError> {
        self.repo.list(trip_id.trim()).await
    }
}
