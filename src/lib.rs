//! trip-planner: travel-assistant chat proxy and itinerary geocoding with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
