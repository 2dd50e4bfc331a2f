//! Persistence adapters. Implement LocationRepoPort.

pub mod location_json;

pub use location_json::JsonLocationRepo;
