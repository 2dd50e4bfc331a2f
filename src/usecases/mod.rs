//! Application use cases. Orchestrate domain logic via ports.

pub mod address_resolver;
pub mod chat_service;
pub mod location_service;

pub use address_resolver::{AddressResolver, DEFAULT_LOCATION};
pub use chat_service::ChatService;
pub use location_service::LocationService;
