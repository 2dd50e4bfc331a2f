//! Geocoding adapters. Forward (LocationIQ) and reverse (Google) lookups.

pub mod google_reverse;
pub mod locationiq;

pub use google_reverse::GoogleReverseGeocoder;
pub use locationiq::LocationIqAdapter;
