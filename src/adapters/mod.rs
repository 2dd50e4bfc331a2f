//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP client, LLM, geocoding, storage, web surface. Map errors to DomainError.

pub mod ai;
pub mod geo;
pub mod http;
pub mod persistence;
pub mod web;
