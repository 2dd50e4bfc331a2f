//! HTTP adapter module. Implements HttpPort.
//!
//! Provides the reqwest-backed client and a mock for testing.

pub mod mock_http;
pub mod reqwest_http;

pub use mock_http::MockHttp;
pub use reqwest_http::ReqwestHttp;
