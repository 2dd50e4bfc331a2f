//! AI adapter module. Implements LlmPort for the travel-assistant chat.

pub mod gemini_adapter;

pub use gemini_adapter::GeminiAdapter;
