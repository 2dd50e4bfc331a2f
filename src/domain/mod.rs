//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod chat_result;
pub mod conversation;
pub mod entities;
pub mod errors;

pub use chat_result::{ChatFailure, ChatFailureKind, ChatReply};
pub use conversation::{PreparedConversation, prepare};
pub use entities::{
    ConversationMessage, CountryInfo, GeoPoint, Location, ModelRole, ModelTurn, Role, TextPart,
};
pub use errors::DomainError;
