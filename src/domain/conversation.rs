//! Conversation partitioning: split a caller conversation into the system
//! instruction and the ordered upstream turns.

use super::entities::{ConversationMessage, ModelRole, ModelTurn, Role};

/// A conversation reshaped for the generative API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedConversation {
    /// Newline-joined system messages; `None` when there were none.
    pub system_instruction: Option<String>,
    pub turns: Vec<ModelTurn>,
}

/// Partition messages by role. System content is joined with `\n` in order;
/// user/assistant messages keep their relative order and map to `user`/`model`.
pub fn prepare(messages: &[ConversationMessage]) -> PreparedConversation {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == Role::System)
        .map(|m| m.content.as_str())
        .collect();

    let turns = messages
        .iter()
        .filter_map(|m| match m.role {
            Role::User => Some(ModelTurn::text(ModelRole::User, m.content.clone())),
            Role::Assistant => Some(ModelTurn::text(ModelRole::Model, m.content.clone())),
            Role::System => None,
        })
        .collect();

    let joined = system.join("\n");
    PreparedConversation {
        system_instruction: (!joined.is_empty()).then_some(joined),
        turns,
    }
}
