//! The contract every conversational engine implements.
//!
//! The rule-based [`TravelAgent`](crate::orchestrator::TravelAgent) is one
//! implementation. A model-backed engine would be another, driving the same
//! tool executor through the serde tool-call types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::types::{ChatMessage, ToolKind};

/// Screen the host UI should open after a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum NavigationRequest {
    #[serde(rename_all = "camelCase")]
    BookingDetails { booking_id: String },
    BookingsList,
}

/// Outcome of one processed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTurn {
    /// The agent's reply, already appended to the conversation history.
    pub message: ChatMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationRequest>,
    /// Tools run during the turn, in order.
    #[serde(default)]
    pub tools_invoked: Vec<ToolKind>,
}

#[async_trait]
pub trait ConversationalAgent: Send + Sync {
    /// Process one user message for a conversation.
    ///
    /// Returns an error only when the message is rejected before processing
    /// (chat disabled, empty or over-long text) or the context store fails.
    async fn process_turn(&self, conversation_id: &str, text: &str)
        -> Result<AgentTurn, ChatError>;

    /// Short follow-up prompts for the conversation's current domain.
    async fn suggested_actions(&self, conversation_id: &str) -> Result<Vec<String>, ChatError>;

    /// Messages of a conversation in order. Unknown ids have no history.
    async fn history(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, ChatError>;
}
