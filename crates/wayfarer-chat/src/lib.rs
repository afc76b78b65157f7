//! Rule-based conversational travel agent.
//!
//! Classifies free-text messages into intents and entities, plans tool calls
//! against the travel services, executes them, and formats the results into
//! chat messages with optional rich content. Per-conversation state lives in
//! an injectable context store.

pub mod agent;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod planner;
pub mod response;
pub mod tools;
pub mod types;

pub use agent::{AgentTurn, ConversationalAgent, NavigationRequest};
pub use context::{
    ContextStore, ConversationContext, FollowUpResolver, InMemoryContextStore, LastSearchResults,
    SearchResultSet, SharedContext,
};
pub use error::ChatError;
pub use orchestrator::TravelAgent;
pub use parser::{resolve_date, IntentClassifier};
pub use planner::Planner;
pub use response::{FormattedResponse, ResponseFormatter};
pub use tools::ToolExecutor;
pub use types::{
    ChatMessage, ClassifiedIntent, Entities, EntitySlot, Intent, PendingAction,
    PendingActionKind, Plan, PlanStep, RichContent, SelectedItem, Sender, ToolData, ToolKind,
    ToolParams, ToolResult,
};
