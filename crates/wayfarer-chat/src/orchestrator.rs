//! Travel agent orchestrator: the per-turn state machine.
//!
//! Wires the classifier, follow-up resolver, planner, tool executor and
//! response formatter around a [`ContextStore`]. Each turn holds its
//! conversation's lock from the user message to the agent reply.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;
use wayfarer_core::config::{ChatConfig, WayfarerConfig};
use wayfarer_core::types::SearchDomain;
use wayfarer_services::TravelServices;

use crate::agent::{AgentTurn, ConversationalAgent, NavigationRequest};
use crate::context::{ContextStore, ConversationContext, FollowUpResolver, InMemoryContextStore};
use crate::error::ChatError;
use crate::parser::IntentClassifier;
use crate::planner::Planner;
use crate::response::{self, FormattedResponse, ResponseFormatter};
use crate::tools::ToolExecutor;
use crate::types::{
    ChatMessage, ClassifiedIntent, EntitySlot, Intent, PendingAction, PendingActionKind,
    PlanStep, SelectedItem, ToolData, ToolKind, ToolParams, ToolResult,
};

/// Rule-based conversational travel agent.
pub struct TravelAgent {
    config: ChatConfig,
    classifier: IntentClassifier,
    resolver: FollowUpResolver,
    planner: Planner,
    executor: ToolExecutor,
    formatter: ResponseFormatter,
    store: Arc<dyn ContextStore>,
}

/// What a turn produced before it is written to history.
struct TurnOutcome {
    response: FormattedResponse,
    navigation: Option<NavigationRequest>,
    tools_invoked: Vec<ToolKind>,
}

impl TurnOutcome {
    fn canned(response: FormattedResponse) -> Self {
        Self {
            response,
            navigation: None,
            tools_invoked: Vec::new(),
        }
    }
}

impl TravelAgent {
    /// Create an agent with an in-memory context store sized from config.
    pub fn new(config: &WayfarerConfig, services: TravelServices) -> Self {
        Self {
            config: config.chat.clone(),
            classifier: IntentClassifier::new(&config.gazetteer.destinations),
            resolver: FollowUpResolver,
            planner: Planner::new(),
            executor: ToolExecutor::new(services, config.search.clone()),
            formatter: ResponseFormatter::new(),
            store: Arc::new(InMemoryContextStore::from_config(&config.chat)),
        }
    }

    pub fn with_store(mut self, store: Arc<dyn ContextStore>) -> Self {
        self.store = store;
        self
    }

    /// Pin the date relative expressions resolve against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.executor = self.executor.with_today(today);
        self
    }

    /// Drop conversations idle past the session timeout.
    pub async fn evict_idle(&self) -> Result<usize, ChatError> {
        self.store.evict_expired().await
    }

    fn validate(&self, text: &str) -> Result<(), ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }
        Ok(())
    }

    async fn run_turn(&self, context: &mut ConversationContext, text: &str) -> TurnOutcome {
        let mut classified = self.classifier.classify(text, Some(&*context));
        debug!(
            conversation = %context.id,
            intent = classified.intent.as_str(),
            confidence = classified.confidence,
            "Classified message"
        );

        self.resolver.resolve(&mut classified, context);
        self.resolver.apply_preferences(&mut classified, context);
        context.learn_preferences(&classified.entities);

        match classified.intent {
            Intent::Confirmation => self.confirm(context, &classified).await,
            Intent::Rejection => {
                context.clear_pending_action();
                TurnOutcome::canned(response::rejection(context))
            }
            Intent::Greeting => TurnOutcome::canned(response::greeting()),
            Intent::GeneralHelp => TurnOutcome::canned(response::help()),
            Intent::FollowUp if classified.confidence < self.config.follow_up_threshold => {
                TurnOutcome::canned(response::ask_again())
            }
            intent if classified.confidence < self.config.min_plan_confidence => {
                TurnOutcome::canned(response::clarification(intent))
            }
            _ => self.plan_and_execute(context, &classified).await,
        }
    }

    // -----------------------------------------------------------------
    // Confirmation handshake
    // -----------------------------------------------------------------

    /// Run the continuation of the pending action. An ordinal in the
    /// confirming turn ("the second one") swaps the stashed item.
    async fn confirm(
        &self,
        context: &mut ConversationContext,
        classified: &ClassifiedIntent,
    ) -> TurnOutcome {
        let Some(pending) = context.take_pending_action() else {
            return TurnOutcome::canned(response::nothing_to_confirm());
        };

        let item = classified
            .selection()
            .and_then(|index| context.pick(pending.data.domain(), Some(index), None))
            .unwrap_or(pending.data);
        let tool = pending.kind.continuation();

        let mut args = pending.args;
        args.extend(ToolParams::from_entities(&classified.entities).args);
        args.remove(EntitySlot::Selection.as_str());
        let params = ToolParams {
            args,
            selection: None,
        };
        let params = match item {
            SelectedItem::Destination(destination) => {
                params.with_arg(EntitySlot::Location.as_str(), destination.name)
            }
            item => params.with_selection(item),
        };

        debug!(conversation = %context.id, tool = tool.as_str(), "Running confirmed action");
        let result = self.executor.execute(tool, &params).await;
        let response = self.formatter.format(&result, classified, context);
        let response = match &context.pending_action {
            Some(next) => with_proposal(response, next),
            None => response,
        };

        TurnOutcome {
            navigation: navigation_for(&result),
            response,
            tools_invoked: vec![tool],
        }
    }

    // -----------------------------------------------------------------
    // Plan and execute
    // -----------------------------------------------------------------

    /// Execute plan steps in order, stopping at the first confirmation
    /// gate or at a failed step with more steps behind it.
    async fn plan_and_execute(
        &self,
        context: &mut ConversationContext,
        classified: &ClassifiedIntent,
    ) -> TurnOutcome {
        let plan = self.planner.plan(classified, context);
        if plan.is_empty() {
            return TurnOutcome::canned(response::clarification(classified.intent));
        }
        debug!(
            conversation = %context.id,
            plan = %plan.description,
            steps = plan.steps.len(),
            "Executing plan"
        );

        // Restored below unless this turn proposes something new.
        let previous = context.pending_action.take();
        let total = plan.steps.len();
        let mut texts = Vec::new();
        let mut rich_content = None;
        let mut tools_invoked = Vec::new();

        for (index, step) in plan.steps.iter().enumerate() {
            if step.requires_confirmation {
                match gate(step, context) {
                    Some(action) => context.set_pending_action(action),
                    None => texts.push(missing_item_text(step.tool).to_string()),
                }
                break;
            }

            let result = self.executor.execute(step.tool, &step.params).await;
            tools_invoked.push(step.tool);
            let formatted = self.formatter.format(&result, classified, context);
            texts.push(formatted.text);
            if formatted.rich_content.is_some() {
                rich_content = formatted.rich_content;
            }

            if !result.success && index + 1 < total {
                debug!(tool = step.tool.as_str(), "Plan stopped after failed step");
                break;
            }
        }

        match context.pending_action.as_ref().map(response::proposal) {
            Some(line) => texts.push(line),
            None => context.pending_action = previous,
        }
        context.remember_entities(&classified.entities);

        TurnOutcome {
            response: FormattedResponse {
                text: texts.join("\n\n"),
                rich_content,
            },
            navigation: None,
            tools_invoked,
        }
    }
}

/// Turn a gated step into the pending action it proposes. Ordinals beyond
/// the result list fall back to the top pick; an unknown booking reference
/// proposes nothing.
fn gate(step: &PlanStep, context: &ConversationContext) -> Option<PendingAction> {
    let kind = PendingActionKind::for_tool(step.tool)?;
    let item = match &step.params.selection {
        Some(item) => item.clone(),
        None => {
            let domain = step.tool.domain()?;
            let selection = step.params.get("selection").and_then(|s| s.parse().ok());
            let booking_ref = step.params.get("booking_ref");
            context.pick(domain, selection, booking_ref).or_else(|| {
                if booking_ref.is_none() {
                    context.pick(domain, None, None)
                } else {
                    None
                }
            })?
        }
    };
    Some(PendingAction::new(kind, item).with_args(step.params.args.clone()))
}

fn missing_item_text(tool: ToolKind) -> &'static str {
    match tool {
        ToolKind::CancelBooking | ToolKind::ModifyBooking => {
            "I couldn't find that booking. Which one do you mean?"
        }
        _ => "I couldn't find that option in the results. Which one would you like?",
    }
}

fn with_proposal(mut response: FormattedResponse, action: &PendingAction) -> FormattedResponse {
    response.text.push_str("\n\n");
    response.text.push_str(&response::proposal(action));
    response
}

fn navigation_for(result: &ToolResult) -> Option<NavigationRequest> {
    match &result.data {
        ToolData::Booking(booking) if result.success => Some(NavigationRequest::BookingDetails {
            booking_id: booking.id.clone(),
        }),
        ToolData::Cancellation {
            cancelled: true, ..
        } => Some(NavigationRequest::BookingsList),
        _ => None,
    }
}

/// Static follow-up menu for the active domain.
fn suggestions_for(domain: Option<SearchDomain>) -> &'static [&'static str] {
    match domain {
        Some(SearchDomain::Hotel) => &[
            "Book the top hotel",
            "Show me the second one",
            "Find restaurants nearby",
            "Rent a car there",
        ],
        Some(SearchDomain::Flight) => &[
            "Book the cheapest flight",
            "Try business class",
            "Find a hotel there",
        ],
        Some(SearchDomain::Restaurant) => &[
            "Reserve a table",
            "Try another cuisine",
            "Find a hotel nearby",
        ],
        Some(SearchDomain::Car) => &["Book the top car", "Find a hotel there", "Show my bookings"],
        Some(SearchDomain::Destination) => &[
            "Find flights there",
            "Show trip ideas",
            "Plan a trip",
        ],
        Some(SearchDomain::Booking) => &[
            "Cancel a booking",
            "Change my booking",
            "Check my points",
        ],
        None => &[
            "Find hotels in Rome",
            "Flights to Tokyo next friday",
            "Check my points",
            "Show my bookings",
        ],
    }
}

#[async_trait]
impl ConversationalAgent for TravelAgent {
    async fn process_turn(
        &self,
        conversation_id: &str,
        text: &str,
    ) -> Result<AgentTurn, ChatError> {
        self.validate(text)?;

        let shared = self.store.get_or_create(conversation_id).await?;
        let mut context = shared.lock().await;
        let text = text.trim();
        context.append_message(ChatMessage::user(text));

        let outcome = self.run_turn(&mut context, text).await;

        let message = ChatMessage::agent(outcome.response.text, outcome.response.rich_content);
        context.append_message(message.clone());
        Ok(AgentTurn {
            message,
            navigation: outcome.navigation,
            tools_invoked: outcome.tools_invoked,
        })
    }

    async fn suggested_actions(&self, conversation_id: &str) -> Result<Vec<String>, ChatError> {
        let domain = match self.store.get(conversation_id).await? {
            Some(shared) => shared.lock().await.last_domain,
            None => None,
        };
        Ok(suggestions_for(domain)
            .iter()
            .map(|s| s.to_string())
            .collect())
    }

    async fn history(&self, conversation_id: &str) -> Result<Vec<ChatMessage>, ChatError> {
        match self.store.get(conversation_id).await? {
            Some(shared) => Ok(shared.lock().await.history.clone()),
            None => Ok(Vec::new()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
