//! Error types for the dialogue engine.
//!
//! Only input validation and context-store failures surface as errors.
//! Collaborator failures are absorbed by the tool executor.

use wayfarer_core::error::WayfarerError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("context store error: {0}")]
    ContextStore(String),
}

impl From<ChatError> for WayfarerError {
    fn from(err: ChatError) -> Self {
        WayfarerError::Service(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::Disabled.to_string(), "chat is disabled");
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::ContextStore("lock poisoned".to_string()).to_string(),
            "context store error: lock poisoned"
        );
    }

    #[test]
    fn test_chat_error_into_wayfarer_error() {
        let err: WayfarerError = ChatError::EmptyMessage.into();
        assert!(matches!(err, WayfarerError::Service(_)));
        assert!(err.to_string().contains("message cannot be empty"));
    }
}
