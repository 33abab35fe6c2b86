use serde::{Deserialize, Serialize};

/// Conversation roles. `Llm` is the host-facing name for model turns and is
/// never sent over the wire; adapters rename it before transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Llm,
}

/// One turn of the conversation, in host order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Convenience: create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Convenience: create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Convenience: create a host-side model message (role `llm`).
    pub fn llm(content: impl Into<String>) -> Self {
        Self {
            role: Role::Llm,
            content: content.into(),
        }
    }

    /// Convenience: create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Output of `form_messages`: serialized as `{"messages": [...]}` and merged
/// into the outgoing request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormedMessages {
    pub messages: Vec<Message>,
}
