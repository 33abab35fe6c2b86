// Streamed response chunks and the values handlers produce from them.

use serde::{Deserialize, Serialize};

/// One unit of response data handed to a handler by the host.
///
/// Either raw text (possibly carrying SSE framing such as `data: `) or a
/// record wrapping the full response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chunk {
    Body { body: String },
    Text(String),
}

impl Chunk {
    pub fn body(body: impl Into<String>) -> Self {
        Chunk::Body { body: body.into() }
    }

    /// Returns `true` when there is nothing to decode.
    pub fn is_empty(&self) -> bool {
        match self {
            Chunk::Body { body } => body.is_empty(),
            Chunk::Text(text) => text.is_empty(),
        }
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Chunk::Text(text.to_string())
    }
}

impl From<String> for Chunk {
    fn from(text: String) -> Self {
        Chunk::Text(text)
    }
}

/// Status of a chat output tick. Only success is reported; failures yield no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStatus {
    Success,
}

/// Role and content read from a choice's `delta` or `message`.
/// The role is passed through from the response unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Result of `chat_output` for one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatOutput {
    pub status: OutputStatus,
    pub output: OutputMessage,
}

impl ChatOutput {
    pub fn success(output: OutputMessage) -> Self {
        Self {
            status: OutputStatus::Success,
            output,
        }
    }
}

/// Editing context for inline (non-chat) requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
    /// First and last line (1-based, inclusive) of the selection, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<(u32, u32)>,
}

/// Final outcome of the HTTP exchange, passed to `on_exit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSignal {
    pub status: u16,
    #[serde(default)]
    pub body: String,
}

impl ExitSignal {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}
