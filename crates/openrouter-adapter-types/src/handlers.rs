// AdapterHandlers trait: the lifecycle contract the host invokes on every adapter.

use crate::chunk::{ChatOutput, Chunk, ExitSignal, InlineContext};
use crate::message::{FormedMessages, Message};
use crate::parameter::{Parameters, Schema};

/// The contract every adapter implements. The host holds a
/// `Box<dyn AdapterHandlers>` and calls these at fixed lifecycle points.
///
/// Handlers are synchronous and never fail: chunk handlers return `None`
/// when a chunk has nothing to report, including when it cannot be decoded.
pub trait AdapterHandlers: Send + Sync {
    /// Adapter name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Schema of user-tunable generation parameters.
    fn schema(&self) -> &Schema;

    /// Called once before the first request of a session.
    fn setup(&mut self) -> bool;

    /// Shape the parameter map before serialization. Default: pass through.
    fn form_parameters(&self, params: Parameters, _messages: &[Message]) -> Parameters {
        params
    }

    /// Shape the message list before serialization.
    fn form_messages(&self, messages: &[Message]) -> FormedMessages;

    /// Total token count reported by a chunk, if any.
    fn tokens(&self, chunk: &Chunk) -> Option<u32>;

    /// Chat output carried by a chunk, if any.
    fn chat_output(&self, chunk: &Chunk) -> Option<ChatOutput>;

    /// Content carried by a chunk in an inline-edit context, if any.
    fn inline_output(&self, chunk: &Chunk, context: &InlineContext) -> Option<String>;

    /// Called once after the HTTP exchange finishes. Observational only.
    fn on_exit(&self, exit: &ExitSignal);
}
