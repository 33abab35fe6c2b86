// Test fixtures: canned adapters, OpenRouter response chunks and log capture.

use std::sync::{Arc, Mutex};

use secrecy::SecretString;
use serde_json::json;

use crate::adapter::OpenRouterAdapter;

/// An adapter with a fixed test key and the default configuration.
pub fn test_adapter(stream: bool) -> OpenRouterAdapter {
    OpenRouterAdapter::builder(SecretString::from("sk-or-test".to_string()))
        .stream(stream)
        .build()
        .expect("default adapter configuration is valid")
}

/// A streaming chunk carrying a content delta.
pub fn delta_chunk(content: &str) -> String {
    json!({
        "id": "gen-test",
        "model": "anthropic/claude-3.5-sonnet",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": null}]
    })
    .to_string()
}

/// A non-streaming response carrying a full assistant message.
pub fn message_chunk(content: &str) -> String {
    json!({
        "id": "gen-test",
        "model": "anthropic/claude-3.5-sonnet",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

/// A trailing chunk that only reports usage.
pub fn usage_chunk(total_tokens: u32) -> String {
    json!({
        "id": "gen-test",
        "choices": [],
        "usage": {"prompt_tokens": 1, "completion_tokens": total_tokens.saturating_sub(1), "total_tokens": total_tokens}
    })
    .to_string()
}

/// Frame JSON payloads as an SSE body, ending with the `[DONE]` sentinel.
pub fn build_chat_sse_body<S: AsRef<str>>(data_lines: &[S]) -> String {
    let mut body: String = data_lines
        .iter()
        .map(|d| format!("data: {}\n\n", d.as_ref()))
        .collect();
    body.push_str("data: [DONE]\n\n");
    body
}

/// In-memory sink for formatted `tracing` output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// A subscriber writing `ERROR` events, without ANSI colors, into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::ERROR)
            .finish()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock poisoned");
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return the `ERROR` lines it logged.
pub fn capture_errors(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    tracing::subscriber::with_default(buffer.subscriber(), f);
    buffer.contents()
}
