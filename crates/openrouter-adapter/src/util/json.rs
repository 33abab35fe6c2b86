// Chunk normalization: strip stream framing and decode the JSON payload.

use serde_json::Value;

use openrouter_adapter_types::{Chunk, Error};

/// Return the JSON-bearing part of a chunk.
///
/// A body wrapper is returned unchanged. Raw text is cut at the first `{`,
/// dropping SSE framing such as `data: `; text without a `{` is returned whole.
/// Never fails: the result is not guaranteed to be valid JSON.
pub fn prepare_data_for_json(data: &Chunk) -> &str {
    match data {
        Chunk::Body { body } => body,
        Chunk::Text(text) => text.find('{').map_or(text.as_str(), |pos| &text[pos..]),
    }
}

/// Normalize and decode a chunk.
pub fn decode_chunk(chunk: &Chunk) -> Result<Value, Error> {
    let data = prepare_data_for_json(chunk);
    serde_json::from_str(data).map_err(|e| Error::decode(data, e))
}
