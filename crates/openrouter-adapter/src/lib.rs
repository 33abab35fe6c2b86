// openrouter-adapter: Layer 2, the OpenRouter adapter, its parameter schema and helpers
#![allow(clippy::result_large_err)]

pub mod adapter;
pub mod schema;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod util;

// --- Curated re-exports from openrouter-adapter-types (Layer 1) ---
pub use openrouter_adapter_types::{
    // Configuration
    AdapterConfig,
    // Handler trait
    AdapterHandlers,
    AdapterOptions,
    // Chunks and outputs
    ChatOutput,
    Chunk,
    // Errors
    Error,
    ErrorKind,
    ExitSignal,
    Features,
    // Messages
    FormedMessages,
    InlineContext,
    Message,
    OutputMessage,
    OutputStatus,
    // Parameter schema
    ParamType,
    ParameterValue,
    Parameters,
    Role,
    RoleMap,
    Schema,
    SchemaEntry,
};

pub use adapter::{OpenRouterAdapter, OpenRouterAdapterBuilder, OPENROUTER_URL};
pub use schema::openrouter_schema;
pub use util::json::prepare_data_for_json;
