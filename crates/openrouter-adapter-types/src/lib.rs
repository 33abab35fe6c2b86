// openrouter-adapter-types: Layer 1, shared types, the handler trait, and errors
#![allow(clippy::result_large_err)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod handlers;
pub mod message;
pub mod parameter;

pub use chunk::*;
pub use config::*;
pub use error::*;
pub use handlers::*;
pub use message::*;
pub use parameter::*;
