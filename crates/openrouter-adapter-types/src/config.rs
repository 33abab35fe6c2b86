use serde::{Deserialize, Serialize};

use crate::message::Role;
use crate::parameter::Parameters;

/// Default environment variable holding the OpenRouter API key.
pub const DEFAULT_API_KEY_ENV: &str = "OPEN_ROUTER_API_KEY";

/// Per-adapter behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterOptions {
    /// Request a streamed response; also selects `delta` over `message`
    /// when reading choices (default: true).
    #[serde(default = "default_true")]
    pub stream: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self { stream: true }
    }
}

/// Capabilities the host may query before using the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    pub text: bool,
    pub tokens: bool,
    pub vision: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            text: true,
            tokens: true,
            vision: false,
        }
    }
}

/// Maps host-facing roles onto wire roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    pub llm: Role,
    pub user: Role,
}

impl Default for RoleMap {
    fn default() -> Self {
        Self {
            llm: Role::Assistant,
            user: Role::User,
        }
    }
}

impl RoleMap {
    /// Resolve the role to transmit. Roles without a mapping pass through.
    pub fn wire_role(&self, role: Role) -> Role {
        match role {
            Role::Llm => self.llm,
            Role::User => self.user,
            other => other,
        }
    }
}

/// User-supplied adapter configuration, typically read from the host's
/// JSON settings. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub opts: AdapterOptions,
    /// Name of the environment variable holding the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Sent as the `HTTP-Referer` identification header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_referer: Option<String>,
    /// Sent as the `X-Title` identification header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Overrides merged over the schema defaults on every request.
    pub parameters: Parameters,
}

impl AdapterConfig {
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }
}

fn default_true() -> bool {
    true
}
