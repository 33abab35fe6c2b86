// OpenRouter chat-completions adapter: request shaping, chunk parsing, exit logging.

use reqwest::header::HeaderMap;
use secrecy::SecretString;
use serde_json::{json, Value};

use crate::schema::openrouter_schema;
use crate::util::json::decode_chunk;
use crate::util::template::{resolve_headers, Secrets};

use openrouter_adapter_types::{
    AdapterConfig, AdapterHandlers, AdapterOptions, ChatOutput, Chunk, Error, ExitSignal,
    Features, FormedMessages, InlineContext, Message, OutputMessage, Parameters, Role, RoleMap,
    Schema,
};

/// OpenRouter chat-completions endpoint.
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default `X-Title` identification header.
pub const DEFAULT_TITLE: &str = "openrouter-adapter";

/// Adapter connecting the host chat plugin to OpenRouter.
///
/// Identity, connection and schema are fixed at construction. The outgoing
/// `parameters` map is refreshed by the host before each request with
/// [`OpenRouterAdapter::refresh_parameters`].
#[derive(Debug)]
pub struct OpenRouterAdapter {
    url: String,
    roles: RoleMap,
    opts: AdapterOptions,
    features: Features,
    headers: HeaderMap,
    schema: Schema,
    /// Overrides from configuration, applied under per-request overrides.
    configured: Parameters,
    parameters: Parameters,
}

impl OpenRouterAdapter {
    /// Create an adapter with the default URL, options and identification headers.
    pub fn new(api_key: SecretString) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Create a builder for fine-grained configuration.
    pub fn builder(api_key: SecretString) -> OpenRouterAdapterBuilder {
        OpenRouterAdapterBuilder::new(api_key)
    }

    /// Create an adapter reading the API key from `OPEN_ROUTER_API_KEY`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(&AdapterConfig::default(), |name| std::env::var(name).ok())
    }

    /// Create an adapter from user configuration, resolving the API key
    /// through `lookup` (an environment-variable reader).
    ///
    /// Configured parameter overrides are validated here, so an invalid
    /// configuration is rejected before any request is formed.
    pub fn from_config<F>(config: &AdapterConfig, lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = config.api_key_env();
        let api_key = lookup(var)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::configuration(format!("{var} is not set")))?;

        let mut builder = Self::builder(SecretString::from(api_key))
            .stream(config.opts.stream)
            .parameters(config.parameters.clone());
        if let Some(ref url) = config.url {
            builder = builder.url(url.clone());
        }
        if let Some(ref referer) = config.http_referer {
            builder = builder.http_referer(referer.clone());
        }
        if let Some(ref title) = config.title {
            builder = builder.title(title.clone());
        }
        builder.build()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolved request headers. The authorization value is marked sensitive.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }

    pub fn opts(&self) -> &AdapterOptions {
        &self.opts
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    /// The outgoing parameter map for the current request.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Rebuild the outgoing parameters from schema defaults, configured
    /// overrides and `overrides` (highest precedence), then re-apply `setup`.
    ///
    /// On a validation failure the previous parameters are kept and the
    /// error carries the validator's reason; the request must not be sent.
    pub fn refresh_parameters(&mut self, overrides: &Parameters) -> Result<(), Error> {
        let mut merged = self.configured.clone();
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
        self.parameters = self.schema.resolve(&merged)?;
        self.setup();
        Ok(())
    }

    /// Assemble the outgoing JSON body: formed parameters followed by formed messages.
    pub fn request_body(&self, messages: &[Message]) -> Value {
        let mut body = self.form_parameters(self.parameters.clone(), messages);
        let formed = self.form_messages(messages);
        body.insert("messages".into(), json!(formed.messages));
        Value::Object(body)
    }

    /// Decode a chunk, treating any failure as "nothing this tick".
    fn decoded(&self, chunk: &Chunk) -> Option<Value> {
        if chunk.is_empty() {
            return None;
        }
        match decode_chunk(chunk) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::trace!(error = %e, "Skipping undecodable chunk");
                None
            }
        }
    }

    /// Read role/content from the first choice: `delta` when streaming,
    /// `message` otherwise.
    fn first_choice(&self, data: &Value) -> Option<OutputMessage> {
        let key = if self.opts.stream { "delta" } else { "message" };
        let message = data
            .get("choices")
            .and_then(|v| v.as_array())
            .and_then(|a| a.first())
            .and_then(|c| c.get(key))
            .filter(|m| m.is_object())?;

        Some(OutputMessage {
            role: message
                .get("role")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            content: message
                .get("content")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        })
    }
}

impl AdapterHandlers for OpenRouterAdapter {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn setup(&mut self) -> bool {
        if self.opts.stream {
            self.parameters.insert("stream".into(), Value::Bool(true));
            tracing::debug!(adapter = "openrouter", "Streaming enabled for outgoing request");
        }
        true
    }

    fn form_messages(&self, messages: &[Message]) -> FormedMessages {
        let mut formed: Vec<Message> = Vec::with_capacity(messages.len());
        for msg in messages {
            let role = self.roles.wire_role(msg.role);
            match formed.last_mut() {
                Some(prev) if prev.role == role => {
                    prev.content.push_str("\n\n");
                    prev.content.push_str(&msg.content);
                }
                _ => formed.push(Message {
                    role,
                    content: msg.content.clone(),
                }),
            }
        }
        FormedMessages { messages: formed }
    }

    fn tokens(&self, chunk: &Chunk) -> Option<u32> {
        self.decoded(chunk)?
            .get("usage")
            .and_then(|u| u.get("total_tokens"))
            .and_then(|v| {
                v.as_u64().or_else(|| {
                    // Some upstream providers report counts as whole floats.
                    v.as_f64()
                        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64)
                        .map(|n| n as u64)
                })
            })
            .and_then(|n| u32::try_from(n).ok())
    }

    fn chat_output(&self, chunk: &Chunk) -> Option<ChatOutput> {
        let data = self.decoded(chunk)?;
        self.first_choice(&data).map(ChatOutput::success)
    }

    fn inline_output(&self, chunk: &Chunk, context: &InlineContext) -> Option<String> {
        let data = self.decoded(chunk)?;
        tracing::trace!(
            buffer = ?context.buffer,
            filetype = ?context.filetype,
            "Inline chunk"
        );
        self.first_choice(&data)
            .map(|message| message.content.unwrap_or_default())
    }

    fn on_exit(&self, exit: &ExitSignal) {
        if !exit.is_error() {
            return;
        }
        let message = crate::util::http::parse_provider_error_message(&exit.body)
            .unwrap_or_else(|| exit.body.clone());
        let err = Error::from_http_status(exit.status, message, &exit.body);
        tracing::error!(
            adapter = "openrouter",
            status = exit.status,
            kind = ?err.kind,
            body = %exit.body,
            "OpenRouter request failed with status {}: {}",
            exit.status,
            err.message
        );
    }
}

/// Builder for constructing an `OpenRouterAdapter` with fine-grained configuration.
pub struct OpenRouterAdapterBuilder {
    api_key: SecretString,
    url: String,
    opts: AdapterOptions,
    roles: RoleMap,
    features: Features,
    http_referer: Option<String>,
    title: String,
    extra_headers: Vec<(String, String)>,
    parameters: Parameters,
}

impl OpenRouterAdapterBuilder {
    /// Create a new builder with the required API key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            url: OPENROUTER_URL.to_string(),
            opts: AdapterOptions::default(),
            roles: RoleMap::default(),
            features: Features::default(),
            http_referer: None,
            title: DEFAULT_TITLE.to_string(),
            extra_headers: Vec::new(),
            parameters: Parameters::new(),
        }
    }

    /// Override the endpoint URL (e.g. a proxy or a mock server).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Request streamed responses (default: true).
    pub fn stream(mut self, stream: bool) -> Self {
        self.opts.stream = stream;
        self
    }

    pub fn roles(mut self, roles: RoleMap) -> Self {
        self.roles = roles;
        self
    }

    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Set the `HTTP-Referer` identification header.
    pub fn http_referer(mut self, referer: impl Into<String>) -> Self {
        self.http_referer = Some(referer.into());
        self
    }

    /// Set the `X-Title` identification header.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a header. The value may reference `${api_key}`.
    pub fn header(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), template.into()));
        self
    }

    /// Parameter overrides applied to every request.
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Build the `OpenRouterAdapter`, resolving header templates and
    /// validating configured parameters.
    pub fn build(self) -> Result<OpenRouterAdapter, Error> {
        if self.roles.llm == Role::Llm || self.roles.user == Role::Llm {
            return Err(Error::configuration(
                "Role 'llm' cannot be sent over the wire; map it to a provider role",
            ));
        }

        let mut templates = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("authorization".to_string(), "Bearer ${api_key}".to_string()),
            ("x-title".to_string(), self.title),
        ];
        if let Some(referer) = self.http_referer {
            templates.push(("http-referer".to_string(), referer));
        }
        templates.extend(self.extra_headers);

        let secrets = Secrets {
            api_key: self.api_key,
        };
        let headers = resolve_headers(&templates, &secrets)?;

        let mut adapter = OpenRouterAdapter {
            url: self.url,
            roles: self.roles,
            opts: self.opts,
            features: self.features,
            headers,
            schema: openrouter_schema()?,
            configured: self.parameters,
            parameters: Parameters::new(),
        };
        adapter.refresh_parameters(&Parameters::new())?;
        Ok(adapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_errors, delta_chunk, message_chunk, test_adapter, usage_chunk};
    use openrouter_adapter_types::{ErrorKind, OutputStatus};

    // === Construction ===

    #[test]
    fn test_adapter_defaults() {
        let adapter = test_adapter(true);
        assert_eq!(adapter.name(), "openrouter");
        assert_eq!(adapter.url(), OPENROUTER_URL);
        assert!(adapter.opts().stream);
        assert!(adapter.features().tokens);
        assert_eq!(adapter.roles().llm, Role::Assistant);
    }

    #[test]
    fn test_headers_resolved_at_construction() {
        let adapter = test_adapter(true);
        let headers = adapter.headers();
        assert_eq!(
            headers.get("authorization").unwrap().to_str().unwrap(),
            "Bearer sk-or-test"
        );
        assert!(headers.get("authorization").unwrap().is_sensitive());
        assert_eq!(
            headers.get("content-type").unwrap().to_str().unwrap(),
            "application/json"
        );
        assert_eq!(
            headers.get("x-title").unwrap().to_str().unwrap(),
            DEFAULT_TITLE
        );
        assert!(headers.get("http-referer").is_none());
    }

    #[test]
    fn test_builder_identification_and_extra_headers() {
        let adapter = OpenRouterAdapter::builder(SecretString::from("k".to_string()))
            .http_referer("https://example.com")
            .title("my-editor")
            .header("x-api-key", "${api_key}")
            .build()
            .unwrap();
        let headers = adapter.headers();
        assert_eq!(headers.get("http-referer").unwrap(), "https://example.com");
        assert_eq!(headers.get("x-title").unwrap(), "my-editor");
        assert_eq!(headers.get("x-api-key").unwrap(), "k");
    }

    #[test]
    fn test_builder_rejects_unknown_placeholder() {
        let err = OpenRouterAdapter::builder(SecretString::from("k".to_string()))
            .header("x-org", "${org_id}")
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_builder_rejects_llm_wire_role() {
        let err = OpenRouterAdapter::builder(SecretString::from("k".to_string()))
            .roles(RoleMap {
                llm: Role::Llm,
                user: Role::User,
            })
            .build()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let adapter = test_adapter(true);
        assert!(!format!("{adapter:?}").contains("sk-or-test"));
    }

    #[test]
    fn test_from_config_reads_key_from_lookup() {
        let config: AdapterConfig = serde_json::from_value(json!({
            "url": "http://localhost:1234/chat",
            "opts": {"stream": false},
            "parameters": {"model": "openai/gpt-4o"}
        }))
        .unwrap();
        let adapter = OpenRouterAdapter::from_config(&config, |name| {
            (name == "OPEN_ROUTER_API_KEY").then(|| "sk-or-env".to_string())
        })
        .unwrap();
        assert_eq!(adapter.url(), "http://localhost:1234/chat");
        assert!(!adapter.opts().stream);
        assert_eq!(adapter.parameters()["model"], json!("openai/gpt-4o"));
        assert_eq!(
            adapter.headers().get("authorization").unwrap(),
            "Bearer sk-or-env"
        );
    }

    #[test]
    fn test_from_config_custom_env_var() {
        let config: AdapterConfig =
            serde_json::from_value(json!({"api_key_env": "ALT_KEY"})).unwrap();
        let adapter = OpenRouterAdapter::from_config(&config, |name| {
            (name == "ALT_KEY").then(|| "alt".to_string())
        })
        .unwrap();
        assert_eq!(adapter.headers().get("authorization").unwrap(), "Bearer alt");
    }

    #[test]
    fn test_from_config_missing_key() {
        let err = OpenRouterAdapter::from_config(&AdapterConfig::default(), |_| None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
        assert!(err.message.contains("OPEN_ROUTER_API_KEY"));
    }

    #[test]
    fn test_from_config_empty_key() {
        let err = OpenRouterAdapter::from_config(&AdapterConfig::default(), |_| {
            Some("  ".to_string())
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_from_config_invalid_parameters_rejected() {
        let config: AdapterConfig =
            serde_json::from_value(json!({"parameters": {"temperature": 3}})).unwrap();
        let err =
            OpenRouterAdapter::from_config(&config, |_| Some("k".to_string())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Must be between 0 and 2");
    }

    // === setup / parameters ===

    #[test]
    fn test_setup_forces_stream() {
        let mut adapter = test_adapter(true);
        adapter.parameters.remove("stream");
        assert!(adapter.setup());
        assert_eq!(adapter.parameters()["stream"], json!(true));
    }

    #[test]
    fn test_setup_without_stream_option() {
        let mut adapter = test_adapter(false);
        assert!(adapter.setup());
        assert!(!adapter.parameters().contains_key("stream"));
    }

    #[test]
    fn test_refresh_parameters_merges_overrides() {
        let mut adapter = test_adapter(true);
        let mut overrides = Parameters::new();
        overrides.insert("temperature".into(), json!(0.2));
        overrides.insert("max_tokens".into(), json!(512));
        adapter.refresh_parameters(&overrides).unwrap();
        let params = adapter.parameters();
        assert_eq!(params["temperature"], json!(0.2));
        assert_eq!(params["max_tokens"], json!(512));
        assert_eq!(params["stream"], json!(true));
    }

    #[test]
    fn test_refresh_parameters_rejects_and_keeps_previous() {
        let mut adapter = test_adapter(true);
        let before = adapter.parameters().clone();
        let mut overrides = Parameters::new();
        overrides.insert("temperature".into(), json!(-0.1));
        let err = adapter.refresh_parameters(&overrides).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.parameter.as_deref(), Some("temperature"));
        assert_eq!(err.message, "Must be between 0 and 2");
        assert_eq!(adapter.parameters(), &before);
    }

    #[test]
    fn test_form_parameters_unchanged() {
        let adapter = test_adapter(true);
        let params = adapter.parameters().clone();
        assert_eq!(
            adapter.form_parameters(params.clone(), &[Message::user("hi")]),
            params
        );
    }

    #[test]
    fn test_request_body_shape() {
        let adapter = test_adapter(true);
        let body = adapter.request_body(&[Message::system("Be brief"), Message::user("Hi")]);
        assert_eq!(body["model"], json!(crate::schema::DEFAULT_MODEL));
        assert_eq!(body["stream"], json!(true));
        assert_eq!(
            body["messages"],
            json!([
                {"role": "system", "content": "Be brief"},
                {"role": "user", "content": "Hi"}
            ])
        );
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.last(), Some(&"messages"));
    }

    // === form_messages ===

    #[test]
    fn test_form_messages_renames_llm() {
        let adapter = test_adapter(true);
        let formed = adapter.form_messages(&[Message::user("q"), Message::llm("a")]);
        assert_eq!(formed.messages[1].role, Role::Assistant);
        assert!(formed.messages.iter().all(|m| m.role != Role::Llm));
    }

    #[test]
    fn test_form_messages_merges_adjacent_same_role() {
        let adapter = test_adapter(true);
        let formed = adapter.form_messages(&[
            Message::system("sys"),
            Message::user("one"),
            Message::user("two"),
            Message::user("three"),
            Message::llm("answer"),
            Message::user("four"),
        ]);
        assert_eq!(
            formed.messages,
            vec![
                Message::system("sys"),
                Message::user("one\n\ntwo\n\nthree"),
                Message::assistant("answer"),
                Message::user("four"),
            ]
        );
    }

    #[test]
    fn test_form_messages_merges_after_role_mapping() {
        let adapter = test_adapter(true);
        let formed = adapter.form_messages(&[Message::llm("a"), Message::assistant("b")]);
        assert_eq!(formed.messages, vec![Message::assistant("a\n\nb")]);
    }

    #[test]
    fn test_form_messages_never_reorders() {
        let adapter = test_adapter(true);
        let formed = adapter.form_messages(&[
            Message::user("1"),
            Message::llm("2"),
            Message::user("3"),
        ]);
        let contents: Vec<&str> = formed.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_form_messages_empty() {
        let adapter = test_adapter(true);
        assert!(adapter.form_messages(&[]).messages.is_empty());
    }

    // === tokens ===

    #[test]
    fn test_tokens_from_usage() {
        let adapter = test_adapter(true);
        assert_eq!(adapter.tokens(&Chunk::from(r#"{"usage":{"total_tokens":42}}"#)), Some(42));
        assert_eq!(adapter.tokens(&Chunk::from(usage_chunk(7).as_str())), Some(7));
    }

    #[test]
    fn test_tokens_from_body_wrapper() {
        let adapter = test_adapter(false);
        let chunk = Chunk::body(r#"{"usage":{"prompt_tokens":3,"total_tokens":9}}"#);
        assert_eq!(adapter.tokens(&chunk), Some(9));
    }

    #[test]
    fn test_tokens_malformed_returns_none() {
        let adapter = test_adapter(true);
        assert_eq!(adapter.tokens(&Chunk::from("data: {\"usage\":")), None);
        assert_eq!(adapter.tokens(&Chunk::from("")), None);
        assert_eq!(adapter.tokens(&Chunk::from(delta_chunk("hi").as_str())), None);
    }

    #[test]
    fn test_tokens_accepts_whole_float() {
        let adapter = test_adapter(true);
        let whole = r#"data: {"choices":[],"usage":{"total_tokens":42.0}}"#;
        assert_eq!(adapter.tokens(&Chunk::from(whole)), Some(42));

        let fractional = r#"data: {"choices":[],"usage":{"total_tokens":42.5}}"#;
        assert_eq!(adapter.tokens(&Chunk::from(fractional)), None);
        let negative = r#"data: {"choices":[],"usage":{"total_tokens":-3.0}}"#;
        assert_eq!(adapter.tokens(&Chunk::from(negative)), None);
        let oversized = r#"data: {"choices":[],"usage":{"total_tokens":1e12}}"#;
        assert_eq!(adapter.tokens(&Chunk::from(oversized)), None);
    }

    // === chat_output ===

    #[test]
    fn test_chat_output_streaming_delta() {
        let adapter = test_adapter(true);
        let out = adapter
            .chat_output(&Chunk::from(r#"{"choices":[{"delta":{"content":"Hi"}}]}"#))
            .unwrap();
        assert_eq!(out.status, OutputStatus::Success);
        assert_eq!(
            out.output,
            OutputMessage {
                role: None,
                content: Some("Hi".into()),
            }
        );
    }

    #[test]
    fn test_chat_output_framed_delta() {
        let adapter = test_adapter(true);
        let chunk = format!("data: {}", delta_chunk("there"));
        let out = adapter.chat_output(&Chunk::from(chunk)).unwrap();
        assert_eq!(out.output.content.as_deref(), Some("there"));
    }

    #[test]
    fn test_chat_output_non_streaming_message() {
        let adapter = test_adapter(false);
        let chunk =
            Chunk::from(r#"{"choices":[{"message":{"role":"assistant","content":"Hi"}}]}"#);
        let out = adapter.chat_output(&chunk).unwrap();
        assert_eq!(out.status, OutputStatus::Success);
        assert_eq!(out.output.role.as_deref(), Some("assistant"));
        assert_eq!(out.output.content.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_chat_output_non_streaming_body_wrapper() {
        let adapter = test_adapter(false);
        let out = adapter
            .chat_output(&Chunk::body(message_chunk("Done")))
            .unwrap();
        assert_eq!(out.output.content.as_deref(), Some("Done"));
    }

    #[test]
    fn test_chat_output_role_only_delta() {
        let adapter = test_adapter(true);
        let out = adapter
            .chat_output(&Chunk::from(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#))
            .unwrap();
        assert_eq!(out.output.role.as_deref(), Some("assistant"));
        assert!(out.output.content.is_none());
    }

    #[test]
    fn test_chat_output_shape_follows_stream_option() {
        // A streaming adapter ignores `message`; a non-streaming one ignores `delta`.
        let streaming = test_adapter(true);
        let blocking = test_adapter(false);
        assert!(streaming
            .chat_output(&Chunk::from(message_chunk("x").as_str()))
            .is_none());
        assert!(blocking
            .chat_output(&Chunk::from(delta_chunk("x").as_str()))
            .is_none());
    }

    #[test]
    fn test_chat_output_nothing_to_report() {
        let adapter = test_adapter(true);
        for raw in [
            "",
            "data: [DONE]",
            ": OPENROUTER PROCESSING",
            r#"{"usage":{"total_tokens":4}}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{"finish_reason":"stop"}]}"#,
            r#"{"choices":[{"delta":null}]}"#,
            r#"data: {"choices":[{"delta":{"content":"cut"#,
        ] {
            assert!(adapter.chat_output(&Chunk::from(raw)).is_none(), "chunk {raw:?}");
        }
    }

    // === inline_output ===

    #[test]
    fn test_inline_output_content() {
        let adapter = test_adapter(true);
        let ctx = InlineContext {
            buffer: Some(3),
            filetype: Some("rust".into()),
            lines: Some((1, 4)),
        };
        assert_eq!(
            adapter.inline_output(&Chunk::from(delta_chunk("fn main()").as_str()), &ctx),
            Some("fn main()".to_string())
        );
    }

    #[test]
    fn test_inline_output_empty_content() {
        let adapter = test_adapter(true);
        let chunk = Chunk::from(r#"{"choices":[{"delta":{"role":"assistant"}}]}"#);
        assert_eq!(
            adapter.inline_output(&chunk, &InlineContext::default()),
            Some(String::new())
        );
    }

    #[test]
    fn test_inline_output_nothing_to_report() {
        let adapter = test_adapter(true);
        let ctx = InlineContext::default();
        assert!(adapter.inline_output(&Chunk::from(""), &ctx).is_none());
        assert!(adapter
            .inline_output(&Chunk::from(r#"{"id":"gen-1"}"#), &ctx)
            .is_none());
        assert!(adapter.inline_output(&Chunk::from("{oops"), &ctx).is_none());
    }

    // === on_exit ===

    #[test]
    fn test_on_exit_error_is_logged() {
        let adapter = test_adapter(true);
        let logs = capture_errors(|| {
            adapter.on_exit(&ExitSignal::new(500, "Internal Server Error"));
        });
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("500"));
        assert!(logs.contains("Internal Server Error"));
    }

    #[test]
    fn test_on_exit_extracts_provider_message() {
        let adapter = test_adapter(true);
        let logs = capture_errors(|| {
            adapter.on_exit(&ExitSignal::new(
                401,
                r#"{"error":{"code":401,"message":"No auth credentials found"}}"#,
            ));
        });
        assert!(logs.contains("401"));
        assert!(logs.contains("No auth credentials found"));
        assert!(logs.contains("Authentication"));
    }

    #[test]
    fn test_on_exit_success_is_silent() {
        let adapter = test_adapter(true);
        let logs = capture_errors(|| {
            adapter.on_exit(&ExitSignal::new(200, "{}"));
            adapter.on_exit(&ExitSignal::new(399, ""));
        });
        assert!(logs.is_empty(), "unexpected log output: {logs}");
    }
}
