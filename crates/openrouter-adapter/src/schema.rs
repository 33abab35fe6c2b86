// OpenRouter generation parameters: defaults, ordering and range validators.

use openrouter_adapter_types::{Error, Mapping, ParamType, ParameterValue, Schema, SchemaEntry};

/// Model used when the user does not pick one.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";

/// Maximum number of stop sequences accepted by the API.
pub const MAX_STOP_SEQUENCES: usize = 4;

fn in_range(value: &ParameterValue, min: f64, max: f64) -> Result<(), String> {
    match value.as_f64() {
        Some(n) if (min..=max).contains(&n) => Ok(()),
        _ => Err(format!("Must be between {min} and {max}")),
    }
}

fn validate_model(value: &ParameterValue) -> Result<(), String> {
    match value.as_str() {
        Some(model) if !model.trim().is_empty() => Ok(()),
        _ => Err("Must not be empty".into()),
    }
}

fn validate_temperature(value: &ParameterValue) -> Result<(), String> {
    in_range(value, 0.0, 2.0)
}

fn validate_top_p(value: &ParameterValue) -> Result<(), String> {
    in_range(value, 0.0, 1.0)
}

fn validate_max_tokens(value: &ParameterValue) -> Result<(), String> {
    match value.as_f64() {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err("Must be greater than 0".into()),
    }
}

fn validate_stop(value: &ParameterValue) -> Result<(), String> {
    match value.as_list() {
        Some(items) if items.len() <= MAX_STOP_SEQUENCES => Ok(()),
        _ => Err(format!(
            "Must have no more than {MAX_STOP_SEQUENCES} elements"
        )),
    }
}

fn validate_penalty(value: &ParameterValue) -> Result<(), String> {
    in_range(value, -2.0, 2.0)
}

/// The OpenRouter chat-completions parameter schema, ordered 1 through 7.
pub fn openrouter_schema() -> Result<Schema, Error> {
    Schema::new(vec![
        SchemaEntry {
            name: "model",
            order: 1,
            mapping: Mapping::Parameters,
            r#type: ParamType::String,
            optional: false,
            default: Some(ParameterValue::String(DEFAULT_MODEL.to_string())),
            desc: "ID of the model to use, in `vendor/model` form. See OpenRouter's model list for what is available.",
            validate: Some(validate_model),
        },
        SchemaEntry {
            name: "temperature",
            order: 2,
            mapping: Mapping::Parameters,
            r#type: ParamType::Number,
            optional: true,
            default: Some(ParameterValue::Number(1.0)),
            desc: "What sampling temperature to use, between 0 and 2. Higher values like 0.8 will make the output more random, while lower values like 0.2 will make it more focused and deterministic. Alter this or top_p but not both.",
            validate: Some(validate_temperature),
        },
        SchemaEntry {
            name: "top_p",
            order: 3,
            mapping: Mapping::Parameters,
            r#type: ParamType::Number,
            optional: true,
            default: Some(ParameterValue::Number(1.0)),
            desc: "Nucleus sampling: the model considers only the tokens comprising the top_p probability mass. 0.1 means only the top 10% are considered. Alter this or temperature but not both.",
            validate: Some(validate_top_p),
        },
        SchemaEntry {
            name: "max_tokens",
            order: 4,
            mapping: Mapping::Parameters,
            r#type: ParamType::Integer,
            optional: true,
            default: None,
            desc: "The maximum number of tokens to generate in the completion. Input plus generated tokens are limited by the model's context length.",
            validate: Some(validate_max_tokens),
        },
        SchemaEntry {
            name: "stop",
            order: 5,
            mapping: Mapping::Parameters,
            r#type: ParamType::List,
            optional: true,
            default: None,
            desc: "Up to 4 sequences where the API will stop generating further tokens.",
            validate: Some(validate_stop),
        },
        SchemaEntry {
            name: "frequency_penalty",
            order: 6,
            mapping: Mapping::Parameters,
            r#type: ParamType::Number,
            optional: true,
            default: Some(ParameterValue::Number(0.0)),
            desc: "Number between -2.0 and 2.0. Positive values penalize new tokens based on their existing frequency in the text so far, decreasing the model's likelihood to repeat the same line verbatim.",
            validate: Some(validate_penalty),
        },
        SchemaEntry {
            name: "presence_penalty",
            order: 7,
            mapping: Mapping::Parameters,
            r#type: ParamType::Number,
            optional: true,
            default: Some(ParameterValue::Number(0.0)),
            desc: "Number between -2.0 and 2.0. Positive values penalize new tokens based on whether they appear in the text so far, increasing the model's likelihood to talk about new topics.",
            validate: Some(validate_penalty),
        },
    ])
}
