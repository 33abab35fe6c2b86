// Declarative parameter schema: typed values, per-entry validators and default merging.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Outgoing request parameters, keyed by wire name. Insertion order is kept
/// so serialization follows schema `order`.
pub type Parameters = serde_json::Map<String, Value>;

/// Validator attached to a schema entry. `Err` carries the reason shown to the user.
pub type Validator = fn(&ParameterValue) -> Result<(), String>;

/// Declared type of a schema entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    String,
    Number,
    Integer,
    List,
}

impl ParamType {
    /// Coerce a JSON value into this type.
    ///
    /// Integers are accepted for `Number`; numbers without a fractional part
    /// are accepted for `Integer`. `List` means a list of strings.
    pub fn coerce(&self, value: &Value) -> Result<ParameterValue, String> {
        match self {
            ParamType::String => value
                .as_str()
                .map(|s| ParameterValue::String(s.to_string()))
                .ok_or_else(|| "Must be a string".to_string()),
            ParamType::Number => value
                .as_f64()
                .map(ParameterValue::Number)
                .ok_or_else(|| "Must be a number".to_string()),
            ParamType::Integer => value
                .as_i64()
                .or_else(|| {
                    value
                        .as_f64()
                        .filter(|n| {
                            n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64
                        })
                        .map(|n| n as i64)
                })
                .map(ParameterValue::Integer)
                .ok_or_else(|| "Must be an integer".to_string()),
            ParamType::List => value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|v| v.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                })
                .map(ParameterValue::List)
                .ok_or_else(|| "Must be a list of strings".to_string()),
        }
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    String(String),
    Number(f64),
    Integer(i64),
    List(Vec<String>),
}

impl ParameterValue {
    /// Numeric view: `Number` and `Integer` both qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            ParameterValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParameterValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ParameterValue::String(s) => Value::String(s.clone()),
            ParameterValue::Number(n) => serde_json::json!(n),
            ParameterValue::Integer(i) => Value::from(*i),
            ParameterValue::List(items) => serde_json::json!(items),
        }
    }
}

/// Destination bucket of a resolved value in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    #[default]
    Parameters,
}

/// One tunable value of the outgoing request.
#[derive(Clone)]
pub struct SchemaEntry {
    pub name: &'static str,
    /// Display and serialization priority. Unique within a schema.
    pub order: u32,
    pub mapping: Mapping,
    pub r#type: ParamType,
    pub optional: bool,
    pub default: Option<ParameterValue>,
    pub desc: &'static str,
    pub validate: Option<Validator>,
}

impl std::fmt::Debug for SchemaEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaEntry")
            .field("name", &self.name)
            .field("order", &self.order)
            .field("mapping", &self.mapping)
            .field("type", &self.r#type)
            .field("optional", &self.optional)
            .field("default", &self.default)
            .field("desc", &self.desc)
            .field("validate", &self.validate.as_ref().map(|_| "..."))
            .finish()
    }
}

impl SchemaEntry {
    /// Coerce `value` to the declared type and run the validator.
    pub fn check(&self, value: &Value) -> Result<ParameterValue, Error> {
        let typed = self
            .r#type
            .coerce(value)
            .map_err(|reason| Error::validation(self.name, reason))?;
        if let Some(validate) = self.validate {
            validate(&typed).map_err(|reason| Error::validation(self.name, reason))?;
        }
        Ok(typed)
    }
}

/// An ordered set of schema entries.
#[derive(Debug, Clone)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    /// Build a schema, sorting entries by `order`.
    ///
    /// Returns `Configuration` if two entries share a name or an order.
    pub fn new(mut entries: Vec<SchemaEntry>) -> Result<Self, Error> {
        entries.sort_by_key(|e| e.order);
        for pair in entries.windows(2) {
            if pair[0].order == pair[1].order {
                return Err(Error::configuration(format!(
                    "Schema entries '{}' and '{}' share order {}",
                    pair[0].name, pair[1].name, pair[0].order
                )));
            }
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(Error::configuration(format!(
                    "Duplicate schema entry '{}'",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Entries in ascending `order`.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Validate a single candidate value for `name`.
    pub fn validate(&self, name: &str, value: &Value) -> Result<ParameterValue, Error> {
        self.get(name)
            .ok_or_else(|| Error::validation(name, "Unknown parameter"))?
            .check(value)
    }

    /// Merge `overrides` over the schema defaults.
    ///
    /// Every provided value must pass its validator; the first failure is
    /// returned and nothing is merged. Optional entries with no value are
    /// omitted from the result.
    pub fn resolve(&self, overrides: &Parameters) -> Result<Parameters, Error> {
        if let Some(unknown) = overrides.keys().find(|k| self.get(k).is_none()) {
            return Err(Error::validation(unknown.as_str(), "Unknown parameter"));
        }

        let mut resolved = Parameters::new();
        for entry in &self.entries {
            let value = match (overrides.get(entry.name), &entry.default) {
                (Some(Value::Null), _) if entry.optional => continue,
                (Some(value), _) => entry.check(value)?,
                (None, Some(default)) => default.clone(),
                (None, None) if entry.optional => continue,
                (None, None) => {
                    return Err(Error::configuration(format!(
                        "Missing required parameter '{}'",
                        entry.name
                    )))
                }
            };
            match entry.mapping {
                Mapping::Parameters => {
                    resolved.insert(entry.name.to_string(), value.to_json());
                }
            }
        }
        Ok(resolved)
    }
}
