// Header templates: `${api_key}` placeholders resolved once into a HeaderMap.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use openrouter_adapter_types::Error;

/// Secrets available to header templates.
pub struct Secrets {
    pub api_key: SecretString,
}

impl Secrets {
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "api_key" => Some(self.api_key.expose_secret()),
            _ => None,
        }
    }
}

/// Replace every `${name}` in `template` with the matching secret.
///
/// Returns the interpolated string and whether any secret was substituted.
pub fn interpolate(template: &str, secrets: &Secrets) -> Result<(String, bool), Error> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut substituted = false;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            Error::configuration(format!("Unterminated placeholder in template '{template}'"))
        })?;
        let name = &after[..end];
        let value = secrets.lookup(name).ok_or_else(|| {
            Error::configuration(format!("Unknown placeholder '${{{name}}}' in header template"))
        })?;
        out.push_str(value);
        substituted = true;
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok((out, substituted))
}

/// Resolve `(name, template)` pairs into a header map.
///
/// Values that received a secret are marked sensitive so they are not
/// shown by `Debug`.
pub fn resolve_headers(
    templates: &[(String, String)],
    secrets: &Secrets,
) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    for (name, template) in templates {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::configuration(format!("Invalid header name '{name}'")))?;
        let (value, substituted) = interpolate(template, secrets)?;
        let mut header_value = HeaderValue::from_str(&value).map_err(|_| {
            Error::configuration(format!(
                "Invalid value for header '{name}': contains non-ASCII or control characters"
            ))
        })?;
        if substituted {
            header_value.set_sensitive(true);
        }
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
