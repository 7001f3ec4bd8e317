//! Lenient field deserializers for hand-written netplan YAML.
//!
//! Netplan files are usually written for a YAML 1.1 loader, where `yes`/`no`
//! are booleans and unquoted numbers are fine as passwords or SSIDs. These
//! helpers accept those spellings so the typed model does not reject them.

use serde::de::{self, Deserialize, DeserializeOwned, Deserializer};
use serde_yaml::Value;

/// Render a scalar YAML value as text. Mappings, sequences and tagged values
/// have no text form.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Deserialize a mapping value, treating an empty (null) body as defaults.
pub(crate) fn entry_value<T>(value: Value) -> Result<T, serde_yaml::Error>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(T::default());
    }
    serde_yaml::from_value(value)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "y" => Some(true),
        "false" | "no" | "off" | "n" => Some(false),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Boolean that also accepts `yes`/`no`/`on`/`off`. Null is `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => parse_flag(&s)
            .ok_or_else(|| de::Error::custom(format!("expected a boolean, found '{s}'"))),
        other => Err(de::Error::custom(format!(
            "expected a boolean, found {}",
            describe(&other)
        ))),
    }
}

/// Optional string that also accepts numbers and booleans verbatim.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    scalar_text(&value).map(Some).ok_or_else(|| {
        de::Error::custom(format!("expected a string, found {}", describe(&value)))
    })
}

/// List of scalars rendered as text. Null is an empty list.
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(items) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    items
        .iter()
        .map(|item| {
            scalar_text(item).ok_or_else(|| {
                de::Error::custom(format!("expected a string entry, found {}", describe(item)))
            })
        })
        .collect()
}

/// Any defaultable field where an explicit null means "use the default".
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
