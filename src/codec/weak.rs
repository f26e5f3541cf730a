//! Weakly typed field deserializers.
//!
//! The API is inconsistent about quoting: numeric fields arrive as strings and string fields as
//! numbers depending on the endpoint. Use these with `#[serde(default, deserialize_with = ...)]`;
//! `null` always decodes to the type's default.

// std
use std::str::FromStr;
// crates.io
use serde::{Deserializer, de::Error as DeError};
// self
use crate::_prelude::*;

/// Accepts strings, numbers, and booleans as a `String`.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::Null => Ok(String::new()),
		Value::String(value) => Ok(value),
		Value::Number(value) => Ok(value.to_string()),
		Value::Bool(value) => Ok(value.to_string()),
		other => Err(DeError::custom(format!("expected a string, found {}", kind(&other)))),
	}
}

/// Accepts numbers, numeric strings, and booleans as any numeric type.
///
/// An empty string decodes to the default, matching how the API reports unset counters.
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + FromStr,
	T::Err: Display,
{
	match Value::deserialize(deserializer)? {
		Value::Null => Ok(T::default()),
		Value::Number(value) => parse_number(&value.to_string()),
		Value::String(value) if value.trim().is_empty() => Ok(T::default()),
		Value::String(value) => parse_number(value.trim()),
		Value::Bool(value) => parse_number(if value { "1" } else { "0" }),
		other => Err(DeError::custom(format!("expected a number, found {}", kind(&other)))),
	}
}

/// Accepts booleans, `"true"`/`"false"`/`"1"`/`"0"` strings, and numbers as a `bool`.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::Null => Ok(false),
		Value::Bool(value) => Ok(value),
		Value::Number(value) => Ok(value.as_f64().is_some_and(|n| n != 0.0)),
		Value::String(value) => match value.trim().to_ascii_lowercase().as_str() {
			"" | "0" | "false" | "f" => Ok(false),
			"1" | "true" | "t" => Ok(true),
			other => Err(DeError::custom(format!("invalid boolean string `{other}`"))),
		},
		other => Err(DeError::custom(format!("expected a boolean, found {}", kind(&other)))),
	}
}

/// Accepts a list whose items may be strings or numbers as `Vec<String>`.
///
/// An object keyed by positions (`{"0": "a", "1": "b"}`) is read as a list in key order.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let items = match Value::deserialize(deserializer)? {
		Value::Null => return Ok(Vec::new()),
		Value::Array(items) => items,
		Value::Object(entries) => {
			let mut entries = entries.into_iter().collect::<Vec<_>>();

			entries.sort_by_key(|(key, _)| (key.parse::<u64>().unwrap_or(u64::MAX), key.clone()));

			entries.into_iter().map(|(_, value)| value).collect()
		},
		other => return Err(DeError::custom(format!("expected a list, found {}", kind(&other)))),
	};

	items
		.into_iter()
		.map(|item| match item {
			Value::String(value) => Ok(value),
			Value::Number(value) => Ok(value.to_string()),
			other =>
				Err(DeError::custom(format!("expected a string list item, found {}", kind(&other)))),
		})
		.collect()
}

/// Decodes `null` as the type's default and anything else as `T` itself.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn parse_number<T, E>(raw: &str) -> Result<T, E>
where
	T: FromStr,
	T::Err: Display,
	E: DeError,
{
	raw.parse::<T>().map_err(|e| E::custom(format!("invalid number `{raw}`: {e}")))
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "a list",
		Value::Object(_) => "an object",
	}
}
