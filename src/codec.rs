//! Request body encoding and response decoding.
//!
//! Bodies are encoded exactly once so the bytes an auth provider signs are the bytes sent.
//! Responses are parsed into a generic JSON value first and then mapped onto the caller's type;
//! fields that the API sends with unstable types opt into coercion through [`weak`].

pub mod weak;

// crates.io
use serde::de::DeserializeOwned;
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{_prelude::*, error::CodecError};

/// Encodes an optional request body.
///
/// With `form` unset the body is serialized as JSON. With `form` set, a body serializing to a
/// JSON string is taken verbatim as already-encoded form data and a flat object is form-encoded
/// field by field (`null` fields are skipped). A missing body encodes to no bytes.
pub fn encode_body<B>(body: Option<&B>, form: bool) -> Result<Vec<u8>>
where
	B: ?Sized + Serialize,
{
	let Some(body) = body else {
		return Ok(Vec::new());
	};

	if !form {
		return serde_json::to_vec(body).map_err(|e| CodecError::Encode(e).into());
	}

	match serde_json::to_value(body).map_err(CodecError::Encode)? {
		Value::String(encoded) => Ok(encoded.into_bytes()),
		Value::Object(fields) => {
			let mut serializer = FormSerializer::new(String::new());

			for (key, value) in fields {
				match value {
					Value::Null => {},
					Value::String(value) => {
						serializer.append_pair(&key, &value);
					},
					Value::Bool(value) => {
						serializer.append_pair(&key, if value { "true" } else { "false" });
					},
					Value::Number(value) => {
						serializer.append_pair(&key, &value.to_string());
					},
					Value::Array(_) | Value::Object(_) => return Err(CodecError::FormEncode.into()),
				}
			}

			Ok(serializer.finish().into_bytes())
		},
		_ => Err(CodecError::FormEncode.into()),
	}
}

/// Decodes a success response body into `T`.
///
/// An empty body decodes from `null`, so `()` and `Option<_>` outputs accept `204 No Content`.
pub fn decode_response<T>(url: &Url, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let generic = if body.iter().all(u8::is_ascii_whitespace) {
		Value::Null
	} else {
		serde_json::from_slice::<Value>(body)
			.map_err(|source| CodecError::Parse { url: url.clone(), source })?
	};

	decode_value(generic).map_err(|source| CodecError::Decode { url: url.clone(), source }.into())
}

/// Maps a generic JSON value onto `T`, recording the path of the first mismatch.
pub fn decode_value<T>(value: Value) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(value)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Holding {
		#[serde(default, deserialize_with = "weak::string")]
		amount: String,
		#[serde(default, deserialize_with = "weak::number")]
		exponent: u32,
		#[serde(default, deserialize_with = "weak::number")]
		confirmations: u64,
		#[serde(default, deserialize_with = "weak::boolean")]
		is_main_chain: bool,
		#[serde(default)]
		symbol: String,
	}

	fn url() -> Url {
		Url::parse("https://api.example.com/1.0/kms/wallets/").expect("Failed to parse URL.")
	}

	#[test]
	fn json_bodies_are_encoded_once() {
		let body = serde_json::json!({ "asset_id": "eth", "password": "pw" });
		let bytes = encode_body(Some(&body), false).expect("JSON body should encode.");

		assert_eq!(bytes, serde_json::to_vec(&body).expect("Failed to encode reference body."));
		assert!(encode_body::<Value>(None, false).expect("Missing body should encode.").is_empty());
	}

	#[test]
	fn form_bodies_accept_strings_and_flat_objects() {
		let verbatim = encode_body(Some("grant_type=password&scope=read"), true)
			.expect("Pre-encoded form body should pass through.");

		assert_eq!(verbatim, b"grant_type=password&scope=read");

		let fields = serde_json::json!({ "scope": "read write", "fund": true, "skip": null });
		let encoded = encode_body(Some(&fields), true).expect("Flat object should form-encode.");

		assert_eq!(String::from_utf8_lossy(&encoded), "fund=true&scope=read+write");

		let err = encode_body(Some(&serde_json::json!({ "nested": { "a": 1 } })), true)
			.expect_err("Nested objects cannot be form-encoded.");

		assert!(matches!(err, Error::Codec(CodecError::FormEncode)));
	}

	#[test]
	fn quoted_numbers_round_trip_through_weak_fields() {
		let original = Holding {
			amount: "10000000000000000".into(),
			exponent: 18,
			confirmations: 12,
			is_main_chain: true,
			symbol: "ETH".into(),
		};
		let mut generic = serde_json::to_value(&original).expect("Holding should encode.");

		generic["exponent"] = Value::String("18".into());
		generic["confirmations"] = Value::String("12".into());
		generic["is_main_chain"] = Value::String("true".into());
		generic["amount"] = serde_json::json!(10000000000000000_u64);

		let body = serde_json::to_vec(&generic).expect("Generic mapping should encode.");
		let decoded: Holding = decode_response(&url(), &body).expect("Weak fields should coerce.");

		assert_eq!(decoded, original);
	}

	#[test]
	fn base_unit_amounts_beyond_u64_stay_exact() {
		let decoded: Holding =
			decode_response(&url(), br#"{"amount":123456789012345678901,"exponent":18}"#)
				.expect("A 21-digit amount should decode.");

		assert_eq!(decoded.amount, "123456789012345678901");

		let listed: Vec<String> = {
			#[derive(Deserialize)]
			struct Ids {
				#[serde(deserialize_with = "weak::string_list")]
				ids: Vec<String>,
			}

			decode_response::<Ids>(&url(), br#"{"ids":[340282366920938463463374607431768211455]}"#)
				.expect("Large list items should decode.")
				.ids
		};

		assert_eq!(listed, vec!["340282366920938463463374607431768211455"]);
	}

	#[test]
	fn decode_errors_report_the_field_path() {
		let err = decode_response::<Holding>(&url(), br#"{"exponent":"eighteen"}"#)
			.expect_err("Non-numeric strings cannot coerce into integers.");

		match err {
			Error::Codec(CodecError::Decode { source, .. }) =>
				assert_eq!(source.path().to_string(), "exponent"),
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn empty_bodies_decode_as_null() {
		decode_response::<()>(&url(), b"").expect("Empty body should decode into unit.");

		let missing: Option<Holding> =
			decode_response(&url(), b"  \n").expect("Whitespace body should decode into None.");

		assert!(missing.is_none());

		let err = decode_response::<Value>(&url(), b"<html>")
			.expect_err("Non-JSON bodies must fail to parse.");

		assert!(matches!(err, Error::Codec(CodecError::Parse { .. })));
	}
}
