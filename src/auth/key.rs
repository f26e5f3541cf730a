//! API key authentication for tenant requests.
//!
//! Every request is signed with HMAC-SHA512 over `timestamp || method || versioned path || body`
//! keyed by the API secret. The signature binds the exact bytes sent, so tampering in transit
//! invalidates it and the server can reject stale timestamps.

// crates.io
use hmac::{Hmac, Mac};
use sha2::Sha512;
// self
use crate::{
	_prelude::*,
	auth::{AuthFuture, AuthProvider, Secret, SignableRequest, insert_header},
	client::{Client, ResourcePath},
	error::ConfigError,
	http::{HeaderMap, header::CONTENT_TYPE},
};

type HmacSha512 = Hmac<Sha512>;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-UP-API-Key";
/// Header carrying the hex-encoded HMAC signature.
pub const SIGNATURE_HEADER: &str = "X-UP-API-Signature";
/// Header carrying the signing timestamp (Unix seconds).
pub const TIMESTAMP_HEADER: &str = "X-UP-API-Timestamp";
/// Header carrying the API passphrase.
pub const PASSPHRASE_HEADER: &str = "X-UP-API-Passphrase";
/// Header echoing the versioned path that was signed.
pub const SIGNED_PATH_HEADER: &str = "X-UP-API-Signed-Path";

/// Tenant credentials used to sign requests.
#[derive(Clone, Debug)]
pub struct KeyAuth {
	/// API key identifying the tenant key pair.
	pub api_key: String,
	/// Secret used as the HMAC key.
	pub api_secret: Secret,
	/// Passphrase registered with the key pair.
	pub api_passphrase: Secret,
}
impl KeyAuth {
	/// Creates a signer from tenant API credentials.
	pub fn new(
		api_key: impl Into<String>,
		api_secret: impl Into<Secret>,
		api_passphrase: impl Into<Secret>,
	) -> Self {
		Self {
			api_key: api_key.into(),
			api_secret: api_secret.into(),
			api_passphrase: api_passphrase.into(),
		}
	}

	/// Computes the lowercase hex signature for a request signed at `timestamp`.
	pub fn signature(
		&self,
		timestamp: i64,
		method: &str,
		versioned_path: &str,
		body: &[u8],
	) -> Result<String> {
		let mut mac = <HmacSha512 as Mac>::new_from_slice(self.api_secret.expose().as_bytes())
			.map_err(|_| ConfigError::invalid_header(SIGNATURE_HEADER))?;

		mac.update(timestamp.to_string().as_bytes());
		mac.update(method.as_bytes());
		mac.update(versioned_path.as_bytes());
		mac.update(body);

		Ok(hex::encode(mac.finalize().into_bytes()))
	}

	/// Produces the signed header set for `request` as of `timestamp`.
	pub fn sign_at(&self, request: SignableRequest<'_>, timestamp: i64) -> Result<HeaderMap> {
		let versioned_path = ResourcePath::parse(request.path).versioned();
		let signature =
			self.signature(timestamp, request.method.as_str(), &versioned_path, request.body)?;
		let mut headers = HeaderMap::new();

		insert_header(&mut headers, CONTENT_TYPE.as_str(), "application/json", false)?;
		insert_header(&mut headers, API_KEY_HEADER, &self.api_key, false)?;
		insert_header(&mut headers, SIGNATURE_HEADER, &signature, true)?;
		insert_header(&mut headers, TIMESTAMP_HEADER, &timestamp.to_string(), false)?;
		insert_header(&mut headers, PASSPHRASE_HEADER, self.api_passphrase.expose(), true)?;
		insert_header(&mut headers, SIGNED_PATH_HEADER, &versioned_path, false)?;

		Ok(headers)
	}
}
impl AuthProvider for KeyAuth {
	fn headers<'a>(&'a self, _client: &'a Client, request: SignableRequest<'a>) -> AuthFuture<'a> {
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		Box::pin(std::future::ready(self.sign_at(request, timestamp)))
	}
}
