//! Authentication strategies that decorate outgoing API requests.
//!
//! Tenant sessions sign every request with [`KeyAuth`]; clientele sessions exchange user
//! credentials for a bearer token with [`OAuth`]. Both sit behind [`AuthProvider`], chosen once
//! when a session is created.

pub mod key;
pub mod oauth;
pub mod secret;

pub use key::*;
pub use oauth::*;
pub use secret::*;

// self
use crate::{
	_prelude::*,
	client::Client,
	error::ConfigError,
	http::{HeaderMap, HeaderName, HeaderValue, Method},
};

/// Boxed future returned by [`AuthProvider::headers`].
pub type AuthFuture<'a> = Pin<Box<dyn Future<Output = Result<HeaderMap>> + 'a + Send>>;

/// The parts of a request an auth provider may bind to.
#[derive(Clone, Copy, Debug)]
pub struct SignableRequest<'a> {
	/// HTTP method.
	pub method: &'a Method,
	/// Resource path relative to the versioned base, query included.
	pub path: &'a str,
	/// Exact body bytes that will be transmitted.
	pub body: &'a [u8],
}

/// Capability that produces the headers authenticating one request.
///
/// Headers returned here are applied after every other header, so providers may override the
/// content type or user agent. Implementations may call back into `client` (the OAuth provider
/// runs its token exchange through it) but must not mutate it.
pub trait AuthProvider
where
	Self: Send + Sync,
{
	/// Produces the authentication headers for `request`.
	fn headers<'a>(&'a self, client: &'a Client, request: SignableRequest<'a>) -> AuthFuture<'a>;
}

/// Inserts a header, reporting invalid names or values as configuration errors.
///
/// Sensitive values are flagged so HTTP stacks skip them when logging or compressing headers.
pub(crate) fn insert_header(
	headers: &mut HeaderMap,
	name: &str,
	value: &str,
	sensitive: bool,
) -> Result<()> {
	let header_name = HeaderName::from_bytes(name.as_bytes())
		.map_err(|_| ConfigError::invalid_header(name))?;
	let mut header_value =
		HeaderValue::from_str(value).map_err(|_| ConfigError::invalid_header(name))?;

	header_value.set_sensitive(sensitive);
	headers.insert(header_name, header_value);

	Ok(())
}
