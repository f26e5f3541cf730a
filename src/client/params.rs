//! Per-call request parameters: the auth provider and extra header lines.

// self
use crate::{_prelude::*, auth::AuthProvider};

/// Content type marking a body as already form-urlencoded.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Parameters attached to a single call.
///
/// Created by the call site, never shared between calls. Extra headers are kept in insertion
/// order and may repeat a name; they are applied before the user agent and the auth provider's
/// headers, so both of those win on conflicts.
#[derive(Clone, Default)]
pub struct Params {
	/// Provider that authenticates the request, if any.
	pub auth: Option<Arc<dyn AuthProvider>>,
	/// Extra header lines in insertion order.
	pub headers: Vec<(String, String)>,
}
impl Params {
	/// Creates parameters authenticated by `auth`.
	pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
		Self { auth: Some(auth), headers: Vec::new() }
	}

	/// Replaces the auth provider.
	pub fn set_auth_provider(&mut self, auth: Arc<dyn AuthProvider>) {
		self.auth = Some(auth);
	}

	/// Appends a header line.
	pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.headers.push((name.into(), value.into()));
	}

	/// Builder-style variant of [`Params::add_header`].
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.add_header(name, value);

		self
	}

	/// Returns the first `Content-Type` value supplied by the caller.
	pub fn content_type(&self) -> Option<&str> {
		self.headers
			.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
			.map(|(_, value)| value.as_str())
	}

	/// Returns `true` when the caller marked the body as already form-urlencoded.
	pub fn is_form_encoded(&self) -> bool {
		self.content_type().is_some_and(|value| {
			value.split(';').next().is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
		})
	}
}
impl Debug for Params {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Params")
			.field("auth_set", &self.auth.is_some())
			.field("headers", &self.headers.iter().map(|(name, _)| name).collect::<Vec<_>>())
			.finish()
	}
}
