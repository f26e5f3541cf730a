//! API client configuration and the generic call pipeline.
//!
//! [`Client::call`] is the single entry point every resource service goes through: it joins the
//! versioned URL, encodes the body once, layers headers (caller extras, user agent, then auth),
//! dispatches through the configured [`HttpTransport`], and either maps a failed status onto
//! [`ApiError`] or decodes the JSON body into the caller's type.

pub mod params;
pub mod path;

pub use params::*;
pub use path::*;

// std
use std::time::Instant;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{AuthProvider, SignableRequest},
	codec,
	error::{ApiError, ConfigError},
	http::{HeaderMap, HeaderName, HeaderValue, HttpRequest, HttpTransport, Method, header},
	obs::{self, CallOutcome, CallSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Library version reported in the default user agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Default API base URL (playground environment).
pub const DEFAULT_BASE_URL: &str = "https://api.playground.upvest.co/";
/// API version segment prefixed to every request path.
pub const API_VERSION: &str = "1.0";
/// Default user agent.
pub const USER_AGENT: &str = concat!("upvest-rs/", env!("CARGO_PKG_VERSION"));
/// Default blanket timeout applied by the reqwest transport.
pub const DEFAULT_HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
/// Largest page size accepted by list endpoints.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Shared API client.
///
/// A client is immutable once built and is meant to be wrapped in an [`Arc`] and shared by every
/// tenant and clientele session; each session brings its own [`AuthProvider`].
#[derive(Clone)]
pub struct Client {
	transport: Arc<dyn HttpTransport>,
	base_url: Url,
	user_agent: String,
	page_size: u32,
	logging: bool,
}
impl Client {
	/// Returns a builder seeded with the defaults.
	pub fn builder() -> ClientBuilder {
		ClientBuilder::default()
	}

	/// Base URL requests are resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// User agent sent with every request.
	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	/// Page size applied to paginated list requests.
	pub fn page_size(&self) -> u32 {
		self.page_size
	}

	/// Whether request/response logging is enabled.
	pub fn logging_enabled(&self) -> bool {
		self.logging
	}

	/// Resolves a resource path (query allowed) to its absolute request URL.
	pub fn url_for(&self, path: &str) -> Result<Url> {
		join_url(&self.base_url, path)
	}

	/// Builds the HTTP request for a call without sending it.
	///
	/// The body is encoded exactly once; the auth provider signs the same bytes that end up in
	/// the returned request.
	pub async fn new_request<B>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		params: &Params,
	) -> Result<HttpRequest>
	where
		B: ?Sized + Serialize,
	{
		self.build_request(method, path, body, params).await.map(|(_, request)| request)
	}

	async fn build_request<B>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		params: &Params,
	) -> Result<(Url, HttpRequest)>
	where
		B: ?Sized + Serialize,
	{
		let url = self.url_for(path)?;
		let payload = codec::encode_body(body, params.is_form_encoded())?;
		let mut headers = HeaderMap::new();

		for (name, value) in &params.headers {
			let header_name = HeaderName::from_bytes(name.as_bytes())
				.map_err(|_| ConfigError::invalid_header(name.as_str()))?;
			let header_value =
				HeaderValue::from_str(value).map_err(|_| ConfigError::invalid_header(name.as_str()))?;

			headers.append(header_name, header_value);
		}

		headers.insert(
			header::USER_AGENT,
			HeaderValue::from_str(&self.user_agent)
				.map_err(|_| ConfigError::invalid_header(header::USER_AGENT.as_str()))?,
		);

		if let Some(auth) = params.auth.as_deref() {
			let signable = SignableRequest { method: &method, path, body: &payload };

			for (name, value) in auth.headers(self, signable).await? {
				if let Some(name) = name {
					headers.insert(name, value);
				}
			}
		}

		obs::log_dispatch(self.logging, &method, &url, payload.len());

		let mut request = HttpRequest::new(payload);

		*request.method_mut() = method;
		*request.uri_mut() = url
			.as_str()
			.parse::<oauth2::http::Uri>()
			.map_err(|e| ConfigError::from(oauth2::http::Error::from(e)))?;
		*request.headers_mut() = headers;

		Ok((url, request))
	}

	/// Performs a call and decodes the JSON response into `T`.
	///
	/// Non-success statuses yield [`Error::Api`]; transport failures are returned unchanged. Use
	/// `()` as `T` for endpoints without a meaningful body.
	pub async fn call<B, T>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		params: &Params,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let span = CallSpan::new(&method, path);
		let label = method.as_str().to_owned();

		obs::record_call_outcome(&label, CallOutcome::Attempt, None);

		let result = span.instrument(self.dispatch(method, path, body, params)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(&label, CallOutcome::Success, None),
			Err(e) => obs::record_call_outcome(&label, CallOutcome::Failure, Some(e.label())),
		}

		result
	}

	async fn dispatch<B, T>(
		&self,
		method: Method,
		path: &str,
		body: Option<&B>,
		params: &Params,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let (url, request) = self.build_request(method, path, body, params).await?;
		let start = Instant::now();
		let response = self.transport.execute(request).await?;
		let status = response.status();

		obs::log_completion(self.logging, status.as_u16(), start.elapsed());

		let (parts, body) = response.into_parts();

		if !status.is_success() {
			let err = ApiError::new(status.as_u16(), url, parts.headers, &body);

			obs::log_api_error(self.logging, &err);

			return Err(err.into());
		}

		codec::decode_response(&url, &body)
	}

	/// Shorthand for a bodiless call.
	pub async fn call_empty<T>(&self, method: Method, path: &str, params: &Params) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.call::<(), T>(method, path, None, params).await
	}
}
#[cfg(feature = "reqwest")]
impl Client {
	/// Creates a client for `base_url` (the playground when `None`) backed by reqwest with the
	/// default timeout.
	pub fn new(base_url: Option<&str>) -> Result<Self> {
		let mut builder = Self::builder();

		if let Some(base_url) = base_url {
			builder = builder.base_url(base_url);
		}

		builder.build()
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.base_url.as_str())
			.field("user_agent", &self.user_agent)
			.field("page_size", &self.page_size)
			.field("logging", &self.logging)
			.finish()
	}
}

/// Builder for [`Client`] values.
pub struct ClientBuilder {
	/// Base URL; empty selects [`DEFAULT_BASE_URL`].
	pub base_url: String,
	/// User agent override.
	pub user_agent: Option<String>,
	/// Page size for list requests.
	pub page_size: u32,
	/// Blanket timeout for the default reqwest transport.
	pub timeout: std::time::Duration,
	/// Enables request/response logging.
	pub logging: bool,
	/// Custom transport; the reqwest transport is used when unset.
	pub transport: Option<Arc<dyn HttpTransport>>,
}
impl ClientBuilder {
	/// Sets the base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides the user agent.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Overrides the page size used by list requests.
	pub fn page_size(mut self, size: u32) -> Self {
		self.page_size = size;

		self
	}

	/// Overrides the default transport timeout.
	pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Enables or disables request/response logging.
	pub fn logging(mut self, enabled: bool) -> Self {
		self.logging = enabled;

		self
	}

	/// Uses a caller-provided transport.
	pub fn transport(mut self, transport: impl HttpTransport) -> Self {
		self.transport = Some(Arc::new(transport));

		self
	}

	/// Uses a caller-provided shared transport.
	pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
		self.transport = Some(transport);

		self
	}

	/// Validates the configuration and builds the client.
	pub fn build(self) -> Result<Client> {
		let raw = if self.base_url.trim().is_empty() { DEFAULT_BASE_URL } else { self.base_url.trim() };
		let base_url = Url::parse(raw)
			.ok()
			.filter(|url| !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https"))
			.ok_or_else(|| ConfigError::InvalidBaseUrl { url: raw.to_owned() })?;

		if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
			return Err(ConfigError::InvalidPageSize { size: self.page_size }.into());
		}

		let transport = match self.transport {
			Some(transport) => transport,
			#[cfg(feature = "reqwest")]
			None => Arc::new(ReqwestHttpClient::with_timeout(self.timeout)?),
			#[cfg(not(feature = "reqwest"))]
			None =>
				return Err(ConfigError::http_client_build(std::io::Error::other(
					"no transport configured and the `reqwest` feature is disabled",
				))
				.into()),
		};

		Ok(Client {
			transport,
			base_url,
			user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned()),
			page_size: self.page_size,
			logging: self.logging,
		})
	}
}
impl Default for ClientBuilder {
	fn default() -> Self {
		Self {
			base_url: String::new(),
			user_agent: None,
			page_size: MAX_PAGE_SIZE,
			timeout: DEFAULT_HTTP_TIMEOUT,
			logging: false,
			transport: None,
		}
	}
}
impl Debug for ClientBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientBuilder")
			.field("base_url", &self.base_url)
			.field("user_agent", &self.user_agent)
			.field("page_size", &self.page_size)
			.field("timeout", &self.timeout)
			.field("logging", &self.logging)
			.field("transport_set", &self.transport.is_some())
			.finish()
	}
}
