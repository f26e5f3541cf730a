//! Client-level error types shared across the transport, auth providers, and resource services.

// crates.io
use oauth2::http::HeaderMap;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The API answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Local configuration problem (URLs, headers, HTTP client construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Request or response body could not be encoded or decoded.
	#[error(transparent)]
	Codec(#[from] CodecError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The OAuth2 token exchange preceding an authenticated call failed.
	#[error("OAuth2 preflight request failed.")]
	Preflight {
		/// Failure raised by the token exchange.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Wraps a token-exchange failure with preflight context.
	pub fn preflight(source: Error) -> Self {
		Self::Preflight { source: Box::new(source) }
	}

	/// Returns the API error carried by this value, looking through preflight wrapping.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(err) => Some(err),
			Self::Preflight { source } => source.as_api(),
			_ => None,
		}
	}

	/// Returns a stable label for the failure class: the [`ErrorKind`] label for API errors,
	/// otherwise the variant name.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Api(err) => err.kind.as_str(),
			Self::Config(_) => "config",
			Self::Codec(_) => "codec",
			Self::Transport(_) => "transport",
			Self::Preflight { .. } => "preflight",
		}
	}

	/// Returns the API error classification, if the failure came from the server.
	pub fn kind(&self) -> Option<ErrorKind> {
		self.as_api().map(|err| err.kind)
	}
}

/// Error classification derived from the HTTP status of a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	/// Malformed or rejected input (400).
	InvalidRequest,
	/// Authenticated caller lacks permission (403).
	Authorization,
	/// Credentials missing or invalid (401).
	Authentication,
	/// Resource already exists (409).
	DuplicateResource,
	/// Server failure, and the fallback for every unmapped status.
	#[serde(rename = "server_error")]
	Server,
}
impl ErrorKind {
	const STATUS_TABLE: [(u16, ErrorKind); 5] = [
		(400, ErrorKind::InvalidRequest),
		(401, ErrorKind::Authentication),
		(403, ErrorKind::Authorization),
		(409, ErrorKind::DuplicateResource),
		(500, ErrorKind::Server),
	];

	/// Classifies an HTTP status code; unmapped codes fall back to [`ErrorKind::Server`].
	pub fn from_status(status: u16) -> Self {
		Self::STATUS_TABLE
			.iter()
			.find(|(code, _)| *code == status)
			.map(|(_, kind)| *kind)
			.unwrap_or(ErrorKind::Server)
	}

	/// Returns a stable label suitable for logs and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::InvalidRequest => "invalid_request",
			ErrorKind::Authorization => "authorization",
			ErrorKind::Authentication => "authentication",
			ErrorKind::DuplicateResource => "duplicate_resource",
			ErrorKind::Server => "server_error",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Structured error returned when the API responds with a non-success status.
///
/// The classification is derived purely from the status code; the body is kept as parsed JSON
/// because the API does not promise a stable error schema.
#[derive(Clone, Debug, ThisError)]
#[error("Request to {url} failed with status {status} ({kind}).")]
pub struct ApiError {
	/// Classification derived from `status`.
	pub kind: ErrorKind,
	/// HTTP status code.
	pub status: u16,
	/// Parsed response body; non-JSON bodies are kept as a JSON string, empty bodies as `null`.
	pub details: Value,
	/// URL of the request that failed.
	pub url: Url,
	/// Response headers.
	pub headers: HeaderMap,
}
impl ApiError {
	/// Builds an error from the raw parts of a failed response.
	pub fn new(status: u16, url: Url, headers: HeaderMap, body: &[u8]) -> Self {
		let details = if body.iter().all(u8::is_ascii_whitespace) {
			Value::Null
		} else {
			serde_json::from_slice(body)
				.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
		};

		Self { kind: ErrorKind::from_status(status), status, details, url, headers }
	}
}

/// Configuration and validation failures raised before a request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Base URL cannot be parsed or cannot carry a path.
	#[error("Base URL is invalid: {url}.")]
	InvalidBaseUrl {
		/// Offending URL string.
		url: String,
	},
	/// Identifier cannot be used as a single path segment.
	#[error("Invalid path segment: `{segment}`.")]
	InvalidPathSegment {
		/// Offending identifier.
		segment: String,
	},
	/// Request path cannot be joined onto the base URL.
	#[error("Invalid request path: {path}.")]
	InvalidRequestPath {
		/// Offending path.
		path: String,
		/// Underlying parsing failure, when one exists.
		#[source]
		source: Option<url::ParseError>,
	},
	/// Header name or value contains characters HTTP does not allow.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Header name as supplied.
		name: String,
	},
	/// Page size must be within `1..=MAX_PAGE_SIZE`.
	#[error("Page size {size} is outside the supported range.")]
	InvalidPageSize {
		/// Rejected page size.
		size: u32,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_header(name: impl Into<String>) -> Self {
		Self::InvalidHeader { name: name.into() }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Body encoding and decoding failures.
#[derive(Debug, ThisError)]
pub enum CodecError {
	/// Request body could not be serialized to JSON.
	#[error("JSON encoding failed.")]
	Encode(#[source] serde_json::Error),
	/// Form-encoded bodies must be a string or a flat JSON object.
	#[error("Form encoding failed: body must be a string or a flat object.")]
	FormEncode,
	/// Response body is not valid JSON.
	#[error("Response from {url} is not valid JSON.")]
	Parse {
		/// Request URL.
		url: Url,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response JSON does not match the requested type.
	#[error("Response from {url} could not be decoded at `{}`.", .source.path())]
	Decode {
		/// Request URL.
		url: Url,
		/// Structured decoding failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
