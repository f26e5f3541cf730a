// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ApiError, http::Method};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// Span wrapping a single API call.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a span tagged with the request method and resource path.
	pub fn new(method: &Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("upvest.call", method = method.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs an outgoing request when client logging is enabled.
pub fn log_dispatch(enabled: bool, method: &Method, url: &Url, body_len: usize) {
	#[cfg(feature = "tracing")]
	if enabled {
		tracing::debug!(method = method.as_str(), url = url.as_str(), body_len, "Sending API request.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, method, url, body_len);
	}
}

/// Logs the status and elapsed time of a completed exchange when client logging is enabled.
pub fn log_completion(enabled: bool, status: u16, elapsed: StdDuration) {
	#[cfg(feature = "tracing")]
	if enabled {
		tracing::debug!(status, elapsed_ms = elapsed.as_millis() as u64, "Received API response.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, status, elapsed);
	}
}

/// Logs a failed call when client logging is enabled.
pub fn log_api_error(enabled: bool, err: &ApiError) {
	#[cfg(feature = "tracing")]
	if enabled {
		tracing::warn!(status = err.status, kind = err.kind.as_str(), url = err.url.as_str(), "API call failed.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (enabled, err);
	}
}
