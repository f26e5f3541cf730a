//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every [`Client::call`](crate::client::Client::call) in a span named
//!   `upvest.call` with `method` and `path` fields. Request/response log events are emitted only
//!   when the client was built with logging enabled.
//! - Enable `metrics` to increment the `upvest_call_total` counter for every
//!   attempt/success/failure, labeled by `method`, `outcome`, and `error` (the failure class from
//!   [`Error::label`](crate::Error::label), `none` otherwise).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to [`Client::call`](crate::client::Client::call).
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
