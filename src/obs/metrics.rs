// self
use crate::obs::CallOutcome;

/// Label used for the `error` dimension when a call did not fail.
pub const NO_ERROR: &str = "none";

/// Records a call outcome via the global metrics recorder (when enabled).
///
/// `error` is the failure class from [`Error::label`](crate::Error::label); it is only meaningful
/// for [`CallOutcome::Failure`].
pub fn record_call_outcome(method: &str, outcome: CallOutcome, error: Option<&'static str>) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"upvest_call_total",
			"method" => method.to_owned(),
			"outcome" => outcome.as_str(),
			"error" => error.unwrap_or(NO_ERROR)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome, error);
	}
}
