//! Shared helpers for integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use httpmock::MockServer;
use parking_lot::Mutex;
// self
use upvest::{
	Client,
	http::{HttpRequest, HttpResponse, HttpTransport, StatusCode, TransportFuture},
};

/// Base URL used with [`RecordingTransport`]; nothing listens there.
pub const FAKE_BASE_URL: &str = "https://api.example.com/";

/// Transport that replays canned responses and records every request it receives.
#[derive(Default)]
pub struct RecordingTransport {
	responses: Mutex<VecDeque<(u16, String)>>,
	requests: Mutex<Vec<HttpRequest>>,
}
impl RecordingTransport {
	pub fn with_responses<I, S>(responses: I) -> Arc<Self>
	where
		I: IntoIterator<Item = (u16, S)>,
		S: Into<String>,
	{
		let transport = Self::default();

		transport
			.responses
			.lock()
			.extend(responses.into_iter().map(|(status, body)| (status, body.into())));

		Arc::new(transport)
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().clone()
	}

	pub fn targets(&self) -> Vec<String> {
		self.requests
			.lock()
			.iter()
			.map(|request| {
				request.uri().path_and_query().map(|target| target.as_str().to_owned()).unwrap_or_default()
			})
			.collect()
	}
}
impl HttpTransport for RecordingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			self.requests.lock().push(request);

			let (status, body) = self
				.responses
				.lock()
				.pop_front()
				.expect("RecordingTransport ran out of canned responses.");
			let mut response = HttpResponse::new(body.into_bytes());

			*response.status_mut() =
				StatusCode::from_u16(status).expect("Canned status code should be valid.");

			Ok(response)
		})
	}
}

/// Builds a client that dispatches through `transport`.
pub fn fake_client(transport: &Arc<RecordingTransport>) -> Arc<Client> {
	let transport: Arc<dyn HttpTransport> = transport.clone();

	Arc::new(
		Client::builder()
			.base_url(FAKE_BASE_URL)
			.shared_transport(transport)
			.build()
			.expect("Fake client should build."),
	)
}

/// Builds a reqwest-backed client pointed at `server`.
pub fn mock_client(server: &MockServer) -> Arc<Client> {
	Arc::new(
		Client::builder()
			.base_url(server.base_url())
			.logging(true)
			.build()
			.expect("Mock client should build."),
	)
}

/// Reads a header value as a string.
pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
	request.headers().get(name).and_then(|value| value.to_str().ok())
}
