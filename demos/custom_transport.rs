//! Demonstrates plugging a custom [`HttpTransport`] into the client.
//!
//! The transport here answers from memory, which is also how callers can add proxies, request
//! recording, or a different HTTP stack without touching the resource services.

// std
use std::{
	future::Future,
	pin::Pin,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use color_eyre::Result;
// self
use upvest::{
	Client, Error,
	http::{HttpRequest, HttpResponse, HttpTransport, StatusCode},
};

#[derive(Default)]
struct StaticTransport {
	calls: AtomicUsize,
}
impl HttpTransport for StaticTransport {
	fn execute(
		&self,
		request: HttpRequest,
	) -> Pin<Box<dyn Future<Output = upvest::Result<HttpResponse>> + '_ + Send>> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			let (status, body) = match request.uri().path() {
				"/1.0/assets/" => (StatusCode::OK, r#"{"next":"","results":[{"id":"eth","exponent":"18"}]}"#),
				_ => (StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#),
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() = status;

			Ok(response)
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = Arc::new(
		Client::builder()
			.base_url("https://upvest.internal.example.com/")
			.transport(StaticTransport::default())
			.build()?,
	);
	let tenancy = client.tenancy("demo-key", "demo-secret", "demo-passphrase");
	let assets = tenancy.assets.list().await?;

	println!("Static transport served {} asset(s).", assets.len());

	match tenancy.assets.get("doge").await {
		Err(Error::Api(err)) => println!("Lookup failed as expected: {err}"),
		other => println!("Unexpected lookup result: {other:?}."),
	}

	Ok(())
}
