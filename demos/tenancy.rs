//! Demonstrates a tenant session: HMAC-signed requests against a mock API, user registration,
//! an asset listing, and API error classification.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use upvest::{Client, ErrorKind};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let register = server
		.mock_async(|when, then| {
			when.method(POST).path("/1.0/tenancy/users/").header_exists("x-up-api-signature");
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"username":"demo-user","recoverykit":"<svg/>","wallet_ids":[]}"#);
		})
		.await;
	let assets = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/assets/").query_param("page_size", "100");
			then.status(200).header("content-type", "application/json").body(
				r#"{"previous":null,"next":null,"results":[{"id":"eth","symbol":"ETH","exponent":"18"},{"id":"btc","symbol":"BTC","exponent":8}]}"#,
			);
		})
		.await;
	let client = Arc::new(Client::builder().base_url(server.base_url()).logging(true).build()?);
	let tenancy = client.tenancy("demo-key", "demo-secret", "demo-passphrase");
	let user = tenancy.users.create("demo-user", "demo-password", &[]).await?;

	println!("Registered {} (recovery kit: {} bytes).", user.username, user.recoverykit.len());

	for asset in tenancy.assets.list().await? {
		println!("Asset {} uses {} decimals.", asset.symbol, asset.exponent);
	}

	match tenancy.users.get("missing").await {
		Err(err) if err.kind() == Some(ErrorKind::Server) =>
			println!("Unmapped statuses surface as server errors: {err}"),
		other => println!("Unexpected lookup result: {other:?}."),
	}

	register.assert_async().await;
	assets.assert_async().await;

	Ok(())
}
