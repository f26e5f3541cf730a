//! Demonstrates a clientele session: the OAuth2 password grant runs as a preflight through the
//! same client, and the cached bearer token authenticates subsequent wallet calls.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use upvest::{Client, clientele::WalletParams};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/1.0/clientele/oauth2/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"demo-access","token_type":"Bearer","expires_in":36000,"scope":"read write echo transaction"}"#,
			);
		})
		.await;
	let wallets = server
		.mock_async(|when, then| {
			when.method(POST).path("/1.0/kms/wallets/").header("authorization", "Bearer demo-access");
			then.status(201).header("content-type", "application/json").body(
				r#"{"id":"w-1","address":"0x5eD8Cee6b63b1c6AFce3AD7c92f4fD7E1B8fAd9F","protocol":"ethereum_ropsten","balances":[{"amount":"0","asset_id":"eth","exponent":18}]}"#,
			);
		})
		.await;
	let client = Arc::new(Client::builder().base_url(server.base_url()).build()?);
	let clientele = client.clientele("demo-client", "demo-secret", "demo-user", "demo-password");

	for _ in 0..2 {
		let wallet = clientele
			.wallets
			.create(&WalletParams {
				password: "demo-password".into(),
				asset_id: "eth".into(),
				..Default::default()
			})
			.await?;

		println!("Created wallet {} at {}.", wallet.id, wallet.address);
	}

	// One exchange serves both calls while the token is fresh.
	token.assert_calls_async(1).await;
	wallets.assert_calls_async(2).await;

	Ok(())
}
