mod common;

// crates.io
use hmac::{Hmac, Mac};
use httpmock::prelude::*;
use sha2::Sha512;
// self
use common::*;
use upvest::{
	Client, Error, ErrorKind,
	auth::{SIGNATURE_HEADER, SIGNED_PATH_HEADER, TIMESTAMP_HEADER},
	client::{Params, USER_AGENT},
	error::{ConfigError, TransportError},
	http::Method,
	tenancy::Asset,
};

#[tokio::test]
async fn signed_bytes_equal_transmitted_bytes() {
	let transport = RecordingTransport::with_responses([(
		201,
		r#"{"username":"alice","recoverykit":"kit","wallet_ids":[]}"#,
	)]);
	let client = fake_client(&transport);
	let tenancy = client.tenancy("tenant-key", "tenant-secret", "tenant-passphrase");
	let user = tenancy
		.users
		.create("alice", "correct horse", &["eth".to_owned()])
		.await
		.expect("User creation should succeed.");

	assert_eq!(user.recoverykit, "kit");

	let requests = transport.requests();
	let request = &requests[0];
	let timestamp = header(request, TIMESTAMP_HEADER).expect("Timestamp header should be set.");
	let signed_path = header(request, SIGNED_PATH_HEADER).expect("Signed path should be set.");
	let mut mac = <Hmac<Sha512> as Mac>::new_from_slice(b"tenant-secret")
		.expect("HMAC accepts any key length.");

	mac.update(timestamp.as_bytes());
	mac.update(b"POST");
	mac.update(signed_path.as_bytes());
	mac.update(request.body());

	assert_eq!(signed_path, "/1.0/tenancy/users/");
	assert_eq!(header(request, SIGNATURE_HEADER), Some(hex::encode(mac.finalize().into_bytes()).as_str()));
	assert_eq!(
		serde_json::from_slice::<serde_json::Value>(request.body())
			.expect("Transmitted body should be JSON."),
		serde_json::json!({ "username": "alice", "password": "correct horse", "asset_ids": ["eth"] })
	);
}

#[tokio::test]
async fn signed_path_includes_the_query() {
	let transport = RecordingTransport::with_responses([(200, r#"{"next":"","results":[]}"#)]);
	let client = fake_client(&transport);

	client
		.tenancy("key", "secret", "passphrase")
		.assets
		.list()
		.await
		.expect("Empty asset list should succeed.");

	let requests = transport.requests();

	assert_eq!(transport.targets(), vec!["/1.0/assets/?page_size=100"]);
	assert_eq!(header(&requests[0], SIGNED_PATH_HEADER), Some("/1.0/assets/?page_size=100"));
}

#[tokio::test]
async fn error_statuses_map_to_api_errors() {
	let server = MockServer::start_async().await;
	let duplicate = server
		.mock_async(|when, then| {
			when.method(POST).path("/1.0/tenancy/users/");
			then.status(409)
				.header("content-type", "application/json")
				.header("x-request-id", "req-1")
				.body(r#"{"username":["A user with that username already exists."]}"#);
		})
		.await;
	let teapot = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/assets/teapot");
			then.status(418).body("I'm a teapot");
		})
		.await;
	let tenancy = mock_client(&server).tenancy("key", "secret", "passphrase");
	let err = tenancy
		.users
		.create("alice", "pw", &[])
		.await
		.expect_err("Duplicate users must be rejected.");

	match &err {
		Error::Api(api) => {
			assert_eq!(api.kind, ErrorKind::DuplicateResource);
			assert_eq!(api.status, 409);
			assert_eq!(api.details["username"][0], "A user with that username already exists.");
			assert_eq!(api.url.path(), "/1.0/tenancy/users/");
			assert_eq!(
				api.headers.get("x-request-id").and_then(|value| value.to_str().ok()),
				Some("req-1")
			);
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let err = tenancy.assets.get("teapot").await.expect_err("418 must surface as an error.");

	assert_eq!(err.kind(), Some(ErrorKind::Server));
	assert_eq!(err.as_api().map(|api| api.details.clone()), Some("I'm a teapot".into()));

	duplicate.assert_async().await;
	teapot.assert_async().await;
}

#[tokio::test]
async fn quoted_numerics_decode_through_weak_fields() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/assets/eth");
			then.status(200).header("content-type", "application/json").body(
				r#"{"id":"eth","name":"Ethereum","symbol":"ETH","exponent":"18","protocol":"ethereum","metadata":null}"#,
			);
		})
		.await;
	let asset: Asset = mock_client(&server)
		.tenancy("key", "secret", "passphrase")
		.assets
		.get("eth")
		.await
		.expect("Asset lookup should succeed.");

	assert_eq!(asset.exponent, 18);
	assert_eq!(asset.symbol, "ETH");
	assert!(asset.metadata.is_empty());

	mock.assert_async().await;
}

#[tokio::test]
async fn default_user_agent_and_extra_headers_are_sent() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/1.0/status")
				.header("user-agent", USER_AGENT)
				.header("x-correlation-id", "abc-123");
			then.status(204);
		})
		.await;
	let client = mock_client(&server);
	let params = Params::default().with_header("X-Correlation-Id", "abc-123");

	client
		.call_empty::<()>(Method::GET, "/status", &params)
		.await
		.expect("Empty 204 responses should decode into unit.");

	mock.assert_async().await;
}

#[tokio::test]
async fn network_failures_are_not_wrapped() {
	let client = Client::builder()
		.base_url("http://127.0.0.1:9/")
		.build()
		.expect("Client should build for an unreachable host.");
	let err = client
		.call_empty::<serde_json::Value>(Method::GET, "/assets/", &Params::default())
		.await
		.expect_err("Connecting to the discard port should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(err.kind().is_none());
}

#[tokio::test]
async fn identifiers_cannot_escape_their_path_segment() {
	let transport = RecordingTransport::with_responses([
		(204, ""),
		(200, r#"{"username":"bob?admin=1"}"#),
	]);
	let client = fake_client(&transport);
	let users = client.tenancy("tenant-key", "tenant-secret", "tenant-passphrase").users;

	users.delete("../webhooks/7").await.expect("Deletion should reach the users endpoint.");

	let user = users.get("bob?admin=1").await.expect("Lookup should reach the users endpoint.");

	assert_eq!(user.username, "bob?admin=1");
	assert_eq!(
		transport.targets(),
		vec!["/1.0/tenancy/users/..%2Fwebhooks%2F7", "/1.0/tenancy/users/bob%3Fadmin%3D1"]
	);

	let requests = transport.requests();

	assert_eq!(
		header(&requests[0], SIGNED_PATH_HEADER),
		Some("/1.0/tenancy/users/..%2Fwebhooks%2F7")
	);
	assert_eq!(header(&requests[1], SIGNED_PATH_HEADER), Some("/1.0/tenancy/users/bob%3Fadmin%3D1"));

	let err = users.delete("..").await.expect_err("Dot segments must be rejected before dispatch.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidPathSegment { .. })));
	assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn api_errors_carry_the_dispatched_url() {
	let transport = RecordingTransport::with_responses([(403, r#"{"detail":"Forbidden."}"#)]);
	let client = fake_client(&transport);
	let err = client
		.tenancy("tenant-key", "tenant-secret", "tenant-passphrase")
		.users
		.get("ghost user")
		.await
		.expect_err("Forbidden lookups must surface as an error.");
	let api = err.as_api().expect("A 403 should map onto an API error.");
	let requests = transport.requests();

	assert_eq!(api.kind, ErrorKind::Authorization);
	assert_eq!(api.url.as_str(), requests[0].uri().to_string());
	assert_eq!(api.url.path(), "/1.0/tenancy/users/ghost%20user");
}
