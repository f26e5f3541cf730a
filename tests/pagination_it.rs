mod common;

// std
use std::sync::Arc;
// self
use common::*;
use upvest::{
	Client,
	client::Params,
	http::{HttpTransport, Method},
	tenancy::User,
};

fn page(users: &[&str], next: &str) -> (u16, String) {
	let results = users.iter().map(|name| serde_json::json!({ "username": name })).collect::<Vec<_>>();

	(200, serde_json::json!({ "previous": null, "next": next, "results": results }).to_string())
}

fn usernames(users: &[User]) -> Vec<&str> {
	users.iter().map(|user| user.username.as_str()).collect()
}

#[tokio::test]
async fn three_pages_are_collected_in_order() {
	let transport = RecordingTransport::with_responses([
		page(&["a", "b"], "https://api.example.com/1.0/tenancy/users/?cursor=p2&page_size=100"),
		page(&["c", "d"], "/1.0/tenancy/users/?cursor=p3&page_size=100"),
		page(&["e"], ""),
	]);
	let users = fake_client(&transport)
		.tenancy("key", "secret", "passphrase")
		.users
		.list()
		.await
		.expect("Paginated listing should succeed.");

	assert_eq!(usernames(&users), vec!["a", "b", "c", "d", "e"]);
	assert_eq!(
		transport.targets(),
		vec![
			"/1.0/tenancy/users/?page_size=100",
			"/1.0/tenancy/users/?cursor=p2&page_size=100",
			"/1.0/tenancy/users/?cursor=p3&page_size=100",
		]
	);
}

#[tokio::test]
async fn cursor_cycles_terminate() {
	let transport = RecordingTransport::with_responses([
		page(&["a"], "https://api.example.com/1.0/tenancy/users/?cursor=p2"),
		page(&["b"], "https://api.example.com/1.0/tenancy/users/?cursor=p2"),
		page(&["never"], ""),
	]);
	let users = fake_client(&transport)
		.tenancy("key", "secret", "passphrase")
		.users
		.list()
		.await
		.expect("Cyclic pagination should stop instead of failing.");

	assert_eq!(usernames(&users), vec!["a", "b"]);
	assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn list_n_stops_early_and_truncates() {
	let transport = RecordingTransport::with_responses([
		page(&["a", "b"], "/1.0/tenancy/users/?cursor=p2"),
		page(&["c", "d"], "/1.0/tenancy/users/?cursor=p3"),
		page(&["e"], ""),
	]);
	let users = fake_client(&transport)
		.tenancy("key", "secret", "passphrase")
		.users
		.list_n(3)
		.await
		.expect("Bounded listing should succeed.");

	assert_eq!(usernames(&users), vec!["a", "b", "c"]);
	assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn configured_page_size_applies_to_every_request() {
	let transport = RecordingTransport::with_responses([
		page(&["a"], "https://api.example.com/1.0/assets/?cursor=p2&page_size=100"),
		(200, r#"{"next":"","results":[]}"#.to_owned()),
	]);
	let shared: Arc<dyn HttpTransport> = transport.clone();
	let client = Client::builder()
		.base_url(FAKE_BASE_URL)
		.page_size(25)
		.shared_transport(shared)
		.build()
		.expect("Client with a custom page size should build.");
	let items = client
		.paginate::<serde_json::Value>("/assets/", &Params::default(), None)
		.await
		.expect("Unauthenticated pagination should succeed.");

	assert_eq!(items.len(), 1);
	assert_eq!(
		transport.targets(),
		vec!["/1.0/assets/?page_size=25", "/1.0/assets/?cursor=p2&page_size=25"]
	);
	assert!(transport.requests().iter().all(|request| request.method() == Method::GET));
}

#[tokio::test]
async fn failed_pages_abort_the_walk() {
	let transport = RecordingTransport::with_responses([
		page(&["a"], "/1.0/tenancy/users/?cursor=p2"),
		(500, r#"{"detail":"boom"}"#.to_owned()),
	]);
	let err = fake_client(&transport)
		.tenancy("key", "secret", "passphrase")
		.users
		.list()
		.await
		.expect_err("A failing page must fail the listing.");

	assert_eq!(err.kind(), Some(upvest::ErrorKind::Server));
	assert_eq!(transport.requests().len(), 2);
}
