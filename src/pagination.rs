//! Cursor pagination over list endpoints.
//!
//! List responses carry `previous`/`next` cursor URLs next to their `results`. The driver follows
//! `next` until it is empty, re-applying the client's page size to every request and rebasing
//! cursors (absolute or relative) onto the versioned resource path the client expects.

// std
use std::collections::HashSet;
// crates.io
use serde::de::DeserializeOwned;
use url::form_urlencoded::{Serializer as FormSerializer, parse as parse_query};
// self
use crate::{
	_prelude::*,
	client::{API_VERSION, Client, Params, ResourcePath, join_preserving_trailing_slash},
	codec::weak,
	error::ConfigError,
	http::Method,
};

/// Query parameter carrying the page size.
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Cursor links of one list page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ListMeta {
	/// URL of the previous page; empty on the first page.
	#[serde(default, deserialize_with = "weak::string")]
	pub previous: String,
	/// URL of the next page; empty on the last page.
	#[serde(default, deserialize_with = "weak::string")]
	pub next: String,
}
impl ListMeta {
	/// Returns `true` when no further page exists.
	pub fn is_last(&self) -> bool {
		self.next.is_empty()
	}
}

/// One page of a list endpoint.
///
/// Cursor fields stay inline; a flattened [`ListMeta`] would lose arbitrary-precision numbers in
/// `results`.
#[derive(Clone, Debug, Deserialize)]
pub struct Page<T> {
	/// URL of the previous page; empty on the first page.
	#[serde(default, deserialize_with = "weak::string")]
	pub previous: String,
	/// URL of the next page; empty on the last page.
	#[serde(default, deserialize_with = "weak::string")]
	pub next: String,
	/// Items on this page, in server order.
	#[serde(default = "Vec::new")]
	pub results: Vec<T>,
}
impl<T> Page<T> {
	/// Cursor links of this page.
	pub fn meta(&self) -> ListMeta {
		ListMeta { previous: self.previous.clone(), next: self.next.clone() }
	}

	/// Returns `true` when no further page exists.
	pub fn is_last(&self) -> bool {
		self.next.is_empty()
	}
}

impl Client {
	/// Collects every item of a list endpoint, or the first `limit` items when set.
	///
	/// Pages are fetched sequentially. A `next` cursor pointing at an already requested target
	/// ends the walk instead of looping forever.
	pub async fn paginate<T>(&self, path: &str, params: &Params, limit: Option<usize>) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		let mut items = Vec::new();
		let mut visited = HashSet::new();
		let mut target = with_page_size(path, self.page_size());

		if limit == Some(0) {
			return Ok(items);
		}

		while visited.insert(target.clone()) {
			let page: Page<T> = self.call_empty(Method::GET, &target, params).await?;

			let Page { next, results, .. } = page;

			items.extend(results);

			if let Some(limit) = limit
				&& items.len() >= limit
			{
				items.truncate(limit);

				break;
			}
			if next.is_empty() {
				break;
			}

			target = with_page_size(&self.rebase_cursor(&next)?, self.page_size());
		}

		Ok(items)
	}

	/// Maps a cursor URL returned by the API back onto a resource path relative to the versioned
	/// base, keeping its query.
	pub fn rebase_cursor(&self, cursor: &str) -> Result<String> {
		let invalid = |source| ConfigError::InvalidRequestPath { path: cursor.to_owned(), source };
		let (path, query) = match Url::parse(cursor) {
			Ok(url) => (url.path().to_owned(), url.query().map(ToOwned::to_owned)),
			Err(url::ParseError::RelativeUrlWithoutBase) => {
				let joined = self.base_url().join(cursor).map_err(|e| invalid(Some(e)))?;

				(joined.path().to_owned(), joined.query().map(ToOwned::to_owned))
			},
			Err(e) => return Err(invalid(Some(e)).into()),
		};
		let versioned_base = join_preserving_trailing_slash([self.base_url().path(), API_VERSION]);
		let bare_version = format!("/{API_VERSION}");
		let relative = [versioned_base.as_str(), bare_version.as_str()]
			.into_iter()
			.find_map(|prefix| {
				path.strip_prefix(prefix).filter(|rest| rest.is_empty() || rest.starts_with('/'))
			})
			.unwrap_or(path.as_str());
		let mut rebased = if relative.is_empty() { "/".to_owned() } else { relative.to_owned() };

		if let Some(query) = query.filter(|query| !query.is_empty()) {
			rebased.push('?');
			rebased.push_str(&query);
		}

		Ok(rebased)
	}
}

/// Sets `page_size` on the query of `path`, replacing any existing value.
pub fn with_page_size(path: &str, page_size: u32) -> String {
	let target = ResourcePath::parse(path);
	let mut query = FormSerializer::new(String::new());

	if let Some(existing) = target.query {
		for (key, value) in parse_query(existing.as_bytes()) {
			if key != PAGE_SIZE_PARAM {
				query.append_pair(&key, &value);
			}
		}
	}

	query.append_pair(PAGE_SIZE_PARAM, &page_size.to_string());

	format!("{}?{}", target.path, query.finish())
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;

	fn client(base: &str) -> Client {
		Client::builder().base_url(base).page_size(25).build().expect("Test client should build.")
	}

	#[test]
	fn page_size_is_set_once() {
		assert_eq!(with_page_size("/assets/", 100), "/assets/?page_size=100");
		assert_eq!(
			with_page_size("/assets/?cursor=abc&page_size=5", 100),
			"/assets/?cursor=abc&page_size=100"
		);
	}

	#[test]
	fn cursors_are_rebased_onto_the_versioned_base() {
		let client = client("https://api.example.com/");

		assert_eq!(
			client
				.rebase_cursor("https://api.example.com/1.0/tenancy/users/?cursor=c2&page_size=25")
				.expect("Absolute cursor should rebase."),
			"/tenancy/users/?cursor=c2&page_size=25"
		);
		assert_eq!(
			client.rebase_cursor("/1.0/assets/?cursor=x").expect("Relative cursor should rebase."),
			"/assets/?cursor=x"
		);

		let proxied = self::client("https://gateway.example.com/upvest");

		assert_eq!(
			proxied
				.rebase_cursor("https://gateway.example.com/upvest/1.0/kms/wallets/?cursor=w")
				.expect("Proxied cursor should rebase."),
			"/kms/wallets/?cursor=w"
		);
	}

	#[test]
	fn list_pages_tolerate_null_cursors() {
		let page: Page<u32> = serde_json::from_str(r#"{"previous":null,"next":null,"results":[1,2]}"#)
			.expect("Null cursors should decode.");

		assert!(page.is_last());
		assert!(page.meta().previous.is_empty());
		assert_eq!(page.results, vec![1, 2]);
	}

	#[test]
	fn page_items_keep_large_integers_exact() {
		#[derive(Debug, Deserialize)]
		struct Holding {
			#[serde(deserialize_with = "weak::string")]
			amount: String,
		}

		let body = concat!(
			r#"{"previous":"","next":"https://api.example.com/1.0/kms/wallets/?cursor=b","#,
			r#""results":[{"amount":123456789012345678901}]}"#,
		)
		.as_bytes();
		let url = Url::parse("https://api.example.com/1.0/kms/wallets/").expect("Failed to parse URL.");
		let page: Page<Holding> =
			crate::codec::decode_response(&url, body).expect("Page with a 21-digit amount should decode.");

		assert!(!page.is_last());
		assert_eq!(page.meta().next, "https://api.example.com/1.0/kms/wallets/?cursor=b");
		assert_eq!(page.results[0].amount, "123456789012345678901");
	}
}
