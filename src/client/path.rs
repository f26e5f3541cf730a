//! Slash-preserving path joining for versioned API targets.
//!
//! List endpoints only answer on their trailing-slash form, so a trailing slash on the last
//! non-empty segment must survive the join while no slash is ever invented.

// self
use crate::{_prelude::*, client::API_VERSION, error::ConfigError};

/// A resource path split into its path and optional query parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath<'a> {
	/// Path portion, relative to the versioned base.
	pub path: &'a str,
	/// Raw query string without the leading `?`.
	pub query: Option<&'a str>,
}
impl<'a> ResourcePath<'a> {
	/// Splits `raw` at the first `?`.
	pub fn parse(raw: &'a str) -> Self {
		match raw.split_once('?') {
			Some((path, query)) => Self { path, query: (!query.is_empty()).then_some(query) },
			None => Self { path: raw, query: None },
		}
	}

	/// Returns the API-version-prefixed path (`/1.0/...`), query included.
	///
	/// This is the exact request target signed by key auth.
	pub fn versioned(&self) -> String {
		let mut versioned = join_preserving_trailing_slash(["/", API_VERSION, self.path]);

		if let Some(query) = self.query {
			versioned.push('?');
			versioned.push_str(query);
		}

		versioned
	}
}

/// Joins `segments` like a lexical path join, keeping a trailing slash of the last non-empty
/// segment.
pub fn join_preserving_trailing_slash<I, S>(segments: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let segments = segments.into_iter().collect::<Vec<_>>();
	let joined = segments
		.iter()
		.map(AsRef::as_ref)
		.filter(|segment| !segment.is_empty())
		.collect::<Vec<_>>()
		.join("/");

	if joined.is_empty() {
		return joined;
	}

	let mut result = clean(&joined);
	let trailing = segments
		.iter()
		.map(AsRef::as_ref)
		.rev()
		.find(|segment| !segment.is_empty())
		.is_some_and(|segment| segment.ends_with('/'));

	if trailing && !result.ends_with('/') {
		result.push('/');
	}

	result
}

/// Builds the absolute request URL for `path` under `base`'s path and the API version.
pub fn join_url(base: &Url, path: &str) -> Result<Url> {
	if path.contains("://") {
		return Err(ConfigError::InvalidRequestPath { path: path.to_owned(), source: None }.into());
	}

	let target = ResourcePath::parse(path);
	let mut url = base.clone();

	url.set_path(&join_preserving_trailing_slash([base.path(), API_VERSION, target.path]));
	url.set_query(target.query);
	url.set_fragment(None);

	Ok(url)
}

/// Percent-encodes a caller-supplied identifier as exactly one path segment.
///
/// Everything outside the unreserved set is escaped, so `/`, `?`, `#`, and `%` in an identifier
/// never reach the router. Empty and dot-only identifiers are rejected.
pub fn path_segment(raw: &str) -> Result<String> {
	if matches!(raw, "" | "." | "..") {
		return Err(ConfigError::InvalidPathSegment { segment: raw.to_owned() }.into());
	}

	Ok(urlencoding::encode(raw).into_owned())
}

/// Lexically normalizes a slash-separated path: collapses repeated slashes, drops `.` segments,
/// and resolves `..` against preceding segments.
fn clean(path: &str) -> String {
	let rooted = path.starts_with('/');
	let mut parts = Vec::<&str>::new();

	for part in path.split('/') {
		match part {
			"" | "." => {},
			".." =>
				if parts.last().is_some_and(|last| *last != "..") {
					parts.pop();
				} else if !rooted {
					parts.push("..");
				},
			part => parts.push(part),
		}
	}

	let body = parts.join("/");

	match (rooted, body.is_empty()) {
		(true, _) => format!("/{body}"),
		(false, true) => ".".into(),
		(false, false) => body,
	}
}
