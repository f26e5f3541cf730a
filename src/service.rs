//! Binding of a shared [`Client`] to one session's auth provider.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::AuthProvider,
	client::{Client, Params},
	http::Method,
};

/// Client + auth provider pair shared by every resource service of a session.
///
/// Cloning is cheap; each resource service keeps its own copy.
#[derive(Clone)]
pub struct Service {
	client: Arc<Client>,
	auth: Arc<dyn AuthProvider>,
}
impl Service {
	/// Binds `auth` to `client`.
	pub fn new(client: Arc<Client>, auth: Arc<dyn AuthProvider>) -> Self {
		Self { client, auth }
	}

	/// Shared client.
	pub fn client(&self) -> &Arc<Client> {
		&self.client
	}

	/// Auth provider applied to every call.
	pub fn auth(&self) -> &Arc<dyn AuthProvider> {
		&self.auth
	}

	/// Fresh per-call parameters carrying this session's auth provider.
	pub fn params(&self) -> Params {
		Params::new(self.auth.clone())
	}

	/// Authenticated `GET`.
	pub async fn get<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.client.call_empty(Method::GET, path, &self.params()).await
	}

	/// Authenticated `POST` with a JSON body.
	pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		self.client.call(Method::POST, path, Some(body), &self.params()).await
	}

	/// Authenticated `PATCH` with a JSON body.
	pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		self.client.call(Method::PATCH, path, Some(body), &self.params()).await
	}

	/// Authenticated `DELETE`; the response body is discarded.
	pub async fn delete(&self, path: &str) -> Result<()> {
		self.client.call_empty::<Value>(Method::DELETE, path, &self.params()).await.map(|_| ())
	}

	/// Collects every item of a list endpoint.
	pub async fn list<T>(&self, path: &str) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		self.client.paginate(path, &self.params(), None).await
	}

	/// Collects the first `count` items of a list endpoint.
	pub async fn list_n<T>(&self, path: &str, count: usize) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
	{
		self.client.paginate(path, &self.params(), Some(count)).await
	}
}
impl Debug for Service {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Service").field("client", &self.client).finish_non_exhaustive()
	}
}
