//! OAuth2 password-grant authentication for clientele (user) requests.
//!
//! Before an authenticated call the provider runs a preflight token exchange through the same
//! [`Client`], then attaches the bearer token. When the token endpoint reports `expires_in`, the
//! token is cached until shortly before expiry and concurrent callers share a single in-flight
//! exchange; without it every call performs a fresh exchange.

// crates.io
use oauth2::{
	AccessToken, ClientId, ClientSecret, RefreshToken, ResourceOwnerPassword,
	ResourceOwnerUsername,
};
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{
	_prelude::*,
	auth::{AuthFuture, AuthProvider, SignableRequest, insert_header},
	client::{Client, FORM_URLENCODED, Params},
	codec::weak,
	http::{HeaderMap, Method, header::{AUTHORIZATION, CONTENT_TYPE}},
};

/// Token endpoint path, relative to the versioned base.
pub const TOKEN_PATH: &str = "/clientele/oauth2/token";
/// Grant type sent with every token exchange.
pub const GRANT_TYPE: &str = "password";
/// Scope requested with every token exchange.
pub const SCOPE: &str = "read write echo transaction";

/// Token endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub struct OAuthResponse {
	/// Bearer token attached to subsequent calls.
	pub access_token: AccessToken,
	/// Token type reported by the server (normally `Bearer`).
	#[serde(default, deserialize_with = "weak::string")]
	pub token_type: String,
	/// Granted scope string.
	#[serde(default, deserialize_with = "weak::string")]
	pub scope: String,
	/// Lifetime in seconds; `0` when the server did not report one.
	#[serde(default, deserialize_with = "weak::number")]
	pub expires_in: u64,
	/// Refresh token, when issued.
	#[serde(default)]
	pub refresh_token: Option<RefreshToken>,
}

#[derive(Clone, Debug)]
struct CachedToken {
	access_token: AccessToken,
	expires_at: OffsetDateTime,
}

/// User credentials exchanged for bearer tokens via the password grant.
pub struct OAuth {
	/// OAuth2 client identifier of the tenant application.
	pub client_id: ClientId,
	/// OAuth2 client secret of the tenant application.
	pub client_secret: ClientSecret,
	/// End-user name.
	pub username: ResourceOwnerUsername,
	/// End-user password.
	pub password: ResourceOwnerPassword,
	cache_enabled: bool,
	preemptive_window: Duration,
	cached: RwLock<Option<CachedToken>>,
	exchange_guard: AsyncMutex<()>,
}
impl OAuth {
	const DEFAULT_PREEMPTIVE_WINDOW: Duration = Duration::seconds(60);

	/// Creates a provider for one end user of the tenant application.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Self {
		Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
			username: ResourceOwnerUsername::new(username.into()),
			password: ResourceOwnerPassword::new(password.into()),
			cache_enabled: true,
			preemptive_window: Self::DEFAULT_PREEMPTIVE_WINDOW,
			cached: RwLock::new(None),
			exchange_guard: AsyncMutex::new(()),
		}
	}

	/// Enables or disables token reuse across calls (enabled by default).
	pub fn with_token_cache(mut self, enabled: bool) -> Self {
		self.cache_enabled = enabled;

		self
	}

	/// Overrides how long before expiry a cached token is replaced (defaults to 60 seconds).
	pub fn with_preemptive_window(mut self, window: Duration) -> Self {
		self.preemptive_window = if window.is_negative() { Duration::ZERO } else { window };

		self
	}

	/// Drops any cached token so the next call performs a fresh exchange.
	pub fn invalidate(&self) {
		*self.cached.write() = None;
	}

	/// Encodes the password-grant form body.
	pub fn token_form(&self) -> String {
		FormSerializer::new(String::new())
			.append_pair("grant_type", GRANT_TYPE)
			.append_pair("scope", SCOPE)
			.append_pair("client_id", self.client_id.as_str())
			.append_pair("client_secret", self.client_secret.secret())
			.append_pair("username", self.username.as_str())
			.append_pair("password", self.password.secret())
			.finish()
	}

	/// Exchanges the user credentials for a token.
	///
	/// Failures are wrapped in [`Error::Preflight`].
	pub async fn pre_flight(&self, client: &Client) -> Result<OAuthResponse> {
		let params = Params::default().with_header(CONTENT_TYPE.as_str(), FORM_URLENCODED);
		let form = self.token_form();

		client.call(Method::POST, TOKEN_PATH, Some(form.as_str()), &params).await.map_err(Error::preflight)
	}

	/// Returns a usable access token, reusing the cached one when it is still fresh.
	pub async fn access_token(&self, client: &Client) -> Result<AccessToken> {
		if !self.cache_enabled {
			return Ok(self.pre_flight(client).await?.access_token);
		}
		if let Some(token) = self.fresh_token(OffsetDateTime::now_utc()) {
			return Ok(token);
		}

		let _singleflight = self.exchange_guard.lock().await;

		if let Some(token) = self.fresh_token(OffsetDateTime::now_utc()) {
			return Ok(token);
		}

		let issued_at = OffsetDateTime::now_utc();
		let response = self.pre_flight(client).await?;
		let lifetime = i64::try_from(response.expires_in).unwrap_or(i64::MAX);

		*self.cached.write() = (lifetime > 0).then(|| CachedToken {
			access_token: response.access_token.clone(),
			expires_at: issued_at.saturating_add(Duration::seconds(lifetime)),
		});

		Ok(response.access_token)
	}

	fn fresh_token(&self, now: OffsetDateTime) -> Option<AccessToken> {
		self.cached
			.read()
			.as_ref()
			.filter(|cached| cached.expires_at - now > self.preemptive_window)
			.map(|cached| cached.access_token.clone())
	}
}
impl AuthProvider for OAuth {
	fn headers<'a>(&'a self, client: &'a Client, _request: SignableRequest<'a>) -> AuthFuture<'a> {
		Box::pin(async move {
			let token = self.access_token(client).await?;
			let mut headers = HeaderMap::new();

			insert_header(
				&mut headers,
				AUTHORIZATION.as_str(),
				&format!("Bearer {}", token.secret()),
				true,
			)?;
			insert_header(&mut headers, CONTENT_TYPE.as_str(), "application/json", false)?;

			Ok(headers)
		})
	}
}
impl Debug for OAuth {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth")
			.field("client_id", &self.client_id)
			.field("username", &self.username)
			.field("cache_enabled", &self.cache_enabled)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn provider() -> OAuth {
		OAuth::new("client id", "client&secret", "alice", "pa ss")
	}

	#[test]
	fn token_form_is_urlencoded_in_a_fixed_order() {
		assert_eq!(
			provider().token_form(),
			"grant_type=password&scope=read+write+echo+transaction&client_id=client+id\
			 &client_secret=client%26secret&username=alice&password=pa+ss",
		);
	}

	#[test]
	fn token_response_tolerates_minimal_and_quoted_payloads() {
		let minimal: OAuthResponse = serde_json::from_str(r#"{"access_token":"abc"}"#)
			.expect("A bare access token should decode.");

		assert_eq!(minimal.access_token.secret(), "abc");
		assert_eq!(minimal.expires_in, 0);
		assert!(minimal.refresh_token.is_none());

		let quoted: OAuthResponse = serde_json::from_str(
			r#"{"access_token":"abc","token_type":"Bearer","expires_in":"36000","refresh_token":"r"}"#,
		)
		.expect("Quoted expires_in should decode.");

		assert_eq!(quoted.expires_in, 36_000);
		assert_eq!(quoted.refresh_token.map(|token| token.secret().to_owned()), Some("r".into()));
	}

	#[test]
	fn cached_tokens_respect_the_preemptive_window() {
		let provider = provider();
		let now = OffsetDateTime::now_utc();

		*provider.cached.write() = Some(CachedToken {
			access_token: AccessToken::new("cached".into()),
			expires_at: now + Duration::seconds(30),
		});

		assert!(provider.fresh_token(now).is_none());

		*provider.cached.write() = Some(CachedToken {
			access_token: AccessToken::new("cached".into()),
			expires_at: now + Duration::minutes(10),
		});

		assert_eq!(provider.fresh_token(now).map(|token| token.secret().to_owned()), Some("cached".into()));

		provider.invalidate();

		assert!(provider.fresh_token(now).is_none());
	}

	#[test]
	fn debug_output_redacts_credentials() {
		let rendered = format!("{:?}", provider());

		assert!(!rendered.contains("client&secret"));
		assert!(!rendered.contains("pa ss"));
	}
}
