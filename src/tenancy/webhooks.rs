//! Webhook registration and verification.

// self
use crate::{_prelude::*, client::path_segment, codec::weak, service::Service};

const WEBHOOKS_PATH: &str = "/tenancy/webhooks/";
const VERIFY_PATH: &str = "/tenancy/webhooks-verify/";

/// A registered webhook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
	/// Webhook identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub id: String,
	/// Delivery URL.
	#[serde(default, deserialize_with = "weak::string")]
	pub url: String,
	/// Display name.
	#[serde(default, deserialize_with = "weak::string")]
	pub name: String,
	/// Key used to sign deliveries.
	#[serde(default, deserialize_with = "weak::string")]
	pub hmac_secret_key: String,
	/// Extra headers sent with each delivery.
	#[serde(default, deserialize_with = "weak::or_default")]
	pub headers: BTreeMap<String, String>,
	/// Payload version.
	#[serde(default, deserialize_with = "weak::string")]
	pub version: String,
	/// Activation status.
	#[serde(default, deserialize_with = "weak::string")]
	pub status: String,
	/// Event filters; the server returns them in more than one shape.
	#[serde(default, deserialize_with = "weak::or_default")]
	pub event_filters: Vec<Value>,
}

/// Parameters for registering a webhook.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WebhookParams {
	/// Delivery URL.
	pub url: String,
	/// Display name.
	pub name: String,
	/// Key used to sign deliveries.
	pub hmac_secret_key: String,
	/// Extra headers sent with each delivery.
	pub headers: BTreeMap<String, String>,
	/// Payload version.
	pub version: String,
	/// Initial status (for example `ACTIVE`).
	pub status: String,
	/// Event filter scopes (for example `ethereum.block.*`).
	pub event_filters: Vec<String>,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
	verify_url: &'a str,
}

/// `/tenancy/webhooks/` endpoints.
#[derive(Clone, Debug)]
pub struct WebhookService(Service);
impl WebhookService {
	/// Wraps a tenant binding.
	pub fn new(service: Service) -> Self {
		Self(service)
	}

	/// Registers a webhook.
	pub async fn create(&self, params: &WebhookParams) -> Result<Webhook> {
		self.0.post(WEBHOOKS_PATH, params).await
	}

	/// Fetches one webhook.
	pub async fn get(&self, webhook_id: &str) -> Result<Webhook> {
		self.0.get(&format!("{WEBHOOKS_PATH}{}", path_segment(webhook_id)?)).await
	}

	/// Lists every webhook.
	pub async fn list(&self) -> Result<Vec<Webhook>> {
		self.0.list(WEBHOOKS_PATH).await
	}

	/// Lists the first `count` webhooks.
	pub async fn list_n(&self, count: usize) -> Result<Vec<Webhook>> {
		self.0.list_n(WEBHOOKS_PATH, count).await
	}

	/// Deletes a webhook.
	pub async fn delete(&self, webhook_id: &str) -> Result<()> {
		self.0.delete(&format!("{WEBHOOKS_PATH}{}", path_segment(webhook_id)?)).await
	}

	/// Asks the API to probe `url`.
	///
	/// Resolves to `false` when the API rejects the URL; local and transport failures are still
	/// returned as errors.
	pub async fn verify(&self, url: &str) -> Result<bool> {
		match self.0.post::<_, Value>(VERIFY_PATH, &VerifyRequest { verify_url: url }).await {
			Ok(_) => Ok(true),
			Err(Error::Api(_)) => Ok(false),
			Err(e) => Err(e),
		}
	}
}
