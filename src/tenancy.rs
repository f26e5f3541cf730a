//! Tenant-scoped API surface authenticated with [`KeyAuth`].
//!
//! A tenant session signs every request with the tenant's API key pair and exposes user
//! management, the asset catalogue, webhooks, and the historical data API.

pub mod assets;
pub mod historical;
pub mod users;
pub mod webhooks;

pub use assets::*;
pub use historical::*;
pub use users::*;
pub use webhooks::*;

// self
use crate::{_prelude::*, auth::KeyAuth, client::Client, service::Service};

/// Resource services of one tenant session.
#[derive(Clone, Debug)]
pub struct TenancyApi {
	/// User management.
	pub users: UserService,
	/// Asset catalogue.
	pub assets: AssetService,
	/// Webhook management.
	pub webhooks: WebhookService,
	service: Service,
}
impl TenancyApi {
	/// Builds the services around one shared binding.
	pub fn new(service: Service) -> Self {
		Self {
			users: UserService::new(service.clone()),
			assets: AssetService::new(service.clone()),
			webhooks: WebhookService::new(service.clone()),
			service,
		}
	}

	/// Historical data for one protocol/network pair (for example `ethereum`/`ropsten`).
	pub fn historical(
		&self,
		protocol: impl Into<String>,
		network: impl Into<String>,
	) -> HistoricalDataService {
		HistoricalDataService::new(self.service.clone(), protocol, network)
	}
}

impl Client {
	/// Opens a tenant session signed with the given API key pair.
	pub fn tenancy(
		self: &Arc<Self>,
		api_key: impl Into<String>,
		api_secret: impl Into<String>,
		api_passphrase: impl Into<String>,
	) -> TenancyApi {
		let auth = KeyAuth::new(api_key, api_secret.into(), api_passphrase.into());

		TenancyApi::new(Service::new(self.clone(), Arc::new(auth)))
	}
}
