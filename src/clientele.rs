//! User-scoped API surface authenticated with the OAuth2 password grant.

pub mod transactions;
pub mod wallets;

pub use transactions::*;
pub use wallets::*;

// self
use crate::{_prelude::*, auth::OAuth, client::Client, service::Service};

/// Resource services of one clientele (end-user) session.
#[derive(Clone, Debug)]
pub struct ClienteleApi {
	/// Wallet management and signing.
	pub wallets: WalletService,
	/// Wallet transactions.
	pub transactions: TransactionService,
}
impl ClienteleApi {
	/// Builds the services around one shared binding.
	pub fn new(service: Service) -> Self {
		Self {
			wallets: WalletService::new(service.clone()),
			transactions: TransactionService::new(service),
		}
	}
}

impl Client {
	/// Opens a clientele session for one user of the tenant's OAuth application.
	///
	/// Tokens are exchanged lazily on the first call; see [`OAuth`] for caching behavior.
	pub fn clientele(
		self: &Arc<Self>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> ClienteleApi {
		self.clientele_with(OAuth::new(client_id, client_secret, username, password))
	}

	/// Opens a clientele session with a preconfigured [`OAuth`] provider.
	pub fn clientele_with(self: &Arc<Self>, auth: OAuth) -> ClienteleApi {
		ClienteleApi::new(Service::new(self.clone(), Arc::new(auth)))
	}
}
