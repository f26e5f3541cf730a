//! Tenant user management.

// self
use crate::{_prelude::*, client::path_segment, codec::weak, service::Service};

const USERS_PATH: &str = "/tenancy/users/";

/// Wallet summary embedded in user records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWallet {
	/// Wallet identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub id: String,
	/// On-chain address.
	#[serde(default, deserialize_with = "weak::string")]
	pub address: String,
	/// Protocol the wallet belongs to.
	#[serde(default, deserialize_with = "weak::string")]
	pub protocol: String,
	/// Wallet status.
	#[serde(default, deserialize_with = "weak::string")]
	pub status: String,
}

/// A user of the tenant application.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// Unique username.
	#[serde(default, deserialize_with = "weak::string")]
	pub username: String,
	/// Encrypted recovery kit, returned only on creation.
	#[serde(default, deserialize_with = "weak::string")]
	pub recoverykit: String,
	/// Identifiers of the wallets created for the user.
	#[serde(default, deserialize_with = "weak::string_list")]
	pub wallet_ids: Vec<String>,
	/// Wallets created for the user.
	#[serde(default, deserialize_with = "weak::or_default")]
	pub wallets: Vec<UserWallet>,
}

#[derive(Serialize)]
struct CreateUser<'a> {
	username: &'a str,
	password: &'a str,
	#[serde(skip_serializing_if = "<[_]>::is_empty")]
	asset_ids: &'a [String],
}

#[derive(Serialize)]
struct ChangePassword<'a> {
	old_password: &'a str,
	new_password: &'a str,
}

/// `/tenancy/users/` endpoints.
#[derive(Clone, Debug)]
pub struct UserService(Service);
impl UserService {
	/// Wraps a tenant binding.
	pub fn new(service: Service) -> Self {
		Self(service)
	}

	/// Registers a user, creating wallets for `asset_ids` when given.
	pub async fn create(&self, username: &str, password: &str, asset_ids: &[String]) -> Result<User> {
		self.0.post(USERS_PATH, &CreateUser { username, password, asset_ids }).await
	}

	/// Fetches one user.
	pub async fn get(&self, username: &str) -> Result<User> {
		self.0.get(&format!("{USERS_PATH}{}", path_segment(username)?)).await
	}

	/// Lists every user.
	pub async fn list(&self) -> Result<Vec<User>> {
		self.0.list(USERS_PATH).await
	}

	/// Lists the first `count` users.
	pub async fn list_n(&self, count: usize) -> Result<Vec<User>> {
		self.0.list_n(USERS_PATH, count).await
	}

	/// Changes a user's password.
	pub async fn update_password(
		&self,
		username: &str,
		old_password: &str,
		new_password: &str,
	) -> Result<User> {
		self.0
			.patch(&format!("{USERS_PATH}{}", path_segment(username)?), &ChangePassword { old_password, new_password })
			.await
	}

	/// Deletes a user.
	pub async fn delete(&self, username: &str) -> Result<()> {
		self.0.delete(&format!("{USERS_PATH}{}", path_segment(username)?)).await
	}
}
