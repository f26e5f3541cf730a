//! Wallet management and server-side signing.

// self
use crate::{_prelude::*, client::path_segment, codec::weak, service::Service};

const WALLETS_PATH: &str = "/kms/wallets/";

/// Balance of one asset held by a wallet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
	/// Amount in base units.
	#[serde(default, deserialize_with = "weak::string")]
	pub amount: String,
	/// Asset identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub asset_id: String,
	/// Asset name.
	#[serde(default, deserialize_with = "weak::string")]
	pub name: String,
	/// Asset symbol.
	#[serde(default, deserialize_with = "weak::string")]
	pub symbol: String,
	/// Decimal places of the asset.
	#[serde(default, deserialize_with = "weak::number")]
	pub exponent: u32,
}

/// A key-managed wallet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
	/// Wallet identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub id: String,
	/// Derivation path.
	#[serde(default, deserialize_with = "weak::string")]
	pub path: String,
	/// Per-asset balances.
	#[serde(default, deserialize_with = "weak::or_default")]
	pub balances: Vec<Balance>,
	/// Protocol name.
	#[serde(default, deserialize_with = "weak::string")]
	pub protocol: String,
	/// On-chain address.
	#[serde(default, deserialize_with = "weak::string")]
	pub address: String,
	/// Wallet status.
	#[serde(default, deserialize_with = "weak::string")]
	pub status: String,
	/// Derivation index.
	#[serde(default, deserialize_with = "weak::number")]
	pub index: u64,
}

/// Parameters for creating a wallet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WalletParams {
	/// The user's password, used to unlock their key material.
	pub password: String,
	/// Asset the wallet is created for.
	pub asset_id: String,
	/// Wallet type (for example `encrypted`).
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Derivation index.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<u64>,
}

/// Parameters for signing a payload with a wallet key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SignatureParams {
	/// The user's password.
	pub password: String,
	/// Payload to sign, encoded as `input_format`.
	pub to_sign: String,
	/// Encoding of `to_sign` (for example `hex`).
	pub input_format: String,
	/// Encoding of the returned signature parts.
	pub output_format: String,
}

/// Public key coordinates returned with a signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
	/// X coordinate.
	#[serde(default, deserialize_with = "weak::string")]
	pub x: String,
	/// Y coordinate.
	#[serde(default, deserialize_with = "weak::string")]
	pub y: String,
}

/// ECDSA signature produced by the key management service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
	/// Encoding of the numeric parts.
	#[serde(default, deserialize_with = "weak::string")]
	pub big_number_format: String,
	/// Signature algorithm.
	#[serde(default, deserialize_with = "weak::string")]
	pub algorithm: String,
	/// Curve name.
	#[serde(default, deserialize_with = "weak::string")]
	pub curve: String,
	/// Signer public key.
	#[serde(default, deserialize_with = "weak::or_default")]
	pub public_key: PublicKey,
	/// `r` component.
	#[serde(default, deserialize_with = "weak::string")]
	pub r: String,
	/// `s` component.
	#[serde(default, deserialize_with = "weak::string")]
	pub s: String,
	/// Recovery id.
	#[serde(default, deserialize_with = "weak::string")]
	pub recover: String,
}

/// `/kms/wallets/` endpoints.
#[derive(Clone, Debug)]
pub struct WalletService(Service);
impl WalletService {
	/// Wraps a clientele binding.
	pub fn new(service: Service) -> Self {
		Self(service)
	}

	/// Creates a wallet.
	pub async fn create(&self, params: &WalletParams) -> Result<Wallet> {
		self.0.post(WALLETS_PATH, params).await
	}

	/// Fetches one wallet.
	pub async fn get(&self, wallet_id: &str) -> Result<Wallet> {
		self.0.get(&format!("{WALLETS_PATH}{}", path_segment(wallet_id)?)).await
	}

	/// Lists every wallet of the user.
	pub async fn list(&self) -> Result<Vec<Wallet>> {
		self.0.list(WALLETS_PATH).await
	}

	/// Lists the first `count` wallets of the user.
	pub async fn list_n(&self, count: usize) -> Result<Vec<Wallet>> {
		self.0.list_n(WALLETS_PATH, count).await
	}

	/// Signs a payload with the wallet's key.
	pub async fn sign(&self, wallet_id: &str, params: &SignatureParams) -> Result<Signature> {
		self.0.post(&format!("{WALLETS_PATH}{}/sign", path_segment(wallet_id)?), params).await
	}
}
