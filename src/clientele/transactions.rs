//! Wallet transactions.

// self
use crate::{_prelude::*, client::path_segment, codec::weak, service::Service};

/// A transaction sent from a wallet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	/// Transaction identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub id: String,
	/// On-chain hash, once broadcast.
	#[serde(default, deserialize_with = "weak::string")]
	pub txhash: String,
	/// Sending wallet.
	#[serde(default, deserialize_with = "weak::string")]
	pub wallet_id: String,
	/// Transferred asset.
	#[serde(default, deserialize_with = "weak::string")]
	pub asset_id: String,
	/// Transferred asset name.
	#[serde(default, deserialize_with = "weak::string")]
	pub asset_name: String,
	/// Decimal places of the asset.
	#[serde(default, deserialize_with = "weak::number")]
	pub exponent: u32,
	/// Sender address.
	#[serde(default, deserialize_with = "weak::string")]
	pub sender: String,
	/// Recipient address.
	#[serde(default, deserialize_with = "weak::string")]
	pub recipient: String,
	/// Amount in base units.
	#[serde(default, deserialize_with = "weak::string")]
	pub quantity: String,
	/// Fee in base units.
	#[serde(default, deserialize_with = "weak::string")]
	pub fee: String,
	/// Processing status.
	#[serde(default, deserialize_with = "weak::string")]
	pub status: String,
}

/// Parameters for a simple asset transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TransactionParams {
	/// The user's password.
	pub password: String,
	/// Asset to transfer.
	pub asset_id: String,
	/// Amount in base units.
	pub quantity: u64,
	/// Fee in base units.
	pub fee: u64,
	/// Recipient address.
	pub recipient: String,
}

#[derive(Serialize)]
struct ComplexTransaction<'a> {
	password: &'a str,
	tx: &'a str,
	fund: bool,
}

#[derive(Serialize)]
struct RawTransaction<'a> {
	password: &'a str,
	raw_tx: &'a str,
	fund: bool,
	input_format: &'a str,
}

/// `/kms/wallets/{id}/transactions/` endpoints.
#[derive(Clone, Debug)]
pub struct TransactionService(Service);
impl TransactionService {
	/// Wraps a clientele binding.
	pub fn new(service: Service) -> Self {
		Self(service)
	}

	/// Sends a simple transfer from `wallet_id`.
	pub async fn create(&self, wallet_id: &str, params: &TransactionParams) -> Result<Transaction> {
		self.0.post(&transactions_path(wallet_id)?, params).await
	}

	/// Fetches one transaction.
	pub async fn get(&self, wallet_id: &str, transaction_id: &str) -> Result<Transaction> {
		self.0
			.get(&format!("{}{}", transactions_path(wallet_id)?, path_segment(transaction_id)?))
			.await
	}

	/// Lists every transaction of `wallet_id`.
	pub async fn list(&self, wallet_id: &str) -> Result<Vec<Transaction>> {
		self.0.list(&transactions_path(wallet_id)?).await
	}

	/// Lists the first `count` transactions of `wallet_id`.
	pub async fn list_n(&self, wallet_id: &str, count: usize) -> Result<Vec<Transaction>> {
		self.0.list_n(&transactions_path(wallet_id)?, count).await
	}

	/// Submits a protocol-specific transaction object for signing and broadcast.
	///
	/// With `fund` set, the tenant tops up the fee balance of the wallet first.
	pub async fn create_complex(
		&self,
		wallet_id: &str,
		password: &str,
		tx: &str,
		fund: bool,
	) -> Result<Transaction> {
		self.0
			.post(
				&format!("{}complex", transactions_path(wallet_id)?),
				&ComplexTransaction { password, tx, fund },
			)
			.await
	}

	/// Submits a pre-encoded raw transaction (`input_format` is usually `hex`).
	pub async fn create_raw(
		&self,
		wallet_id: &str,
		password: &str,
		raw_tx: &str,
		fund: bool,
		input_format: &str,
	) -> Result<Transaction> {
		self.0
			.post(
				&format!("{}raw", transactions_path(wallet_id)?),
				&RawTransaction { password, raw_tx, fund, input_format },
			)
			.await
	}
}

fn transactions_path(wallet_id: &str) -> Result<String> {
	Ok(format!("/kms/wallets/{}/transactions/", path_segment(wallet_id)?))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn quantities_are_sent_as_numbers_and_read_as_strings() {
		let params = TransactionParams {
			password: "pw".into(),
			asset_id: "eth".into(),
			quantity: 10_000_000_000_000_000,
			fee: 41_180_000_000_000,
			recipient: "0xf9b44Ba370CAfc6a7AF77D0BDB0d50106823D91b".into(),
		};
		let encoded = serde_json::to_value(&params).expect("Transaction params should encode.");

		assert_eq!(encoded["quantity"], 10_000_000_000_000_000_u64);

		let transaction: Transaction = serde_json::from_value(serde_json::json!({
			"id": "t-1",
			"quantity": 10_000_000_000_000_000_u64,
			"fee": "41180000000000",
			"exponent": "18",
		}))
		.expect("Transaction should decode.");

		assert_eq!(transaction.quantity, "10000000000000000");
		assert_eq!(transaction.fee, "41180000000000");
		assert_eq!(transaction.exponent, 18);
	}
}
