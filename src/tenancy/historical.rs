//! Historical data API.
//!
//! Every endpoint lives under `/data/{protocol}/{network}/` and wraps its payload in a
//! `{"result": ...}` envelope, which is unwrapped here.

// crates.io
use serde::de::DeserializeOwned;
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{_prelude::*, client::path_segment, codec::weak, service::Service};

/// A block as reported by the historical data API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HDBlock {
	/// Block number.
	#[serde(default, deserialize_with = "weak::string")]
	pub number: String,
	/// Hash.
	#[serde(default, deserialize_with = "weak::string")]
	pub hash: String,
	/// Hash of the parent block.
	#[serde(default, deserialize_with = "weak::string")]
	pub parent_hash: String,
	/// Nonce.
	#[serde(default, deserialize_with = "weak::string")]
	pub nonce: String,
	/// SHA3 of the uncles list.
	#[serde(default, deserialize_with = "weak::string")]
	pub sha3_uncles: String,
	/// Bloom filter of the block logs.
	#[serde(default, deserialize_with = "weak::string")]
	pub logs_bloom: String,
	/// Root of the transaction trie.
	#[serde(default, deserialize_with = "weak::string")]
	pub transactions_root: String,
	/// Root of the state trie.
	#[serde(default, deserialize_with = "weak::string")]
	pub state_root: String,
	/// Root of the receipts trie.
	#[serde(default, deserialize_with = "weak::string")]
	pub receipts_root: String,
	/// Beneficiary of the block reward.
	#[serde(default, deserialize_with = "weak::string")]
	pub miner: String,
	/// Block difficulty.
	#[serde(default, deserialize_with = "weak::string")]
	pub difficulty: String,
	/// Chain difficulty up to this block.
	#[serde(default, deserialize_with = "weak::string")]
	pub total_difficulty: String,
	/// Extra data field.
	#[serde(default, deserialize_with = "weak::string")]
	pub extra_data: String,
	/// Size in bytes.
	#[serde(default, deserialize_with = "weak::string")]
	pub size: String,
	/// Gas limit.
	#[serde(default, deserialize_with = "weak::string")]
	pub gas_limit: String,
	/// Gas used.
	#[serde(default, deserialize_with = "weak::string")]
	pub gas_used: String,
	/// Transaction hashes included in the block.
	#[serde(default, deserialize_with = "weak::string_list")]
	pub transactions: Vec<String>,
	/// Unix timestamp.
	#[serde(default, deserialize_with = "weak::string")]
	pub timestamp: String,
	/// Uncle block hashes.
	#[serde(default, deserialize_with = "weak::string_list")]
	pub uncles: Vec<String>,
}

/// A transaction as reported by the historical data API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HDTransaction {
	/// Hash of the containing block.
	#[serde(default, deserialize_with = "weak::string")]
	pub block_hash: String,
	/// Number of the containing block.
	#[serde(default, deserialize_with = "weak::string")]
	pub block_number: String,
	/// Sender address.
	#[serde(default, deserialize_with = "weak::string")]
	pub from: String,
	/// Gas provided.
	#[serde(default, deserialize_with = "weak::string")]
	pub gas: String,
	/// Hash.
	#[serde(default, deserialize_with = "weak::string")]
	pub hash: String,
	/// Nonce.
	#[serde(default, deserialize_with = "weak::string")]
	pub nonce: String,
	/// Position in the block.
	#[serde(default, deserialize_with = "weak::string")]
	pub transaction_index: String,
	/// Recipient address.
	#[serde(default, deserialize_with = "weak::string")]
	pub to: String,
	/// Transferred value in base units.
	#[serde(default, deserialize_with = "weak::string")]
	pub value: String,
	/// Gas price in base units.
	#[serde(default, deserialize_with = "weak::string")]
	pub gas_price: String,
	/// Call data.
	#[serde(default, deserialize_with = "weak::string")]
	pub input: String,
	/// Confirmations at query time.
	#[serde(default, deserialize_with = "weak::number")]
	pub confirmations: u64,
}

/// Native or contract balance of an address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HDBalance {
	/// Record identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub id: String,
	/// Queried address.
	#[serde(default, deserialize_with = "weak::string")]
	pub address: String,
	/// Token contract address; empty for native balances.
	#[serde(default, deserialize_with = "weak::string")]
	pub contract: String,
	/// Balance in base units.
	#[serde(default, deserialize_with = "weak::string")]
	pub balance: String,
	/// Hash of the last transaction touching the balance.
	#[serde(default, deserialize_with = "weak::string")]
	pub transaction_hash: String,
	/// Position in the block.
	#[serde(default, rename = "transactionindex", deserialize_with = "weak::string")]
	pub transaction_index: String,
	/// Hash of the containing block.
	#[serde(default, deserialize_with = "weak::string")]
	pub block_hash: String,
	/// Number of the containing block.
	#[serde(default, deserialize_with = "weak::string")]
	pub block_number: String,
	/// Unix timestamp.
	#[serde(default, deserialize_with = "weak::string")]
	pub timestamp: String,
	/// Whether the record is on the canonical chain.
	#[serde(default, deserialize_with = "weak::boolean")]
	pub is_main_chain: bool,
}

/// Indexing progress of the historical data API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HDStatus {
	/// Lowest indexed block.
	#[serde(default, deserialize_with = "weak::string")]
	pub lowest: String,
	/// Highest indexed block.
	#[serde(default, deserialize_with = "weak::string")]
	pub highest: String,
	/// Latest block seen on the network.
	#[serde(default, deserialize_with = "weak::string")]
	pub latest: String,
}

/// One page of address transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HDTransactionList {
	/// Transactions on this page.
	#[serde(default, rename = "result", deserialize_with = "weak::or_default")]
	pub results: Vec<HDTransaction>,
	/// Cursor for the next page; empty on the last page.
	#[serde(default, deserialize_with = "weak::string")]
	pub next_cursor: String,
}

/// Filters for [`HistoricalDataService::transactions`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxFilters {
	/// Only transactions before this timestamp.
	pub before: Option<String>,
	/// Only transactions after this timestamp.
	pub after: Option<String>,
	/// Minimum number of confirmations.
	pub confirmations: Option<u64>,
	/// Cursor returned by a previous page.
	pub cursor: Option<String>,
	/// Maximum number of transactions per page.
	pub limit: Option<u32>,
}
impl TxFilters {
	/// Encodes the filters as a query string; unset filters are omitted.
	pub fn to_query(&self) -> String {
		let mut query = FormSerializer::new(String::new());

		if let Some(before) = &self.before {
			query.append_pair("before", before);
		}
		if let Some(after) = &self.after {
			query.append_pair("after", after);
		}
		if let Some(confirmations) = self.confirmations {
			query.append_pair("confirmations", &confirmations.to_string());
		}
		if let Some(cursor) = &self.cursor {
			query.append_pair("cursor", cursor);
		}
		if let Some(limit) = self.limit {
			query.append_pair("limit", &limit.to_string());
		}

		query.finish()
	}
}

#[derive(Deserialize)]
struct Envelope<T> {
	result: T,
}

/// Historical data endpoints for one protocol/network pair.
#[derive(Clone, Debug)]
pub struct HistoricalDataService {
	service: Service,
	protocol: String,
	network: String,
}
impl HistoricalDataService {
	/// Wraps a tenant binding for `protocol`/`network`.
	pub fn new(service: Service, protocol: impl Into<String>, network: impl Into<String>) -> Self {
		Self { service, protocol: protocol.into(), network: network.into() }
	}

	/// Protocol segment of every path.
	pub fn protocol(&self) -> &str {
		&self.protocol
	}

	/// Network segment of every path.
	pub fn network(&self) -> &str {
		&self.network
	}

	/// Fetches one transaction by hash.
	pub async fn transaction(&self, txhash: &str) -> Result<HDTransaction> {
		self.fetch(&format!("transaction/{}", path_segment(txhash)?)).await
	}

	/// Fetches one page of transactions sent to or from `address`.
	pub async fn transactions(&self, address: &str, filters: &TxFilters) -> Result<HDTransactionList> {
		let query = filters.to_query();
		let address = path_segment(address)?;
		let path = if query.is_empty() {
			format!("transactions/{address}")
		} else {
			format!("transactions/{address}?{query}")
		};

		self.fetch(&path).await
	}

	/// Fetches a block by number.
	pub async fn block(&self, number: &str) -> Result<HDBlock> {
		self.fetch(&format!("block/{}", path_segment(number)?)).await
	}

	/// Fetches the native asset balance of `address`.
	pub async fn asset_balance(&self, address: &str) -> Result<HDBalance> {
		self.fetch(&format!("balance/{}", path_segment(address)?)).await
	}

	/// Fetches the token balance of `address` in `contract`.
	pub async fn contract_balance(&self, address: &str, contract: &str) -> Result<HDBalance> {
		self.fetch(&format!("balance/{}/{}", path_segment(address)?, path_segment(contract)?))
			.await
	}

	/// Fetches the indexing status.
	pub async fn status(&self) -> Result<HDStatus> {
		self.fetch("status").await
	}

	async fn fetch<T>(&self, tail: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let path =
			format!("/data/{}/{}/{tail}", path_segment(&self.protocol)?, path_segment(&self.network)?);
		let envelope: Envelope<T> = self.service.get(&path).await?;

		Ok(envelope.result)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn filters_skip_unset_fields() {
		assert_eq!(TxFilters::default().to_query(), "");

		let filters = TxFilters {
			after: Some("2019-01-01".into()),
			confirmations: Some(12),
			limit: Some(5),
			..Default::default()
		};

		assert_eq!(filters.to_query(), "after=2019-01-01&confirmations=12&limit=5");
	}

	#[test]
	fn balances_use_camel_case_and_weak_flags() {
		let balance: HDBalance = serde_json::from_value(serde_json::json!({
			"address": "0xabc",
			"balance": 1000000000000000000_u64,
			"transactionindex": 3,
			"blockNumber": 6570890,
			"isMainChain": "true",
		}))
		.expect("Balance should decode.");

		assert_eq!(balance.balance, "1000000000000000000");
		assert_eq!(balance.transaction_index, "3");
		assert_eq!(balance.block_number, "6570890");
		assert!(balance.is_main_chain);
	}
}
