//! Asset catalogue.

// self
use crate::{_prelude::*, client::path_segment, codec::weak, service::Service};

const ASSETS_PATH: &str = "/assets/";

/// A supported asset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
	/// Asset identifier.
	#[serde(default, deserialize_with = "weak::string")]
	pub id: String,
	/// Display name.
	#[serde(default, deserialize_with = "weak::string")]
	pub name: String,
	/// Ticker symbol.
	#[serde(default, deserialize_with = "weak::string")]
	pub symbol: String,
	/// Decimal places between the base unit and the display unit.
	#[serde(default, deserialize_with = "weak::number")]
	pub exponent: u32,
	/// Protocol name (for example `ethereum_ropsten`).
	#[serde(default, deserialize_with = "weak::string")]
	pub protocol: String,
	/// Protocol-specific metadata.
	#[serde(default, deserialize_with = "weak::or_default")]
	pub metadata: BTreeMap<String, Value>,
}

/// `/assets/` endpoints.
#[derive(Clone, Debug)]
pub struct AssetService(Service);
impl AssetService {
	/// Wraps a tenant binding.
	pub fn new(service: Service) -> Self {
		Self(service)
	}

	/// Fetches one asset.
	pub async fn get(&self, asset_id: &str) -> Result<Asset> {
		self.0.get(&format!("{ASSETS_PATH}{}", path_segment(asset_id)?)).await
	}

	/// Lists every asset.
	pub async fn list(&self) -> Result<Vec<Asset>> {
		self.0.list(ASSETS_PATH).await
	}

	/// Lists the first `count` assets.
	pub async fn list_n(&self, count: usize) -> Result<Vec<Asset>> {
		self.0.list_n(ASSETS_PATH, count).await
	}
}
