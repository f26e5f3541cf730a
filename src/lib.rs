//! Async Rust client for the Upvest custody API: HMAC-signed tenant sessions, OAuth2 clientele
//! sessions, typed API errors, and cursor pagination over one shared transport.
//!
//! ```no_run
//! # async fn demo() -> upvest::Result<()> {
//! use std::sync::Arc;
//!
//! let client = Arc::new(upvest::Client::new(None)?);
//! let tenancy = client.tenancy("api-key", "api-secret", "api-passphrase");
//! let assets = tenancy.assets.list().await?;
//!
//! println!("{} assets available.", assets.len());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod clientele;
pub mod codec;
pub mod error;
pub mod http;
pub mod obs;
pub mod pagination;
pub mod service;
pub mod tenancy;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use client::{Client, ClientBuilder};
pub use clientele::ClienteleApi;
pub use error::{ApiError, Error, ErrorKind, Result};
pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use tenancy::TenancyApi;
pub use url;
#[cfg(test)] use {color_eyre as _, rand as _};
#[cfg(all(test, not(feature = "reqwest")))] use {httpmock as _, tokio as _};
