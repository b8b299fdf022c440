//! Async client for the Coeli content-repository API.
//!
//! Builds authenticated requests for a tenant, creates and pages through
//! controlled searches, fetches entities by slug or id, and formats every
//! returned entity for the request language before handing it to a
//! caller-supplied projection.
//!
//! ```no_run
//! use coeli_client::{CoeliClient, SearchOptions};
//! use coeli_types::{ControlledSearch, ControlledSearchCondition, Language, Operator};
//!
//! # async fn run() -> coeli_client::ClientResult<()> {
//! let client = CoeliClient::new("my-tenant", "secret-token")?;
//! let search = ControlledSearch::new(vec![ControlledSearchCondition::simple(
//!     "type",
//!     Operator::Equals,
//!     "painting",
//! )]);
//! let results = client
//!     .try_create_controlled_search_and_get_all_items(
//!         Language::Ca,
//!         "Artwork",
//!         &search,
//!         |entity| entity.get_text("title").unwrap_or_default().to_string(),
//!         &SearchOptions::new(),
//!     )
//!     .await?;
//! println!("{} titles", results.entities.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod transport;

pub use client::CoeliClient;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use error::{ClientError, ClientResult};
pub use query::{canonical_search_url, SearchOptions};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
