//! Client for the public CoinMarketCap data API.
//!
//! # Structure
//!
//! - [`query`]: URL and query string construction
//! - [`http`]: transport capability and its `reqwest` implementation
//! - [`decode`]: response body decoding into [`model`] records
//! - [`endpoint`]: fixed endpoint descriptors and typed parameters
//! - [`context`]: per-call deadline and cancellation
//! - [`api`]: the [`Client`] tying them together
//!
//! # Example
//!
//! ```no_run
//! use cmc_cli::client::{CallContext, Client, SortBy, SortType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new()?;
//!     let ctx = CallContext::background();
//!
//!     let symbols = client
//!         .list_symbols(&ctx, 1, 10, SortBy::MarketCap, SortType::Desc)
//!         .await?;
//!     println!("found {} symbols", symbols.len());
//!
//!     let id = client.resolve_symbol_id(&ctx, "BTC").await?;
//!     println!("BTC has id {id}");
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod context;
pub mod decode;
pub mod endpoint;
pub mod http;
pub mod model;
pub mod query;

pub use api::Client;
pub use context::{CallContext, CancelHandle};
pub use endpoint::{ApiHosts, ChartRange, SortBy, SortType};
pub use http::{GetRequest, HttpClientConfig, HttpTransport, RawResponse, Transport};
pub use model::{ChartPoint, LookupResult, QuoteRecord, SymbolRecord};
