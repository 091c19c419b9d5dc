//! CoinMarketCap CLI
//!
//! A command-line client for the public CoinMarketCap data API.
//!
//! # Features
//!
//! - **Listing**: ranked cryptocurrencies with their latest quotes.
//! - **Symbol map**: resolve a ticker symbol to its coin ID.
//! - **Charts**: historical price, volume and market cap points of a coin.
//!
//! All operations go through [`client::Client`], which takes a
//! [`client::CallContext`] for deadlines and cancellation.

pub mod client;
pub mod config;
pub mod error;

pub use error::{CmcError, Result};
