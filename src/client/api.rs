//! Client for the public CoinMarketCap data API.

use std::collections::HashMap;
use std::sync::Arc;

use super::context::CallContext;
use super::decode::{decode_chart_points, decode_coin_id_lookup, decode_symbol_list};
use super::endpoint::{ApiHosts, ChartRange, Endpoint, SortBy, SortType, CHART, COIN_MAP, LISTING};
use super::http::{GetRequest, Headers, HttpClientConfig, RawResponse, Transport};
use super::model::{ChartPoint, SymbolRecord};
use super::query::{build_url, QueryParams};
use crate::config::Settings;
use crate::error::{CmcError, Result};

/// CoinMarketCap data API client.
///
/// Holds no per-call state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    hosts: ApiHosts,
    headers: Headers,
}

impl Client {
    /// Creates a client for the public API over the default HTTP transport.
    pub fn new() -> Result<Self> {
        let transport = HttpClientConfig::default().build()?;
        Ok(Self::with_transport(Arc::new(transport), ApiHosts::default()))
    }

    /// Creates a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let transport = settings.http_config().build()?;
        Ok(Self::with_transport(Arc::new(transport), settings.api_hosts()))
    }

    /// Creates a client over any transport, e.g. a fake in tests.
    pub fn with_transport(transport: Arc<dyn Transport>, hosts: ApiHosts) -> Self {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            transport,
            hosts,
            headers,
        }
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn hosts(&self) -> &ApiHosts {
        &self.hosts
    }

    /// Builds the URL for `endpoint` and performs one round trip under `ctx`.
    async fn fetch(
        &self,
        ctx: &CallContext,
        endpoint: &Endpoint,
        params: QueryParams,
    ) -> Result<RawResponse> {
        let url = build_url(&endpoint.url(&self.hosts), &params)?;
        let request = GetRequest::new(url).with_headers(&self.headers);
        ctx.run(self.transport.execute(request)).await
    }

    /// Lists cryptocurrencies, `limit` of them starting at the 1-based `start`.
    pub async fn list_symbols(
        &self,
        ctx: &CallContext,
        start: u32,
        limit: u32,
        sort_by: SortBy,
        sort_type: SortType,
    ) -> Result<Vec<SymbolRecord>> {
        let params = LISTING.query([
            ("start", start.to_string()),
            ("limit", limit.to_string()),
            ("sortBy", sort_by.as_str().to_string()),
            ("sortType", sort_type.as_str().to_string()),
        ])?;
        let response = self.fetch(ctx, &LISTING, params).await?;
        let symbols = decode_symbol_list(response)?;
        log::debug!(
            "cmc.listing start={} limit={} sort={}:{} count={}",
            start,
            limit,
            sort_by,
            sort_type,
            symbols.len()
        );
        Ok(symbols)
    }

    /// Resolves a ticker symbol to the ID of its first match.
    pub async fn resolve_symbol_id(&self, ctx: &CallContext, symbol: &str) -> Result<i64> {
        let params = COIN_MAP.query([("symbol", symbol)])?;
        let response = self.fetch(ctx, &COIN_MAP, params).await?;
        let matches = decode_coin_id_lookup(response)?;
        let first = matches.first().ok_or_else(|| CmcError::NoMatchFound {
            symbol: symbol.to_string(),
        })?;
        log::debug!(
            "cmc.lookup symbol={} id={} candidates={}",
            symbol,
            first.id,
            matches.len()
        );
        Ok(first.id)
    }

    /// Fetches chart points of coin `id` over `range`, keyed by timestamp.
    pub async fn chart_points(
        &self,
        ctx: &CallContext,
        id: i64,
        range: ChartRange,
    ) -> Result<HashMap<String, ChartPoint>> {
        let params = CHART.query([("id", id.to_string()), ("range", range.as_str().to_string())])?;
        let response = self.fetch(ctx, &CHART, params).await?;
        let points = decode_chart_points(response)?;
        log::debug!("cmc.chart id={} range={} points={}", id, range, points.len());
        Ok(points)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("hosts", &self.hosts)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
