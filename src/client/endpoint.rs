//! Fixed endpoint descriptors of the public data API.

use std::fmt;
use std::str::FromStr;

use super::query::QueryParams;
use crate::error::{CmcError, Result};

/// Default root of the v1 data API.
pub const DEFAULT_V1_BASE_URL: &str = "https://api.coinmarketcap.com/data-api/v1";

/// Default root of the v3 data API.
pub const DEFAULT_V3_BASE_URL: &str = "https://api.coinmarketcap.com/data-api/v3";

/// Versioned API prefix an endpoint lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V3,
}

/// Roots of the versioned APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHosts {
    pub v1: String,
    pub v3: String,
}

impl Default for ApiHosts {
    fn default() -> Self {
        Self {
            v1: DEFAULT_V1_BASE_URL.to_string(),
            v3: DEFAULT_V3_BASE_URL.to_string(),
        }
    }
}

impl ApiHosts {
    pub fn new(v1: impl Into<String>, v3: impl Into<String>) -> Self {
        Self {
            v1: v1.into(),
            v3: v3.into(),
        }
    }

    pub fn base_for(&self, version: ApiVersion) -> &str {
        match version {
            ApiVersion::V1 => &self.v1,
            ApiVersion::V3 => &self.v3,
        }
    }
}

/// A remote resource path together with the query parameters it accepts.
#[derive(Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub version: ApiVersion,
    pub path: &'static str,
    pub params: &'static [&'static str],
}

/// Cryptocurrency listing, sorted and paged.
pub const LISTING: Endpoint = Endpoint {
    name: "listing",
    version: ApiVersion::V3,
    path: "/cryptocurrency/listing",
    params: &["start", "limit", "sortBy", "sortType"],
};

/// Symbol to coin ID map.
pub const COIN_MAP: Endpoint = Endpoint {
    name: "map",
    version: ApiVersion::V1,
    path: "/cryptocurrency/map",
    params: &["symbol"],
};

/// Historical chart points of one coin.
pub const CHART: Endpoint = Endpoint {
    name: "chart",
    version: ApiVersion::V3,
    path: "/cryptocurrency/detail/chart",
    params: &["id", "range"],
};

impl Endpoint {
    /// Full URL of this endpoint under its version root.
    pub fn url(&self, hosts: &ApiHosts) -> String {
        format!(
            "{}/{}",
            hosts.base_for(self.version).trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// Collects parameters, rejecting names this endpoint does not accept.
    pub fn query<I, K, V>(&self, pairs: I) -> Result<QueryParams>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = QueryParams::new();
        for (key, value) in pairs {
            let key = key.into();
            if !self.params.contains(&key.as_str()) {
                return Err(CmcError::request(format!(
                    "parameter {key:?} is not accepted by the {} endpoint",
                    self.name
                )));
            }
            params.insert(key, value.into());
        }
        Ok(params)
    }
}

/// Error for a string that names no variant of a parameter enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}, expected one of: {expected}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Value sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

wire_enum! {
    /// Listing sort field.
    SortBy, "sort field" {
        Name => "name",
        Symbol => "symbol",
        MarketCap => "market_cap",
        Price => "price",
        TotalSupply => "total_supply",
        MaxSupply => "max_supply",
    }
}

wire_enum! {
    /// Listing sort direction.
    SortType, "sort direction" {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    /// Time span covered by a chart request.
    ChartRange, "chart range" {
        Day => "1D",
        Week => "7D",
        Month => "1M",
        Quarter => "3M",
        Year => "1Y",
        YearToDate => "YTD",
        All => "ALL",
    }
}
