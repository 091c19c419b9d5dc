//! Query string construction.

use std::collections::BTreeMap;

use url::Url;

use crate::error::{CmcError, Result};

/// Query parameters keyed by name. Sorted keys keep the encoded URL stable.
pub type QueryParams = BTreeMap<String, String>;

/// Parses `base` and appends every parameter to its query string.
///
/// Parameters already present on `base` are kept, and a supplied key that
/// repeats one of them is added as a second pair rather than replacing it.
pub fn build_url(base: &str, params: &QueryParams) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|source| CmcError::MalformedUrl {
        url: base.to_string(),
        source,
    })?;

    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn pairs_of(url: &Url) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_build_url_sorted_encoding() {
        let url = build_url(
            "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/listing",
            &params(&[
                ("start", "1"),
                ("limit", "10"),
                ("sortBy", "market_cap"),
                ("sortType", "desc"),
            ]),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/listing\
             ?limit=10&sortBy=market_cap&sortType=desc&start=1"
        );
    }

    #[test]
    fn test_build_url_without_params_leaves_base_untouched() {
        let url = build_url("https://example.com/path", &QueryParams::new()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/path");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_build_url_keeps_existing_query() {
        let url = build_url(
            "https://example.com/list?convert=USD&start=5",
            &params(&[("start", "1"), ("limit", "2")]),
        )
        .unwrap();
        assert_eq!(
            pairs_of(&url),
            vec![
                ("convert".to_string(), "USD".to_string()),
                ("limit".to_string(), "2".to_string()),
                ("start".to_string(), "1".to_string()),
                ("start".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_url_is_order_independent() {
        let forward = [("a", "1"), ("b", "2"), ("c", "3")];
        let mut backward = forward;
        backward.reverse();

        let one = build_url("http://host/p?z=0", &params(&forward)).unwrap();
        let two = build_url("http://host/p?z=0", &params(&backward)).unwrap();
        assert_eq!(pairs_of(&one), pairs_of(&two));
        assert_eq!(one, two);
    }

    #[test]
    fn test_build_url_percent_encodes() {
        let url = build_url("http://host/map", &params(&[("symbol", "a b&c=d/é")])).unwrap();
        assert!(!url.query().unwrap().contains(' '));
        assert_eq!(
            pairs_of(&url),
            vec![("symbol".to_string(), "a b&c=d/é".to_string())]
        );
    }

    #[test]
    fn test_build_url_malformed_base() {
        let err = build_url("not a url", &QueryParams::new()).unwrap_err();
        match err {
            CmcError::MalformedUrl { url, .. } => assert_eq!(url, "not a url"),
            other => panic!("expected MalformedUrl, got {other:?}"),
        }
    }
}
