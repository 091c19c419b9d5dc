//! Structural decoding of data-api response bodies.
//!
//! The decoders take the [`RawResponse`] by value, so its body is released
//! once decoding finishes, whether it succeeded or not. Values are passed
//! through as received; no range checks are made.

use std::collections::HashMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::Deserialize;
use serde_json::Value;

use super::http::RawResponse;
use super::model::{ChartData, ChartPoint, ListingData, LookupResult, Status, SymbolRecord};
use crate::error::{CmcError, Result};

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Parses the body, checks the optional status block, and extracts `data`.
fn decode_data<T: DeserializeOwned>(response: RawResponse) -> Result<T> {
    let status = response.status.as_u16();
    let decode_err = |source: serde_json::Error| CmcError::Decode { status, source };

    let value: Value = serde_json::from_slice(&response.body).map_err(decode_err)?;
    drop(response);

    if let Some(raw_status) = value.get("status").filter(|s| s.is_object()) {
        let api_status = Status::deserialize(raw_status).map_err(decode_err)?;
        if api_status.error_code != 0 {
            return Err(CmcError::Api {
                code: api_status.error_code,
                message: api_status.error_message.unwrap_or_default(),
            });
        }
    }

    let envelope: Envelope<T> = serde_json::from_value(value).map_err(decode_err)?;
    envelope
        .data
        .ok_or_else(|| decode_err(serde_json::Error::missing_field("data")))
}

/// Decodes `data.cryptoCurrencyList`. An empty list is a valid result.
pub fn decode_symbol_list(response: RawResponse) -> Result<Vec<SymbolRecord>> {
    decode_data::<ListingData>(response).map(|data| data.crypto_currency_list)
}

/// Decodes the `data` array of the symbol map. May be empty.
pub fn decode_coin_id_lookup(response: RawResponse) -> Result<Vec<LookupResult>> {
    decode_data(response)
}

/// Decodes `data.points`, keyed by timestamp string.
pub fn decode_chart_points(response: RawResponse) -> Result<HashMap<String, ChartPoint>> {
    decode_data::<ChartData>(response).map(|data| data.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    const BTC_LISTING: &str = r#"{"data":{"cryptoCurrencyList":[{"id":1,"name":"Bitcoin","symbol":"BTC","slug":"bitcoin-slug","circulatingSupply":19000000,"quotes":[{"name":"USD","price":57348.55,"volume24h":49666217758.26,"marketCap":1129355648858.25,"percentChange1h":-0.7,"percentChange24h":-3.88,"percentChange7d":-10.62}]}]}}"#;

    #[test]
    fn test_decode_symbol_list() {
        let symbols = decode_symbol_list(RawResponse::ok(BTC_LISTING)).unwrap();
        assert_eq!(symbols.len(), 1);
        let btc = &symbols[0];
        assert_eq!(btc.id, 1);
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(btc.slug, "bitcoin-slug");
        assert_eq!(btc.circulating_supply, 19_000_000.0);
        assert_eq!(btc.quotes[0].price, 57348.55);
        assert_eq!(btc.quotes[0].percent_change_7d, -10.62);
    }

    #[test]
    fn test_decode_empty_symbol_list() {
        let symbols = decode_symbol_list(RawResponse::ok(
            r#"{"data":{"cryptoCurrencyList":[],"totalCount":"0"}}"#,
        ))
        .unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_decode_symbol_list_wrong_type() {
        let err = decode_symbol_list(RawResponse::ok(
            r#"{"data":{"cryptoCurrencyList":[{"id":"one","name":"Bitcoin","symbol":"BTC","slug":"b"}]}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, CmcError::Decode { status: 200, .. }));
    }

    #[test]
    fn test_decode_symbol_list_missing_data() {
        let err = decode_symbol_list(RawResponse::ok(r#"{"result":[]}"#)).unwrap_err();
        match err {
            CmcError::Decode { source, .. } => assert!(source.to_string().contains("data")),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_not_json() {
        let err = decode_symbol_list(RawResponse::new(
            StatusCode::BAD_GATEWAY,
            "<html>bad gateway</html>",
        ))
        .unwrap_err();
        assert!(matches!(err, CmcError::Decode { status: 502, .. }));
    }

    #[test]
    fn test_decode_lookup_with_string_status() {
        let body = r#"{"data":[{"id":1,"name":"Bitcoin","symbol":"BTC","slug":"bitcoin","is_active":1,
            "first_historical_data":"2010-07-13T00:05:00.000Z","rank":1}],
            "status":{"timestamp":"2024-05-04T08:16:35.616Z","error_code":"0",
            "error_message":"SUCCESS","elapsed":"1","credit_count":0}}"#;
        let matches = decode_coin_id_lookup(RawResponse::ok(body)).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, 1);
        assert_eq!(matches[0].symbol.as_deref(), Some("BTC"));
        assert_eq!(matches[0].rank, Some(1));
    }

    #[test]
    fn test_decode_lookup_empty() {
        let matches = decode_coin_id_lookup(RawResponse::ok(r#"{"data":[]}"#)).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_decode_api_status_error() {
        let body = r#"{"data":{},"status":{"error_code":"500","error_message":"Internal Error"}}"#;
        let err = decode_coin_id_lookup(RawResponse::ok(body)).unwrap_err();
        match err {
            CmcError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "Internal Error");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_chart_points_partial() {
        let body = r#"{"data":{"points":{
            "1279065600":{"v":[0.05815725,261.54,196180.04855025,1,3373269],"c":[0.05815725,261.54,196180.04855025]},
            "1280361600":{"v":[0.06785855,8091.7,241028.48020875,1,3551925]}}}}"#;
        let points = decode_chart_points(RawResponse::ok(body)).unwrap();
        assert_eq!(points.len(), 2);

        let full = &points["1279065600"];
        assert_eq!(full.v.len(), 5);
        assert_eq!(full.c[0], 0.05815725);

        let partial = &points["1280361600"];
        assert_eq!(partial.v[1], 8091.7);
        assert!(partial.c.is_empty());
    }

    #[test]
    fn test_decode_chart_null_condensed_keeps_other_points() {
        let body = r#"{"data":{"points":{
            "1":{"v":[1.0,2.0],"c":null},
            "2":{"v":[3.0,4.0,5.0],"c":[3.0,4.0,5.0]}}}}"#;
        let points = decode_chart_points(RawResponse::ok(body)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points["1"].v, vec![1.0, 2.0]);
        assert!(points["1"].c.is_empty());
        assert_eq!(points["2"].c, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_decode_symbol_list_null_numbers() {
        let body = r#"{"data":{"cryptoCurrencyList":[
            {"id":1,"name":"Bitcoin","symbol":"BTC","slug":"bitcoin","circulatingSupply":null,
             "quotes":[{"name":"USD","price":57348.55,"volume24h":1.0,"marketCap":2.0,
             "percentChange1h":null,"percentChange24h":-3.88,"percentChange7d":-10.62}]},
            {"id":2,"name":"Litecoin","symbol":"LTC","slug":"litecoin","circulatingSupply":1.0,
             "quotes":[{"name":"USD","price":80.0}]}]}}"#;
        let symbols = decode_symbol_list(RawResponse::ok(body)).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].circulating_supply, 0.0);
        assert_eq!(symbols[0].quotes[0].percent_change_1h, 0.0);
        assert_eq!(symbols[0].quotes[0].percent_change_24h, -3.88);
        assert_eq!(symbols[1].quotes[0].price, 80.0);
    }

    #[test]
    fn test_decode_lookup_null_error_code() {
        let body = r#"{"data":[{"id":1}],"status":{"error_code":null,"error_message":null}}"#;
        let matches = decode_coin_id_lookup(RawResponse::ok(body)).unwrap();
        assert_eq!(matches[0].id, 1);
    }

    #[test]
    fn test_decode_chart_passes_values_through() {
        let body = r#"{"data":{"points":{"1":{"v":[-1.0,0],"c":[-1.0]}}}}"#;
        let points = decode_chart_points(RawResponse::ok(body)).unwrap();
        assert_eq!(points["1"].v, vec![-1.0, 0.0]);
    }

    #[test]
    fn test_decode_chart_wrong_shape() {
        let err = decode_chart_points(RawResponse::ok(r#"{"data":{"points":[1,2,3]}}"#))
            .unwrap_err();
        assert!(matches!(err, CmcError::Decode { .. }));
    }
}
