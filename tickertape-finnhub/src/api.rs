//! Finnhub URLs and response bodies

use core::fmt::Write;

use heapless::String;
use serde::Deserialize;

use tickertape_core::traits::{FetchError, MarketStatus, Quote};

/// REST API root
pub const API_BASE: &str = "https://finnhub.io/api/v1";

/// Longest request URL
pub const MAX_URL_LEN: usize = 192;

pub type Url = String<MAX_URL_LEN>;

/// Quote endpoint for one symbol
pub fn quote_url(symbol: &str, token: &str) -> Result<Url, FetchError> {
    let mut url = Url::new();
    write!(url, "{}/quote?symbol={}&token={}", API_BASE, symbol, token)
        .map_err(|_| FetchError::Malformed)?;
    Ok(url)
}

/// US market session endpoint
pub fn market_status_url(token: &str) -> Result<Url, FetchError> {
    let mut url = Url::new();
    write!(url, "{}/stock/market/status?exchange=US&token={}", API_BASE, token)
        .map_err(|_| FetchError::Malformed)?;
    Ok(url)
}

/// `/quote` body; unknown symbols come back with zeros and nulls
#[derive(Deserialize)]
struct QuoteBody {
    #[serde(default)]
    c: Option<f32>,
    #[serde(default)]
    dp: Option<f32>,
}

/// `/stock/market/status` body
#[derive(Deserialize)]
struct MarketBody<'a> {
    #[serde(borrow, default)]
    market: Option<&'a str>,
    #[serde(default, rename = "isOpen")]
    is_open: Option<bool>,
}

/// Parse a quote; missing or null numbers read as zero
pub fn parse_quote(body: &[u8]) -> Result<Quote, FetchError> {
    let (parsed, _) =
        serde_json_core::from_slice::<QuoteBody>(body).map_err(|_| FetchError::Malformed)?;
    Ok(Quote {
        price: parsed.c.unwrap_or(0.0),
        change_percent: parsed.dp.unwrap_or(0.0),
    })
}

/// Parse the market session
///
/// `isOpen` wins when present; otherwise `market` must read `"open"`.
pub fn parse_market_status(body: &[u8]) -> Result<MarketStatus, FetchError> {
    let (parsed, _) =
        serde_json_core::from_slice::<MarketBody>(body).map_err(|_| FetchError::Malformed)?;
    let open = match parsed.is_open {
        Some(open) => open,
        None => parsed.market == Some("open"),
    };
    Ok(if open {
        MarketStatus::Open
    } else {
        MarketStatus::Closed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_url() {
        let url = quote_url("NVDA", "abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://finnhub.io/api/v1/quote?symbol=NVDA&token=abc123"
        );
    }

    #[test]
    fn test_market_status_url() {
        let url = market_status_url("abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://finnhub.io/api/v1/stock/market/status?exchange=US&token=abc123"
        );
    }

    #[test]
    fn test_parse_quote() {
        let body = br#"{"c":261.74,"d":0.47,"dp":0.1799,"h":263.31,"l":260.68,"o":261.07,"pc":261.27,"t":1727712000}"#;
        let quote = parse_quote(body).unwrap();
        assert!((quote.price - 261.74).abs() < 1e-3);
        assert!((quote.change_percent - 0.1799).abs() < 1e-4);
    }

    #[test]
    fn test_parse_unknown_symbol() {
        let body = br#"{"c":0,"d":null,"dp":null,"h":0,"l":0,"o":0,"pc":0,"t":0}"#;
        let quote = parse_quote(body).unwrap();
        assert_eq!(quote.price, 0.0);
        assert_eq!(quote.change_percent, 0.0);
    }

    #[test]
    fn test_parse_quote_garbage() {
        assert_eq!(parse_quote(b"<html>502</html>"), Err(FetchError::Malformed));
        assert_eq!(parse_quote(b""), Err(FetchError::Malformed));
    }

    #[test]
    fn test_parse_market_status() {
        let body = br#"{"exchange":"US","holiday":null,"isOpen":false,"session":"pre-market","t":1727712000,"timezone":"America/New_York"}"#;
        assert_eq!(parse_market_status(body), Ok(MarketStatus::Closed));

        let body = br#"{"exchange":"US","isOpen":true,"session":"regular"}"#;
        assert_eq!(parse_market_status(body), Ok(MarketStatus::Open));

        assert_eq!(
            parse_market_status(br#"{"market":"open"}"#),
            Ok(MarketStatus::Open)
        );
        assert_eq!(
            parse_market_status(br#"{"market":"closed"}"#),
            Ok(MarketStatus::Closed)
        );
        assert_eq!(parse_market_status(b"{}"), Ok(MarketStatus::Closed));
        assert_eq!(parse_market_status(b"nope"), Err(FetchError::Malformed));
    }
}
