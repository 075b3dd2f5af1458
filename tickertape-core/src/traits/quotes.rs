//! Remote quote source trait

/// Latest quote for a symbol
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quote {
    /// Current price
    pub price: f32,
    /// Change since previous close, in percent
    pub change_percent: f32,
}

/// Exchange session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarketStatus {
    Open,
    Closed,
}

/// Errors that can occur while fetching remote data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Connection, DNS or TLS failure
    Transport,
    /// Server answered with a non-success HTTP status
    Status(u16),
    /// No complete response within the request timeout
    Timeout,
    /// Response body could not be parsed
    Malformed,
    /// Formatted ticker line would not fit its buffer
    LineOverflow,
}

/// Remote source of quotes and market status
pub trait QuoteSource {
    /// Look up the latest quote for one symbol
    async fn quote(&mut self, symbol: &str) -> Result<Quote, FetchError>;

    /// Query whether the exchange is currently open
    async fn market_status(&mut self) -> Result<MarketStatus, FetchError>;
}
