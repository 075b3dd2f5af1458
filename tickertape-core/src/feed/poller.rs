//! Quote feed

use core::future::Future;

use embassy_futures::select::{select, Either};
use embedded_hal_async::delay::DelayNs;

use crate::traits::{FetchError, MarketStatus, QuoteSource};

use super::line::QuoteLine;

/// Current marquee line and market flag, refreshed from a [`QuoteSource`]
pub struct QuoteFeed<Q> {
    source: Q,
    line: QuoteLine,
    market_open: bool,
    throttle_ms: u32,
    request_timeout_ms: u32,
}

/// Race `request` against `timeout_ms` on `delay`
///
/// The request future is dropped on expiry, which closes its connection.
async fn bounded<T, F, D>(request: F, timeout_ms: u32, delay: &mut D) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
    D: DelayNs,
{
    match select(request, delay.delay_ms(timeout_ms)).await {
        Either::First(result) => result,
        Either::Second(()) => Err(FetchError::Timeout),
    }
}

impl<Q: QuoteSource> QuoteFeed<Q> {
    /// Create a feed with an empty line
    ///
    /// The market is assumed open until a fetch says otherwise. Each remote
    /// lookup is abandoned after `request_timeout_ms`.
    pub fn new(source: Q, throttle_ms: u32, request_timeout_ms: u32) -> Self {
        Self {
            source,
            line: QuoteLine::new(),
            market_open: true,
            throttle_ms,
            request_timeout_ms,
        }
    }

    /// Refresh every symbol
    ///
    /// The new line is built off to the side and only replaces the current
    /// one once every lookup has succeeded. On any failure the previous line
    /// and market flag are left exactly as they were.
    pub async fn fetch_all<S, D>(&mut self, symbols: &[S], delay: &mut D) -> Result<(), FetchError>
    where
        S: AsRef<str>,
        D: DelayNs,
    {
        let mut next = QuoteLine::new();

        for (i, symbol) in symbols.iter().enumerate() {
            let symbol = symbol.as_ref();
            if i > 0 {
                delay.delay_ms(self.throttle_ms).await;
            }

            let lookup = self.source.quote(symbol);
            let quote = match bounded(lookup, self.request_timeout_ms, delay).await {
                Ok(q) => q,
                Err(e) => {
                    warn!("feed: {} failed: {:?}", symbol, e);
                    return Err(e);
                }
            };
            next.push_segment(symbol, &quote)?;
        }

        let status = self.source.market_status();
        let market_open = match bounded(status, self.request_timeout_ms, delay).await {
            Ok(status) => status == MarketStatus::Open,
            Err(e) => {
                debug!("feed: market status unavailable ({:?}), assuming open", e);
                true
            }
        };

        self.line = next;
        self.market_open = market_open;
        info!(
            "feed: {} symbols, market {}",
            symbols.len(),
            if market_open { "open" } else { "closed" }
        );
        Ok(())
    }

    /// Current marquee text
    pub fn line(&self) -> &QuoteLine {
        &self.line
    }

    /// Whether the exchange was open at the last successful fetch
    pub fn market_open(&self) -> bool {
        self.market_open
    }
}
