//! HTTPS transport

use embedded_nal_async::{Dns, TcpConnect};
use heapless::String;
use reqwless::client::HttpClient;
use reqwless::request::Method;

use tickertape_core::config::MAX_TOKEN_LEN;
use tickertape_core::traits::{FetchError, MarketStatus, Quote, QuoteSource};

use crate::api;

/// Response buffer (headers and body); quote bodies are well under 1 KiB
pub const RX_BUFFER_SIZE: usize = 4096;

/// Finnhub-backed [`QuoteSource`]
///
/// One request at a time; each lookup opens a fresh connection.
pub struct FinnhubSource<'a, T, D>
where
    T: TcpConnect + 'a,
    D: Dns + 'a,
{
    client: HttpClient<'a, T, D>,
    token: String<MAX_TOKEN_LEN>,
    rx: [u8; RX_BUFFER_SIZE],
}

impl<'a, T, D> FinnhubSource<'a, T, D>
where
    T: TcpConnect + 'a,
    D: Dns + 'a,
{
    /// Wrap a TLS-capable HTTP client
    pub fn new(client: HttpClient<'a, T, D>, token: &str) -> Self {
        let mut owned = String::new();
        for ch in token.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        Self {
            client,
            token: owned,
            rx: [0; RX_BUFFER_SIZE],
        }
    }

    /// GET `url` and return the body of a 2xx response
    async fn get(&mut self, url: &str) -> Result<&[u8], FetchError> {
        let mut request = self
            .client
            .request(Method::GET, url)
            .await
            .map_err(transport)?;
        let response = request.send(&mut self.rx).await.map_err(transport)?;

        if !response.status.is_successful() {
            return Err(FetchError::Status(response.status.0));
        }

        let body = response.body().read_to_end().await.map_err(transport)?;
        Ok(body)
    }
}

fn transport(e: reqwless::Error) -> FetchError {
    #[cfg(feature = "defmt")]
    defmt::debug!("finnhub: transport error {:?}", e);
    #[cfg(not(feature = "defmt"))]
    let _ = e;
    FetchError::Transport
}

impl<'a, T, D> QuoteSource for FinnhubSource<'a, T, D>
where
    T: TcpConnect + 'a,
    D: Dns + 'a,
{
    async fn quote(&mut self, symbol: &str) -> Result<Quote, FetchError> {
        let url = api::quote_url(symbol, self.token.as_str())?;
        let body = self.get(url.as_str()).await?;
        api::parse_quote(body)
    }

    async fn market_status(&mut self) -> Result<MarketStatus, FetchError> {
        let url = api::market_status_url(self.token.as_str())?;
        let body = self.get(url.as_str()).await?;
        api::parse_market_status(body)
    }
}
