use super::{Quote, QuoteRequest, QuoteSource};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{Chain, RouteHop, RouteStep};
use async_trait::async_trait;
use ethers::types::Address;
use num_bigint::BigUint;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const API_VERSION: &str = "v5.2";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Backoff floor, so a zero quote interval still waits between 429 retries.
pub const MIN_RETRY_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Deserialize)]
struct QuoteMsg {
    #[serde(rename = "toAmount")]
    to_amount: Option<String>,
    /// routes -> steps -> parts
    #[serde(default)]
    protocols: Vec<Vec<Vec<ProtocolPart>>>,
}

#[derive(Debug, Deserialize)]
struct ProtocolPart {
    name: String,
    part: f64,
    #[serde(rename = "fromTokenAddress")]
    from_token_address: Address,
    #[serde(rename = "toTokenAddress")]
    to_token_address: Address,
}

/// Client for the 1inch aggregation quote endpoint on one chain.
#[derive(Clone)]
pub struct OneInchClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl OneInchClient {
    pub fn new(config: &AppConfig, chain: Chain) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/swap/{}/{}/quote",
            config.oneinch_base_url,
            API_VERSION,
            chain.id()
        ))?;
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint,
            api_key: config.oneinch_api_key.clone(),
            max_retries: config.quote_max_retries,
            retry_delay: config.quote_interval,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn quote_once(&self, request: &QuoteRequest) -> Result<Quote> {
        let amount = request.amount_in.to_string();
        let src = format!("{:?}", request.token_in);
        let dst = format!("{:?}", request.token_out);
        let mut params = vec![("src", src), ("dst", dst), ("amount", amount)];
        if request.include_route {
            params.push(("includeProtocols", "true".to_string()));
        }

        let response = self
            .http
            .get(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::quote(&request.amount_in, format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::quote(&request.amount_in, format!("body read failed: {e}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::rate_limited(&request.amount_in, body));
        }
        if !status.is_success() {
            return Err(AppError::quote(
                &request.amount_in,
                format!("HTTP {status}: {body}"),
            ));
        }
        parse_quote(&body, &request.amount_in)
    }
}

#[async_trait]
impl QuoteSource for OneInchClient {
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let quote = retry_rate_limited(self.max_retries, self.retry_delay, || {
            self.quote_once(request)
        })
        .await?;
        debug!(
            amount_in = %request.amount_in,
            amount_out = %quote.amount_out,
            steps = quote.route.len(),
            "[QUOTE] 1inch quote"
        );
        Ok(quote)
    }
}

/// Re-run `attempt` while it fails with a rate-limit error, doubling the delay
/// (never below `MIN_RETRY_DELAY`) each time, at most `max_retries` extra
/// times. A rate limit that outlives the retries is `QuoteUnavailable`.
pub async fn retry_rate_limited<T, F, Fut>(
    max_retries: u32,
    initial_delay: Duration,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = initial_delay.max(MIN_RETRY_DELAY);
    let mut retries = 0;
    loop {
        match attempt().await {
            Err(e) if e.is_rate_limited() && retries < max_retries => {
                retries += 1;
                warn!(
                    retries,
                    delay_ms = delay.as_millis() as u64,
                    "[QUOTE] rate limited, backing off"
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            other => return other.map_err(AppError::into_unavailable),
        }
    }
}

/// Decode a quote body. A missing or non-numeric `toAmount` is a failure.
fn parse_quote(body: &str, amount_in: &BigUint) -> Result<Quote> {
    let msg: QuoteMsg = serde_json::from_str(body)
        .map_err(|e| AppError::quote(amount_in, format!("unparseable payload ({e}): {body}")))?;

    let raw = msg
        .to_amount
        .ok_or_else(|| AppError::quote(amount_in, format!("missing toAmount: {body}")))?;
    let amount_out = BigUint::from_str(raw.trim())
        .map_err(|_| AppError::quote(amount_in, format!("non-numeric toAmount '{raw}'")))?;

    // first route only; each step keeps its own split
    let route = msg
        .protocols
        .into_iter()
        .next()
        .unwrap_or_default()
        .into_iter()
        .filter_map(|parts| {
            let first = parts.first()?;
            let (from_token, to_token) = (first.from_token_address, first.to_token_address);
            let hops = parts
                .into_iter()
                .map(|p| RouteHop {
                    protocol: p.name,
                    part: p.part,
                })
                .collect();
            Some(RouteStep {
                from_token,
                to_token,
                hops,
            })
        })
        .collect();

    Ok(Quote { amount_out, route })
}
