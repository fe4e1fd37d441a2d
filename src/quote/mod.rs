//! Swap quote sources.
//!
//! Responsibilities:
//! • Turn (amount_in, token_in, token_out) into an amount_out.
//! • Optionally return the routing path behind the quote.
//! • Space out requests so the upstream rate ceiling is respected.

use crate::errors::Result;
use crate::models::RouteStep;
use async_trait::async_trait;
use ethers::types::Address;
use num_bigint::BigUint;

pub mod oneinch;
pub mod throttle;

pub use oneinch::OneInchClient;
pub use throttle::Throttled;

/// Exact-in quote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub amount_in: BigUint,
    pub token_in: Address,
    pub token_out: Address,
    /// Ask the source for the routing path as well.
    pub include_route: bool,
}

impl QuoteRequest {
    pub fn new(amount_in: BigUint, token_in: Address, token_out: Address) -> Self {
        Self {
            amount_in,
            token_in,
            token_out,
            include_route: false,
        }
    }

    pub fn with_route(mut self) -> Self {
        self.include_route = true;
        self
    }
}

/// Quote returned by a source. `route` is empty unless requested.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub amount_out: BigUint,
    pub route: Vec<RouteStep>,
}

/// Anything that can price an exact-in swap.
///
/// Failures must surface as `AppError::QuoteUnavailable`; implementations
/// never report a missing quote as a zero output.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quote(&self, request: &QuoteRequest) -> Result<Quote>;
}
