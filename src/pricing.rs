//! USD reference pricing through the chain's stable-coin.

use crate::errors::Result;
use crate::models::{Chain, Token};
use crate::quote::{QuoteRequest, QuoteSource};
use crate::utils::raw_to_f64;
use num_bigint::BigUint;
use tracing::debug;

/// Price of one whole `token` in USD, from a one-unit swap into the chain's
/// USDC reference.
pub async fn unit_price_usd<Q>(token: &Token, chain: Chain, quote: &Q) -> Result<f64>
where
    Q: QuoteSource + ?Sized,
{
    let stable = chain.stable_reference();
    let request = QuoteRequest::new(token.one_unit(), token.address, stable.address());
    let amount_out = quote.quote(&request).await?.amount_out;
    let price = raw_to_f64(&amount_out) / 10f64.powi(i32::from(stable.decimals));
    debug!(symbol = %token.symbol, %chain, price, "[PRICE] unit price");
    Ok(price)
}

/// USD value of a raw `amount` of `token` at `unit_price`.
pub fn amount_usd(amount: &BigUint, token: &Token, unit_price: f64) -> f64 {
    raw_to_f64(amount) * unit_price / 10f64.powi(i32::from(token.decimals))
}
