//! One end-to-end estimation: target ratio, size search, USD value and path.

use crate::errors::Result;
use crate::models::{Chain, Token};
use crate::pricing::{amount_usd, unit_price_usd};
use crate::quote::{QuoteRequest, QuoteSource};
use crate::report::SlippageReport;
use crate::slippage::{IncentiveParams, SlippageSearch, StopRule, target_ratio};
use crate::utils::raw_to_units;
use tracing::info;

/// Inputs that shape a single run.
#[derive(Debug, Clone)]
pub struct EstimateParams {
    pub lltv: f64,
    pub incentive: IncentiveParams,
    pub stop: StopRule,
    pub chain: Chain,
}

impl EstimateParams {
    pub fn new(lltv: f64, chain: Chain) -> Self {
        Self {
            lltv,
            incentive: IncentiveParams::default(),
            stop: StopRule::default(),
            chain,
        }
    }
}

/// Run the whole pipeline. Any failure aborts; there is no partial report.
pub async fn estimate<Q>(
    params: &EstimateParams,
    token_in: &Token,
    token_out: &Token,
    quote: &Q,
) -> Result<SlippageReport>
where
    Q: QuoteSource + ?Sized,
{
    let target = target_ratio(params.lltv, &params.incentive)?;
    info!(
        lltv = params.lltv,
        target_ratio = target,
        pair = %format!("{}/{}", token_in.symbol, token_out.symbol),
        "[ESTIMATE] target computed"
    );

    let outcome = SlippageSearch::new(params.stop.clone())
        .run(target, token_in, token_out, quote)
        .await?;

    let unit_price = unit_price_usd(token_in, params.chain, quote).await?;
    let usd = amount_usd(&outcome.amount, token_in, unit_price);

    let route_request =
        QuoteRequest::new(outcome.amount.clone(), token_in.address, token_out.address).with_route();
    let path = quote.quote(&route_request).await?.route;

    Ok(SlippageReport {
        symbol_in: token_in.symbol.clone(),
        symbol_out: token_out.symbol.clone(),
        target_ratio: target,
        amount_units: raw_to_units(&outcome.amount, token_in.decimals),
        amount_raw: outcome.amount,
        unit_price_usd: unit_price,
        amount_usd: usd,
        path,
        iterations: outcome.iterations,
    })
}
