use super::types::{SearchBounds, SearchOutcome, StopRule};
use crate::errors::{AppError, Result};
use crate::models::Token;
use crate::quote::{QuoteRequest, QuoteSource};
use crate::utils::raw_to_f64;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::{debug, info};

/// Bisection over trade size for the largest amount whose execution price
/// stays above `target_ratio` of the reference price.
///
/// Assumes the price ratio is non-increasing in trade size. Routers that
/// switch paths at certain sizes can break that, in which case the result is
/// still a sampled passing amount but not necessarily the largest one.
#[derive(Debug, Clone, Default)]
pub struct SlippageSearch {
    stop: StopRule,
}

impl SlippageSearch {
    pub fn new(stop: StopRule) -> Self {
        Self { stop }
    }

    pub async fn run<Q>(
        &self,
        target_ratio: f64,
        token_in: &Token,
        token_out: &Token,
        quote: &Q,
    ) -> Result<SearchOutcome>
    where
        Q: QuoteSource + ?Sized,
    {
        if !target_ratio.is_finite() || target_ratio <= 0.0 {
            return Err(AppError::Domain(format!(
                "target ratio must be a positive number, got {target_ratio}"
            )));
        }
        self.stop.validate()?;

        // One whole token stands in for the zero-impact trade; at this size
        // the reference itself may already carry a little impact.
        let unit = token_in.one_unit();
        let reference_out = amount_out(quote, &unit, token_in, token_out).await?;
        if reference_out.is_zero() {
            return Err(AppError::quote(&unit, "zero output for the reference quote"));
        }
        let reference_unit_price = raw_to_f64(&reference_out) / raw_to_f64(&unit);

        let mut bounds = SearchBounds {
            high: token_in.total_supply.clone().max(unit.clone()),
            low: unit,
        };
        info!(
            target_ratio,
            reference_unit_price,
            low = %bounds.low,
            high = %bounds.high,
            "[SEARCH] starting bisection"
        );

        let mut iterations = 0;
        if target_ratio < 1.0 {
            while iterations < self.stop.max_iterations && !self.converged(&bounds) {
                let mid = bounds.midpoint();
                let out = amount_out(quote, &mid, token_in, token_out).await?;
                let ratio = (raw_to_f64(&out) / raw_to_f64(&mid)) / reference_unit_price;
                iterations += 1;

                let passed = ratio > target_ratio;
                debug!(
                    iteration = iterations,
                    low = %bounds.low,
                    mid = %mid,
                    high = %bounds.high,
                    ratio,
                    passed,
                    "[SEARCH] step"
                );
                if passed {
                    bounds.low = mid;
                } else {
                    bounds.high = mid;
                }
            }
        } else {
            debug!(target_ratio, "[SEARCH] target at or above reference, nothing to search");
        }

        info!(amount = %bounds.low, iterations, "[SEARCH] converged");
        Ok(SearchOutcome {
            amount: bounds.low.clone(),
            bounds,
            iterations,
            reference_unit_price,
        })
    }

    fn converged(&self, bounds: &SearchBounds) -> bool {
        let width = bounds.width();
        // midpoint would be `low` again
        if width <= BigUint::one() {
            return true;
        }
        if let Some(abs) = &self.stop.abs_tolerance {
            if &width <= abs {
                return true;
            }
        }
        if let Some(rel) = self.stop.rel_tolerance {
            if raw_to_f64(&width) / raw_to_f64(&bounds.high) <= rel {
                return true;
            }
        }
        false
    }
}

/// Estimate with the default stop rule (10 bisection steps).
pub async fn find_slippage_amount<Q>(
    target_ratio: f64,
    token_in: &Token,
    token_out: &Token,
    quote: &Q,
) -> Result<BigUint>
where
    Q: QuoteSource + ?Sized,
{
    let outcome = SlippageSearch::default()
        .run(target_ratio, token_in, token_out, quote)
        .await?;
    Ok(outcome.amount)
}

async fn amount_out<Q>(
    quote: &Q,
    amount_in: &BigUint,
    token_in: &Token,
    token_out: &Token,
) -> Result<BigUint>
where
    Q: QuoteSource + ?Sized,
{
    let request = QuoteRequest::new(amount_in.clone(), token_in.address, token_out.address);
    Ok(quote.quote(&request).await?.amount_out)
}
