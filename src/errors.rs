use ethers::types::Address;
use num_bigint::BigUint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Parameters outside the domain of the incentive model or search.
    #[error("Domain error: {0}")]
    Domain(String),

    /// A quote could not be obtained for `amount_in`. Never mapped to zero.
    #[error("Quote unavailable for amount_in={amount_in}: {reason}")]
    QuoteUnavailable { amount_in: BigUint, reason: String },

    /// HTTP 429 from the quote source. Retried, then surfaced as
    /// `QuoteUnavailable`.
    #[error("Rate limited for amount_in={amount_in}: {body}")]
    RateLimited { amount_in: BigUint, body: String },

    #[error("Metadata unavailable for token {token:?}: {reason}")]
    MetadataUnavailable { token: Address, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Estimation timed out after {0}s")]
    Timeout(u64),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn quote(amount_in: &BigUint, reason: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            amount_in: amount_in.clone(),
            reason: reason.into(),
        }
    }

    pub fn metadata(token: Address, reason: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            token,
            reason: reason.into(),
        }
    }

    pub fn rate_limited(amount_in: &BigUint, body: impl Into<String>) -> Self {
        Self::RateLimited {
            amount_in: amount_in.clone(),
            body: body.into(),
        }
    }

    /// Rate-limit responses are the only quote failures worth retrying.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Turn a rate limit that outlived its retries into `QuoteUnavailable`.
    pub fn into_unavailable(self) -> Self {
        match self {
            Self::RateLimited { amount_in, body } => Self::QuoteUnavailable {
                amount_in,
                reason: format!("rate limited after retries: {body}"),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_rate_limit_becomes_quote_unavailable() {
        let amount = BigUint::from(5u8);
        let err = AppError::rate_limited(&amount, "slow down");
        assert!(err.is_rate_limited());
        match err.into_unavailable() {
            AppError::QuoteUnavailable { amount_in, reason } => {
                assert_eq!(amount_in, amount);
                assert!(reason.contains("slow down"));
            }
            other => panic!("expected QuoteUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn plain_quote_failures_are_not_retryable() {
        let err = AppError::quote(&BigUint::from(5u8), "rate limited by upstream proxy");
        assert!(!err.is_rate_limited());
        assert!(matches!(err.into_unavailable(), AppError::QuoteUnavailable { .. }));
    }
}
