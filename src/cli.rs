//! Command-line arguments.

use crate::models::Chain;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Estimate the swap size that moves a pair's price to the liquidation threshold of a given LLTV"
)]
pub struct Args {
    /// Address of the collateral token being sold
    pub token_in: String,

    /// Address of the token received
    pub token_out: String,

    /// Liquidation loan-to-value, in (0, 1]
    pub lltv: f64,

    /// Network to quote on (ethereum or base)
    #[arg(default_value = "ethereum")]
    pub chain: Chain,

    /// Cap on the liquidation incentive factor
    #[arg(long, default_value_t = 1.15)]
    pub max_incentive: f64,

    /// LLTV weight in the incentive formula
    #[arg(long, default_value_t = 0.3)]
    pub beta: f64,

    /// Number of bisection steps
    #[arg(long, default_value_t = 10)]
    pub iterations: u32,

    /// Stop early once the bracket is narrower than this fraction of its upper bound
    #[arg(long)]
    pub rel_tolerance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_with_default_chain() {
        let args = Args::try_parse_from([
            "slippage-estimator",
            "0x7f39C581F595B53c5cb19bD0b3f8dA6c935E2Ca0",
            "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
            "0.945",
        ])
        .unwrap();
        assert_eq!(args.chain, Chain::Ethereum);
        assert_eq!(args.lltv, 0.945);
        assert_eq!(args.iterations, 10);
        assert_eq!(args.max_incentive, 1.15);
        assert_eq!(args.beta, 0.3);
        assert!(args.rel_tolerance.is_none());
    }

    #[test]
    fn explicit_chain_and_overrides() {
        let args = Args::try_parse_from([
            "slippage-estimator",
            "0x01",
            "0x02",
            "0.86",
            "base",
            "--iterations",
            "14",
            "--beta",
            "0.5",
        ])
        .unwrap();
        assert_eq!(args.chain, Chain::Base);
        assert_eq!(args.iterations, 14);
        assert_eq!(args.beta, 0.5);
    }

    #[test]
    fn wrong_argument_count_is_rejected() {
        assert!(Args::try_parse_from(["slippage-estimator", "0x01", "0x02"]).is_err());
        assert!(
            Args::try_parse_from(["slippage-estimator", "0x01", "0x02", "0.9", "base", "extra"])
                .is_err()
        );
    }

    #[test]
    fn unknown_chain_is_rejected() {
        assert!(
            Args::try_parse_from(["slippage-estimator", "0x01", "0x02", "0.9", "solana"]).is_err()
        );
    }
}
