//! Human-readable result of one estimation.

use crate::models::RouteStep;
use crate::utils::number_to_readable;
use bigdecimal::BigDecimal;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct SlippageReport {
    pub symbol_in: String,
    pub symbol_out: String,
    pub target_ratio: f64,
    /// Estimated trigger amount in raw token_in units.
    pub amount_raw: BigUint,
    /// Same amount in whole token_in units.
    pub amount_units: BigDecimal,
    pub unit_price_usd: f64,
    pub amount_usd: f64,
    /// Routing of the final amount, one entry per token-to-token leg.
    pub path: Vec<RouteStep>,
    pub iterations: u32,
}

impl SlippageReport {
    /// Price move the estimate targets, in percent.
    pub fn slippage_pct(&self) -> f64 {
        (1.0 - self.target_ratio) * 100.0
    }
}

impl fmt::Display for SlippageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Swap should be done using the following path:")?;
        if self.path.is_empty() {
            writeln!(f, "  (router returned no path)")?;
        }
        // shares are per step, so each step sums to 100% on its own
        for (i, step) in self.path.iter().enumerate() {
            writeln!(
                f,
                "  step {}: {:?} -> {:?}",
                i + 1,
                step.from_token,
                step.to_token
            )?;
            for hop in &step.hops {
                writeln!(f, "    {} -> {}% of this step", hop.protocol, hop.part)?;
            }
        }
        let units = self.amount_units.to_f64().unwrap_or(f64::INFINITY);
        writeln!(
            f,
            "Amount to cause {:.2}% slippage on {}/{}:",
            self.slippage_pct(),
            self.symbol_in,
            self.symbol_out
        )?;
        write!(
            f,
            "  {} {} = {} USD",
            number_to_readable(units),
            self.symbol_in,
            number_to_readable(self.amount_usd)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteHop;
    use ethers::types::Address;
    use std::str::FromStr;

    fn report(path: Vec<RouteStep>) -> SlippageReport {
        SlippageReport {
            symbol_in: "wstETH".into(),
            symbol_out: "WETH".into(),
            target_ratio: 0.95 / 0.985,
            amount_raw: BigUint::from_str("35500000000000000000000").unwrap(),
            amount_units: BigDecimal::from_str("35500").unwrap(),
            unit_price_usd: 4000.0,
            amount_usd: 142_000_000.0,
            path,
            iterations: 10,
        }
    }

    fn step(from: u8, to: u8, hops: &[(&str, f64)]) -> RouteStep {
        RouteStep {
            from_token: Address::repeat_byte(from),
            to_token: Address::repeat_byte(to),
            hops: hops
                .iter()
                .map(|(protocol, part)| RouteHop {
                    protocol: protocol.to_string(),
                    part: *part,
                })
                .collect(),
        }
    }

    #[test]
    fn renders_path_and_amounts() {
        let text = report(vec![step(1, 2, &[("UNISWAP_V3", 70.0), ("CURVE", 30.0)])]).to_string();
        let from = format!("{:?}", Address::repeat_byte(1));
        let to = format!("{:?}", Address::repeat_byte(2));
        assert_eq!(
            text,
            format!(
                "Swap should be done using the following path:\n\
                 \x20 step 1: {from} -> {to}\n\
                 \x20   UNISWAP_V3 -> 70% of this step\n\
                 \x20   CURVE -> 30% of this step\n\
                 Amount to cause 3.55% slippage on wstETH/WETH:\n\
                 \x20 35.5K wstETH = 142.0M USD"
            )
        );
    }

    #[test]
    fn multi_step_path_keeps_shares_per_step() {
        let text = report(vec![
            step(1, 2, &[("UNISWAP_V3", 100.0)]),
            step(2, 3, &[("CURVE", 60.0), ("BALANCER", 40.0)]),
        ])
        .to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("  step 1: "));
        assert_eq!(lines[2], "    UNISWAP_V3 -> 100% of this step");
        assert_eq!(
            lines[3],
            format!(
                "  step 2: {:?} -> {:?}",
                Address::repeat_byte(2),
                Address::repeat_byte(3)
            )
        );
        assert_eq!(lines[4], "    CURVE -> 60% of this step");
        assert_eq!(lines[5], "    BALANCER -> 40% of this step");
        assert!(!text.contains("of the swap"));
    }

    #[test]
    fn empty_path_is_stated() {
        let text = report(vec![]).to_string();
        assert!(text.contains("(router returned no path)"));
    }

    #[test]
    fn slippage_pct_from_target() {
        let mut r = report(vec![]);
        r.target_ratio = 0.9;
        assert!((r.slippage_pct() - 10.0).abs() < 1e-9);
    }
}
