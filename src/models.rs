//! Shared data structures used throughout the application.

use crate::errors::AppError;
use ethers::types::Address;
use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

/// ERC-20 facts fetched once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub decimals: u8,
    /// Raw total supply; used as the search ceiling.
    pub total_supply: BigUint,
    pub symbol: String,
}

impl Token {
    pub fn new(address: Address, decimals: u8, total_supply: BigUint, symbol: &str) -> Self {
        Self {
            address,
            decimals,
            total_supply,
            symbol: symbol.to_string(),
        }
    }

    /// One whole token in raw units (`10^decimals`).
    pub fn one_unit(&self) -> BigUint {
        BigUint::from(10u32).pow(u32::from(self.decimals))
    }
}

/// USD stable-coin used as the pricing reference on a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableReference {
    pub address: &'static str,
    pub decimals: u8,
}

impl StableReference {
    pub fn address(&self) -> Address {
        // Addresses are compile-time constants, validated in tests.
        Address::from_str(self.address).unwrap_or_default()
    }
}

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chain {
    #[default]
    Ethereum,
    Base,
}

impl Chain {
    pub fn id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Base => 8453,
        }
    }

    /// USDC on each chain.
    pub fn stable_reference(&self) -> StableReference {
        match self {
            Chain::Ethereum => StableReference {
                address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                decimals: 6,
            },
            Chain::Base => StableReference {
                address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                decimals: 6,
            },
        }
    }
}

impl FromStr for Chain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" => Ok(Chain::Ethereum),
            "base" => Ok(Chain::Base),
            other => Err(AppError::Config(format!(
                "unsupported chain '{other}' (expected ethereum or base)"
            ))),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Ethereum => write!(f, "ethereum"),
            Chain::Base => write!(f, "base"),
        }
    }
}

/// One venue inside a route step and its share of that step.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteHop {
    pub protocol: String,
    /// Percentage of the step routed through `protocol`.
    pub part: f64,
}

/// One token-to-token leg of a route, split across venues.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub from_token: Address,
    pub to_token: Address,
    pub hops: Vec<RouteHop>,
}
