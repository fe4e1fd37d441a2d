use crate::errors::{AppError, Result};
use crate::models::Token;
use ethers::{
    contract::abigen,
    providers::{Http, Provider},
    types::{Address, U256},
};
use num_bigint::BigUint;
use std::sync::Arc;
use tracing::info;

abigen!(
    Erc20,
    r"[
        function totalSupply() view returns (uint256)
        function decimals() view returns (uint8)
        function symbol() view returns (string)
    ]",
);

/// Reads token facts through a node's HTTP endpoint.
#[derive(Clone)]
pub struct Erc20Metadata {
    provider: Arc<Provider<Http>>,
}

impl Erc20Metadata {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = Arc::new(Provider::<Http>::try_from(rpc_url)?);
        Ok(Self { provider })
    }

    /// Fetch `totalSupply`, `decimals` and `symbol` for `address`.
    pub async fn fetch(&self, address: Address) -> Result<Token> {
        let erc20 = Erc20::new(address, self.provider.clone());

        let total_supply = erc20
            .total_supply()
            .call()
            .await
            .map_err(|e| AppError::metadata(address, format!("totalSupply() failed: {e}")))?;
        let decimals = erc20
            .decimals()
            .call()
            .await
            .map_err(|e| AppError::metadata(address, format!("decimals() failed: {e}")))?;
        let symbol = erc20
            .symbol()
            .call()
            .await
            .map_err(|e| AppError::metadata(address, format!("symbol() failed: {e}")))?;

        let token = Token::new(address, decimals, u256_to_biguint(total_supply), &symbol);
        info!(
            token = ?address,
            symbol = %token.symbol,
            decimals,
            total_supply = %token.total_supply,
            "[TOKEN] metadata loaded"
        );
        Ok(token)
    }
}

pub fn u256_to_biguint(value: U256) -> BigUint {
    let mut buf = [0u8; 32];
    value.to_big_endian(&mut buf);
    BigUint::from_bytes_be(&buf)
}
