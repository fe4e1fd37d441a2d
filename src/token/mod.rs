//! ERC-20 metadata over JSON-RPC.

pub mod client;

pub use client::{Erc20Metadata, u256_to_biguint};
