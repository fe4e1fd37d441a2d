//! Core library for the slippage-estimator project.
//!
//! Estimates how large a swap must be before its execution price falls to
//! the liquidation threshold implied by a lending market's LLTV.

pub mod cli;
pub mod config;
pub mod errors;
pub mod estimator;
pub mod models;
pub mod pricing;
pub mod quote;
pub mod report;
pub mod slippage;
pub mod token;
pub mod utils;
