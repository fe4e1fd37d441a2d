//! Liquidation slippage estimation: incentive model and size search.

pub mod incentive;
pub mod search;
pub mod types;

pub use incentive::{liquidation_incentive_factor, target_ratio};
pub use search::{SlippageSearch, find_slippage_amount};
pub use types::{IncentiveParams, SearchBounds, SearchOutcome, StopRule};
