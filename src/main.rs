use anyhow::{Result, anyhow};
use clap::Parser;
use ethers::types::Address;
use slippage_estimator::{
    cli::Args,
    config::AppConfig,
    errors::AppError,
    estimator::{EstimateParams, estimate},
    quote::{OneInchClient, Throttled},
    report::SlippageReport,
    slippage::{IncentiveParams, StopRule, target_ratio},
    token::Erc20Metadata,
    utils,
};
use std::str::FromStr;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // usage errors exit 1, --help / --version exit 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let token_in = parse_address("token_in", &args.token_in)?;
    let token_out = parse_address("token_out", &args.token_out)?;
    let params = EstimateParams {
        lltv: args.lltv,
        incentive: IncentiveParams {
            max_incentive: args.max_incentive,
            beta: args.beta,
        },
        stop: StopRule {
            max_iterations: args.iterations,
            abs_tolerance: None,
            rel_tolerance: args.rel_tolerance,
        },
        chain: args.chain,
    };
    // Reject bad parameters before touching the network.
    target_ratio(params.lltv, &params.incentive)?;
    params.stop.validate()?;

    let config = AppConfig::from_env()?;
    tracing::info!(
        chain = %params.chain,
        lltv = params.lltv,
        quote_interval_ms = config.quote_interval.as_millis() as u64,
        "[INIT] slippage-estimator starting (quotes are rate limited, expect a minute or two)"
    );

    let job = run(&config, &params, token_in, token_out);
    let report = match config.timeout {
        Some(limit) => tokio::time::timeout(limit, job)
            .await
            .map_err(|_| AppError::Timeout(limit.as_secs()))??,
        None => job.await?,
    };

    println!("{report}");
    Ok(())
}

async fn run(
    config: &AppConfig,
    params: &EstimateParams,
    token_in: Address,
    token_out: Address,
) -> slippage_estimator::errors::Result<SlippageReport> {
    let metadata = Erc20Metadata::new(&config.rpc_url)?;
    let token_in = metadata.fetch(token_in).await?;
    let token_out = metadata.fetch(token_out).await?;

    let quotes = Throttled::new(
        OneInchClient::new(config, params.chain)?,
        config.quote_interval,
    );
    estimate(params, &token_in, &token_out, &quotes).await
}

fn parse_address(name: &str, raw: &str) -> Result<Address> {
    Address::from_str(raw.trim()).map_err(|e| anyhow!("invalid {name} address '{raw}': {e}"))
}
