use anyhow::Context;
use tradepool::{RegistryConfig, TradingPools};

use crate::cli::OutputFormat;
use crate::output;

pub fn run(config: &RegistryConfig, format: OutputFormat) -> anyhow::Result<()> {
    let pools = TradingPools::new(config).context("failed to build trading pools")?;
    print!("{}", output::render(&pools.get_all_stats(), format)?);
    Ok(())
}
