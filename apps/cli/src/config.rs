//! Layered registry configuration: defaults, then `--config` TOML, then
//! `TRADEPOOL_*` environment, then command-line flags.

use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tradepool::{PoolKind, RegistryConfig, ReuseOrder};

use crate::cli::Overrides;

/// Prefix for environment overrides, e.g. `TRADEPOOL_TRADES__MAX_FREE=4000`
pub const ENV_PREFIX: &str = "TRADEPOOL_";

pub fn figment(file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(RegistryConfig::default()));

    if let Some(path) = file {
        if !path.is_file() {
            bail!("config file {} does not exist", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    for kind in PoolKind::ALL {
        if let Some(warm_up) = overrides.warm_up {
            figment = figment.merge(Serialized::default(&format!("{kind}.warm_up"), warm_up));
        }
        if let Some(order) = overrides.reuse_order {
            figment = figment.merge(Serialized::default(
                &format!("{kind}.reuse_order"),
                ReuseOrder::from(order),
            ));
        }
    }

    Ok(figment)
}

pub fn load(file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<RegistryConfig> {
    figment(file, overrides)?
        .extract()
        .context("invalid registry configuration")
}
