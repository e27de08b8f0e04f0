use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tradepool::ReuseOrder;

/// Inspect and exercise tradepool object pools
#[derive(Debug, Parser)]
#[command(name = "tradepool", version, about, long_about = None)]
pub struct Cli {
    /// TOML file with registry settings
    #[arg(long, global = true, env = "TRADEPOOL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags applied on top of file and environment settings, for every kind
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Warm-up entries per pool
    #[arg(long, global = true)]
    pub warm_up: Option<usize>,

    /// Free-list discipline for every pool
    #[arg(long, global = true, value_enum)]
    pub reuse_order: Option<Order>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the registry and print its statistics
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Run a synthetic market-data workload against the registry
    Bench {
        /// Worker threads
        #[arg(long, default_value_t = 4)]
        threads: usize,

        /// Cycles per thread
        #[arg(long, default_value_t = 10_000)]
        cycles: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    Fifo,
    Lifo,
}

impl From<Order> for ReuseOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Fifo => Self::Fifo,
            Order::Lifo => Self::Lifo,
        }
    }
}
