//! Synthetic market-data workload.
//!
//! Every cycle turns one tick into an order, a fill and a position update,
//! serialises the fill into a byte buffer and collects the touched symbols in
//! a list buffer. All entries are taken through scoped leases.

use std::fmt::Write as _;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use tradepool::{OrderStatus, OrderType, RegistryConfig, Side, TradingPools};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::output;

const SYMBOLS: [&str; 4] = ["BTC-USD", "ETH-USD", "SOL-USD", "XRP-USD"];

pub fn run(
    config: &RegistryConfig,
    threads: usize,
    cycles: usize,
    format: OutputFormat,
) -> anyhow::Result<()> {
    anyhow::ensure!(threads > 0, "--threads must be at least 1");

    let pools = TradingPools::new(config).context("failed to build trading pools")?;
    info!(threads, cycles, "bench started");

    let started = Instant::now();
    thread::scope(|s| -> anyhow::Result<()> {
        let workers: Vec<_> = (0..threads)
            .map(|worker| {
                let pools = &pools;
                s.spawn(move || run_worker(pools, worker, cycles))
            })
            .collect();

        for worker in workers {
            worker
                .join()
                .map_err(|_| anyhow::anyhow!("bench worker panicked"))??;
        }
        Ok(())
    })?;
    let elapsed = started.elapsed();

    let total = threads * cycles;
    eprintln!(
        "bench: {threads} threads x {cycles} cycles ({total} total) in {:.3}s elapsed",
        elapsed.as_secs_f64()
    );
    info!(elapsed_ms = elapsed.as_millis() as u64, "bench finished");

    print!("{}", output::render(&pools.get_all_stats(), format)?);
    Ok(())
}

fn run_worker(pools: &TradingPools, worker: usize, cycles: usize) -> tradepool::Result<()> {
    for cycle in 0..cycles {
        let symbol = SYMBOLS[(worker + cycle) % SYMBOLS.len()];
        let px = 100.0 + (cycle % 50) as f64;

        let mut tick = pools.scoped_market_tick()?;
        tick.symbol.push_str(symbol);
        tick.bid = px - 0.05;
        tick.ask = px + 0.05;
        tick.bid_size = 10.0;
        tick.ask_size = 12.0;

        let mut order = pools.scoped_order()?;
        let _ = write!(order.order_id, "{worker}-{cycle}");
        order.symbol.push_str(symbol);
        order.side = Some(if cycle % 2 == 0 { Side::Buy } else { Side::Sell });
        order.order_type = Some(OrderType::Limit);
        order.status = Some(OrderStatus::Filled);
        order.quantity = 1.0;
        order.price = tick.mid();
        order.filled_quantity = order.quantity;

        let mut trade = pools.scoped_trade()?;
        trade.order_id.push_str(&order.order_id);
        trade.symbol.push_str(symbol);
        trade.side = order.side;
        trade.quantity = order.filled_quantity;
        trade.price = order.price;
        trade.fee = trade.notional() * 0.0005;

        let mut position = pools.scoped_position()?;
        position.symbol.push_str(symbol);
        position.quantity = trade.quantity;
        position.average_price = trade.price;
        position.mark(tick.ask);

        let mut frame = pools.scoped_byte_buffer()?;
        frame.extend_from_slice(trade.symbol.as_bytes());
        frame.extend_from_slice(&trade.price.to_le_bytes());
        frame.extend_from_slice(&trade.quantity.to_le_bytes());

        let mut symbols = pools.scoped_list_buffer()?;
        symbols.push(tick.symbol.clone());
        symbols.push(position.symbol.clone());
    }

    debug!(worker, cycles, "bench worker done");
    Ok(())
}
