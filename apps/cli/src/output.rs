//! Stats rendering for stdout

use std::fmt::Write as _;

use tradepool::PoolStats;

use crate::cli::OutputFormat;

pub fn render(stats: &[PoolStats], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(stats)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Table => Ok(table(stats)),
    }
}

fn table(stats: &[PoolStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>9} {:>7} {:>9} {:>9} {:>9} {:>8}",
        "POOL", "AVAILABLE", "IN_USE", "CREATED", "RECYCLED", "DISCARDED", "HIT_RATE"
    );
    for s in stats {
        let _ = writeln!(
            out,
            "{:<14} {:>9} {:>7} {:>9} {:>9} {:>9} {:>7.1}%",
            s.name,
            s.available_objects,
            s.in_use_objects,
            s.created_count,
            s.recycled_count,
            s.discarded_count,
            s.hit_rate_percent()
        );
    }
    out
}
