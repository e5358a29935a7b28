use std::io::{self, BufWriter, Write};

use anyhow::{bail, Result};
use clap::Parser;
use minimize_again::{logging, CostEngine, PrimeTable};

/// Print the minimum number of primes summing to each value, with one such sum.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Values to decompose.
    #[arg(required = true)]
    values: Vec<u32>,

    /// Sieve bound. Defaults to the largest value.
    #[arg(long)]
    limit: Option<u32>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let max = args.values.iter().copied().max().unwrap_or(0);
    let limit = args.limit.unwrap_or(max);
    if max > limit {
        bail!("value {max} is above --limit {limit}");
    }

    let table = PrimeTable::new(limit);
    let mut engine = CostEngine::new(&table);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for &value in &args.values {
        let Some(count) = engine.min_terms(value) else {
            writeln!(out, "{value}: infeasible")?;
            continue;
        };
        match engine.decompose(value) {
            Some(terms) if !terms.is_empty() => {
                let sum: Vec<String> = terms.iter().map(u32::to_string).collect();
                writeln!(out, "{value}: {count} = {}", sum.join(" + "))?;
            }
            _ => writeln!(out, "{value}: {count}")?,
        }
    }
    out.flush()?;
    Ok(())
}
