use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use minimize_again::{logging, parse_cases, run_server, PrimeTable, Solver, DEFAULT_LIMIT};
use tracing::info;

/// Minimize the total prime-term cost of every test case in the input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Largest accepted array value. The sieve and the cost memo cover [0, limit].
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: u32,

    /// Read test cases from this file instead of stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Serve the benchmark line protocol on stdin/stdout.
    #[arg(long, conflicts_with = "input")]
    server: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let start = Instant::now();
    let table = PrimeTable::new(args.limit);
    info!(
        limit = args.limit,
        primes = table.len(),
        elapsed = ?start.elapsed(),
        "prime table built"
    );
    let mut solver = Solver::new(&table);

    if args.server {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return run_server(&mut solver, stdin.lock(), BufWriter::new(stdout.lock()));
    }

    let buf = match &args.input {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let cases = parse_cases(&buf)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for (i, case) in cases.iter().enumerate() {
        let total = solver
            .solve_case(case)
            .with_context(|| format!("test case {}", i + 1))?;
        writeln!(writer, "{total}")?;
    }
    writer.flush()?;

    info!(
        cases = cases.len(),
        cached = solver.engine().cached(),
        elapsed = ?start.elapsed(),
        "done"
    );
    Ok(())
}
