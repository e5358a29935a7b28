//! Simple line-protocol server used by the Criterion harness.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::input::Tokens;
use crate::solver::{Solver, TestCase};

/// Line-protocol server over any reader/writer pair.
///
/// Protocol (one command per line):
/// - `CASE <k> <v1> ... <vn>`: solve one test case and reply
///   `OK <cost> <nanos>`.
/// - `WARMUP <max>`: compute the cost of every value in `2..=max` and reply
///   `OK <cached>` with the number of memo entries filled.
/// - `QUIT`: exit.
///
/// A malformed or failing command gets `ERR <message>` and the server keeps
/// going. End of input behaves like `QUIT`.
pub fn run_server<R, W>(solver: &mut Solver<'_>, mut reader: R, mut writer: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut buf: Vec<u8> = Vec::with_capacity(256);
    let mut handled: u64 = 0;

    loop {
        buf.clear();
        if reader
            .read_until(b'\n', &mut buf)
            .context("reading server command")?
            == 0
        {
            // EOF
            break;
        }

        let mut tokens = Tokens::new(&buf);
        let reply = match tokens.next_word() {
            None => continue,
            Some(b"QUIT") => break,
            Some(b"CASE") => handle_case(solver, &mut tokens),
            Some(b"WARMUP") => handle_warmup(solver, &mut tokens),
            Some(other) => Err(anyhow::anyhow!(
                "unknown command {:?}",
                String::from_utf8_lossy(other)
            )),
        };

        match reply {
            Ok(line) => writeln!(writer, "OK {line}")?,
            Err(err) => {
                debug!("command failed: {err:#}");
                writeln!(writer, "ERR {err:#}")?;
            }
        }
        writer.flush()?;
        handled += 1;
    }

    info!(handled, cached = solver.engine().cached(), "server stopped");
    Ok(())
}

fn handle_case(solver: &mut Solver<'_>, tokens: &mut Tokens<'_>) -> Result<String> {
    let k = tokens.next_u64("replacement budget")?;
    let mut values = Vec::new();
    while !tokens.is_exhausted() {
        values.push(tokens.next_u32("array value")?);
    }
    let case = TestCase { k, values };

    let start = Instant::now();
    let total = solver.solve_case(&case)?;
    let nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
    Ok(format!("{total} {nanos}"))
}

fn handle_warmup(solver: &mut Solver<'_>, tokens: &mut Tokens<'_>) -> Result<String> {
    let max = tokens.next_u32("warmup bound")?;
    let limit = solver.table().limit();
    if max > limit {
        bail!("warmup bound {max} is above the prime table limit {limit}");
    }
    let engine = solver.engine();
    for value in 2..=max {
        engine.min_terms(value);
    }
    Ok(engine.cached().to_string())
}
