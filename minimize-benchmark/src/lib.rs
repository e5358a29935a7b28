//! Process-level benchmarks for the `minimize-again` binary live in `benches/`.
