//! Whitespace-separated integer input:
//!
//! ```text
//! T
//! n k
//! a_1 ... a_n      (repeated T times)
//! ```

use anyhow::{anyhow, bail, Context, Result};
use tracing::warn;

use crate::solver::TestCase;

/// Whitespace tokenizer over a byte buffer that reads unsigned integers.
pub struct Tokens<'a> {
    buf: &'a [u8],
    pos: usize,
    index: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            index: 0,
        }
    }

    #[inline(always)]
    fn next_field(&mut self) -> Option<&'a [u8]> {
        let buf = self.buf;
        while self.pos < buf.len() && buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == buf.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < buf.len() && !buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Some(&buf[start..self.pos])
    }

    /// Next raw token, e.g. a command word.
    pub fn next_word(&mut self) -> Option<&'a [u8]> {
        let word = self.next_field()?;
        self.index += 1;
        Some(word)
    }

    /// True once only whitespace is left.
    pub fn is_exhausted(&mut self) -> bool {
        while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        self.pos == self.buf.len()
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }

    /// Next token as an unsigned integer; `what` names the field in errors.
    pub fn next_u64(&mut self, what: &str) -> Result<u64> {
        let field = self
            .next_field()
            .ok_or_else(|| anyhow!("input ended before {what} (token {})", self.index))?;
        let index = self.index;
        self.index += 1;
        parse_u64(field).with_context(|| format!("reading {what} (token {index})"))
    }

    pub fn next_u32(&mut self, what: &str) -> Result<u32> {
        let value = self.next_u64(what)?;
        u32::try_from(value).map_err(|_| anyhow!("{what} {value} does not fit in 32 bits"))
    }

    /// Remaining tokens, consuming them.
    pub fn remaining(&mut self) -> usize {
        let mut left = 0;
        while self.next_field().is_some() {
            left += 1;
        }
        self.index += left;
        left
    }
}

fn parse_u64(bytes: &[u8]) -> Result<u64> {
    let mut v: u64 = 0;
    for &c in bytes {
        if !c.is_ascii_digit() {
            bail!("invalid integer {:?}", String::from_utf8_lossy(bytes));
        }
        v = v
            .checked_mul(10)
            .and_then(|v| v.checked_add((c - b'0') as u64))
            .ok_or_else(|| anyhow!("integer {} overflows", String::from_utf8_lossy(bytes)))?;
    }
    Ok(v)
}

/// Parse every test case from the whole input.
pub fn parse_cases(buf: &[u8]) -> Result<Vec<TestCase>> {
    let mut tokens = Tokens::new(buf);
    let t = tokens.next_u64("test case count")?;

    let mut cases = Vec::new();
    for case in 0..t {
        let n = tokens
            .next_u64("array length")
            .with_context(|| format!("test case {}", case + 1))?;
        let k = tokens
            .next_u64("replacement budget")
            .with_context(|| format!("test case {}", case + 1))?;

        // don't trust n for the allocation
        let mut values = Vec::with_capacity(n.min(1 << 16) as usize);
        for i in 0..n {
            let value = tokens
                .next_u32("array value")
                .with_context(|| format!("test case {}, element {}", case + 1, i + 1))?;
            values.push(value);
        }
        cases.push(TestCase { k, values });
    }

    let extra = tokens.remaining();
    if extra > 0 {
        warn!(extra, "ignoring tokens after the last test case");
    }
    Ok(cases)
}
