use criterion::{criterion_group, criterion_main, Criterion};
use std::io::{BufRead, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

struct Runner {
    child: std::process::Child,
    stdin: std::io::BufWriter<std::process::ChildStdin>,
    stdout: std::io::BufReader<std::process::ChildStdout>,
}

impl Runner {
    fn spawn(bin: &str, limit: u32) -> Self {
        let mut child = Command::new(bin)
            .arg("--server")
            .arg("--limit")
            .arg(limit.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn failed");
        let stdin = std::io::BufWriter::new(child.stdin.take().unwrap());
        let stdout = std::io::BufReader::new(child.stdout.take().unwrap());
        Self {
            child,
            stdin,
            stdout,
        }
    }
    fn send(&mut self, line: &str) {
        writeln!(self.stdin, "{line}").unwrap();
        self.stdin.flush().unwrap();
    }
    fn read_line(&mut self) -> String {
        let mut s = String::new();
        self.stdout.read_line(&mut s).unwrap();
        s
    }
    fn warmup(&mut self, max: u32) {
        self.send(&format!("WARMUP {max}"));
        assert!(self.read_line().starts_with("OK"));
    }
    // Returns (cost, nanos spent inside the solver).
    fn case(&mut self, line: &str) -> (u64, u64) {
        self.send(line);
        let reply = self.read_line();
        let parts: Vec<_> = reply.split_whitespace().collect();
        assert!(parts.len() >= 3 && parts[0] == "OK", "bad reply {reply:?}");
        (parts[1].parse().unwrap(), parts[2].parse().unwrap())
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.send("QUIT");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn case_line(k: u64, values: impl IntoIterator<Item = u32>) -> String {
    let mut line = format!("CASE {k}");
    for value in values {
        line.push(' ');
        line.push_str(&value.to_string());
    }
    line
}

fn bench_servered(c: &mut Criterion, name: &str, bin: &str, limit: u32, warm: u32, line: &str) {
    let mut r = Runner::spawn(bin, limit);

    // fill the memo below `warm`; not measured
    r.warmup(warm);

    c.bench_function(name, |b| {
        b.iter_custom(|iters| {
            let mut nanos = 0u64;
            for _ in 0..iters {
                nanos += r.case(line).1;
            }
            Duration::from_nanos(nanos)
        })
    });
}

pub fn benches(c: &mut Criterion) {
    let bin = "../target/release/minimize-again";
    let limit = 10_000_000;

    let top = case_line(1_000, (limit - 10_000)..=limit);
    let mixed = case_line(
        0,
        (0..10_000u32).map(|i| 2 + i.wrapping_mul(2_654_435_761) % (limit - 1)),
    );

    bench_servered(c, "top 10k values, k=1000", bin, limit, 1_000, &top);
    bench_servered(c, "scattered 10k values, k=0", bin, limit, 1_000, &mixed);
}

criterion_group! {
    name = benches_group;
    config = Criterion::default()
        .sample_size(100)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(10));
    targets = benches
}

criterion_main!(benches_group);
