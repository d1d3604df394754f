// ffact -- print the prime factorization of N! without computing N!
//
// Usage: ffact [OPTIONS] [N]...
//        (reads values of N from stdin if no arguments given)

use std::io::{self, BufRead, BufWriter, Write};
use std::process;

use clap::Parser;
use num_bigint::BigUint;

use factorial_rs::common::reset_sigpipe;
use factorial_rs::count::CounterMode;
use factorial_rs::factorial::{
    DEFAULT_BUDGET, FactorialFactors, Factorization, FactorizeConfig, OutputMode, SegmentCount,
    factorize_factorial,
};

const TOOL_NAME: &str = "fact";

#[derive(Parser)]
#[command(
    name = "fact",
    about = "Print the prime factorization of N! without computing N!"
)]
struct Cli {
    /// Counting backend for the high range: enumerate, sublinear, or auto
    #[arg(long = "mode", value_name = "MODE", default_value = "auto")]
    mode: String,

    /// Print the aggregate segment table instead of one entry per prime
    #[arg(long = "aggregate")]
    aggregate: bool,

    /// Widest window the enumerative sieve may materialize
    #[arg(long = "budget", value_name = "N", default_value_t = DEFAULT_BUDGET)]
    budget: u64,

    /// Values of N to factor (reads from stdin if none given)
    numbers: Vec<String>,
}

fn parse_mode(s: &str) -> anyhow::Result<CounterMode> {
    match s {
        "enumerate" => Ok(CounterMode::Enumerate),
        "sublinear" => Ok(CounterMode::Sublinear),
        "auto" => Ok(CounterMode::Auto),
        other => anyhow::bail!("invalid mode {other:?} (expected enumerate, sublinear, or auto)"),
    }
}

/// "N! = 2^8 * 3^4 * 5^2 * 7^1 * 1" — the trailing 1 keeps the product form
/// well-defined even for 0! and 1!.
fn write_expanded(n: &BigUint, map: &Factorization, out: &mut impl Write) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    write!(out, "{n}! =")?;
    for (&p, e) in map {
        out.write_all(b" ")?;
        out.write_all(buf.format(p).as_bytes())?;
        write!(out, "^{e} *")?;
    }
    out.write_all(b" 1\n")
}

/// Aggregate table: the low-range mapping line, then one row per segment.
fn write_aggregate(
    n: &BigUint,
    low: &Factorization,
    high: &[SegmentCount],
    distinct: &BigUint,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    writeln!(out, "{n}!: {distinct} distinct prime factors")?;
    for (&p, e) in low {
        out.write_all(b"  ")?;
        out.write_all(buf.format(p).as_bytes())?;
        write!(out, "^{e}")?;
        out.write_all(b"\n")?;
    }
    for row in high {
        out.write_all(b"  e=")?;
        out.write_all(buf.format(row.exponent).as_bytes())?;
        out.write_all(b": ")?;
        out.write_all(buf.format(row.primes).as_bytes())?;
        out.write_all(b" primes in [")?;
        out.write_all(buf.format(row.lo).as_bytes())?;
        out.write_all(b", ")?;
        out.write_all(buf.format(row.hi).as_bytes())?;
        out.write_all(b"]\n")?;
    }
    Ok(())
}

/// Process a single token: parse N, factor N!, print. Returns true on success.
fn process_number(token: &str, cfg: &FactorizeConfig, out: &mut impl Write) -> bool {
    let n: BigUint = match token.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!(
                "{}: \u{2018}{}\u{2019} is not a valid non-negative integer",
                TOOL_NAME, token
            );
            return false;
        }
    };
    match factorize_factorial(&n, cfg) {
        Ok(FactorialFactors::Expanded(map)) => {
            if write_expanded(&n, &map, out).is_err() {
                // Broken pipe or write error; exit cleanly
                process::exit(0);
            }
            true
        }
        Ok(FactorialFactors::Aggregate {
            low,
            high,
            distinct_primes,
        }) => {
            if write_aggregate(&n, &low, &high, &distinct_primes, out).is_err() {
                process::exit(0);
            }
            true
        }
        Err(e) => {
            eprintln!("{TOOL_NAME}: {token}: {e}");
            false
        }
    }
}

fn main() {
    reset_sigpipe();
    let cli = Cli::parse();

    let counter = match parse_mode(&cli.mode) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{TOOL_NAME}: {e}");
            process::exit(1);
        }
    };
    let cfg = FactorizeConfig {
        counter,
        output: if cli.aggregate {
            OutputMode::Aggregate
        } else {
            OutputMode::Auto
        },
        budget: cli.budget,
        cancel: None,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut ok = true;

    if cli.numbers.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for token in line.split_whitespace() {
                ok &= process_number(token, &cfg, &mut out);
            }
        }
    } else {
        for token in &cli.numbers {
            ok &= process_number(token, &cfg, &mut out);
        }
    }

    if out.flush().is_err() {
        process::exit(0);
    }
    if !ok {
        process::exit(1);
    }
}
