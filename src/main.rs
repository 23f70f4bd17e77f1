use std::env;
use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use snapcount::{
    AtomicSnapshot, Counter, CountingServer, DualScanSnapshot, MutexSnapshot, Reader, Server,
    Snapshot,
};

type GenericError = Box<dyn Error + Send + Sync>;

const USAGE: &str = "usage: counter-test <numTrials> <numIncs> <serverCount> [atomic|dual|mutex]";

/// The outcome of a single trial.
struct Trial {
    incs_per_ms: f64,
    reads_per_ms: f64,
}

fn parse(args: &[String], i: usize, name: &str) -> Result<usize, GenericError> {
    let arg = args.get(i).ok_or(USAGE)?;
    arg.parse()
        .map_err(|err| format!("invalid {name} {arg:?}: {err}\n{USAGE}").into())
}

/// Runs `servers` threads that each increment a fresh counter `incs` times,
/// while one more thread reads it until they are done.
fn run_trial<S>(incs: usize, servers: usize) -> Result<Trial, GenericError>
where
    S: Snapshot<Value = i32> + Send + Sync + 'static,
{
    let counter: Arc<Counter<S>> = Arc::new(Counter::new(servers + 1));
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let counter = counter.clone();
        let done = done.clone();
        thread::spawn(move || {
            let (mut reads, mut last, mut regressions) = (0_u64, 0, 0_u64);
            while !done.load(Ordering::Acquire) {
                let value = counter.read();
                if value < last {
                    regressions += 1;
                }
                last = value;
                reads += 1;
            }
            (reads, regressions)
        })
    };

    let start = Instant::now();
    let handles: Vec<_> = (0..servers)
        .map(|i| {
            let mut server = CountingServer::new(counter.clone(), i);
            thread::spawn(move || {
                for _ in 0..incs {
                    server.inc();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().map_err(|_| "server thread panicked")?;
    }
    done.store(true, Ordering::Release);
    let (reads, regressions) = reader.join().map_err(|_| "reader thread panicked")?;
    let ms = start.elapsed().as_secs_f64() * 1000.0;

    let expected = (incs * servers) as i64;
    let total = counter.read();
    if total != expected {
        return Err(format!("counter read {total} after {expected} increments").into());
    }
    if regressions > 0 {
        warn!(regressions, "reader observed the counter decreasing");
    }
    debug!(reads, ms, "trial finished");

    Ok(Trial {
        incs_per_ms: expected as f64 / ms,
        reads_per_ms: reads as f64 / ms,
    })
}

fn format_rates(rates: impl Iterator<Item = f64>) -> String {
    rates.map(|rate| format!(" {rate:.2}")).collect()
}

fn main() -> Result<(), GenericError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if !(3..=4).contains(&args.len()) {
        return Err(USAGE.into());
    }
    let trials = parse(&args, 0, "numTrials")?;
    let incs = parse(&args, 1, "numIncs")?;
    let servers = parse(&args, 2, "serverCount")?;
    let kind = args.get(3).map_or("atomic", String::as_str);
    if i32::try_from(incs).is_err() {
        return Err(format!("numIncs must be at most {}", i32::MAX).into());
    }

    let mut results = Vec::with_capacity(trials);
    for trial in 0..trials {
        let result = match kind {
            "atomic" => run_trial::<AtomicSnapshot>(incs, servers)?,
            "dual" => run_trial::<DualScanSnapshot>(incs, servers)?,
            "mutex" => run_trial::<MutexSnapshot>(incs, servers)?,
            other => return Err(format!("unknown snapshot {other:?}\n{USAGE}").into()),
        };
        info!(
            trial,
            incs_per_ms = result.incs_per_ms,
            reads_per_ms = result.reads_per_ms,
            "trial complete"
        );
        results.push(result);
    }

    println!(
        "{servers} servers, 1 readers :\n\tIncs/ms = [{} ]\n\tReads/ms = [{} ]",
        format_rates(results.iter().map(|r| r.incs_per_ms)),
        format_rates(results.iter().map(|r| r.reads_per_ms)),
    );
    Ok(())
}
