//! Terminal front end: races the six sorts on one input and prints the rankings.
//!
//! Hand-rolled argument parsing, the grammar is small enough.
//!
//! ```text
//! sort-race [VALUES] [--random] [--delay <dur>] [--timeout <dur>] [--config <path>]
//! sort-race trace <algorithm> [VALUES]
//! sort-race --print-config
//! sort-race --help | -h
//! ```

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use log::debug;

use sort_race::config::Config;
use sort_race::input::{self, format_values};
use sort_race::probe::{Event, Trace};
use sort_race::{Algorithm, Batch, Coordinator, EngineError, RunStatus};

enum Command {
    Race(RaceArgs),
    Trace {
        algorithm: String,
        values: Option<String>,
    },
    PrintConfig,
    Help,
}

#[derive(Default)]
struct RaceArgs {
    values: Option<String>,
    random: bool,
    delay: Option<String>,
    timeout: Option<String>,
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = match parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            print_usage();
            return ExitCode::from(2);
        }
    };

    let result = match command {
        Command::Race(args) => race(args),
        Command::Trace { algorithm, values } => trace(&algorithm, values.as_deref()),
        Command::PrintConfig => {
            print!("{}", Config::default_toml());
            Ok(())
        }
        Command::Help => {
            print_usage();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }

            match err {
                EngineError::InvalidInput(_) | EngineError::UnknownAlgorithm(_) => {
                    ExitCode::from(2)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut race = RaceArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--print-config" => return Ok(Command::PrintConfig),
            "trace" if race.values.is_none() => {
                let algorithm = args
                    .next()
                    .ok_or_else(|| "trace expects an algorithm name".to_string())?;
                let values = args.next();
                if let Some(extra) = args.next() {
                    return Err(format!("unexpected argument '{extra}'"));
                }
                return Ok(Command::Trace { algorithm, values });
            }
            "--random" => race.random = true,
            "--delay" => race.delay = Some(flag_value(&mut args, "--delay")?),
            "--timeout" => race.timeout = Some(flag_value(&mut args, "--timeout")?),
            "--config" => race.config = Some(flag_value(&mut args, "--config")?.into()),
            flag if flag.starts_with("--") => return Err(format!("unknown flag '{flag}'")),
            _ if race.values.is_none() => race.values = Some(arg),
            _ => return Err(format!("unexpected argument '{arg}'")),
        }
    }

    if race.random && race.values.is_some() {
        return Err("--random cannot be combined with explicit values".into());
    }

    Ok(Command::Race(race))
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("{flag} expects a value"))
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  sort-race [VALUES] [--random] [--delay <dur>] [--timeout <dur>] [--config <path>]");
    eprintln!("  sort-race trace <algorithm> [VALUES]");
    eprintln!("  sort-race --print-config");
    eprintln!();
    eprintln!("VALUES is a comma-separated list of integers, e.g. 64,34,25,12.");
    eprintln!("Durations look like 50ms, 1.5s or 2m.");
    eprintln!("Algorithms: bubble, selection, insertion, merge, quick, heap.");
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, EngineError> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::discover()?.unwrap_or_default(),
    };
    Ok(config)
}

fn race(args: RaceArgs) -> Result<(), EngineError> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(delay) = args.delay {
        config.engine.pacing_delay = delay;
    }
    if args.timeout.is_some() {
        config.engine.timeout = args.timeout;
    }
    debug!("effective config: {config:?}");

    let values = if args.random {
        input::random_values(
            config.input.random_len,
            config.input.random_max,
            &mut rand::thread_rng(),
        )
    } else if let Some(text) = &args.values {
        input::parse_values(text)?
    } else {
        config.input.values.clone()
    };

    let coordinator = Coordinator::from_config(&config.engine)?;
    let refresh = config.engine.refresh_interval()?;
    let timeout = config.engine.timeout()?;

    println!("Input: {}", format_values(&values));
    let mut batch = coordinator.start_all(&values)?;
    let deadline = timeout.map(|timeout| Instant::now() + timeout);

    loop {
        match batch.await_completion_timeout(Some(refresh)) {
            Ok(rankings) => {
                let rankings = rankings.clone();
                print_status(&batch);
                println!("{rankings}");
                return Ok(());
            }
            Err(EngineError::RunTimedOut { .. }) => {
                print_status(&batch);

                if let (Some(deadline), Some(timeout)) = (deadline, timeout) {
                    if Instant::now() >= deadline {
                        batch.cancel();
                        return Err(EngineError::RunTimedOut {
                            waited: timeout,
                            pending: batch.pending(),
                        });
                    }
                }
            }
            Err(err) => return Err(err),
        }
    }
}

fn print_status(batch: &Batch) {
    println!();
    for run in batch.runs() {
        let snapshot = run.snapshot();

        let state = match snapshot.status {
            RunStatus::Pending => "pending".to_string(),
            RunStatus::Running => match snapshot.compare {
                Some((a, b)) => format!("comparing {a} and {b}"),
                None => "running".to_string(),
            },
            RunStatus::Completed { elapsed } => format!("completed in {}ms", elapsed.as_millis()),
            RunStatus::Cancelled => "cancelled".to_string(),
        };
        let boundary = snapshot
            .boundary
            .map_or_else(|| "-".to_string(), |b| b.to_string());

        println!(
            "  {:<15} {:<22} boundary {:>3}  comparisons {:>6}",
            run.algorithm().name(),
            state,
            boundary,
            snapshot.comparisons
        );
    }
}

fn trace(algorithm: &str, values: Option<&str>) -> Result<(), EngineError> {
    let algorithm: Algorithm = algorithm.parse()?;
    let mut values = match values {
        Some(text) => input::parse_values(text)?,
        None => Config::default().input.values,
    };

    println!("{algorithm} on {}", format_values(&values));

    let mut probe = Trace::new();
    // The trace probe never interrupts.
    if algorithm.sort(&mut values, &mut probe).is_err() {
        return Err(EngineError::Cancelled {
            pending: vec![algorithm],
        });
    }

    for event in probe.events() {
        match *event {
            Event::Compare(a, b) => println!("  compare  {a:>3} {b:>3}"),
            Event::Swap(a, b) => println!("  swap     {a:>3} {b:>3}"),
            Event::Boundary(i) => println!("  boundary {i:>3}"),
            Event::Write(i) => println!("  write    {i:>3}"),
        }
    }

    println!(
        "{} comparisons, {} swaps: {}",
        probe.compares().len(),
        probe.swap_count(),
        format_values(&values)
    );

    Ok(())
}
