use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use caltrain_board::board::{MergeError, StationDirectory, reconcile, render};
use caltrain_board::cache::{CacheConfig, CachedSiriClient};
use caltrain_board::siri::{ReplayClient, SiriClient, SiriConfig, SiriError};

const USAGE: &str =
    "usage: caltrain-board [FILTER] [--replay DIR] [--capture DIR] [--watch SECS]";

/// Errors from one board refresh cycle.
#[derive(Debug, thiserror::Error)]
enum CycleError {
    #[error(transparent)]
    Feed(#[from] SiriError),
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Command-line options, parsed by hand.
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Only render stations whose name contains this substring.
    filter: Option<String>,
    /// Load a captured snapshot instead of hitting the network.
    replay: Option<PathBuf>,
    /// Dump raw response bodies into this directory.
    capture: Option<PathBuf>,
    /// Re-fetch and re-render on this interval.
    watch: Option<u64>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--replay" => {
                    let dir = args.next().ok_or("--replay needs a directory")?;
                    options.replay = Some(PathBuf::from(dir));
                }
                "--capture" => {
                    let dir = args.next().ok_or("--capture needs a directory")?;
                    options.capture = Some(PathBuf::from(dir));
                }
                "--watch" => {
                    let secs = args.next().ok_or("--watch needs an interval in seconds")?;
                    let secs = secs
                        .parse::<u64>()
                        .map_err(|_| format!("invalid --watch interval: {secs}"))?;
                    options.watch = Some(secs);
                }
                flag if flag.starts_with("--") => return Err(format!("unknown option: {flag}")),
                name => {
                    if options.filter.is_some() {
                        return Err("at most one station filter is accepted".to_string());
                    }
                    options.filter = Some(name.to_string());
                }
            }
        }

        Ok(options)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if let Some(dir) = &options.replay {
        return run_replay(dir, options.filter.as_deref());
    }

    let api_key = match std::env::var("TRANSIT_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            eprintln!("TRANSIT_API_KEY not set; request a key at https://511.org/open-data/token");
            return ExitCode::FAILURE;
        }
    };
    let agency = std::env::var("TRANSIT_AGENCY").unwrap_or_else(|_| "CT".to_string());

    let mut config = SiriConfig::new(api_key).with_agency(agency);
    if let Some(dir) = &options.capture {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("cannot create capture directory {}: {e}", dir.display());
            return ExitCode::FAILURE;
        }
        config = config.with_capture_dir(dir);
    }

    let client = match SiriClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to create 511 client: {e}");
            return ExitCode::FAILURE;
        }
    };
    let client = CachedSiriClient::new(client, &CacheConfig::default());

    // The directory is built once; merge cycles only repopulate its trains.
    let stations = match client.fetch_stations().await {
        Ok(stations) => stations,
        Err(e) => {
            eprintln!("failed to fetch stations: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut directory = StationDirectory::build(&stations);
    if directory.is_empty() {
        eprintln!("station feed produced no usable stations");
        return ExitCode::FAILURE;
    }
    tracing::info!(stations = directory.len(), "loaded station directory");

    match options.watch {
        None => match refresh(&client, &mut directory, options.filter.as_deref()).await {
            Ok(report) => {
                println!("{report}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("refresh failed: {e}");
                ExitCode::FAILURE
            }
        },
        Some(secs) => {
            let mut interval = tokio::time::interval(Duration::from_secs(secs.max(1)));
            loop {
                interval.tick().await;
                match refresh(&client, &mut directory, options.filter.as_deref()).await {
                    Ok(report) => println!("{report}\n"),
                    Err(e) => eprintln!("refresh failed: {e}"),
                }
            }
        }
    }
}

/// Run one merge cycle and render the board.
async fn refresh(
    client: &CachedSiriClient,
    directory: &mut StationDirectory,
    filter: Option<&str>,
) -> Result<String, CycleError> {
    let (scheduled, vehicles) =
        futures::try_join!(client.fetch_scheduled(), client.fetch_vehicles())?;
    reconcile(directory, &scheduled, &vehicles)?;
    Ok(render(directory, filter))
}

/// Render one board from a captured snapshot.
fn run_replay(dir: &Path, filter: Option<&str>) -> ExitCode {
    let snapshot = match ReplayClient::new(dir).load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("replay failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut directory = StationDirectory::build(&snapshot.stations);
    match reconcile(&mut directory, &snapshot.scheduled, &snapshot.vehicles) {
        Ok(()) => {
            println!("{}", render(&directory, filter));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("merge failed: {e}");
            ExitCode::FAILURE
        }
    }
}
