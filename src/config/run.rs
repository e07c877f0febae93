use crate::engine::WorkerTopology;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration for the sharpen demo.
///
/// Loadable from a JSON file (all knobs optional except the paths) or
/// assembled from CLI flags; flags override file values.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(rename = "output")]
    pub output: PathBuf,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_center")]
    pub center_weight: i32,
    #[serde(default)]
    pub isolated: bool,
    #[serde(default)]
    pub bench_workers: Vec<usize>,
    #[serde(default)]
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    1
}

fn default_center() -> i32 {
    5
}

impl RunConfig {
    pub fn topology(&self) -> WorkerTopology {
        if self.isolated {
            WorkerTopology::Isolated
        } else {
            WorkerTopology::Colocated
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <input.bmp> <output.bmp> [options]\n\
         \n\
         Options:\n\
         \x20 --workers N         worker count (default 1)\n\
         \x20 --center W          sharpen kernel center weight (default 5)\n\
         \x20 --isolated          ship pixel windows over channels instead of sharing memory\n\
         \x20 --bench N,N,...     run each worker count over the same input and compare outputs\n\
         \x20 --report PATH       write timing report(s) as JSON\n\
         \x20 --config PATH       load a JSON config file (flags override it)\n\
         \x20 --verbose           debug-level logging"
    )
}

/// Parse the demo CLI. `--config` loads a JSON file first; any flags and
/// positional paths given on the command line override the file.
pub fn parse_cli(program: &str) -> Result<RunConfig, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut workers: Option<usize> = None;
    let mut center: Option<i32> = None;
    let mut isolated = false;
    let mut bench: Option<Vec<usize>> = None;
    let mut report: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut verbose = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--workers" => workers = Some(parse_number(iter.next(), "--workers")?),
            "--center" => center = Some(parse_number(iter.next(), "--center")?),
            "--isolated" => isolated = true,
            "--bench" => bench = Some(parse_worker_list(iter.next(), "--bench")?),
            "--report" => report = Some(required_path(iter.next(), "--report")?),
            "--config" => config_path = Some(required_path(iter.next(), "--config")?),
            "--verbose" => verbose = true,
            "--help" | "-h" => return Err(usage(program)),
            other if other.starts_with("--") => {
                return Err(format!("Unknown flag {other}\n\n{}", usage(program)));
            }
            other => {
                if input.is_none() {
                    input = Some(PathBuf::from(other));
                } else if output.is_none() {
                    output = Some(PathBuf::from(other));
                } else {
                    return Err(format!(
                        "Unexpected argument {other}\n\n{}",
                        usage(program)
                    ));
                }
            }
        }
    }

    let mut config = match &config_path {
        Some(path) => load_config(path)?,
        None => RunConfig {
            input: input.clone().ok_or_else(|| usage(program))?,
            output: output.clone().ok_or_else(|| usage(program))?,
            workers: default_workers(),
            center_weight: default_center(),
            isolated: false,
            bench_workers: Vec::new(),
            report: None,
            verbose: false,
        },
    };

    if let Some(path) = input {
        config.input = path;
    }
    if let Some(path) = output {
        config.output = path;
    }
    if let Some(n) = workers {
        config.workers = n;
    }
    if let Some(w) = center {
        config.center_weight = w;
    }
    if isolated {
        config.isolated = true;
    }
    if let Some(list) = bench {
        config.bench_workers = list;
    }
    if let Some(path) = report {
        config.report = Some(path);
    }
    if verbose {
        config.verbose = true;
    }
    Ok(config)
}

fn required_path(value: Option<&String>, flag: &str) -> Result<PathBuf, String> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| format!("{flag} requires a path argument"))
}

fn parse_number<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T, String> {
    let raw = value.ok_or_else(|| format!("{flag} requires a numeric argument"))?;
    raw.parse()
        .map_err(|_| format!("{flag}: invalid number '{raw}'"))
}

fn parse_worker_list(value: Option<&String>, flag: &str) -> Result<Vec<usize>, String> {
    let raw = value.ok_or_else(|| format!("{flag} requires a comma-separated list"))?;
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| format!("{flag}: invalid worker count '{part}'"))
        })
        .collect()
}
