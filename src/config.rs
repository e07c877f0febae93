//! Configuration for the demo binary: CLI flags and JSON config files.

pub mod run;

pub use self::run::{load_config, parse_cli, RunConfig};
