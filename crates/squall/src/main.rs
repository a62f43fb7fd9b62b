//! Squall CLI - synthesize adverse-weather variants of aerial imagery.
//!
//! For every image in a directory, Squall writes a rainy, a foggy and a
//! darkened copy into `<dir>/Augmented_Images`, named `rain_<file>`,
//! `fog_<file>` and `dark_<file>`.
//!
//! # Usage
//!
//! ```bash
//! # Augment a directory
//! squall augment "./Aerial/No Risk"
//!
//! # Reproducible run with only two effects, writing a report
//! squall augment ./tiles --seed 42 --effects rain,fog --report run.json
//!
//! # View configuration
//! squall config show
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod cli;
mod logging;

/// Squall - synthesize rain, fog and low-light variants of aerial imagery.
#[derive(Parser, Debug)]
#[command(name = "squall")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "SQUALL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Write rain, fog and low-light variants of every image in a directory
    Augment(cli::augment::AugmentArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

/// Load the config file named on the command line, or the default one.
pub(crate) fn load_config(path: Option<&Path>) -> Result<squall_core::Config, squall_core::ConfigError> {
    match path {
        Some(path) => squall_core::Config::load_from(&squall_core::config::expand_path(path)),
        None => squall_core::Config::load(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go straight to stderr.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default logging settings. Check your config file with `squall config path`."
            );
            squall_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Squall v{}", squall_core::VERSION);

    match cli.command {
        Commands::Augment(args) => cli::augment::execute(args, cli.config.as_deref()).await,
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cli::augment::EffectArg;

    #[test]
    fn parses_augment_with_effect_list() {
        let cli = Cli::try_parse_from([
            "squall",
            "augment",
            "/data/tiles",
            "--effects",
            "rain,dark",
            "--seed",
            "9",
        ])
        .unwrap();

        match cli.command {
            Commands::Augment(args) => {
                assert_eq!(args.input, PathBuf::from("/data/tiles"));
                assert_eq!(args.effects, vec![EffectArg::Rain, EffectArg::LowLight]);
                assert_eq!(args.seed, Some(9));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["squall", "config", "path", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn augment_requires_input() {
        assert!(Cli::try_parse_from(["squall", "augment"]).is_err());
    }
}
