use std::fs;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use rollout::config::RolloutConfig;
use rollout::io;
use rollout::io::cli::Cli;
use rollout::runner;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            RolloutConfig::default()
        }
        Some(config_file) => io::read_config(&config_file)?,
    };
    if let Some(seed) = args.seed {
        info!("[MAIN] PRNG seed overridden from the command line: {seed}");
        config.prng_seed = Some(seed);
    }

    info!("Successfully parsed RolloutConfig: {config:?}");

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!("could not create output folder: {:?}", args.output_folder)
        })?;
    }

    let output = runner::run(&config, &args.output_folder)?;
    io::write_json(&output, &args.output_folder.join(runner::REPORT_JSON))?;

    Ok(())
}
