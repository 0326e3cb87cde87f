use clap::Parser;
use shapecam_cv::FrameAnnotator;

mod capture;
mod cli;
mod config;
mod display;
mod session;

#[cfg(feature = "camera")]
mod camera;

use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config = AppConfig::load(cli.config.as_deref())?;
    let annotator = FrameAnnotator::from_config(config.classifier.clone())?;
    log::info!("Templates: {:?}", annotator.config().templates.names());

    match cli.command {
        Commands::Replay { input, out, keys } => {
            cli::replay(&config, &annotator, input, out, &keys)?;
        }
        Commands::Classify {
            image,
            roi,
            json,
            mask,
            out,
        } => {
            let result = cli::classify(&config, &annotator, image, roi, json, mask, out)?;
            println!("{}", result.label);
        }
        #[cfg(feature = "camera")]
        Commands::Camera { device } => {
            camera::run(&config, &annotator, device)?;
        }
    }

    Ok(())
}

fn setup_logging(level: &str) -> anyhow::Result<()> {
    simple_log::console(level).map_err(anyhow::Error::msg)
}
