//! Lingobot - Multilingual terminal chatbot
//!
#![doc = "Lingobot - Multilingual terminal chatbot"]
#![doc = "Main entry point for the Lingobot REPL."]

use anyhow::Result;

use lingobot::cli::{Channel, Cli};
use lingobot::config::Config;
use lingobot::controller::Controller;
use lingobot::display::Screen;
use lingobot::logging::{init_logging, LogControl, LogLevel};
use lingobot::nlu::{ClassificationPipeline, WhatlangDetector};
use lingobot::responses::Dispatcher;

fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    let (level, recognised) = LogLevel::from_cli(&cli.loglvl);
    let log = match init_logging(level) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("Unable to initialise logging: {:#}", e);
            LogControl::disabled()
        }
    };
    if !recognised {
        tracing::warn!(
            "Unrecognised log level value: {}. Defaulting to {}",
            cli.loglvl,
            level
        );
    }

    let code = match run(&cli, log) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli, log: LogControl) -> Result<i32> {
    let channel = Channel::parse_str(&cli.channel)?;
    tracing::debug!("Using channel: {}", channel);

    // Load configuration
    let config_path = cli.config_path();
    tracing::info!("Loading configuration from {}", config_path);
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    let pipeline =
        ClassificationPipeline::from_config(&config, Box::new(WhatlangDetector::default()))?;

    tracing::info!("Starting interactive session");
    let mut controller = Controller::new(
        &config,
        pipeline,
        Dispatcher::with_default_subjects(),
        Screen::stdout(),
        log,
    );
    controller.greet()?;
    controller.run()
}
