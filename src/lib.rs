//! Lingobot - Multilingual terminal chatbot library
//!
//! This library provides the core functionality for Lingobot, a REPL that
//! detects the language of each input, classifies it with that language's
//! intent model, and answers through a registry of subject handlers.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `controller`: The read-process-print loop and shutdown sequence
//! - `session`: Per-user counters, session boundaries and persistence
//! - `sanitizer`: Input cleaning before classification
//! - `nlu`: Language detection, selection and intent classification
//! - `responses`: Routing of classifier results to replies
//! - `commands`: Local `:x` commands handled by the REPL itself
//! - `display`: Styled terminal output
//! - `config`: Configuration management and validation
//! - `logging`: Tracing setup with a runtime-adjustable level
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use lingobot::{ClassificationPipeline, Config, Controller, Dispatcher, LogControl, Screen};
//! use lingobot::nlu::WhatlangDetector;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/lingobot.toml")?;
//!     config.validate()?;
//!
//!     let pipeline =
//!         ClassificationPipeline::from_config(&config, Box::new(WhatlangDetector::default()))?;
//!     let mut controller = Controller::new(
//!         &config,
//!         pipeline,
//!         Dispatcher::with_default_subjects(),
//!         Screen::stdout(),
//!         LogControl::disabled(),
//!     );
//!     controller.greet()?;
//!     std::process::exit(controller.run()?);
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod logging;
pub mod nlu;
pub mod responses;
pub mod sanitizer;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Controller, DisplayFlags, ExitReason, Flow};
pub use display::Screen;
pub use error::{LingobotError, Result};
pub use logging::{LogControl, LogLevel};
pub use nlu::ClassificationPipeline;
pub use responses::Dispatcher;

#[cfg(test)]
pub mod test_utils;
