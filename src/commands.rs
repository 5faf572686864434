//! Local REPL commands
//!
//! Commands are a colon followed by a single character and are matched
//! case-insensitively. They are handled by the REPL itself and never reach
//! the classifier:
//!
//! - `:q` quit
//! - `:l` toggle language display
//! - `:u` toggle user stats display
//! - `:s` toggle parse detail display
//! - `:h` toggle entity highlight display
//! - `:c` clear the screen
//! - `:d` / `:i` / `:w` set log level to DEBUG / INFO / WARN
//! - `:1` / `:2` / `:3` select a quick-reply choice

use crate::logging::LogLevel;
use crate::session::QUICK_REPLY_LIMIT;

/// A command handled locally by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    /// Shut down
    Quit,
    /// Show or hide detected languages
    ToggleLanguage,
    /// Show or hide user interaction counters
    ToggleUserStats,
    /// Show or hide raw classifier output
    ToggleParse,
    /// Show or hide intent and highlighted entities
    ToggleHighlight,
    /// Clear the terminal
    ClearScreen,
    /// Change log verbosity
    SetLogLevel(LogLevel),
    /// Pick an offered quick-reply, 1-based
    SelectQuickReply(usize),
}

/// Parse a line as a local command
///
/// # Returns
///
/// `None` if the line is not a local command and should be classified.
///
/// # Examples
///
/// ```
/// use lingobot::commands::{parse_local_command, LocalCommand};
/// use lingobot::logging::LogLevel;
///
/// assert_eq!(parse_local_command(":Q"), Some(LocalCommand::Quit));
/// assert_eq!(parse_local_command(":d"), Some(LocalCommand::SetLogLevel(LogLevel::Debug)));
/// assert_eq!(parse_local_command(":2"), Some(LocalCommand::SelectQuickReply(2)));
/// assert_eq!(parse_local_command("tell me about physics"), None);
/// ```
pub fn parse_local_command(input: &str) -> Option<LocalCommand> {
    let lower = input.trim().to_lowercase();
    let command = match lower.as_str() {
        ":q" => LocalCommand::Quit,
        ":l" => LocalCommand::ToggleLanguage,
        ":u" => LocalCommand::ToggleUserStats,
        ":s" => LocalCommand::ToggleParse,
        ":h" => LocalCommand::ToggleHighlight,
        ":c" => LocalCommand::ClearScreen,
        ":d" => LocalCommand::SetLogLevel(LogLevel::Debug),
        ":i" => LocalCommand::SetLogLevel(LogLevel::Info),
        ":w" => LocalCommand::SetLogLevel(LogLevel::Warn),
        other => {
            let index: usize = other.strip_prefix(':')?.parse().ok()?;
            if (1..=QUICK_REPLY_LIMIT).contains(&index) {
                LocalCommand::SelectQuickReply(index)
            } else {
                return None;
            }
        }
    };
    Some(command)
}
