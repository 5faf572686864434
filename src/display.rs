//! Styled terminal output
//!
//! All user-facing output goes through [`Screen`], which writes to any
//! `io::Write` so tests can capture it in a `Vec<u8>`.

use crate::error::Result;
use crate::nlu::EntitySpan;
use crate::session::UserProfile;
use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use std::io::{self, Write};

/// Clear the terminal and move the cursor home, for writers without a line
/// editor in front of them
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Wrap every entity span of `text` using `mark`
///
/// Offsets are character offsets; spans must be ordered and
/// non-overlapping. Spans that run past the text are clamped.
///
/// # Examples
///
/// ```
/// use lingobot::display::mark_spans;
/// use lingobot::nlu::EntitySpan;
///
/// let spans = vec![EntitySpan {
///     start: 6,
///     end: 11,
///     entity: "planet".to_string(),
///     value: "Earth".to_string(),
///     extractor: None,
/// }];
/// assert_eq!(mark_spans("Hello Earth!", &spans, |s| format!("[{}]", s)), "Hello [Earth]!");
/// ```
pub fn mark_spans(text: &str, spans: &[EntitySpan], mark: impl Fn(&str) -> String) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for span in spans {
        let start = span.start.clamp(cursor, chars.len());
        let end = span.end.clamp(start, chars.len());
        output.extend(&chars[cursor..start]);
        let marked: String = chars[start..end].iter().collect();
        output.push_str(&mark(&marked));
        cursor = end;
    }
    output.extend(&chars[cursor..]);
    output
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn local_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| {
        t.with_timezone(&Local)
            .format("%Y-%b-%d %H:%M:%S")
            .to_string()
    })
    .unwrap_or_else(|| "None".to_string())
}

/// Output facility for the REPL
#[derive(Debug)]
pub struct Screen<W: Write> {
    out: W,
}

impl Screen<io::Stdout> {
    /// Screen writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Screen<W> {
    /// Screen writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Prompt shown by the line editor
    pub fn prompt() -> String {
        format!("{} ", " > ".bright_yellow().bold())
    }

    /// A bot reply to `user_id`, followed by any quick-reply buttons
    pub fn say(&mut self, user_id: &str, text: &str, quick_replies: &[String]) -> Result<()> {
        writeln!(
            self.out,
            "\n\t{}\t{}\n",
            format!("  User: {}  ", user_id).white().on_blue().bold(),
            format!("  {}  ", text).white().on_magenta().bold()
        )?;
        if !quick_replies.is_empty() {
            let buttons: Vec<String> = quick_replies
                .iter()
                .enumerate()
                .map(|(idx, choice)| format!("[{}] {}", idx + 1, choice))
                .collect();
            writeln!(self.out, "\t\t\t{}\n", buttons.join("\t"))?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Echo a quick-reply selection as if it had been typed
    pub fn echo(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "\n\t\t{} {}", " > ".bright_yellow().bold(), text)?;
        Ok(())
    }

    /// A screen-only notice about settings or processing details
    pub fn settings(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text.bright_green())?;
        Ok(())
    }

    /// Announce a toggled display flag
    pub fn toggled(&mut self, label: &str, flag: bool) -> Result<()> {
        self.settings(&format!("{}: {}", label, on_off(flag)))
    }

    /// The user's interaction counters
    pub fn user_stats(&mut self, profile: &UserProfile) -> Result<()> {
        let label = |s: &str| s.bright_cyan().to_string();
        let data = |s: String| s.white().bold().to_string();
        writeln!(
            self.out,
            "\n\t{} {}\t{} {}\t{} {}\t{} {}\n\t{} {}\n",
            label("Input counter:"),
            data(profile.input_counter.to_string()),
            label("Session counter:"),
            data(profile.session_counter.to_string()),
            label("Total sessions:"),
            data(profile.total_sessions.to_string()),
            label("Last interaction time:"),
            data(local_time(profile.last_interaction_time)),
            label("This interaction time:"),
            data(local_time(profile.this_interaction_time)),
        )?;
        Ok(())
    }

    /// Intent name followed by the text with entities highlighted
    pub fn highlight(&mut self, intent: &str, text: &str, entities: &[EntitySpan]) -> Result<()> {
        let highlighted = mark_spans(text, entities, |s| s.black().on_yellow().to_string());
        writeln!(
            self.out,
            "\n\t {}\t{}",
            intent.bright_cyan(),
            highlighted.bright_green()
        )?;
        Ok(())
    }

    /// Clear the terminal
    pub fn clear(&mut self) -> Result<()> {
        write!(self.out, "{}", CLEAR_SCREEN)?;
        self.out.flush()?;
        Ok(())
    }
}
