//! The interactive session controller
//!
//! Owns every piece of mutable state: the profile store, display flags and
//! the last classification. Each line read from the editor is either a local
//! command or an utterance; utterances update the user's counters, go
//! through the classification pipeline, and are answered by the dispatcher.
//!
//! Ctrl-C at the prompt arrives as `ReadlineError::Interrupted` from the
//! blocking read, which is the only point where the loop waits. The loop
//! then runs the same shutdown sequence as `:q`, with exit code 130.

use crate::commands::{parse_local_command, LocalCommand};
use crate::config::{Config, LanguagesConfig};
use crate::display::Screen;
use crate::error::Result;
use crate::logging::{LogControl, LogLevel};
use crate::nlu::{ClassificationPipeline, ClassifierResult};
use crate::responses::{Dispatcher, Reply, ReplyContext, Route};
use crate::sanitizer;
use crate::session::{ProfileFile, SessionStore};
use chrono::{DateTime, Duration, Utc};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::path::PathBuf;

/// Exit code used when the session ends with Ctrl-C
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// What the loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Shut down
    Quit,
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `:q` or end of input
    Quit,
    /// Ctrl-C at the prompt
    Interrupted,
    /// An unrecoverable error while running
    Error,
}

impl ExitReason {
    /// Process exit code for this reason
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Quit => 0,
            Self::Interrupted => INTERRUPTED_EXIT_CODE,
            Self::Error => 1,
        }
    }
}

/// Optional details shown alongside replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    /// Detected and selected language
    pub show_language: bool,
    /// User interaction counters
    pub show_user_stats: bool,
    /// Raw classifier output
    pub show_parse: bool,
    /// Intent and highlighted entities
    pub show_highlight: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_language: true,
            show_user_stats: false,
            show_parse: false,
            show_highlight: false,
        }
    }
}

/// Read-process-print loop and user bookkeeping
pub struct Controller<W: Write> {
    bot_name: String,
    bot_subject: String,
    user_id: String,
    session_timeout: Duration,
    languages: LanguagesConfig,
    history_file: PathBuf,
    profile_file: ProfileFile,
    store: SessionStore,
    pipeline: ClassificationPipeline,
    dispatcher: Dispatcher,
    screen: Screen<W>,
    log: LogControl,
    flags: DisplayFlags,
    last_input: Option<ClassifierResult>,
}

impl<W: Write> Controller<W> {
    /// Build a controller, loading persisted profiles
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `pipeline` - Classification pipeline with every language loaded
    /// * `dispatcher` - Intent to reply mapping
    /// * `screen` - Where output goes
    /// * `log` - Runtime log level control
    pub fn new(
        config: &Config,
        pipeline: ClassificationPipeline,
        dispatcher: Dispatcher,
        screen: Screen<W>,
        log: LogControl,
    ) -> Self {
        let profile_file = ProfileFile::new(config.files.profile_file.clone());
        let store = SessionStore::from_profiles(
            profile_file.load(),
            config.languages.default.clone(),
        );

        Self {
            bot_name: config.bot.name.clone(),
            bot_subject: config.bot.subject.clone(),
            user_id: config.session.user_id.clone(),
            session_timeout: config.session.timeout(),
            languages: config.languages.clone(),
            history_file: config.files.history_file.clone(),
            profile_file,
            store,
            pipeline,
            dispatcher,
            screen,
            log,
            flags: DisplayFlags::default(),
            last_input: None,
        }
    }

    /// Current display flags
    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    /// Replace the display flags
    pub fn set_flags(&mut self, flags: DisplayFlags) {
        self.flags = flags;
    }

    /// Profile store
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Output facility
    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    /// Most recent classifier result
    pub fn last_input(&self) -> Option<&ClassifierResult> {
        self.last_input.as_ref()
    }

    /// Greet the user and list the languages that can be handled
    pub fn greet(&mut self) -> Result<()> {
        let names: Vec<&str> = self
            .pipeline
            .languages()
            .into_iter()
            .map(|code| self.languages.display_name(code))
            .collect();
        tracing::info!("{} ready to talk about {}", self.bot_name, self.bot_subject);
        let text = format!("Hello! I am configured to handle: {}", names.join(", "));
        self.say(Reply::text(text))?;

        if self.flags.show_user_stats {
            let profile = self.store.get_or_create(&self.user_id);
            self.screen.user_stats(profile)?;
        }
        Ok(())
    }

    /// Run the loop until quit, end of input or Ctrl-C
    ///
    /// # Returns
    ///
    /// The process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error only if the line editor cannot be created.
    pub fn run(&mut self) -> Result<i32> {
        let mut editor = DefaultEditor::new()?;
        if self.history_file.exists() {
            if let Err(e) = editor.load_history(&self.history_file) {
                tracing::warn!("Problem reading input history: {}", e);
            }
        }

        let prompt = Screen::<W>::prompt();
        let reason = loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    let handled = if parse_local_command(&line) == Some(LocalCommand::ClearScreen) {
                        self.clear_screen(&mut editor)
                    } else {
                        self.handle_line(&line)
                    };
                    match handled {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => break ExitReason::Quit,
                        Err(e) => {
                            tracing::error!("Unrecoverable error handling input: {:#}", e);
                            break ExitReason::Error;
                        }
                    }
                }
                Err(e) => break exit_reason_for(&e),
            }
        };

        Ok(self.finish(reason, Some(&mut editor)))
    }

    fn clear_screen(&mut self, editor: &mut DefaultEditor) -> Result<Flow> {
        if let Err(e) = editor.clear_screen() {
            tracing::debug!("Editor could not clear the screen: {}", e);
            self.screen.clear()?;
        }
        Ok(Flow::Continue)
    }

    fn save_history(&self, editor: &mut DefaultEditor) {
        if let Some(parent) = self.history_file.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!("Problem creating {}: {}", parent.display(), e);
                }
            }
        }
        if let Err(e) = editor.save_history(&self.history_file) {
            tracing::warn!("Problem writing input history: {}", e);
        }
    }

    /// Persist profiles and report the end of the session
    ///
    /// # Returns
    ///
    /// The process exit code for `reason`.
    pub fn shutdown(&mut self, reason: ExitReason) -> i32 {
        self.finish(reason, None)
    }

    fn finish(&mut self, reason: ExitReason, editor: Option<&mut DefaultEditor>) -> i32 {
        self.profile_file.save(self.store.profiles());
        if let Some(editor) = editor {
            self.save_history(editor);
        }
        if self.log.is_enabled() {
            tracing::warn!("Ending script execution now");
        } else {
            eprintln!("Ending script execution now\n(logger was not found.)");
        }
        reason.exit_code()
    }

    /// Handle one line read at the current time
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        self.handle_line_at(line, Utc::now())
    }

    /// Handle one line as if read at `now`
    ///
    /// # Errors
    ///
    /// Returns an error only when output cannot be written.
    pub fn handle_line_at(&mut self, line: &str, now: DateTime<Utc>) -> Result<Flow> {
        if let Some(command) = parse_local_command(line) {
            return self.run_command(command);
        }

        let profile = self.store.get_or_create(&self.user_id);
        if profile.record_interaction(now, self.session_timeout) {
            tracing::debug!("New session started for user {}", self.user_id);
        }
        if self.flags.show_user_stats {
            self.screen.user_stats(profile)?;
        }

        self.process_input(line, None)?;
        Ok(Flow::Continue)
    }

    fn run_command(&mut self, command: LocalCommand) -> Result<Flow> {
        match command {
            LocalCommand::Quit => {
                self.screen.say(&self.user_id, "Okay.  Goodbye!", &[])?;
                return Ok(Flow::Quit);
            }
            LocalCommand::ToggleLanguage => {
                self.flags.show_language = !self.flags.show_language;
                self.screen
                    .toggled("Show_language", self.flags.show_language)?;
            }
            LocalCommand::ToggleUserStats => {
                self.flags.show_user_stats = !self.flags.show_user_stats;
                self.screen.toggled("User stats", self.flags.show_user_stats)?;
            }
            LocalCommand::ToggleParse => {
                self.flags.show_parse = !self.flags.show_parse;
                self.screen.toggled("Show_parse", self.flags.show_parse)?;
            }
            LocalCommand::ToggleHighlight => {
                self.flags.show_highlight = !self.flags.show_highlight;
                self.screen
                    .toggled("Show_highlight", self.flags.show_highlight)?;
            }
            LocalCommand::ClearScreen => self.screen.clear()?,
            LocalCommand::SetLogLevel(level) => self.set_log_level(level)?,
            LocalCommand::SelectQuickReply(index) => self.select_quick_reply(index)?,
        }
        Ok(Flow::Continue)
    }

    fn set_log_level(&mut self, level: LogLevel) -> Result<()> {
        match self.log.set_level(level) {
            Ok(()) if level == LogLevel::Warn => tracing::warn!("Logging level set to {}", level),
            Ok(()) => tracing::info!("Logging level set to {}", level),
            Err(e) => self
                .screen
                .settings(&format!("Unable to set logging level to {}: {}", level, e))?,
        }
        Ok(())
    }

    fn select_quick_reply(&mut self, index: usize) -> Result<()> {
        let profile = self.store.get_or_create(&self.user_id);
        let choice = profile.quick_reply(index).map(str::to_string);
        let language = profile.quick_reply_language().map(str::to_string);

        match choice {
            Some(choice) => {
                tracing::debug!("User selected quick-reply {} ({})", index, choice);
                self.screen.echo(&choice)?;
                self.process_input(&choice, language.as_deref())
            }
            None => self.screen.settings("Invalid choice"),
        }
    }

    /// Classify and answer `input`; a known `language` skips detection
    fn process_input(&mut self, input: &str, language: Option<&str>) -> Result<()> {
        tracing::debug!("User input:  {}", input);
        let cleaned = sanitizer::clean(input);
        tracing::debug!("Clean input: {}", cleaned);

        let classification = match language {
            Some(language) => self.pipeline.classify_in(&cleaned, language),
            None => self.pipeline.classify(&cleaned),
        };
        let route = match classification {
            None => {
                tracing::debug!("Skipping empty input");
                Route::EmptyInput
            }
            Some(classification) => {
                if self.flags.show_language {
                    let detected: Vec<String> = classification
                        .candidates
                        .iter()
                        .map(|c| c.to_string())
                        .collect();
                    self.screen.settings(&format!(
                        "\tLanguages detected: [{}]",
                        detected.join(", ")
                    ))?;
                    self.screen.settings(&format!(
                        "\tProcessing as {}",
                        self.languages.display_name(&classification.language)
                    ))?;
                }
                self.store.get_or_create(&self.user_id).lang_selected =
                    classification.language.clone();

                let result = classification.result;
                if self.flags.show_parse {
                    let parse = serde_json::to_string_pretty(&result)?;
                    self.screen
                        .settings(&format!("\tParse output:\n{}", parse))?;
                }
                if self.flags.show_highlight {
                    self.screen.highlight(
                        result.intent_name().unwrap_or("None"),
                        &result.text,
                        &result.entities,
                    )?;
                }

                let route = self.dispatcher.route(&result);
                tracing::debug!("Routing to {}", route);
                self.last_input = Some(result);
                route
            }
        };

        let profile = self.store.get_or_create(&self.user_id);
        let ctx = ReplyContext {
            session_counter: profile.session_counter,
            language: self.languages.display_name(&profile.lang_selected),
        };
        let reply = self.dispatcher.respond(&route, &ctx);
        self.say(reply)
    }

    fn say(&mut self, reply: Reply) -> Result<()> {
        let profile = self.store.get_or_create(&self.user_id);
        let dropped = profile.offer_quick_replies(reply.quick_replies, reply.quick_reply_language);
        if dropped > 0 {
            tracing::warn!(
                "No more than {} quick-replies can be displayed ({} dropped)",
                crate::session::QUICK_REPLY_LIMIT,
                dropped
            );
        }
        if !profile.current_buttons.is_empty() {
            tracing::debug!("User quick-reply choices: {:?}", profile.current_buttons);
        }
        profile.msg_output = reply.text;

        self.screen
            .say(&self.user_id, &profile.msg_output, &profile.current_buttons)
    }
}

fn exit_reason_for(error: &ReadlineError) -> ExitReason {
    match error {
        ReadlineError::Interrupted => ExitReason::Interrupted,
        ReadlineError::Eof => ExitReason::Quit,
        other => {
            tracing::error!("Problem reading input: {}", other);
            ExitReason::Error
        }
    }
}
