//! Per-user profile record

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of quick-reply choices offered at once
pub const QUICK_REPLY_LIMIT: usize = 3;

/// Interaction counters and conversational state for one user
///
/// Every field has a serde default so profile files written by older
/// versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Text of the last reply sent to the user
    pub msg_output: String,

    /// Language code the last input was processed as
    pub lang_selected: String,

    /// Time of the interaction before the current one
    pub last_interaction_time: Option<DateTime<Utc>>,

    /// Time of the current interaction
    pub this_interaction_time: Option<DateTime<Utc>>,

    /// Inputs received over the lifetime of the profile
    pub input_counter: u64,

    /// Inputs received in the current session
    pub session_counter: u64,

    /// Sessions started after the first one
    pub total_sessions: u64,

    /// Quick-reply choices currently on offer
    pub current_buttons: Vec<String>,

    /// Language the offered choices are written in, if known
    pub buttons_language: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::new("en")
    }
}

impl UserProfile {
    /// Create a fresh profile with all counters at zero
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::session::UserProfile;
    ///
    /// let profile = UserProfile::new("fr");
    /// assert_eq!(profile.lang_selected, "fr");
    /// assert_eq!(profile.session_counter, 0);
    /// assert!(profile.this_interaction_time.is_none());
    /// ```
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            msg_output: String::new(),
            lang_selected: language.into(),
            last_interaction_time: None,
            this_interaction_time: None,
            input_counter: 0,
            session_counter: 0,
            total_sessions: 0,
            current_buttons: Vec::new(),
            buttons_language: None,
        }
    }

    /// Record an interaction at `now`
    ///
    /// A gap longer than `timeout` since the previous interaction starts a new
    /// session: the session counter restarts at 1 and the lifetime session
    /// count goes up by one.
    ///
    /// # Returns
    ///
    /// `true` when this interaction started a new session after a timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Duration, Utc};
    /// use lingobot::session::UserProfile;
    ///
    /// let mut profile = UserProfile::new("en");
    /// let start = Utc::now();
    /// profile.record_interaction(start, Duration::minutes(10));
    /// let reset = profile.record_interaction(start + Duration::minutes(11), Duration::minutes(10));
    /// assert!(reset);
    /// assert_eq!(profile.session_counter, 1);
    /// assert_eq!(profile.total_sessions, 1);
    /// ```
    pub fn record_interaction(&mut self, now: DateTime<Utc>, timeout: Duration) -> bool {
        self.last_interaction_time = self.this_interaction_time.take();
        self.this_interaction_time = Some(now);
        self.input_counter += 1;

        let timed_out = self
            .last_interaction_time
            .map(|last| last + timeout < now)
            .unwrap_or(false);

        if timed_out {
            self.session_counter = 0;
            self.total_sessions += 1;
        }
        self.session_counter += 1;

        timed_out
    }

    /// Replace the offered quick-reply choices
    ///
    /// `language` is the language the choices are written in; a selected
    /// choice is classified in it rather than re-detected.
    ///
    /// # Returns
    ///
    /// The number of choices dropped to respect [`QUICK_REPLY_LIMIT`].
    pub fn offer_quick_replies(
        &mut self,
        mut choices: Vec<String>,
        language: Option<String>,
    ) -> usize {
        let dropped = choices.len().saturating_sub(QUICK_REPLY_LIMIT);
        choices.truncate(QUICK_REPLY_LIMIT);
        self.buttons_language = if choices.is_empty() { None } else { language };
        self.current_buttons = choices;
        dropped
    }

    /// Language of the offered choices
    pub fn quick_reply_language(&self) -> Option<&str> {
        self.buttons_language.as_deref()
    }

    /// Resolve a 1-based quick-reply index to the offered choice
    pub fn quick_reply(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.current_buttons.get(i))
            .map(String::as_str)
    }
}
