//! Response dispatch and canned replies
//!
//! A classifier result is routed to exactly one handler:
//!
//! - confidence below [`LOW_CONFIDENCE_THRESHOLD`]: the low-confidence reply
//! - a registered intent: that subject's handler
//! - anything else: the no-suitable-answer reply
//!
//! Replies that have several phrasings rotate through them by session
//! counter, so a conversation varies without randomness.

use crate::nlu::ClassifierResult;
use std::collections::BTreeMap;
use std::fmt;

/// Results below this confidence are not trusted
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.15;

const LOW_CONFIDENCE_REPLIES: &[&str] = &[
    "Sorry, I am confused - it may be me, rather than you! :-(\nMaybe try stating your question in different words? (or even try another question?)",
    "Sorry, I'm still learning and I don't think I understood you. :-(\nHow about repeating your question in different words? (or maybe try another question?)",
];

const NO_SUITABLE_ANSWER_REPLIES: &[&str] = &[
    "Sorry, I'm having trouble coming up with a suitable answer.\nMaybe try stating your question in different words? (or even try another question?)",
    "I'm not sure I follow your meaning.\nCould you try stating your question in different words? (or even try another question?)",
];

const EMPTY_INPUT_REPLIES: &[&str] = &[
    "I'm unsure what to say to that! :/",
    "I didn't quite catch that! :/",
    "Excuse me? :/",
];

/// Language the fallback suggestions are phrased in
pub const SUGGESTION_LANGUAGE: &str = "en";

/// Subjects known out of the box, as (intent, display name)
pub const DEFAULT_SUBJECTS: &[(&str, &str)] = &[
    ("history", "History"),
    ("physics", "Physics"),
    ("biology", "Biology"),
    ("computing", "Computing"),
];

/// Where a classified input is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Nothing left after cleaning
    EmptyInput,
    /// Classifier not confident enough
    LowConfidence,
    /// A registered subject, by intent name
    Subject(String),
    /// Confident, but about nothing we handle
    NoSuitableAnswer,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty_input"),
            Self::LowConfidence => write!(f, "low_confidence"),
            Self::Subject(intent) => write!(f, "subject:{}", intent),
            Self::NoSuitableAnswer => write!(f, "no_suitable_answer"),
        }
    }
}

/// What a handler needs to know about the user
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext<'a> {
    /// The user's session counter, used to rotate phrasings
    pub session_counter: u64,
    /// Display name of the user's selected language
    pub language: &'a str,
}

/// Text to show plus quick-reply choices to offer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    /// Reply text
    pub text: String,
    /// Suggested follow-up inputs
    pub quick_replies: Vec<String>,
    /// Language the suggestions are written in
    pub quick_reply_language: Option<String>,
}

impl Reply {
    /// A reply without quick-reply choices
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quick_replies: Vec::new(),
            quick_reply_language: None,
        }
    }

    /// Attach quick-reply choices
    pub fn with_quick_replies(mut self, choices: Vec<String>) -> Self {
        self.quick_replies = choices;
        self
    }

    /// Record the language the quick-reply choices are written in
    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.quick_reply_language = Some(language.into());
        self
    }
}

/// A subject handler
pub type Handler = Box<dyn Fn(&ReplyContext<'_>) -> Reply + Send + Sync>;

/// Pick a phrasing by rotating through `options`
///
/// # Examples
///
/// ```
/// use lingobot::responses::pick;
///
/// assert_eq!(pick(&["a", "b"], 3), "b");
/// assert_eq!(pick(&[], 3), "");
/// ```
pub fn pick<'a>(options: &[&'a str], counter: u64) -> &'a str {
    if options.is_empty() {
        return "";
    }
    options[(counter % options.len() as u64) as usize]
}

/// Handler replying "Handling <Subject> (in <Language>)"
pub fn subject_handler(display_name: impl Into<String>) -> Handler {
    let display_name = display_name.into();
    Box::new(move |ctx: &ReplyContext<'_>| {
        Reply::text(format!(
            "Handling {} (in {})",
            display_name, ctx.language
        ))
    })
}

/// Registry from intent name to handler
pub struct Dispatcher {
    handlers: BTreeMap<String, Handler>,
    suggestion_language: String,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_default_subjects()
    }
}

impl Dispatcher {
    /// Dispatcher with no subjects; every confident result is unmatched
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
            suggestion_language: SUGGESTION_LANGUAGE.to_string(),
        }
    }

    /// Dispatcher for history, physics, biology and computing
    pub fn with_default_subjects() -> Self {
        let mut dispatcher = Self::empty();
        for (intent, display_name) in DEFAULT_SUBJECTS {
            dispatcher.register(*intent, subject_handler(*display_name));
        }
        dispatcher
    }

    /// Add or replace the handler for an intent
    pub fn register(&mut self, intent: impl Into<String>, handler: Handler) {
        self.handlers.insert(intent.into(), handler);
    }

    /// Phrase suggestions for another language
    ///
    /// The language's model must recognise the subject names.
    pub fn with_suggestion_language(mut self, language: impl Into<String>) -> Self {
        self.suggestion_language = language.into();
        self
    }

    /// Language the suggestions are phrased in
    pub fn suggestion_language(&self) -> &str {
        &self.suggestion_language
    }

    /// Registered intent names, sorted
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Decide which handler a result goes to
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::nlu::{ClassifierResult, IntentMatch};
    /// use lingobot::responses::{Dispatcher, Route};
    ///
    /// let dispatcher = Dispatcher::with_default_subjects();
    /// let mut result = ClassifierResult::no_match("gravity");
    /// result.intent = Some(IntentMatch { name: "physics".to_string(), confidence: 0.1 });
    /// assert_eq!(dispatcher.route(&result), Route::LowConfidence);
    /// ```
    pub fn route(&self, result: &ClassifierResult) -> Route {
        if result.confidence() < LOW_CONFIDENCE_THRESHOLD {
            return Route::LowConfidence;
        }
        match result.intent_name() {
            Some(name) if self.handlers.contains_key(name) => Route::Subject(name.to_string()),
            _ => Route::NoSuitableAnswer,
        }
    }

    /// Produce the reply for a route
    pub fn respond(&self, route: &Route, ctx: &ReplyContext<'_>) -> Reply {
        match route {
            Route::EmptyInput => Reply::text(pick(EMPTY_INPUT_REPLIES, ctx.session_counter)),
            Route::LowConfidence => {
                Reply::text(pick(LOW_CONFIDENCE_REPLIES, ctx.session_counter))
                    .with_quick_replies(self.suggestions())
                    .in_language(self.suggestion_language.as_str())
            }
            Route::NoSuitableAnswer => {
                Reply::text(pick(NO_SUITABLE_ANSWER_REPLIES, ctx.session_counter))
                    .with_quick_replies(self.suggestions())
                    .in_language(self.suggestion_language.as_str())
            }
            Route::Subject(intent) => match self.handlers.get(intent) {
                Some(handler) => handler(ctx),
                None => {
                    tracing::warn!("No handler registered for intent {}", intent);
                    Reply::text(pick(NO_SUITABLE_ANSWER_REPLIES, ctx.session_counter))
                }
            },
        }
    }

    /// "Tell me about <subject>" for the first registered subjects
    pub fn suggestions(&self) -> Vec<String> {
        self.subjects()
            .take(crate::session::QUICK_REPLY_LIMIT)
            .map(|subject| format!("Tell me about {}", subject))
            .collect()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("subjects", &self.subjects().collect::<Vec<_>>())
            .field("suggestion_language", &self.suggestion_language)
            .finish()
    }
}
