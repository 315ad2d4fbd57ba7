use log::{debug, warn};

use crate::errors::ChatError;
use crate::models::{AskRequest, AskResponse, Message};

/// State behind one chat widget: history, draft input, loading flag and the
/// last error shown in the banner.
///
/// A question goes through two steps. [`Conversation::begin_submission`]
/// records the user turn and hands back the request body; once the request
/// settles, [`Conversation::settle`] records the outcome. The loading flag
/// sits between the two and keeps a second request from starting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
    input: String,
    loading: bool,
    last_error: Option<String>,
    revision: u64,
    first_key: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Bumped on every history change; views scroll to the bottom when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Messages paired with a key that stays unique across [`Conversation::clear`],
    /// for keyed list rendering.
    pub fn keyed_messages(&self) -> impl Iterator<Item = (u64, &Message)> + '_ {
        let first = self.first_key;
        self.messages.iter().enumerate().map(move |(i, m)| (first + i as u64, m))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.input.trim().is_empty()
    }

    /// Replaces the draft. Ignored while a request is in flight, the same way
    /// the input field is disabled.
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.loading {
            return;
        }
        self.input = text.into();
    }

    /// Puts one of the welcome-screen example questions into the draft.
    pub fn use_example(&mut self, question: &str) {
        self.set_input(question);
    }

    /// Starts answering the current draft.
    ///
    /// Returns `None` without touching anything when a request is already in
    /// flight or the draft is blank. Otherwise the trimmed draft becomes a user
    /// turn, the draft is cleared, any previous error is dropped and the caller
    /// receives the body to POST.
    pub fn begin_submission(&mut self) -> Option<AskRequest> {
        if !self.can_submit() {
            return None;
        }

        let question = self.input.trim().to_string();
        self.input.clear();
        self.loading = true;
        self.last_error = None;
        self.push(Message::user(question.clone()));

        debug!("submitting question ({} chars)", question.chars().count());
        Some(AskRequest { question })
    }

    /// Records how the in-flight request ended and clears the loading flag.
    pub fn settle(&mut self, outcome: Result<AskResponse, ChatError>) {
        if !self.loading {
            warn!("ignoring a response that arrived with no request in flight");
            return;
        }
        self.loading = false;

        match outcome {
            Ok(resp) if resp.success => {
                debug!("answer received, source: {:?}", resp.source_page);
                self.push(Message::assistant(resp.answer.unwrap_or_default(), resp.source_page));
            }
            Ok(resp) => self.fail(ChatError::backend(resp.error)),
            Err(err) => self.fail(err),
        }
    }

    /// Drops the history and the banner. A request already in flight still
    /// settles into the emptied history.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.last_error = None;
        self.revision += 1;
        // every earlier key is below the current revision
        self.first_key = self.revision;
    }

    /// Closes the error banner; the error turn stays in the history.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    fn fail(&mut self, err: ChatError) {
        warn!("question failed: {err}");
        self.last_error = Some(err.banner_text());
        self.push(Message::assistant_error(err.chat_text()));
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.revision += 1;
    }
}
