use chat_core::{Conversation, Message};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;

/// Widget state, provided via Leptos context.
///
/// All transitions go through [`Conversation`]; this type only wires them to
/// signals and to the network. Views read the memos rather than the whole
/// conversation, so typing in the draft only wakes what depends on the draft.
#[derive(Clone, Copy)]
pub struct ChatState {
    pub conversation: RwSignal<Conversation>,
    /// Keyed history; changes only when a turn is added or the chat is cleared.
    pub history: Memo<Vec<(u64, Message)>>,
    pub revision: Memo<u64>,
    pub is_empty: Memo<bool>,
    pub is_loading: Memo<bool>,
    pub last_error: Memo<Option<String>>,
    pub draft: Memo<String>,
    pub can_submit: Memo<bool>,
    endpoint: StoredValue<String>,
}

impl ChatState {
    /// Create a new `ChatState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let conversation = RwSignal::new(Conversation::new());
        let revision = Memo::new(move |_| conversation.with(Conversation::revision));
        let state = Self {
            conversation,
            // Every history change moves the revision, so the draft is never cloned through here
            history: Memo::new(move |_| {
                revision.track();
                conversation.with_untracked(|c| {
                    c.keyed_messages().map(|(k, m)| (k, m.clone())).collect()
                })
            }),
            revision,
            is_empty: Memo::new(move |_| conversation.with(Conversation::is_empty)),
            is_loading: Memo::new(move |_| conversation.with(Conversation::is_loading)),
            last_error: Memo::new(move |_| conversation.with(|c| c.last_error().map(str::to_string))),
            draft: Memo::new(move |_| conversation.with(|c| c.input().to_string())),
            can_submit: Memo::new(move |_| conversation.with(Conversation::can_submit)),
            endpoint: StoredValue::new(api::chat_endpoint()),
        };
        log::debug!("Chat endpoint: {}", state.endpoint.get_value());

        provide_context(state);
        state
    }

    pub fn set_input(&self, text: String) {
        self.conversation.update(|c| c.set_input(text));
    }

    pub fn use_example(&self, question: &'static str) {
        self.conversation.update(|c| c.use_example(question));
    }

    pub fn dismiss_error(&self) {
        self.conversation.update(Conversation::dismiss_error);
    }

    pub fn clear(&self) {
        self.conversation.update(Conversation::clear);
    }

    /// Send the current draft, unless it is blank or a request is already running.
    pub fn submit(&self) {
        let Some(request) = self.conversation.try_update(Conversation::begin_submission).flatten()
        else {
            return;
        };

        let conversation = self.conversation;
        let url = self.endpoint.get_value();
        spawn_local(async move {
            let outcome = api::ask(&url, &request).await;
            match &outcome {
                Err(e) if e.is_transport() => log::error!("Could not reach {url}: {e}"),
                Err(e) => log::warn!("Question failed: {e}"),
                Ok(_) => {}
            }
            conversation.update(|c| c.settle(outcome));
        });
    }
}
