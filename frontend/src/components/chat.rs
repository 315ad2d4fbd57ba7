use chat_core::keys::{self, KeyAction};
use chat_core::{Message, Role};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::clipboard;
use crate::state::ChatState;

const EXAMPLE_QUESTIONS: [&str; 3] = [
    "What is chemotherapy?",
    "How does diabetes work?",
    "What are the symptoms of flu?",
];

/// The whole chat: header, message history and question input.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let state = expect_context::<ChatState>();
    let input_ref = NodeRef::<html::Textarea>::new();
    let end_ref = NodeRef::<html::Div>::new();

    // Keep the newest message in view; only history changes move the revision
    Effect::new(move |_| {
        state.revision.track();
        if let Some(end) = end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            end.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let on_clear = move |_| {
        state.clear();
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    };

    view! {
        <div class="app">
            <div class="header">
                <div class="header-content">
                    <h1>"🏥 Medical Encyclopedia Chatbot"</h1>
                    <Show when=move || !state.is_empty.get()>
                        <button class="clear-button" title="Clear chat" on:click=on_clear>
                            "🗑️ Clear"
                        </button>
                    </Show>
                </div>
            </div>

            <div class="messages-container">
                <Show when=move || state.is_empty.get()>
                    <WelcomePanel />
                </Show>

                <ErrorBanner />

                <For
                    each=move || state.history.get()
                    key=|(key, _)| *key
                    children=|(_, message)| view! { <MessageBubble message=message /> }
                />

                <Show when=move || state.is_loading.get()>
                    <div class="message assistant">
                        <div class="message-content">
                            <div class="message-header">"🤖 Assistant"</div>
                            <div class="loading-dots">
                                <span></span>
                                <span></span>
                                <span></span>
                            </div>
                        </div>
                    </div>
                </Show>

                <div node_ref=end_ref></div>
            </div>

            <ChatInput input_ref=input_ref />
        </div>
    }
}

/// Shown while the history is empty; the chips fill the input.
#[component]
fn WelcomePanel() -> impl IntoView {
    let state = expect_context::<ChatState>();

    view! {
        <div class="welcome-message">
            <div class="welcome-icon">"💬"</div>
            <h2>"Welcome to Medical Encyclopedia Chatbot"</h2>
            <p>"Ask me anything about medical topics from the encyclopedia!"</p>
            <div class="example-questions">
                <p class="examples-title">"Try asking:"</p>
                <div class="example-chips">
                    {EXAMPLE_QUESTIONS
                        .iter()
                        .map(|&question| {
                            view! {
                                <button
                                    class="example-chip"
                                    on:click=move |_| state.use_example(question)
                                >
                                    {question}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
fn ErrorBanner() -> impl IntoView {
    let state = expect_context::<ChatState>();

    move || {
        state.last_error.get().map(|err| {
            view! {
                <div class="error-banner">
                    "⚠️ " {err}
                    <button class="error-close" on:click=move |_| state.dismiss_error()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}

/// A single chat turn. Assistant turns get a copy button and, unless they
/// are errors, the source page.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let is_user = message.role == Role::User;
    let css_class = format!("message {}", message.role);
    let text_class = if message.error { "message-text error-text" } else { "message-text" };
    let source = message.visible_source().map(|page| format!("📄 Source: Page {page}"));

    let copy_button = (!is_user).then(|| {
        let content = message.content.clone();
        view! {
            <button
                class="copy-button"
                title="Copy message"
                on:click=move |_| clipboard::copy_text(content.clone())
            >
                "📋"
            </button>
        }
    });

    // Newlines in the answer become line breaks
    let lines = message
        .content
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            view! {
                {(i > 0).then(|| view! { <br /> })}
                {line.to_string()}
            }
        })
        .collect_view();

    view! {
        <div class=css_class>
            <div class="message-content">
                <div class="message-header">
                    <span>{if is_user { "👤 You" } else { "🤖 Assistant" }}</span>
                    {copy_button}
                </div>
                <div class=text_class>{lines}</div>
                {source.map(|text| view! { <div class="message-source">{text}</div> })}
            </div>
        </div>
    }
}

/// Question input. Enter sends, Shift+Enter starts a new line.
#[component]
fn ChatInput(input_ref: NodeRef<html::Textarea>) -> impl IntoView {
    let state = expect_context::<ChatState>();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if keys::classify(&ev.key(), ev.shift_key(), ev.is_composing()) == KeyAction::Submit {
            ev.prevent_default();
            state.submit();
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.submit();
    };

    view! {
        <form class="input-container" on:submit=on_submit>
            <div class="input-wrapper">
                <textarea
                    node_ref=input_ref
                    class="input-field"
                    rows="1"
                    placeholder="Ask a question about medical topics... (Press Enter to send, Shift+Enter for new line)"
                    prop:value=move || state.draft.get()
                    on:input=move |ev| state.set_input(event_target_value(&ev))
                    on:keydown=on_keydown
                    disabled=move || state.is_loading.get()
                />
                <button
                    type="submit"
                    class="send-button"
                    title="Send message (Enter)"
                    disabled=move || !state.can_submit.get()
                >
                    {move || if state.is_loading.get() { "…" } else { "➤" }}
                </button>
            </div>
            <div class="input-footer">
                <span class="footer-text">"Press Enter to send • Shift+Enter for new line"</span>
            </div>
        </form>
    }
}
