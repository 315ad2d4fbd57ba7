mod api;
mod clipboard;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatWidget;
use state::ChatState;

/// Root application component.
#[component]
fn App() -> impl IntoView {
    ChatState::provide();

    view! { <ChatWidget /> }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
