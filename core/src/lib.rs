//! Conversation state and wire contract shared by the chat widget and the host.
//!
//! Nothing in here touches the network or the DOM, so it builds for both
//! `wasm32-unknown-unknown` and native targets.

pub mod conversation;
pub mod endpoint;
pub mod errors;
pub mod keys;
pub mod models;

pub use conversation::Conversation;
pub use errors::ChatError;
pub use models::{AskRequest, AskResponse, Message, Role, SourcePage};
