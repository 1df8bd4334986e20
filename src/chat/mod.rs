//! Agri-Assistant chat: a remote assistant endpoint plus a transcript
//! persisted in the key-value store.

pub mod assistant;
pub mod client;
pub mod routes;
pub mod transcript;

pub use assistant::{ChatAssistant, QuickReply};
pub use client::ChatClient;
pub use routes::{ChatRouteState, chat_routes};
pub use transcript::{ChatMessage, Segment, SegmentKind};
