//! `KeyValueStore` trait: the small async persistence interface used for
//! UI-facing state such as the chat transcript.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Well-known store keys.
pub mod keys {
    pub const CHAT_HISTORY: &str = "agri-chat-history";
}

/// Backend-agnostic string-keyed JSON store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Insert or replace the value under `key`.
    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether it existed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;
}
