//! ChatAssistant: the persisted transcript plus the remote assistant.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use super::client::ChatClient;
use super::transcript::ChatMessage;
use crate::store::{KeyValueStore, keys};

pub const HOW_IT_WORKS: &str = "Our yield prediction tool works in 5 simple steps:\n\n🎯 **Step 1**: Enter your location (District & Taluka)\n🌱 **Step 2**: Provide soil details (color, pH, nutrients)\n🧪 **Step 3**: Select fertilizer type\n🌧️ **Step 4**: Input rainfall and temperature data\n🌾 **Step 5**: Choose your crop type\n\nOur AI analyzes all these factors to give you accurate yield predictions with actionable insights!";

pub const DATA_NEEDED: &str = "Here's what data you'll need to provide:\n\n📍 **Location**: District and Taluka\n🌱 **Soil Info**: Color, pH level, Nitrogen, Phosphorus, Potassium\n🧪 **Fertilizer**: Type of fertilizer used\n🌧️ **Weather**: Rainfall amount, minimum & maximum temperature\n🌾 **Crop**: Type of crop you want to grow\n\nDon't worry if you don't have exact values - estimates work too!";

pub const GENERAL_HELP: &str =
    "I'm here to help! Feel free to ask me anything about yield prediction.";

/// Canned shortcuts offered under the chat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickReply {
    /// Open the prediction wizard.
    Start,
    HowItWorks,
    DataNeeded,
    Other,
}

impl QuickReply {
    /// Accepts both `how_it_works` and `how-it-works` spellings. Anything
    /// unrecognised maps to [`QuickReply::Other`].
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "start" => Self::Start,
            "how_it_works" => Self::HowItWorks,
            "data_needed" => Self::DataNeeded,
            _ => Self::Other,
        }
    }

    /// Canned bot text, if this reply produces one.
    pub fn canned_text(&self) -> Option<&'static str> {
        match self {
            Self::Start => None,
            Self::HowItWorks => Some(HOW_IT_WORKS),
            Self::DataNeeded => Some(DATA_NEEDED),
            Self::Other => Some(GENERAL_HELP),
        }
    }
}

pub struct ChatAssistant {
    client: ChatClient,
    store: Arc<dyn KeyValueStore>,
    transcript: RwLock<Vec<ChatMessage>>,
}

impl ChatAssistant {
    /// Rehydrate the saved transcript, or start a fresh one with the
    /// greeting.
    pub async fn load(client: ChatClient, store: Arc<dyn KeyValueStore>) -> Self {
        let transcript = match store.get(keys::CHAT_HISTORY).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<ChatMessage>>(value) {
                Ok(messages) => {
                    info!(messages = messages.len(), "Restored chat history");
                    messages
                }
                Err(e) => {
                    warn!(error = %e, "Saved chat history is unreadable, starting fresh");
                    vec![ChatMessage::greeting()]
                }
            },
            Ok(None) => vec![ChatMessage::greeting()],
            Err(e) => {
                warn!(error = %e, "Failed to read chat history, starting fresh");
                vec![ChatMessage::greeting()]
            }
        };
        Self {
            client,
            store,
            transcript: RwLock::new(transcript),
        }
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.clone()
    }

    /// Send a user message and append the assistant's reply. Blank input is
    /// ignored. Returns the messages that were appended.
    pub async fn send(&self, text: &str) -> Vec<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let question = ChatMessage::user(text);
        self.push(question.clone()).await;

        let reply = ChatMessage::bot(self.client.ask(text).await);
        self.push(reply.clone()).await;

        vec![question, reply]
    }

    /// Append the canned answer for `kind`. [`QuickReply::Start`] appends
    /// nothing; the caller starts the wizard.
    pub async fn quick_reply(&self, kind: QuickReply) -> Option<ChatMessage> {
        let message = ChatMessage::bot(kind.canned_text()?);
        self.push(message.clone()).await;
        Some(message)
    }

    /// Append `message` and persist. The write lock is held until the store
    /// has the new transcript, so saves land in append order.
    async fn push(&self, message: ChatMessage) {
        let mut transcript = self.transcript.write().await;
        transcript.push(message);
        self.persist(&transcript).await;
    }

    async fn persist(&self, transcript: &[ChatMessage]) {
        let value = match serde_json::to_value(transcript) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to serialize chat history");
                return;
            }
        };
        if let Err(e) = self.store.set(keys::CHAT_HISTORY, &value).await {
            warn!(error = %e, "Failed to persist chat history");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::chat::client::CONNECTION_FALLBACK;
    use crate::chat::transcript::GREETING;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    /// Store whose writes take longer the shorter the transcript is, so an
    /// unordered writer would let an older save land last.
    #[derive(Default)]
    struct SlowWriteStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl KeyValueStore for SlowWriteStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
            let len = value.as_array().map_or(0, Vec::len) as u64;
            tokio::time::sleep(Duration::from_millis(60u64.saturating_sub(len * 20))).await;
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<bool, StoreError> {
            self.inner.remove(key).await
        }
    }

    fn offline_client() -> ChatClient {
        ChatClient::new("http://127.0.0.1:9/chat", Duration::from_secs(2)).unwrap()
    }

    async fn saved(store: &MemoryStore) -> Vec<ChatMessage> {
        let value = store.get(keys::CHAT_HISTORY).await.unwrap().unwrap();
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn fresh_transcript_starts_with_greeting() {
        let assistant = ChatAssistant::load(offline_client(), Arc::new(MemoryStore::new())).await;
        let history = assistant.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "1");
        assert_eq!(history[0].text, GREETING);
    }

    #[tokio::test]
    async fn saved_transcript_replaces_greeting() {
        let store = Arc::new(MemoryStore::new());
        let earlier = vec![
            ChatMessage::user("Which crop suits black soil?"),
            ChatMessage::bot("Cotton does well in black soil."),
        ];
        store
            .set(keys::CHAT_HISTORY, &serde_json::to_value(&earlier).unwrap())
            .await
            .unwrap();

        let assistant = ChatAssistant::load(offline_client(), store).await;
        assert_eq!(assistant.history().await, earlier);
    }

    #[tokio::test]
    async fn send_with_offline_assistant_appends_fallback_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let assistant = ChatAssistant::load(offline_client(), store.clone()).await;

        let appended = assistant.send("  When should I sow wheat?  ").await;

        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0].text, "When should I sow wheat?");
        assert!(!appended[0].is_bot);
        assert_eq!(appended[1].text, CONNECTION_FALLBACK);
        assert_eq!(saved(&store).await, assistant.history().await);
        assert_eq!(assistant.history().await.len(), 3);
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        let assistant = ChatAssistant::load(offline_client(), store.clone()).await;
        assert!(assistant.send("   ").await.is_empty());
        assert_eq!(assistant.history().await.len(), 1);
        assert!(store.get(keys::CHAT_HISTORY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn quick_replies() {
        let store = Arc::new(MemoryStore::new());
        let assistant = ChatAssistant::load(offline_client(), store.clone()).await;

        let msg = assistant
            .quick_reply(QuickReply::parse("how-it-works"))
            .await
            .unwrap();
        assert_eq!(msg.text, HOW_IT_WORKS);
        let msg = assistant
            .quick_reply(QuickReply::parse("data_needed"))
            .await
            .unwrap();
        assert_eq!(msg.text, DATA_NEEDED);
        assert!(assistant.quick_reply(QuickReply::Start).await.is_none());

        assert_eq!(saved(&store).await.len(), 3);
    }

    #[tokio::test]
    async fn overlapping_appends_persist_the_latest_transcript() {
        let store = Arc::new(SlowWriteStore::default());
        let assistant = ChatAssistant::load(offline_client(), store.clone()).await;

        tokio::join!(
            assistant.quick_reply(QuickReply::HowItWorks),
            assistant.quick_reply(QuickReply::DataNeeded),
        );

        let live = assistant.history().await;
        let value = store.get(keys::CHAT_HISTORY).await.unwrap().unwrap();
        let persisted: Vec<ChatMessage> = serde_json::from_value(value).unwrap();
        assert_eq!(live.len(), 3);
        assert_eq!(persisted, live);
    }

    #[test]
    fn quick_reply_parsing() {
        assert_eq!(QuickReply::parse("start"), QuickReply::Start);
        assert_eq!(QuickReply::parse("how_it_works"), QuickReply::HowItWorks);
        assert_eq!(QuickReply::parse("Data-Needed"), QuickReply::DataNeeded);
        assert_eq!(QuickReply::parse("weather"), QuickReply::Other);
    }
}
