use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use teloxide::types::ChatId;
use tokio::sync::RwLock;

use crate::models::UserState;
use crate::report::ReportFormatter;

type SessionMap = Arc<RwLock<HashMap<ChatId, UserState>>>;

/// Shared state handed to every handler: the per-chat sessions and the report builder.
#[derive(Clone)]
pub struct BotState {
    sessions: SessionMap,
    reports: ReportFormatter,
}

impl BotState {
    pub fn new(reports: ReportFormatter) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            reports,
        }
    }

    pub fn reports(&self) -> &ReportFormatter {
        &self.reports
    }

    /// State of the chat, or a fresh idle one if the chat has none.
    pub async fn get_user_state(&self, chat_id: ChatId) -> UserState {
        let sessions = self.sessions.read().await;
        sessions.get(&chat_id).cloned().unwrap_or_default()
    }

    pub async fn save_user_state(&self, chat_id: ChatId, mut state: UserState) {
        state.last_seen = SystemTime::now();
        let mut sessions = self.sessions.write().await;
        sessions.insert(chat_id, state);
        log::debug!("💾 State saved for chat {}: {:?}", chat_id, sessions.get(&chat_id).map(|s| s.dialogue));
    }

    pub async fn remove_user_state(&self, chat_id: ChatId) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(&chat_id).is_some() {
            log::debug!("🗑️ State removed for chat {}", chat_id);
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops sessions idle for longer than `ttl`.
    pub async fn cleanup_sessions(&self, ttl: Duration) {
        let mut sessions = self.sessions.write().await;
        let now = SystemTime::now();
        let previous_count = sessions.len();

        sessions.retain(|_, state| now.duration_since(state.last_seen).unwrap_or_default() < ttl);

        let current_count = sessions.len();
        if current_count != previous_count {
            log::info!("🧹 Sessions cleaned: {} -> {} entries", previous_count, current_count);
        } else {
            log::debug!("🧹 No idle sessions ({} active)", current_count);
        }
    }
}
