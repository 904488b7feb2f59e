use arb_core::domain::{ChatId, UserId};

use crate::router::AppState;

use super::send_or_log;

const CONTACT: &str = "📞 example@example.com";
const ABOUT: &str = "ℹ️ A small relay bot: it forwards your messages to the admin and brings replies back.";
const SESSION_PROMPT: &str = "✉️ Write your message and I'll forward it to the admin.";
const UNKNOWN_ACTION: &str = "❓ Unknown action.";

pub(super) async fn handle_token(state: &AppState, chat_id: ChatId, user_id: UserId, token: &str) {
    match token {
        "contact" => send_or_log(state, chat_id, CONTACT).await,
        "about" => send_or_log(state, chat_id, ABOUT).await,
        "chat_with_admin" => {
            state.relay.lock().await.start_admin_chat(user_id);
            send_or_log(state, chat_id, SESSION_PROMPT).await;
        }
        _ => send_or_log(state, chat_id, UNKNOWN_ACTION).await,
    }
}
