use arb_core::{
    domain::{ChatId, UserId},
    messaging::types::{InlineButton, InlineKeyboard},
};

use crate::router::AppState;

use super::send_or_log;

pub(super) const UNRECOGNIZED: &str = "❓ Unknown command. Use /start or /exit.";
const GREETING: &str = "Welcome! Pick one of the options:";
const GOODBYE: &str = "👋 See you!";

pub(super) async fn handle_command(
    state: &AppState,
    chat_id: ChatId,
    user_id: UserId,
    name: &str,
) {
    match name {
        "start" => {
            let keyboard = InlineKeyboard::new(vec![
                vec![
                    InlineButton::new("📞 Contact us", "contact"),
                    InlineButton::new("ℹ️ About us", "about"),
                ],
                vec![InlineButton::new("💬 Chat with admin", "chat_with_admin")],
            ]);
            if let Err(e) = state
                .messenger
                .send_inline_keyboard(chat_id, GREETING, keyboard)
                .await
            {
                tracing::warn!("menu send to {} failed: {e}", chat_id.0);
            }
        }
        "exit" => {
            // Explicit exit ends the session without forwarding anything.
            state.relay.lock().await.end_admin_chat(user_id);
            send_or_log(state, chat_id, GOODBYE).await;
        }
        _ => send_or_log(state, chat_id, UNRECOGNIZED).await,
    }
}
