//! Telegram update handlers.
//!
//! Each handler converts the teloxide update into the core incoming-event
//! model, asks the relay router for a decision, and executes the resulting
//! action. All outbound sends go through the messaging port and are
//! fire-and-forget: failures are logged, never escalated.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use arb_core::{
    domain::{ChatId, UserId},
    messaging::types::{
        CallbackEvent, CommandMessage, IncomingEvent, TextMessage, UnsupportedMessage,
    },
    router::Action,
};

use crate::router::AppState;

mod callback;
mod commands;
mod relay;

pub async fn handle_message(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let event = event_from_message(&msg);
    dispatch(event, state).await;
    Ok(())
}

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Answer the callback unconditionally and first, so the sender's client
    // stops showing a loading indicator whatever the button leads to.
    if let Err(e) = state.messenger.answer_callback(&q.id).await {
        tracing::warn!("answer_callback failed: {e}");
    }

    let Some(event) = event_from_callback(&q) else {
        return Ok(());
    };
    dispatch(event, state).await;
    Ok(())
}

async fn dispatch(event: IncomingEvent, state: Arc<AppState>) {
    let chat_id = event.chat_id();

    let action = {
        let mut router = state.relay.lock().await;
        let action = router.route(&event);
        // Single-shot relay: the session closes on the routing decision,
        // before any send goes out. A crash mid-send leaves it closed; that
        // is the accepted best-effort guarantee.
        if let Action::ForwardToAdmin { user_id, .. } = &action {
            router.end_admin_chat(*user_id);
        }
        action
    };

    match action {
        Action::ForwardToAdmin {
            user_id,
            username,
            text,
        } => relay::forward_to_admin(&state, chat_id, user_id, username, text).await,
        Action::AdminReply(directive) => {
            relay::deliver_admin_reply(&state, chat_id, directive).await
        }
        Action::AdminUsageHint(err) => relay::send_usage_hint(&state, chat_id, err).await,
        Action::Command { name } => {
            commands::handle_command(&state, chat_id, event.user_id(), &name).await
        }
        Action::Callback { token } => {
            callback::handle_token(&state, chat_id, event.user_id(), &token).await
        }
        Action::Unrecognized => {
            // Non-text chatter outside a session stays silent; only free text
            // gets the fixed "unrecognized" response.
            if event.text().is_some() {
                send_or_log(&state, chat_id, commands::UNRECOGNIZED).await;
            }
        }
    }
}

pub(crate) async fn send_or_log(state: &AppState, chat_id: ChatId, text: &str) {
    if let Err(e) = state.messenger.send_text(chat_id, text).await {
        tracing::warn!("send to {} failed: {e}", chat_id.0);
    }
}

fn event_from_message(msg: &Message) -> IncomingEvent {
    let chat_id = ChatId(msg.chat.id.0);
    let user = msg.from();
    let user_id = UserId(user.map(|u| u.id.0 as i64).unwrap_or(chat_id.0));
    let username = user.and_then(|u| u.username.clone());

    match msg.text() {
        Some(text) if text.starts_with('/') => IncomingEvent::Command(CommandMessage {
            chat_id,
            user_id,
            username,
            name: parse_command_name(text),
            text: text.to_string(),
        }),
        Some(text) => IncomingEvent::Text(TextMessage {
            chat_id,
            user_id,
            username,
            text: text.to_string(),
        }),
        // Photos, voice, stickers, documents: no text payload.
        None => IncomingEvent::Unsupported(UnsupportedMessage {
            chat_id,
            user_id,
            username,
        }),
    }
}

fn event_from_callback(q: &CallbackQuery) -> Option<IncomingEvent> {
    let chat_id = ChatId(q.message.as_ref()?.chat.id.0);
    let token = q.data.clone()?;

    Some(IncomingEvent::Callback(CallbackEvent {
        chat_id,
        user_id: UserId(q.from.id.0 as i64),
        callback_id: q.id.clone(),
        token,
    }))
}

fn parse_command_name(text: &str) -> String {
    // Telegram may send `/cmd@botname arg1 ...`
    let first = text.trim().split(char::is_whitespace).next().unwrap_or("");
    first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase()
}
