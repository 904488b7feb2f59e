//! The two relay directions: user → admin forwards and admin → user replies.

use arb_core::{
    directive::{DirectiveError, ReplyDirective},
    domain::{ChatId, UserId},
    router::{format_admin_reply, format_forward},
};

use crate::router::AppState;

use super::send_or_log;

const FORWARD_ACK: &str = "✅ Your message was sent to the admin.";
const REPLY_DELIVERED: &str = "✅ Reply delivered.";

/// Forward a user's message to the admin and acknowledge the user.
///
/// The session was already closed when this action was decided; the two sends
/// are independent, so a failure in one never blocks (or rolls back) the
/// other.
pub(super) async fn forward_to_admin(
    state: &AppState,
    origin_chat: ChatId,
    user_id: UserId,
    username: Option<String>,
    text: Option<String>,
) {
    let forward = format_forward(user_id, username.as_deref(), text.as_deref());

    let (to_admin, to_user) = tokio::join!(
        state.messenger.send_text(state.admin_chat(), &forward),
        state.messenger.send_text(origin_chat, FORWARD_ACK),
    );
    if let Err(e) = to_admin {
        tracing::warn!("forward from {} to admin failed: {e}", user_id.0);
    }
    if let Err(e) = to_user {
        tracing::warn!("forward ack to {} failed: {e}", origin_chat.0);
    }
}

/// Deliver a validated `/reply` directive to its target user and confirm (or
/// report the failure) to the admin. Nothing here is fatal.
pub(super) async fn deliver_admin_reply(
    state: &AppState,
    admin_chat: ChatId,
    directive: ReplyDirective,
) {
    let text = format_admin_reply(&directive.body);
    match state.messenger.send_text(directive.target, &text).await {
        Ok(()) => send_or_log(state, admin_chat, REPLY_DELIVERED).await,
        Err(e) => {
            tracing::warn!("admin reply to {} failed: {e}", directive.target.0);
            let note = format!("⚠️ Could not deliver to {}: {e}", directive.target.0);
            send_or_log(state, admin_chat, &note).await;
        }
    }
}

pub(super) async fn send_usage_hint(state: &AppState, admin_chat: ChatId, err: DirectiveError) {
    send_or_log(state, admin_chat, usage_hint(err)).await;
}

fn usage_hint(err: DirectiveError) -> &'static str {
    match err {
        DirectiveError::NotADirective => "📌 To reply to a user, send: /reply <user id> <message>",
        DirectiveError::Malformed => "❗ Wrong format. Use: /reply <user id> <message>",
        DirectiveError::InvalidId => "❗ That user id is not numeric. Use: /reply <user id> <message>",
    }
}
