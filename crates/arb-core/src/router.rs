//! The admin-relay session router.
//!
//! Owns the user → "chatting with admin" map and decides, per inbound event,
//! whether it is a command, an admin reply directive, a relay-eligible user
//! message, or noise. Routing is a pure decision: no I/O happens here, and
//! `route` itself never mutates session state. Handlers apply the state flip
//! and the sends after the decision.

use std::collections::HashMap;

use crate::{
    directive::{parse_reply, DirectiveError, ReplyDirective},
    domain::{ChatId, UserId},
    messaging::types::IncomingEvent,
};

/// What the dispatcher should do with an inbound event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Relay a user's message to the admin and acknowledge the user. The
    /// handler closes the session afterwards (single-shot relay).
    ForwardToAdmin {
        user_id: UserId,
        username: Option<String>,
        /// `None` when the event carried no text (media, sticker, ...);
        /// the forward text falls back to a placeholder.
        text: Option<String>,
    },
    /// Deliver a validated admin directive to its target user.
    AdminReply(ReplyDirective),
    /// Admin text that is not a usable directive; send a corrective hint,
    /// attempt no delivery.
    AdminUsageHint(DirectiveError),
    /// An ordinary bot command from a regular user.
    Command { name: String },
    /// An inline-button press.
    Callback { token: String },
    /// Free text from a user with no active relay session.
    Unrecognized,
}

/// Session store + dispatch policy.
///
/// Lives behind a single `tokio::sync::Mutex` in the app state; the lock is
/// held across decision + state flip only, never across sends.
#[derive(Debug)]
pub struct RelayRouter {
    admin: ChatId,
    /// Absent entry == not in a session. Entries are only ever flipped, never
    /// removed, so the map grows with distinct users seen. Acceptable for a
    /// memory-resident bot.
    sessions: HashMap<UserId, bool>,
}

impl RelayRouter {
    pub fn new(admin: ChatId) -> Self {
        Self {
            admin,
            sessions: HashMap::new(),
        }
    }

    pub fn admin_chat(&self) -> ChatId {
        self.admin
    }

    pub fn is_in_admin_chat(&self, user_id: UserId) -> bool {
        self.sessions.get(&user_id).copied().unwrap_or(false)
    }

    /// Idempotent: a user already in a session stays in it.
    pub fn start_admin_chat(&mut self, user_id: UserId) {
        self.sessions.insert(user_id, true);
    }

    /// Idempotent; a no-op for users never seen.
    pub fn end_admin_chat(&mut self, user_id: UserId) {
        if let Some(flag) = self.sessions.get_mut(&user_id) {
            *flag = false;
        }
    }

    /// Pure routing decision. Branches are evaluated first-match:
    ///
    /// 1. callback events (no text, sender-independent);
    /// 2. anything textual from the admin identity — a `/reply` directive or
    ///    a usage hint, never an ordinary command;
    /// 3. text from a user in an active session — forward;
    /// 4. commands (never forwarded, so `/exit` works mid-session);
    /// 5. everything else is unrecognized.
    pub fn route(&self, event: &IncomingEvent) -> Action {
        match event {
            IncomingEvent::Callback(cb) => Action::Callback {
                token: cb.token.clone(),
            },

            // Admin identity takes precedence over all other textual routing.
            // Reply-pattern text from anyone else never reaches this branch.
            _ if event.chat_id() == self.admin => {
                match parse_reply(event.text().unwrap_or("")) {
                    Ok(directive) => Action::AdminReply(directive),
                    Err(err) => Action::AdminUsageHint(err),
                }
            }

            IncomingEvent::Text(m) if self.is_in_admin_chat(m.user_id) => {
                Action::ForwardToAdmin {
                    user_id: m.user_id,
                    username: m.username.clone(),
                    text: Some(m.text.clone()),
                }
            }
            IncomingEvent::Unsupported(m) if self.is_in_admin_chat(m.user_id) => {
                Action::ForwardToAdmin {
                    user_id: m.user_id,
                    username: m.username.clone(),
                    text: None,
                }
            }

            IncomingEvent::Command(m) => Action::Command {
                name: m.name.clone(),
            },

            IncomingEvent::Text(_) | IncomingEvent::Unsupported(_) => Action::Unrecognized,
        }
    }
}

pub const NO_USERNAME_PLACEHOLDER: &str = "(not set)";
pub const NO_TEXT_PLACEHOLDER: &str = "(no text)";

/// Text delivered to the admin for a forwarded user message. Always carries
/// the numeric id (it is what `/reply` keys on), the display name, and the
/// message text, with placeholders where the event had neither.
pub fn format_forward(user_id: UserId, username: Option<&str>, text: Option<&str>) -> String {
    format!(
        "📬 New message from user\n\n🆔 id: {}\n👤 username: {}\n✉️ text:\n{}",
        user_id.0,
        username.unwrap_or(NO_USERNAME_PLACEHOLDER),
        text.unwrap_or(NO_TEXT_PLACEHOLDER),
    )
}

/// Text delivered to the target user for an admin reply.
pub fn format_admin_reply(body: &str) -> String {
    format!("📣 Reply from admin:\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::types::{
        CallbackEvent, CommandMessage, TextMessage, UnsupportedMessage,
    };

    const ADMIN: ChatId = ChatId(1000);

    fn router() -> RelayRouter {
        RelayRouter::new(ADMIN)
    }

    fn text_from(id: i64, text: &str) -> IncomingEvent {
        IncomingEvent::Text(TextMessage {
            chat_id: ChatId(id),
            user_id: UserId(id),
            username: Some("someone".to_string()),
            text: text.to_string(),
        })
    }

    fn command_from(id: i64, text: &str) -> IncomingEvent {
        let name = text
            .trim_start_matches('/')
            .split(char::is_whitespace)
            .next()
            .unwrap_or("")
            .to_lowercase();
        IncomingEvent::Command(CommandMessage {
            chat_id: ChatId(id),
            user_id: UserId(id),
            username: None,
            name,
            text: text.to_string(),
        })
    }

    #[test]
    fn unseen_users_are_not_in_admin_chat() {
        let r = router();
        assert!(!r.is_in_admin_chat(UserId(7)));
    }

    #[test]
    fn start_then_check() {
        let mut r = router();
        r.start_admin_chat(UserId(7));
        assert!(r.is_in_admin_chat(UserId(7)));
        // Idempotent.
        r.start_admin_chat(UserId(7));
        assert!(r.is_in_admin_chat(UserId(7)));
    }

    #[test]
    fn end_without_entry_is_a_noop() {
        let mut r = router();
        r.end_admin_chat(UserId(7));
        assert!(!r.is_in_admin_chat(UserId(7)));
    }

    #[test]
    fn start_end_round_trip() {
        let mut r = router();
        r.start_admin_chat(UserId(7));
        r.end_admin_chat(UserId(7));
        assert!(!r.is_in_admin_chat(UserId(7)));
    }

    #[test]
    fn admin_reply_directive_routes_to_target() {
        let r = router();
        let action = r.route(&command_from(ADMIN.0, "/reply 42 hello world"));
        assert_eq!(
            action,
            Action::AdminReply(ReplyDirective {
                target: ChatId(42),
                body: "hello world".to_string(),
            })
        );
    }

    #[test]
    fn admin_reply_with_bad_id_yields_hint_not_delivery() {
        let r = router();
        let action = r.route(&command_from(ADMIN.0, "/reply abc hi"));
        assert_eq!(action, Action::AdminUsageHint(DirectiveError::InvalidId));
    }

    #[test]
    fn admin_reply_with_two_tokens_is_malformed() {
        let r = router();
        let action = r.route(&command_from(ADMIN.0, "/reply 42"));
        assert_eq!(action, Action::AdminUsageHint(DirectiveError::Malformed));
    }

    #[test]
    fn admin_plain_text_gets_usage_hint() {
        let r = router();
        let action = r.route(&text_from(ADMIN.0, "who is this"));
        assert_eq!(
            action,
            Action::AdminUsageHint(DirectiveError::NotADirective)
        );
    }

    #[test]
    fn admin_identity_beats_command_routing() {
        // Even /start from the admin lands in the admin branch.
        let r = router();
        let action = r.route(&command_from(ADMIN.0, "/start"));
        assert_eq!(
            action,
            Action::AdminUsageHint(DirectiveError::NotADirective)
        );
    }

    #[test]
    fn in_session_text_forwards_then_session_closes() {
        let mut r = router();
        r.start_admin_chat(UserId(7));

        let action = r.route(&text_from(7, "help me"));
        assert_eq!(
            action,
            Action::ForwardToAdmin {
                user_id: UserId(7),
                username: Some("someone".to_string()),
                text: Some("help me".to_string()),
            }
        );

        // The handler closes the session after the forward (single-shot).
        r.end_admin_chat(UserId(7));
        assert!(!r.is_in_admin_chat(UserId(7)));
    }

    #[test]
    fn in_session_media_forwards_without_text() {
        let mut r = router();
        r.start_admin_chat(UserId(7));

        let action = r.route(&IncomingEvent::Unsupported(UnsupportedMessage {
            chat_id: ChatId(7),
            user_id: UserId(7),
            username: None,
        }));
        assert_eq!(
            action,
            Action::ForwardToAdmin {
                user_id: UserId(7),
                username: None,
                text: None,
            }
        );
    }

    #[test]
    fn in_session_command_is_not_forwarded() {
        // /exit mid-session must still reach the command handler.
        let mut r = router();
        r.start_admin_chat(UserId(7));

        let action = r.route(&command_from(7, "/exit"));
        assert_eq!(
            action,
            Action::Command {
                name: "exit".to_string()
            }
        );
    }

    #[test]
    fn reply_pattern_from_non_admin_is_an_ordinary_command() {
        let r = router();
        let action = r.route(&command_from(999, "/reply 1 x"));
        assert_eq!(
            action,
            Action::Command {
                name: "reply".to_string()
            }
        );
    }

    #[test]
    fn idle_plain_text_is_unrecognized() {
        let r = router();
        assert_eq!(r.route(&text_from(7, "hello")), Action::Unrecognized);
    }

    #[test]
    fn callbacks_route_as_callbacks_regardless_of_sender() {
        let r = router();
        let cb = IncomingEvent::Callback(CallbackEvent {
            chat_id: ADMIN,
            user_id: UserId(ADMIN.0),
            callback_id: "cb1".to_string(),
            token: "about".to_string(),
        });
        assert_eq!(
            r.route(&cb),
            Action::Callback {
                token: "about".to_string()
            }
        );
    }

    #[test]
    fn forward_text_includes_id_name_and_body() {
        let s = format_forward(UserId(42), Some("alice"), Some("hi there"));
        assert!(s.contains("42"));
        assert!(s.contains("alice"));
        assert!(s.contains("hi there"));
    }

    #[test]
    fn forward_text_uses_placeholders() {
        let s = format_forward(UserId(42), None, None);
        assert!(s.contains(NO_USERNAME_PLACEHOLDER));
        assert!(s.contains(NO_TEXT_PLACEHOLDER));
    }
}
