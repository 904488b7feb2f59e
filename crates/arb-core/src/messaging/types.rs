use crate::domain::{ChatId, UserId};

/// Transport-agnostic incoming event model.
///
/// Telegram-specific fields live in the Telegram adapter; by the time an
/// update reaches the router it is one of these.
#[derive(Clone, Debug)]
pub enum IncomingEvent {
    Command(CommandMessage),
    Text(TextMessage),
    Callback(CallbackEvent),
    /// A message with no text payload (photo, voice, sticker, ...). Carried
    /// so a user mid relay-session still gets their "message" forwarded with
    /// a placeholder body instead of being silently dropped.
    Unsupported(UnsupportedMessage),
}

#[derive(Clone, Debug)]
pub struct CommandMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub username: Option<String>,
    /// Normalized command name: lowercased, leading `/` and `@botname`
    /// suffix stripped.
    pub name: String,
    /// The raw message text, preserved verbatim for directive parsing.
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub username: Option<String>,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct CallbackEvent {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub callback_id: String,
    /// Opaque token carried by the pressed inline button.
    pub token: String,
}

#[derive(Clone, Debug)]
pub struct UnsupportedMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub username: Option<String>,
}

impl IncomingEvent {
    pub fn chat_id(&self) -> ChatId {
        match self {
            IncomingEvent::Command(m) => m.chat_id,
            IncomingEvent::Text(m) => m.chat_id,
            IncomingEvent::Callback(m) => m.chat_id,
            IncomingEvent::Unsupported(m) => m.chat_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            IncomingEvent::Command(m) => m.user_id,
            IncomingEvent::Text(m) => m.user_id,
            IncomingEvent::Callback(m) => m.user_id,
            IncomingEvent::Unsupported(m) => m.user_id,
        }
    }

    /// Raw text of the event, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            IncomingEvent::Command(m) => Some(&m.text),
            IncomingEvent::Text(m) => Some(&m.text),
            IncomingEvent::Callback(_) | IncomingEvent::Unsupported(_) => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            IncomingEvent::Command(m) => m.username.as_deref(),
            IncomingEvent::Text(m) => m.username.as_deref(),
            IncomingEvent::Unsupported(m) => m.username.as_deref(),
            IncomingEvent::Callback(_) => None,
        }
    }
}

/// Inline keyboard (buttons) used for the `/start` menu.
#[derive(Clone, Debug)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug)]
pub struct InlineButton {
    pub label: String,
    pub token: String,
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }
}

impl InlineButton {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// A command-menu entry registered with the transport at startup.
#[derive(Clone, Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
}
