use async_trait::async_trait;

use crate::{
    domain::ChatId,
    messaging::types::{CommandSpec, InlineKeyboard},
    Result,
};

/// Messaging gateway port.
///
/// Telegram is the first implementation; the shape is kept small enough that
/// other transports could fit behind the same interface. Sends are
/// fire-and-forget from the router's point of view: a failure is reported as
/// `Error::Delivery` and the caller logs it, never escalates it.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()>;

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: InlineKeyboard,
    ) -> Result<()>;

    /// Acknowledge a callback-type event to the transport. Must be called
    /// independently of whatever response the button produces, otherwise the
    /// sender's client keeps showing a loading indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;

    /// One-time setup call at startup, not part of steady-state routing.
    async fn set_command_menu(&self, commands: &[CommandSpec]) -> Result<()>;
}
