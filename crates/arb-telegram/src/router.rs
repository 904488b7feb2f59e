use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio::sync::Mutex;

use arb_core::{
    config::Config,
    domain::ChatId,
    errors::Error,
    messaging::{port::MessagingPort, types::CommandSpec},
    router::RelayRouter,
};

use crate::handlers;
use crate::TelegramMessenger;

/// Commands advertised in the Telegram command menu at startup.
const COMMAND_MENU: [CommandSpec; 3] = [
    CommandSpec {
        name: "start",
        description: "Show the menu",
    },
    CommandSpec {
        name: "exit",
        description: "Leave the conversation with the admin",
    },
    CommandSpec {
        name: "reply",
        description: "Reply to a user (admin only)",
    },
];

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    /// Session store + routing policy. One lock serializes all session
    /// access; it is held across decision + state flip only, never across a
    /// network send.
    pub relay: Arc<Mutex<RelayRouter>>,
    pub messenger: Arc<dyn MessagingPort>,
}

impl AppState {
    pub fn admin_chat(&self) -> ChatId {
        ChatId(self.cfg.admin_chat_id)
    }
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!("relay bot started: @{}", me.username()),
        Err(e) => {
            let e = Error::Transport(format!("get_me failed: {e}"));
            tracing::warn!("{e}");
        }
    }
    tracing::info!("admin chat id: {}", cfg.admin_chat_id);

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    // One-time setup; a failure only costs the client-side menu.
    if let Err(e) = messenger.set_command_menu(&COMMAND_MENU).await {
        tracing::warn!("failed to register command menu: {e}");
    }

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        relay: Arc::new(Mutex::new(RelayRouter::new(ChatId(cfg.admin_chat_id)))),
        messenger,
    });

    // Long-poll loop. Polling errors are logged by the dispatcher and never
    // terminate the loop; polling resumes on the next iteration.
    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
