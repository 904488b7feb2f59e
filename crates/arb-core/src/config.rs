use std::{env, fs, path::Path};

use crate::{errors::Error, Result};

/// Typed configuration for the relay bot.
///
/// Everything comes from the environment (a local `.env` file is honored but
/// never overrides variables that are already set).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    /// The one chat allowed to issue `/reply` directives. All forwarded user
    /// messages are delivered here.
    pub admin_chat_id: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let admin_chat_id = match env_str("ADMIN_CHAT_ID") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                Error::Config(format!("ADMIN_CHAT_ID is not a valid numeric id: {raw}"))
            })?,
            None => {
                return Err(Error::Config(
                    "ADMIN_CHAT_ID environment variable is required".to_string(),
                ))
            }
        };

        Ok(Self {
            telegram_bot_token,
            admin_chat_id,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
