/// Core error type for the relay bot.
///
/// Adapter crates map their transport errors into this type so the core can
/// handle failures consistently. Nothing here is fatal except `Config`, which
/// only occurs at startup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
