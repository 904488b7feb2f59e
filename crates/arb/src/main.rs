use std::sync::Arc;

use arb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), arb_core::Error> {
    arb_core::logging::init("arb")?;

    let cfg = Arc::new(Config::load()?);

    arb_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| arb_core::Error::Transport(format!("telegram bot failed: {e}")))?;

    Ok(())
}
