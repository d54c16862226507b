pub mod commands;
pub mod messages;
pub mod utils;

pub use commands::{command_handler, Command};
pub use messages::{location_handler, message_handler};

use std::error::Error;
use std::time::Duration;
use tokio::time;

use crate::bot_state::BotState;

pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Periodically evicts sessions idle for longer than `ttl`.
pub async fn session_cleanup_task(state: BotState, every: Duration, ttl: Duration) {
    let mut interval = time::interval(every);

    loop {
        interval.tick().await;
        state.cleanup_sessions(ttl).await;
    }
}
