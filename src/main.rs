use std::sync::Arc;

use anyhow::Context;
use teloxide::{prelude::*, utils::command::BotCommands};

use resh_bot::handlers::{self, command_handler, location_handler, message_handler, Command};
use resh_bot::solar::SpaCalculator;
use resh_bot::timezone::TzfResolver;
use resh_bot::{BotState, Config, ReportFormatter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting resh bot...");

    let config = Config::from_env().context("invalid configuration")?;

    let reports = ReportFormatter::new(
        Arc::new(SpaCalculator::new()),
        Arc::new(TzfResolver::new()),
        config.locale,
    );
    let state = BotState::new(reports);
    log::info!("✅ Timezone finder loaded, locale {:?}", config.locale);

    let state_clone = state.clone();
    tokio::spawn(handlers::session_cleanup_task(
        state_clone,
        config.cleanup_interval,
        config.session_ttl,
    ));

    let bot = Bot::new(config.bot_token.clone());
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", e);
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.location().is_some())
                .endpoint(location_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
