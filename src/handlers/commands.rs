use chrono::Utc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot_state::BotState;
use crate::conversation::{self, Input};
use crate::handlers::utils::send_replies;
use crate::handlers::HandlerResult;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "começar e escolher os dias")]
    Start,
    #[command(description = "pedir a localização novamente")]
    Skip,
    #[command(description = "encerrar a conversa")]
    Cancel,
    #[command(description = "escolher os dias outra vez")]
    Retry,
}

impl From<Command> for Input {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => Input::Start,
            Command::Skip => Input::Skip,
            Command::Cancel => Input::Cancel,
            Command::Retry => Input::Retry,
        }
    }
}

pub async fn command_handler(bot: Bot, msg: Message, cmd: Command, state: BotState) -> HandlerResult {
    log::info!("⌨️ Chat {} sent {:?}", msg.chat.id, cmd);

    let replies = conversation::handle(&state, msg.chat.id, cmd.into(), Utc::now()).await;
    send_replies(&bot, msg.chat.id, replies).await?;

    Ok(())
}
