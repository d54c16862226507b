use chrono::Utc;
use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::conversation::{self, Input};
use crate::handlers::utils::send_replies;
use crate::handlers::HandlerResult;

pub async fn location_handler(bot: Bot, msg: Message, state: BotState) -> HandlerResult {
    let Some(location) = msg.location() else {
        return Ok(());
    };
    log::info!(
        "📍 Location from {}: {} / {}",
        msg.chat.first_name().unwrap_or("unknown"),
        location.latitude,
        location.longitude
    );

    let input = Input::Location {
        latitude: location.latitude,
        longitude: location.longitude,
    };
    let replies = conversation::handle(&state, msg.chat.id, input, Utc::now()).await;
    send_replies(&bot, msg.chat.id, replies).await?;

    Ok(())
}

pub async fn message_handler(bot: Bot, msg: Message, state: BotState) -> HandlerResult {
    let Some(text) = msg.text() else {
        log::debug!("Ignoring non-text message in chat {}", msg.chat.id);
        return Ok(());
    };

    // Unknown commands get the same answer as any other text for the current step
    if text.starts_with('/') {
        log::debug!("❓ Unknown command {:?} in chat {}", text, msg.chat.id);
    }

    let replies = conversation::handle(&state, msg.chat.id, Input::Text(text.to_string()), Utc::now()).await;
    send_replies(&bot, msg.chat.id, replies).await?;

    Ok(())
}
