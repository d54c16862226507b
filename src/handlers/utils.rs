use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode, ReplyMarkup};

use crate::models::{DaySelection, Reply, ReplyKeyboard};

/// `Hoje | Amanhã` over `Semana`.
pub fn day_choice_keyboard() -> ReplyMarkup {
    let [today, tomorrow, week] = DaySelection::ALL;
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![
            vec![KeyboardButton::new(today.label()), KeyboardButton::new(tomorrow.label())],
            vec![KeyboardButton::new(week.label())],
        ])
        .resize_keyboard()
        .one_time_keyboard(),
    )
}

pub fn location_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![vec![
            KeyboardButton::new("📍 Compartilhar localização").request(ButtonRequest::Location),
        ]])
        .resize_keyboard()
        .one_time_keyboard(),
    )
}

pub fn reply_markup(keyboard: ReplyKeyboard) -> Option<ReplyMarkup> {
    match keyboard {
        ReplyKeyboard::Keep => None,
        ReplyKeyboard::DayChoice => Some(day_choice_keyboard()),
        ReplyKeyboard::RequestLocation => Some(location_keyboard()),
        ReplyKeyboard::Remove => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
    }
}

/// Sends the replies in order, stopping at the first transport error.
pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> Result<(), teloxide::RequestError> {
    for reply in replies {
        let mut request = bot.send_message(chat_id, reply.text);
        if reply.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(markup) = reply_markup(reply.keyboard) {
            request = request.reply_markup(markup);
        }
        request.await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_keyboard_offers_the_three_labels() {
        let Some(ReplyMarkup::Keyboard(markup)) = reply_markup(ReplyKeyboard::DayChoice) else {
            panic!("expected a reply keyboard");
        };
        let labels: Vec<&str> = markup.keyboard.iter().flatten().map(|b| b.text.as_str()).collect();
        assert_eq!(labels, vec!["Hoje", "Amanhã", "Semana"]);
    }

    #[test]
    fn keep_sends_no_markup() {
        assert!(reply_markup(ReplyKeyboard::Keep).is_none());
        assert!(matches!(reply_markup(ReplyKeyboard::Remove), Some(ReplyMarkup::KeyboardRemove(_))));
    }
}
