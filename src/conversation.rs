//! The dialogue: day choice, then location, then the reports.
//!
//! Everything here is transport-agnostic. Handlers turn Telegram updates into an
//! [`Input`], call [`handle`], and send back the [`Reply`]s in order.

use chrono::{DateTime, Utc};
use teloxide::types::ChatId;
use thiserror::Error;

use crate::bot_state::BotState;
use crate::models::{DaySelection, DialogueState, Reply, ReplyKeyboard, UserState};
use crate::report::{ReportError, ReportFormatter};
use crate::solar::SolarError;
use crate::timezone::TimezoneError;

pub const WELCOME_TEXT: &str = "<b><i>Faze o que tu queres há de ser tudo da Lei.</i></b>\n\n\
    Olá, bem-vindo ao <b>Oh o RESH!</b> \
    Vou te ajudar a calcular os horários \
    das adorações solares contidas no \
    <a href=\"https://www.hadnu.org/publicacoes/liber-resh-vel-helios/\">Liber Resh vel Helios</a>\n\n\
    <b><i>Amor é a lei, amor sob vontade.</i></b>";
pub const DAY_PROMPT: &str = "Para quais dias você deseja?";
pub const LOCATION_PROMPT: &str = "Agora compartilhe sua localização atual. Precisa ser um celular. \
    Basta selecionar o clipe(opção de compartilhar fotos) \
    e compartilhar a localização atual.";
pub const SKIP_TEXT: &str = "Vamos tentar novamente. Por favor, compartilhe sua localização.";
pub const FAREWELL_TEXT: &str = "93 93/93.";
pub const INVALID_CHOICE_TEXT: &str = "Não entendi. Escolha uma das opções: Hoje, Amanhã ou Semana.";
pub const RESTART_TEXT: &str = "Não encontrei sua escolha de dias. Vamos recomeçar.";
pub const LOCATION_REMINDER_TEXT: &str = "Estou aguardando sua localização. \
    Use /skip para tentar novamente ou /cancel para encerrar.";
pub const IDLE_TEXT: &str = "Envie /start para começar.";

/// What the user did, stripped of transport details.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Start,
    Text(String),
    Location { latitude: f64, longitude: f64 },
    Skip,
    Cancel,
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("location received with no pending day choice")]
    StateDesync,
}

/// Applies `input` to the chat's session and returns the replies to send.
///
/// `now` decides which day is "today" at the shared location.
pub async fn handle(state: &BotState, chat_id: ChatId, input: Input, now: DateTime<Utc>) -> Vec<Reply> {
    let mut user = state.get_user_state(chat_id).await;

    let replies = match input {
        Input::Start => {
            user.forget_choices();
            user.dialogue = DialogueState::AwaitingDayChoice;
            vec![Reply::html(WELCOME_TEXT), day_prompt()]
        }
        Input::Cancel => {
            state.remove_user_state(chat_id).await;
            log::info!("👋 Chat {} canceled the conversation", chat_id);
            return vec![Reply::plain(FAREWELL_TEXT).with_keyboard(ReplyKeyboard::Remove)];
        }
        Input::Retry => {
            user.forget_choices();
            user.dialogue = DialogueState::AwaitingDayChoice;
            vec![day_prompt()]
        }
        Input::Skip => match user.dialogue {
            DialogueState::AwaitingLocation => {
                log::info!("⏭️ Chat {} skipped the location step", chat_id);
                vec![location_request(SKIP_TEXT)]
            }
            DialogueState::AwaitingDayChoice => vec![day_prompt()],
            DialogueState::Idle => vec![Reply::plain(IDLE_TEXT)],
        },
        Input::Text(text) => match user.dialogue {
            DialogueState::AwaitingDayChoice => choose_days(&mut user, &text),
            DialogueState::AwaitingLocation => vec![location_request(LOCATION_REMINDER_TEXT)],
            DialogueState::Idle => vec![Reply::plain(IDLE_TEXT)],
        },
        Input::Location { latitude, longitude } => {
            log::info!("📍 Location of chat {}: {} / {}", chat_id, latitude, longitude);
            match receive_location(state.reports(), &mut user, latitude, longitude, now) {
                Ok(replies) => replies,
                Err(e) => {
                    log::warn!("⚠️ Chat {}: {}", chat_id, e);
                    user.forget_choices();
                    user.dialogue = DialogueState::AwaitingDayChoice;
                    vec![Reply::plain(RESTART_TEXT), day_prompt()]
                }
            }
        }
    };

    state.save_user_state(chat_id, user).await;
    replies
}

fn day_prompt() -> Reply {
    Reply::plain(DAY_PROMPT).with_keyboard(ReplyKeyboard::DayChoice)
}

fn location_request(text: &str) -> Reply {
    Reply::plain(text).with_keyboard(ReplyKeyboard::RequestLocation)
}

fn choose_days(user: &mut UserState, text: &str) -> Vec<Reply> {
    match DaySelection::parse(text) {
        Ok(choice) => {
            user.choice = Some(choice);
            user.dialogue = DialogueState::AwaitingLocation;
            vec![
                Reply::plain(format!("Ok! Irei calcular para {}.", choice.to_string().to_lowercase()))
                    .with_keyboard(ReplyKeyboard::Remove),
                location_request(LOCATION_PROMPT),
            ]
        }
        Err(e) => {
            log::debug!("🙅 {}", e);
            vec![Reply::plain(INVALID_CHOICE_TEXT).with_keyboard(ReplyKeyboard::DayChoice)]
        }
    }
}

/// Consumes the pending choice and renders its reports.
///
/// The dialogue stays on the location step afterwards, so sharing another
/// location repeats the last choice. Lookup failures become a user-facing
/// message; only a location with no choice to apply is an error.
fn receive_location(
    reports: &ReportFormatter,
    user: &mut UserState,
    latitude: f64,
    longitude: f64,
    now: DateTime<Utc>,
) -> Result<Vec<Reply>, ConversationError> {
    let repeat = match user.dialogue {
        DialogueState::AwaitingLocation => user.last_choice,
        _ => None,
    };
    let choice = user.choice.take().or(repeat).ok_or(ConversationError::StateDesync)?;
    user.last_choice = Some(choice);
    user.dialogue = DialogueState::AwaitingLocation;

    let rendered = reports
        .local_today(latitude, longitude, now)
        .and_then(|today| reports.render_dates(latitude, longitude, &choice.target_dates(today)));

    match rendered {
        Ok(text) => Ok(vec![Reply::html(text).with_keyboard(ReplyKeyboard::Remove)]),
        Err(e) => {
            log::error!("❌ Report for {} / {} failed: {}", latitude, longitude, e);
            Ok(vec![Reply::plain(report_error_text(&e)).with_keyboard(ReplyKeyboard::Remove)])
        }
    }
}

pub fn report_error_text(err: &ReportError) -> String {
    let cause = match err {
        ReportError::Timezone(TimezoneError::NotFound { .. }) => {
            "Não encontrei o fuso horário dessa localização.".to_string()
        }
        ReportError::Timezone(TimezoneError::UnknownZone(name)) => {
            format!("O fuso horário {} não é suportado.", name)
        }
        ReportError::Solar(SolarError::PolarDay(date)) => {
            format!("Em {} o sol não se põe nessa localização.", date.format("%d/%m/%Y"))
        }
        ReportError::Solar(SolarError::PolarNight(date)) => {
            format!("Em {} o sol não nasce nessa localização.", date.format("%d/%m/%Y"))
        }
        ReportError::Solar(SolarError::IncompleteDay(date)) => {
            format!("Em {} o sol não nasce e se põe no mesmo dia nessa localização.", date.format("%d/%m/%Y"))
        }
        ReportError::Solar(SolarError::DateOutOfRange(date)) | ReportError::DateOutOfRange(date) => {
            format!("Não consigo calcular os horários para {}.", date.format("%d/%m/%Y"))
        }
        ReportError::Solar(SolarError::Calculation(_)) => "Não foi possível calcular os horários.".to_string(),
    };
    format!("{} Use /retry para tentar novamente.", cause)
}
