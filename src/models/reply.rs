/// Keyboard to attach to an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKeyboard {
    /// Leave whatever keyboard the client is showing.
    Keep,
    /// One-time `Hoje | Amanhã / Semana` keyboard.
    DayChoice,
    /// Single button asking the client for its current location.
    RequestLocation,
    Remove,
}

/// One outgoing message produced by the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub html: bool,
    pub keyboard: ReplyKeyboard,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: false,
            keyboard: ReplyKeyboard::Keep,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: true,
            keyboard: ReplyKeyboard::Keep,
        }
    }

    pub fn with_keyboard(mut self, keyboard: ReplyKeyboard) -> Self {
        self.keyboard = keyboard;
        self
    }
}
