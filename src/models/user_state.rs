use std::time::SystemTime;

use super::DaySelection;

/// Step of the conversation a chat is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueState {
    #[default]
    Idle,
    AwaitingDayChoice,
    AwaitingLocation,
}

#[derive(Debug, Clone)]
pub struct UserState {
    pub dialogue: DialogueState,
    /// Pending selection between the day prompt and the location share.
    pub choice: Option<DaySelection>,
    /// Selection behind the last report; another location share repeats it.
    pub last_choice: Option<DaySelection>,
    pub last_seen: SystemTime,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            dialogue: DialogueState::Idle,
            choice: None,
            last_choice: None,
            last_seen: SystemTime::now(),
        }
    }
}

impl UserState {
    pub fn forget_choices(&mut self) {
        self.choice = None;
        self.last_choice = None;
    }
}
