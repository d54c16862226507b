pub mod day_selection;
pub mod reply;
pub mod user_state;

pub use day_selection::{DaySelection, DaySelectionError};
pub use reply::{Reply, ReplyKeyboard};
pub use user_state::{DialogueState, UserState};
