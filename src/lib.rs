//! Telegram bot reporting solar midnight, sunrise, solar noon and sunset.
//!
//! - **conversation**: the day-choice / location dialogue
//! - **report**: report tables built from the two lookups below
//! - **solar**: sun events for a date and point (SPA)
//! - **timezone**: IANA zone for a point
//! - **bot_state**: per-chat sessions shared by the handlers
//! - **handlers**: Telegram adapters around the conversation
//! - **config**: environment configuration

pub mod bot_state;
pub mod config;
pub mod conversation;
pub mod handlers;
pub mod models;
pub mod report;
pub mod solar;
pub mod timezone;

pub use bot_state::BotState;
pub use config::Config;
pub use report::ReportFormatter;
