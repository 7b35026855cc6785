//! Subsystem modules for the Aragil bot.

pub mod cache;
pub mod chat;
pub mod history;
pub mod prompts;
