pub mod config;
pub mod logging;
pub mod runner;

pub use runner::{PromptRunner, MAX_TOKENS, MODEL, PROMPT, TEMPERATURE};
