//! Interactive terminal front-end: configuration, prompting, the numbered
//! menu loop and report rendering.

pub mod config;
pub mod errors;
pub mod menu;
pub mod prompt;
pub mod render;

pub use config::AppConfig;
pub use menu::{Menu, MenuChoice};
pub use prompt::Prompter;
