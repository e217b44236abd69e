//! Core library components.
//!
//! Everything below is usable without the CLI; nothing here prints.

pub mod constants;
pub mod dotenv;
pub mod export;
pub mod format;
pub mod import;
pub mod init;
pub mod plugin;
pub mod project;
pub mod property;
pub mod resolve;
pub mod stack;
pub mod types;
pub mod validation;
