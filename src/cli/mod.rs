//! CLI command handlers

pub mod commands;

pub use commands::{batch, classify, extract};
