//! Core engine modules.

pub mod config;
