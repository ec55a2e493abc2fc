// Country Explorer Library
// Re-export modules for use in main.rs

pub mod commands;
pub mod config;
pub mod countries;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod storage;
