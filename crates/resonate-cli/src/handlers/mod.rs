//! Command handlers.

pub mod models;
pub mod process;
pub mod serve;
