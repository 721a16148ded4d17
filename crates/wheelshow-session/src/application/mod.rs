//! Application layer for the Game Session context.

pub mod command_handlers;
pub mod query_handlers;
