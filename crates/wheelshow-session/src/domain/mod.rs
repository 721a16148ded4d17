//! Domain layer for the Game Session context.

pub mod aggregates;
pub mod commands;
pub mod config;
pub mod events;
pub mod routing;
pub mod state;
pub mod turns;
