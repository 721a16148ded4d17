//! Wheelshow host console: reads host commands from a terminal, drives the
//! session clock, and writes every game event as a JSON line.

pub mod config;
pub mod error;
pub mod input;
pub mod runner;
pub mod state;
