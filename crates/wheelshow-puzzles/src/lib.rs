//! Wheelshow — puzzle catalog.
//!
//! Responsible for the ordered puzzle list a session plays through and
//! for reading that list from JSON or YAML puzzle files.

pub mod application;
pub mod domain;
