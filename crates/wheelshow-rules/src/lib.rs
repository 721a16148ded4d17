//! Wheelshow — Scoring & Wheel Resolution.
//!
//! Responsible for player money (round and total scores) and for turning
//! a spin of the wheel into a discrete wedge outcome.

pub mod domain;
