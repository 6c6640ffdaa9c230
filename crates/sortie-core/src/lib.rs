//! Core types and definitions for the SORTIE air-base simulation.
//!
//! This crate defines the vocabulary shared across the engine and any
//! frontend: entity structs, state machine enums, player commands, log
//! events, tuning constants, and display snapshots. It has no dependency
//! on any runtime framework.

pub mod commands;
pub mod constants;
pub mod entities;
pub mod enums;
pub mod events;
pub mod profiles;
pub mod state;

#[cfg(test)]
mod tests;
