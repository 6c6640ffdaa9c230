//! SORTIE simulation engine.
//!
//! Headless resolution core for the air-base management game: entity
//! repository, service scheduler, pilot rest/fatigue model, mission
//! resolver, campaign context, and persistence. Completely framework-free
//! and deterministic under an injected RNG seed, enabling reproducible
//! testing.

pub mod base;
pub mod campaign;
pub mod engine;
pub mod missions;
pub mod persistence;
pub mod pilots;
pub mod services;
pub mod snapshot;
