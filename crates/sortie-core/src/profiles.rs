//! Per-mission-type tuning profiles.
//!
//! Consolidates the numeric curves that differ by mission archetype:
//! duration, reward, fatigue, risk/kill bases, and resource consumption.

use crate::enums::MissionType;

/// Tuning profile for one mission type. Ranges are inclusive.
pub struct MissionProfile {
    /// Display name used for mission offers and reports.
    pub display_name: &'static str,
    /// Flight duration range in simulated minutes.
    pub duration_mins: (u32, u32),
    /// Points reward range (before defense-level and loss adjustments).
    pub reward: (u32, u32),
    /// Fatigue gain range per pilot (before skill reduction).
    pub fatigue: (u32, u32),
    /// Base per-slot loss/damage risk.
    pub risk_base: f64,
    /// Base per-pilot kill probability (fighters only).
    pub kill_base: f64,
    /// Flat fuel consumption range, same draw applied to every aircraft.
    pub fuel_use: (i32, i32),
    /// Flat ammunition consumption range.
    pub ammo_use: (i32, i32),
    /// One-line order phrasing for the briefing.
    pub order_line: &'static str,
}

/// Get the tuning profile for a mission type.
pub fn profile(mission_type: MissionType) -> MissionProfile {
    match mission_type {
        MissionType::Patrol => MissionProfile {
            display_name: "Coastal patrol",
            duration_mins: (2, 4),
            reward: (10, 16),
            fatigue: (6, 12),
            risk_base: 0.08,
            kill_base: 0.08,
            fuel_use: (16, 26),
            ammo_use: (6, 16),
            order_line: "CAP patrol.",
        },
        MissionType::Intercept => MissionProfile {
            display_name: "Interception",
            duration_mins: (2, 5),
            reward: (12, 20),
            fatigue: (10, 18),
            risk_base: 0.20,
            kill_base: 0.30,
            fuel_use: (22, 32),
            ammo_use: (22, 38),
            order_line: "Urgent interception.",
        },
        MissionType::Escort => MissionProfile {
            display_name: "Short escort",
            duration_mins: (3, 5),
            reward: (11, 18),
            fatigue: (8, 16),
            risk_base: 0.12,
            kill_base: 0.10,
            fuel_use: (20, 30),
            ammo_use: (10, 22),
            order_line: "Escort duty assigned.",
        },
        MissionType::Scramble => MissionProfile {
            display_name: "Quick alert",
            duration_mins: (2, 4),
            reward: (11, 19),
            fatigue: (10, 18),
            risk_base: 0.16,
            kill_base: 0.24,
            fuel_use: (18, 28),
            ammo_use: (18, 34),
            order_line: "Immediate scramble.",
        },
    }
}
