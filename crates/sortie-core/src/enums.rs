//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an aircraft hangar slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotState {
    /// On the ground, available for service or launch.
    #[default]
    Ready,
    /// Airborne on an active mission.
    Mission,
    /// A ground crew is working on it.
    Service,
    /// Shot down, crashed, or written off. Terminal.
    Lost,
}

/// Ground service category. Each kind has its own crew capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Fuel,
    Ammo,
    Maint,
}

impl ServiceKind {
    /// Fixed promotion order within a tick: FUEL, MAINT, AMMO.
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Fuel, ServiceKind::Maint, ServiceKind::Ammo];

    /// Human label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fuel => "refueling",
            Self::Ammo => "rearming",
            Self::Maint => "maintenance",
        }
    }

    /// The crew trade that performs this service.
    pub fn crew_label(&self) -> &'static str {
        match self {
            Self::Fuel => "fueler",
            Self::Ammo => "armorer",
            Self::Maint => "mechanic",
        }
    }
}

/// Mission archetype. Each type carries its own tuning profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionType {
    #[default]
    Patrol,
    Intercept,
    Escort,
    Scramble,
}

impl MissionType {
    pub const ALL: [MissionType; 4] = [
        MissionType::Patrol,
        MissionType::Intercept,
        MissionType::Escort,
        MissionType::Scramble,
    ];
}

/// Mission state machine. A PENDING mission may also be removed outright
/// by operator rejection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionState {
    #[default]
    Pending,
    Active,
    Done,
}

/// Recorded mission outcome. The resolver currently only ever assigns
/// `Success`; the other variants exist for the debrief vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    #[default]
    Success,
    Partial,
    Abort,
    Failed,
}

impl MissionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Mission completed successfully.",
            Self::Partial => "Partial result. Objective achieved in a limited way.",
            Self::Abort => "Mission aborted. Early return to base.",
            Self::Failed => "Mission failed.",
        }
    }
}

/// Cause of an aircraft loss, evaluated in this fixed order (first wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Fuel,
    Combat,
    Accident,
}

impl LossCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "FUEL",
            Self::Combat => "COMBAT",
            Self::Accident => "ACCIDENT",
        }
    }

    /// Phrase used in log lines and report events.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Fuel => "ran out of fuel",
            Self::Combat => "shot down in combat",
            Self::Accident => "mechanical accident",
        }
    }
}

/// Estimated air-defense level of a campaign locality. Adjusts the risk
/// and reward of missions directed at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseLevel {
    Low,
    #[default]
    Med,
    High,
    VeryHigh,
}

impl DefenseLevel {
    /// Additive adjustment to the per-slot risk base.
    pub fn risk_bonus(&self) -> f64 {
        match self {
            Self::Low => -0.01,
            Self::Med => 0.0,
            Self::High => 0.03,
            Self::VeryHigh => 0.06,
        }
    }

    /// Additive adjustment to both ends of the reward range.
    pub fn reward_bonus(&self) -> u32 {
        match self {
            Self::Low | Self::Med => 0,
            Self::High => 1,
            Self::VeryHigh => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY HIGH",
        }
    }
}

/// Pilot duty role. Only fighters roll for kills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilotRole {
    #[default]
    Fighter,
}

/// Why a slot cannot launch right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchBlock {
    /// Slot is not READY (in service, on mission, or lost).
    Unavailable,
    /// No assigned pilot, or the assigned pilot is dead.
    NoPilot,
    Resting,
    Exhausted,
    NoFuel,
    CriticalCondition,
    NoAmmo,
}

impl LaunchBlock {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::NoPilot => "no pilot",
            Self::Resting => "pilot resting",
            Self::Exhausted => "pilot exhausted",
            Self::NoFuel => "no fuel",
            Self::CriticalCondition => "critical condition",
            Self::NoAmmo => "no ammo",
        }
    }
}
