//! Entity structs owned by the base repository: aircraft slots, pilots,
//! missions, and mission reports.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Aircraft hangar slot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u32);

/// Pilot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PilotId(pub u32);

/// Mission identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionId(pub u32);

/// Squadron group id (0 = pool, 1-4 = numbered squadrons).
pub type SquadId = u8;

/// A service currently being performed on a slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveService {
    pub kind: ServiceKind,
    pub start: u64,
    pub end: u64,
    /// Points paid on entry. Recorded for bookkeeping only; active
    /// services are not refundable.
    pub cost: u32,
}

/// A service reservation waiting for a free crew.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueuedService {
    pub kind: ServiceKind,
    pub queued_at: u64,
    pub duration_mins: u32,
    /// Points paid on entry, refunded in full on cancellation.
    pub cost: u32,
}

/// What the ground organization is doing with a slot. `Service` and
/// `Queued` are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SlotActivity {
    #[default]
    Idle,
    Service(ActiveService),
    Queued(QueuedService),
}

impl SlotActivity {
    pub fn service(&self) -> Option<&ActiveService> {
        match self {
            Self::Service(s) => Some(s),
            _ => None,
        }
    }

    pub fn queued(&self) -> Option<&QueuedService> {
        match self {
            Self::Queued(q) => Some(q),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// An aircraft hangar slot. Not necessarily occupied by a pilot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftSlot {
    pub id: SlotId,
    pub callsign: String,
    pub model: String,
    /// Depletable resources, clamped to 0..=100.
    pub fuel: i32,
    pub ammo: i32,
    pub condition: i32,
    #[serde(default)]
    pub state: SlotState,
    #[serde(default)]
    pub activity: SlotActivity,
    /// At most one pilot per slot; uniqueness of the reverse direction is
    /// enforced by assignment logic, not a stored back-pointer.
    #[serde(default)]
    pub pilot_id: Option<PilotId>,
    #[serde(default)]
    pub squadron_id: SquadId,
}

impl AircraftSlot {
    /// The resource a service kind replenishes.
    pub fn resource(&self, kind: ServiceKind) -> i32 {
        match kind {
            ServiceKind::Fuel => self.fuel,
            ServiceKind::Ammo => self.ammo,
            ServiceKind::Maint => self.condition,
        }
    }

    pub fn set_resource(&mut self, kind: ServiceKind, value: i32) {
        let v = value.clamp(0, 100);
        match kind {
            ServiceKind::Fuel => self.fuel = v,
            ServiceKind::Ammo => self.ammo = v,
            ServiceKind::Maint => self.condition = v,
        }
    }
}

/// Pilot rest state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Rest {
    #[default]
    Idle,
    Active { start: u64, end: u64, minutes: u32 },
}

impl Rest {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilot {
    pub id: PilotId,
    pub name: String,
    #[serde(default)]
    pub role: PilotRole,
    /// Skill grade, >= 1. Modifies risk, kill, and survival curves.
    pub skill: u32,
    /// Continuous fatigue, clamped to 0..=100.
    pub fatigue: f64,
    /// A dead pilot stays in the roster as a historical record but is
    /// excluded from assignment, rest, and launch.
    #[serde(default = "default_true")]
    pub alive: bool,
    #[serde(default)]
    pub missions: u32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub rest: Rest,
}

impl Pilot {
    /// Display band for the current fatigue value.
    pub fn fatigue_band(&self) -> &'static str {
        if self.fatigue < 30.0 {
            "fresh"
        } else if self.fatigue < 55.0 {
            "tired"
        } else if self.fatigue < 75.0 {
            "very tired"
        } else {
            "exhausted"
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub mission_type: MissionType,
    pub name: String,
    pub created_at: u64,
    /// Set at the PENDING -> ACTIVE transition.
    #[serde(default)]
    pub start_at: Option<u64>,
    #[serde(default)]
    pub end_at: Option<u64>,
    pub duration_ms: u64,
    pub reward_min: u32,
    pub reward_max: u32,
    pub fatigue_min: u32,
    pub fatigue_max: u32,
    pub required_planes: usize,
    #[serde(default)]
    pub assigned_squadron: Option<SquadId>,
    /// Non-empty only in ACTIVE/DONE; length equals `required_planes` at
    /// assignment time.
    #[serde(default)]
    pub assigned_slot_ids: Vec<SlotId>,
    #[serde(default)]
    pub state: MissionState,

    // Narrative fields, filled at generation time.
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub threat: Option<String>,
    #[serde(default)]
    pub briefing: String,

    // Directed-mission campaign context.
    #[serde(default)]
    pub locality_id: Option<String>,
    #[serde(default)]
    pub objective_id: Option<String>,
    #[serde(default)]
    pub defense_level: DefenseLevel,
    /// Additive risk adjustment derived from `defense_level`.
    #[serde(default)]
    pub risk_bonus: f64,
}

/// Aggregate statistics of a completed mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionStats {
    pub kills: u32,
    pub losses: u32,
    pub loss_causes: Vec<LossCause>,
    pub damage_total: u32,
    pub fuel_used: i32,
    pub ammo_used: i32,
    pub points_delta: u32,
}

/// Immutable record appended to the bounded mission history on completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionReport {
    pub id: u32,
    pub mission_id: MissionId,
    pub title: String,
    pub squad: Option<SquadId>,
    pub outcome: MissionOutcome,
    pub created_at: u64,
    pub started_at: u64,
    pub ended_at: u64,
    pub briefing: String,
    pub debrief: String,
    /// Ordered narrative event log.
    pub events: Vec<String>,
    pub stats: MissionStats,
}

/// Ground crew headcount per trade. Hiring only ever increases these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewCounts {
    pub fuelers: u32,
    pub mechanics: u32,
    pub armorers: u32,
}

impl Default for CrewCounts {
    fn default() -> Self {
        Self {
            fuelers: 1,
            mechanics: 1,
            armorers: 1,
        }
    }
}

impl CrewCounts {
    /// Total crew capacity for a service kind.
    pub fn for_kind(&self, kind: ServiceKind) -> u32 {
        match kind {
            ServiceKind::Fuel => self.fuelers,
            ServiceKind::Ammo => self.armorers,
            ServiceKind::Maint => self.mechanics,
        }
    }

    pub fn hire(&mut self, kind: ServiceKind) {
        match kind {
            ServiceKind::Fuel => self.fuelers += 1,
            ServiceKind::Ammo => self.armorers += 1,
            ServiceKind::Maint => self.mechanics += 1,
        }
    }
}
