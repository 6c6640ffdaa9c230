//! Base snapshot — the visible state handed to an external presenter
//! after each tick or command.

use serde::{Deserialize, Serialize};

use crate::entities::{MissionId, PilotId, SlotId, SquadId};
use crate::enums::*;
use crate::events::LogEntry;

/// Complete visible state of the base.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseSnapshot {
    /// Timestamp the snapshot was built at (epoch ms).
    pub time: u64,
    pub points: u32,
    pub crew: CrewView,
    pub slots: Vec<SlotView>,
    pub pilots: Vec<PilotView>,
    pub missions: Vec<MissionView>,
    /// Queue depths per service kind, FUEL / MAINT / AMMO.
    pub queue_depths: [u32; 3],
    /// Recent log lines, newest first.
    pub log: Vec<LogEntry>,
    /// Number of retained mission reports.
    pub report_count: usize,
}

/// Crew capacity and live utilization per trade.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CrewView {
    pub fuelers: u32,
    pub fuelers_busy: u32,
    pub mechanics: u32,
    pub mechanics_busy: u32,
    pub armorers: u32,
    pub armorers_busy: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotView {
    pub id: SlotId,
    pub callsign: String,
    pub model: String,
    pub fuel: i32,
    pub ammo: i32,
    pub condition: i32,
    pub state: SlotState,
    pub squadron_id: SquadId,
    pub pilot: Option<String>,
    /// Remaining service time in ms, when servicing.
    pub service: Option<ServiceView>,
    /// Queued reservation, when waiting for a crew.
    pub queued: Option<QueuedView>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ServiceView {
    pub kind: ServiceKind,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QueuedView {
    pub kind: ServiceKind,
    pub duration_mins: u32,
    pub cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotView {
    pub id: PilotId,
    pub name: String,
    pub role: PilotRole,
    pub skill: u32,
    pub fatigue: f64,
    pub fatigue_band: String,
    pub alive: bool,
    pub missions: u32,
    pub kills: u32,
    pub resting: bool,
    /// Remaining rest time in ms, when resting.
    pub rest_remaining_ms: Option<u64>,
    /// Callsign of the assigned aircraft, if any.
    pub aircraft: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionView {
    pub id: MissionId,
    pub mission_type: MissionType,
    pub name: String,
    pub state: MissionState,
    pub required_planes: usize,
    pub assigned_squadron: Option<SquadId>,
    /// Remaining flight time in ms, when active.
    pub remaining_ms: Option<u64>,
    pub briefing: String,
    /// Squadrons currently able to satisfy `required_planes`.
    pub eligible_squads: Vec<SquadId>,
}
