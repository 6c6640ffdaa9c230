//! Operator commands consumed by the simulation.
//!
//! Each command is a single atomic operation against the base repository.
//! Rejected commands are logged no-ops; nothing here can abort the
//! simulation.

use serde::{Deserialize, Serialize};

use crate::entities::{MissionId, PilotId, SlotId, SquadId};
use crate::enums::ServiceKind;

/// Campaign context for a directed mission: a target locality and an
/// optional objective within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionContext {
    pub locality_id: String,
    #[serde(default)]
    pub objective_id: Option<String>,
}

/// All operator actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Missions ---
    /// Spend points to generate a new mission offer. With a context, the
    /// mission is directed at a campaign locality.
    GenerateMission {
        #[serde(default)]
        context: Option<MissionContext>,
    },
    /// Draft a squadron and launch a pending mission.
    AssignMission {
        mission_id: MissionId,
        squad: SquadId,
    },
    /// Discard a pending mission offer.
    RejectMission { mission_id: MissionId },

    // --- Services ---
    /// Request fuel, ammunition, or maintenance for a slot.
    RequestService { slot_id: SlotId, kind: ServiceKind },
    /// Cancel a queued (not yet started) service. Full refund.
    CancelService { slot_id: SlotId },

    // --- Pilots ---
    /// Send a pilot to rest.
    StartRest { pilot_id: PilotId },
    /// Seat a pilot in an unoccupied aircraft.
    AssignPilot { pilot_id: PilotId, slot_id: SlotId },
    /// Release a pilot from their aircraft.
    UnassignPilot { pilot_id: PilotId },
    /// Move an aircraft to another squadron.
    SetSquadron { slot_id: SlotId, squad: SquadId },

    // --- Procurement ---
    /// Purchase a new aircraft (unpiloted, squadron pool).
    BuyAircraft,
    /// Recruit a new pilot with randomized name and skill.
    RecruitPilot,
    /// Hire one ground crew member of the given trade.
    HireCrew { kind: ServiceKind },
    /// Strike a LOST slot from the roster. Only permitted when no living
    /// pilot is still tied to it.
    RemoveLostSlot { slot_id: SlotId },
}
