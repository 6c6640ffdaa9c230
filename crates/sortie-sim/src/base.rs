//! The base repository: canonical collections for pilots, aircraft slots,
//! missions, reports, crew counts, and the points balance, plus id-based
//! lookup and the bounded operations log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use sortie_core::constants::*;
use sortie_core::entities::*;
use sortie_core::enums::*;
use sortie_core::events::LogEntry;

use crate::campaign::Campaign;

/// Explicit per-kind FIFO queues for service reservations. Entries are
/// slot ids in enqueue order; the reservation details live on the slot's
/// `SlotActivity::Queued`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceQueues {
    pub fuel: VecDeque<SlotId>,
    pub maint: VecDeque<SlotId>,
    pub ammo: VecDeque<SlotId>,
}

impl ServiceQueues {
    pub fn queue(&self, kind: ServiceKind) -> &VecDeque<SlotId> {
        match kind {
            ServiceKind::Fuel => &self.fuel,
            ServiceKind::Maint => &self.maint,
            ServiceKind::Ammo => &self.ammo,
        }
    }

    pub fn queue_mut(&mut self, kind: ServiceKind) -> &mut VecDeque<SlotId> {
        match kind {
            ServiceKind::Fuel => &mut self.fuel,
            ServiceKind::Maint => &mut self.maint,
            ServiceKind::Ammo => &mut self.ammo,
        }
    }

    /// Remove a slot from whichever queue holds it.
    pub fn remove(&mut self, slot_id: SlotId) {
        for kind in ServiceKind::ALL {
            self.queue_mut(kind).retain(|id| *id != slot_id);
        }
    }
}

/// The complete persistent state of the base. All mutation is serialized
/// through the engine's single tick/command entry point, so no interior
/// locking is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseState {
    pub version: String,
    pub created_at: u64,
    /// Timestamp of the last processed tick (epoch ms).
    pub last_tick: u64,
    pub points: u32,
    #[serde(default)]
    pub crew: CrewCounts,
    pub pilots: Vec<Pilot>,
    pub slots: Vec<AircraftSlot>,
    #[serde(default)]
    pub missions: Vec<Mission>,
    /// Completed mission reports, newest first, capped.
    #[serde(default)]
    pub mission_history: Vec<MissionReport>,
    /// Operations log, newest first, capped.
    #[serde(default)]
    pub log: Vec<LogEntry>,
    #[serde(default)]
    pub campaign: Campaign,
    #[serde(default)]
    pub queues: ServiceQueues,

    // Id counters.
    #[serde(default)]
    pub next_slot_id: u32,
    #[serde(default)]
    pub next_pilot_id: u32,
    #[serde(default)]
    pub next_mission_id: u32,
    #[serde(default)]
    pub next_report_id: u32,
}

impl BaseState {
    /// A fresh base with the standard starting roster: six pilots, six
    /// Spitfires split across squadrons 1 and 2, one crew of each trade.
    pub fn new(now: u64) -> Self {
        let roster: [(&str, u32, f64); 6] = [
            ("F/O Harris", 1, 10.0),
            ("P/O Clarke", 2, 5.0),
            ("Sgt. Miller", 1, 0.0),
            ("F/Lt Benson", 3, 25.0),
            ("P/O Shaw", 2, 15.0),
            ("Sgt. Evans", 1, 0.0),
        ];

        let pilots: Vec<Pilot> = roster
            .iter()
            .enumerate()
            .map(|(i, (name, skill, fatigue))| Pilot {
                id: PilotId(i as u32),
                name: (*name).to_string(),
                role: PilotRole::Fighter,
                skill: *skill,
                fatigue: *fatigue,
                alive: true,
                missions: 0,
                kills: 0,
                rest: Rest::Idle,
            })
            .collect();

        let slots: Vec<AircraftSlot> = (0..6)
            .map(|i| AircraftSlot {
                id: SlotId(i as u32),
                callsign: format!("Red-{}", i + 1),
                model: "Spitfire Mk.I".to_string(),
                fuel: 100,
                ammo: 100,
                condition: 100,
                state: SlotState::Ready,
                activity: SlotActivity::Idle,
                pilot_id: Some(PilotId(i as u32)),
                squadron_id: if i < 3 { 1 } else { 2 },
            })
            .collect();

        let mut state = Self {
            version: SAVE_VERSION.to_string(),
            created_at: now,
            last_tick: now,
            points: 14,
            crew: CrewCounts::default(),
            pilots,
            slots,
            missions: Vec::new(),
            mission_history: Vec::new(),
            log: Vec::new(),
            campaign: Campaign::default(),
            queues: ServiceQueues::default(),
            next_slot_id: 6,
            next_pilot_id: 6,
            next_mission_id: 0,
            next_report_id: 0,
        };
        state.push_log(now, "Base operational. Ground crews standing by.".into());
        state
    }

    // --- Lookups. A miss means a stale id; callers treat it as a no-op. ---

    pub fn pilot(&self, id: PilotId) -> Option<&Pilot> {
        self.pilots.iter().find(|p| p.id == id)
    }

    pub fn pilot_mut(&mut self, id: PilotId) -> Option<&mut Pilot> {
        self.pilots.iter_mut().find(|p| p.id == id)
    }

    pub fn slot(&self, id: SlotId) -> Option<&AircraftSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut AircraftSlot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }

    pub fn mission(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub fn mission_mut(&mut self, id: MissionId) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    /// The slot a pilot is seated in, if any.
    pub fn pilot_slot(&self, pilot_id: PilotId) -> Option<&AircraftSlot> {
        self.slots.iter().find(|s| s.pilot_id == Some(pilot_id))
    }

    // --- Id allocation ---

    pub fn alloc_slot_id(&mut self) -> SlotId {
        let id = SlotId(self.next_slot_id);
        self.next_slot_id += 1;
        id
    }

    pub fn alloc_pilot_id(&mut self) -> PilotId {
        let id = PilotId(self.next_pilot_id);
        self.next_pilot_id += 1;
        id
    }

    pub fn alloc_mission_id(&mut self) -> MissionId {
        let id = MissionId(self.next_mission_id);
        self.next_mission_id += 1;
        id
    }

    pub fn alloc_report_id(&mut self) -> u32 {
        let id = self.next_report_id;
        self.next_report_id += 1;
        id
    }

    // --- Bounded sinks ---

    /// Append a log line, newest first, bounded by `LOG_CAP`.
    pub fn push_log(&mut self, at: u64, message: String) {
        self.log.insert(0, LogEntry { at, message });
        self.log.truncate(LOG_CAP);
    }

    /// Append a mission report, newest first, bounded by
    /// `MISSION_HISTORY_CAP`.
    pub fn push_report(&mut self, report: MissionReport) {
        self.mission_history.insert(0, report);
        self.mission_history.truncate(MISSION_HISTORY_CAP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_roster() {
        let state = BaseState::new(1_000);
        assert_eq!(state.pilots.len(), 6);
        assert_eq!(state.slots.len(), 6);
        assert_eq!(state.points, 14);
        assert_eq!(state.crew, CrewCounts::default());
        // First three aircraft in squadron 1, rest in squadron 2.
        assert!(state.slots[..3].iter().all(|s| s.squadron_id == 1));
        assert!(state.slots[3..].iter().all(|s| s.squadron_id == 2));
        // Every starting aircraft has its own pilot.
        for (i, s) in state.slots.iter().enumerate() {
            assert_eq!(s.pilot_id, Some(PilotId(i as u32)));
        }
        assert_eq!(state.log.len(), 1);
    }

    #[test]
    fn log_is_bounded_newest_first() {
        let mut state = BaseState::new(0);
        for i in 0..250 {
            state.push_log(i, format!("entry {i}"));
        }
        assert_eq!(state.log.len(), LOG_CAP);
        assert_eq!(state.log[0].message, "entry 249");
    }

    #[test]
    fn queues_remove_covers_all_kinds() {
        let mut queues = ServiceQueues::default();
        queues.fuel.push_back(SlotId(1));
        queues.ammo.push_back(SlotId(1));
        queues.ammo.push_back(SlotId(2));
        queues.remove(SlotId(1));
        assert!(queues.fuel.is_empty());
        assert_eq!(queues.ammo.len(), 1);
        assert_eq!(queues.ammo[0], SlotId(2));
    }

    #[test]
    fn stale_lookups_return_none() {
        let state = BaseState::new(0);
        assert!(state.slot(SlotId(99)).is_none());
        assert!(state.pilot(PilotId(99)).is_none());
        assert!(state.mission(MissionId(0)).is_none());
    }
}
