//! The simulation engine: a single owned context holding the base state
//! and the seeded RNG, driven by operator commands and periodic ticks.
//!
//! All mutation funnels through `handle_command` and `advance`, so two
//! engines built from the same seed and fed the same inputs stay
//! byte-identical.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sortie_core::commands::Command;
use sortie_core::constants::*;
use sortie_core::entities::*;
use sortie_core::enums::*;
use sortie_core::events::TickReport;
use sortie_core::state::BaseSnapshot;

use crate::base::BaseState;
use crate::missions;
use crate::persistence::{self, SaveData};
use crate::pilots;
use crate::services;
use crate::snapshot;

const RECRUIT_RANKS: [&str; 6] = ["P/O", "F/O", "Sgt.", "F/Lt", "Plt Off.", "Cpl."];
const RECRUIT_SURNAMES: [&str; 12] = [
    "Baker", "Hughes", "Turner", "Scott", "Morgan", "Ward", "Foster", "Reed", "Howard", "Price",
    "Collins", "Parker",
];
/// Skewed toward green recruits.
const RECRUIT_SKILLS: [u32; 5] = [1, 1, 2, 2, 3];

#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

pub struct Simulation {
    pub state: BaseState,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// A fresh base at the given timestamp.
    pub fn new(config: SimConfig, now: u64) -> Self {
        Self {
            state: BaseState::new(now),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
        }
    }

    /// Rebuild an engine from restored state. The RNG restarts from the
    /// saved seed.
    pub fn from_state(state: BaseState, seed: u64) -> Self {
        Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Restore from a save payload (already sanitized by the loader).
    pub fn from_save(save: SaveData) -> Self {
        let seed = save.seed;
        Self::from_state(save.state, seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Package the current state for persistence.
    pub fn to_save(&self, timestamp: u64, slot_name: &str) -> SaveData {
        persistence::make_save(&self.state, self.seed, timestamp, slot_name)
    }

    /// A presenter-ready view of the whole base.
    pub fn snapshot(&self, now: u64) -> BaseSnapshot {
        snapshot::build(&self.state, now)
    }

    /// Apply one operator command. Rejections return `Err` with a
    /// human-readable reason; most are also logged so the operations log
    /// tells the story on its own.
    pub fn handle_command(&mut self, command: Command, now: u64) -> Result<(), String> {
        match command {
            Command::GenerateMission { context } => self.generate_mission(context.as_ref(), now),
            Command::AssignMission { mission_id, squad } => {
                missions::assign_to_squad(&mut self.state, mission_id, squad, now)
            }
            Command::RejectMission { mission_id } => self.reject_mission(mission_id, now),
            Command::RequestService { slot_id, kind } => {
                services::start_or_queue(&mut self.state, slot_id, kind, now)
            }
            Command::CancelService { slot_id } => {
                services::cancel_pending(&mut self.state, slot_id, now)
            }
            Command::StartRest { pilot_id } => pilots::start_rest(&mut self.state, pilot_id, now),
            Command::AssignPilot { pilot_id, slot_id } => {
                self.assign_pilot(pilot_id, slot_id, now)
            }
            Command::UnassignPilot { pilot_id } => self.unassign_pilot(pilot_id, now),
            Command::SetSquadron { slot_id, squad } => self.set_squadron(slot_id, squad, now),
            Command::BuyAircraft => self.buy_aircraft(now),
            Command::RecruitPilot => self.recruit_pilot(now),
            Command::HireCrew { kind } => self.hire_crew(kind, now),
            Command::RemoveLostSlot { slot_id } => self.remove_lost_slot(slot_id, now),
        }
    }

    /// Advance simulated time to `now`: finish elapsed services and
    /// rests, resolve elapsed missions, promote queued services into
    /// freed capacity, and apply continuous fatigue recovery.
    pub fn advance(&mut self, now: u64) -> TickReport {
        let dt = now.saturating_sub(self.state.last_tick);
        let mut report = TickReport::default();

        let due_services: Vec<SlotId> = self
            .state
            .slots
            .iter()
            .filter(|s| s.activity.service().is_some_and(|a| a.end <= now))
            .map(|s| s.id)
            .collect();
        for slot_id in due_services {
            let promoted = services::finish_service(&mut self.state, slot_id, now);
            report.services_finished += 1;
            if promoted {
                report.queue_starts += 1;
            }
        }

        let due_rests: Vec<PilotId> = self
            .state
            .pilots
            .iter()
            .filter(|p| matches!(p.rest, Rest::Active { end, .. } if end <= now))
            .map(|p| p.id)
            .collect();
        for pilot_id in due_rests {
            pilots::finish_rest(&mut self.state, pilot_id, now);
            report.rests_finished += 1;
        }

        let due_missions: Vec<MissionId> = self
            .state
            .missions
            .iter()
            .filter(|m| m.state == MissionState::Active && m.end_at.is_some_and(|e| e <= now))
            .map(|m| m.id)
            .collect();
        for mission_id in due_missions {
            missions::complete_mission(&mut self.state, &mut self.rng, mission_id, now);
            report.missions_completed += 1;
        }
        // Resolved missions live on in the report history only.
        self.state
            .missions
            .retain(|m| m.state != MissionState::Done);

        // Sweep any capacity freed by other paths, in fixed kind order.
        for kind in ServiceKind::ALL {
            while services::promote_next(&mut self.state, kind, now) {
                report.queue_starts += 1;
            }
        }

        pilots::passive_fatigue_recovery(&mut self.state, dt);

        report.dirty = report.services_finished > 0
            || report.rests_finished > 0
            || report.missions_completed > 0
            || report.queue_starts > 0;

        // Periodic autosave fires at most once per boundary, and only
        // when no completion already forced a save this tick.
        let crossed =
            now / AUTOSAVE_INTERVAL_MS > self.state.last_tick / AUTOSAVE_INTERVAL_MS;
        report.autosave = crossed && !report.dirty;

        self.state.last_tick = now;
        report
    }

    // --- Command handlers ---

    fn generate_mission(
        &mut self,
        context: Option<&sortie_core::commands::MissionContext>,
        now: u64,
    ) -> Result<(), String> {
        if self.state.points < MISSION_GEN_COST {
            let msg = format!("Not enough points to request a mission ({MISSION_GEN_COST} pts).");
            self.state.push_log(now, msg.clone());
            return Err(msg);
        }
        self.state.points -= MISSION_GEN_COST;
        let mission = missions::generate_mission(&mut self.state, &mut self.rng, now, context);
        self.state.push_log(
            now,
            format!(
                "New mission available: \"{}\" (needs {} aircraft). -{MISSION_GEN_COST} pts.",
                mission.name, mission.required_planes
            ),
        );
        self.state.missions.push(mission);
        Ok(())
    }

    fn reject_mission(&mut self, mission_id: MissionId, now: u64) -> Result<(), String> {
        let idx = self
            .state
            .missions
            .iter()
            .position(|m| m.id == mission_id)
            .ok_or("No such mission")?;
        if self.state.missions[idx].state != MissionState::Pending {
            return Err("Only pending missions can be declined".into());
        }
        let mission = self.state.missions.remove(idx);
        self.state
            .push_log(now, format!("Mission \"{}\" declined.", mission.name));
        Ok(())
    }

    fn assign_pilot(&mut self, pilot_id: PilotId, slot_id: SlotId, now: u64) -> Result<(), String> {
        let name = {
            let pilot = self.state.pilot(pilot_id).ok_or("No such pilot")?;
            if !pilot.alive {
                return Err(format!("{} is no longer on the roster", pilot.name));
            }
            pilot.name.clone()
        };
        if pilots::pilot_in_mission(&self.state, pilot_id) {
            let msg = format!("{name} is airborne and cannot change aircraft.");
            self.state.push_log(now, msg.clone());
            return Err(msg);
        }

        let callsign = {
            let slot = self.state.slot(slot_id).ok_or("No such aircraft")?;
            match slot.state {
                SlotState::Mission | SlotState::Lost => {
                    return Err(format!("{} is not available", slot.callsign));
                }
                SlotState::Ready | SlotState::Service => {}
            }
            if slot.pilot_id.is_some() {
                let msg = format!("{} already has a pilot.", slot.callsign);
                self.state.push_log(now, msg.clone());
                return Err(msg);
            }
            slot.callsign.clone()
        };

        if let Some(prev) = self
            .state
            .slots
            .iter_mut()
            .find(|s| s.pilot_id == Some(pilot_id))
        {
            prev.pilot_id = None;
        }
        if let Some(slot) = self.state.slot_mut(slot_id) {
            slot.pilot_id = Some(pilot_id);
        }
        self.state
            .push_log(now, format!("{name} assigned to {callsign}."));
        Ok(())
    }

    fn unassign_pilot(&mut self, pilot_id: PilotId, now: u64) -> Result<(), String> {
        let name = self
            .state
            .pilot(pilot_id)
            .map(|p| p.name.clone())
            .ok_or("No such pilot")?;
        let (slot_id, callsign) = {
            let slot = self
                .state
                .pilot_slot(pilot_id)
                .ok_or_else(|| format!("{name} is not seated in any aircraft"))?;
            if slot.state == SlotState::Mission {
                return Err(format!("{name} is airborne and cannot be released"));
            }
            (slot.id, slot.callsign.clone())
        };
        if let Some(slot) = self.state.slot_mut(slot_id) {
            slot.pilot_id = None;
        }
        self.state
            .push_log(now, format!("{name} leaves {callsign}."));
        Ok(())
    }

    fn set_squadron(&mut self, slot_id: SlotId, squad: SquadId, now: u64) -> Result<(), String> {
        if !SQUAD_IDS.contains(&squad) {
            return Err(format!("Unknown squadron: {squad}"));
        }
        let callsign = {
            let slot = self.state.slot(slot_id).ok_or("No such aircraft")?;
            if slot.state == SlotState::Mission {
                return Err(format!("{} is airborne", slot.callsign));
            }
            slot.callsign.clone()
        };
        if let Some(slot) = self.state.slot_mut(slot_id) {
            slot.squadron_id = squad;
        }
        self.state.push_log(
            now,
            format!("{callsign} transferred to squadron {squad}."),
        );
        Ok(())
    }

    fn buy_aircraft(&mut self, now: u64) -> Result<(), String> {
        if self.state.points < BUY_AIRCRAFT_COST {
            let msg = format!("Not enough points to buy an aircraft ({BUY_AIRCRAFT_COST} pts).");
            self.state.push_log(now, msg.clone());
            return Err(msg);
        }
        self.state.points -= BUY_AIRCRAFT_COST;
        let id = self.state.alloc_slot_id();
        let callsign = format!("Red-{}", id.0 + 1);
        self.state.slots.push(AircraftSlot {
            id,
            callsign: callsign.clone(),
            model: "Spitfire Mk.I".to_string(),
            fuel: 100,
            ammo: 100,
            condition: 100,
            state: SlotState::Ready,
            activity: SlotActivity::Idle,
            pilot_id: None,
            squadron_id: 0,
        });
        self.state.push_log(
            now,
            format!("New aircraft delivered: {callsign}. -{BUY_AIRCRAFT_COST} pts."),
        );
        Ok(())
    }

    fn recruit_pilot(&mut self, now: u64) -> Result<(), String> {
        if self.state.points < RECRUIT_PILOT_COST {
            let msg = format!("Not enough points to recruit a pilot ({RECRUIT_PILOT_COST} pts).");
            self.state.push_log(now, msg.clone());
            return Err(msg);
        }
        self.state.points -= RECRUIT_PILOT_COST;
        let rank = RECRUIT_RANKS[self.rng.gen_range(0..RECRUIT_RANKS.len())];
        let surname = RECRUIT_SURNAMES[self.rng.gen_range(0..RECRUIT_SURNAMES.len())];
        let skill = RECRUIT_SKILLS[self.rng.gen_range(0..RECRUIT_SKILLS.len())];
        let fatigue = self.rng.gen_range(0..=15) as f64;
        let id = self.state.alloc_pilot_id();
        let name = format!("{rank} {surname}");
        self.state.pilots.push(Pilot {
            id,
            name: name.clone(),
            role: PilotRole::Fighter,
            skill,
            fatigue,
            alive: true,
            missions: 0,
            kills: 0,
            rest: Rest::Idle,
        });
        self.state.push_log(
            now,
            format!("New pilot reports for duty: {name} (skill {skill}). -{RECRUIT_PILOT_COST} pts."),
        );
        Ok(())
    }

    fn hire_crew(&mut self, kind: ServiceKind, now: u64) -> Result<(), String> {
        let cost = match kind {
            ServiceKind::Fuel => HIRE_FUELER_COST,
            ServiceKind::Maint => HIRE_MECHANIC_COST,
            ServiceKind::Ammo => HIRE_ARMORER_COST,
        };
        if self.state.points < cost {
            let msg = format!(
                "Not enough points to hire a {} ({cost} pts).",
                kind.crew_label()
            );
            self.state.push_log(now, msg.clone());
            return Err(msg);
        }
        self.state.points -= cost;
        self.state.crew.hire(kind);
        self.state.push_log(
            now,
            format!("Hired a {}. -{cost} pts.", kind.crew_label()),
        );
        // New capacity can absorb a queued request immediately.
        services::promote_next(&mut self.state, kind, now);
        Ok(())
    }

    fn remove_lost_slot(&mut self, slot_id: SlotId, now: u64) -> Result<(), String> {
        let callsign = {
            let slot = self.state.slot(slot_id).ok_or("No such aircraft")?;
            if slot.state != SlotState::Lost {
                return Err(format!("{} is not lost", slot.callsign));
            }
            if let Some(pid) = slot.pilot_id {
                if self.state.pilot(pid).is_some_and(|p| p.alive) {
                    return Err(format!("{} still has a pilot assigned", slot.callsign));
                }
            }
            slot.callsign.clone()
        };
        self.state.slots.retain(|s| s.id != slot_id);
        self.state.queues.remove(slot_id);
        self.state
            .push_log(now, format!("{callsign} struck from the roster."));
        Ok(())
    }
}
