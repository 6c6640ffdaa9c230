//! Builds the presenter-facing `BaseSnapshot` from the live state.

use sortie_core::entities::Rest;
use sortie_core::enums::{MissionState, ServiceKind};
use sortie_core::state::*;

use crate::base::BaseState;
use crate::missions;
use crate::services;

pub fn build(state: &BaseState, now: u64) -> BaseSnapshot {
    let crew = CrewView {
        fuelers: state.crew.fuelers,
        fuelers_busy: services::busy_count(state, ServiceKind::Fuel),
        mechanics: state.crew.mechanics,
        mechanics_busy: services::busy_count(state, ServiceKind::Maint),
        armorers: state.crew.armorers,
        armorers_busy: services::busy_count(state, ServiceKind::Ammo),
    };

    let slots = state
        .slots
        .iter()
        .map(|s| SlotView {
            id: s.id,
            callsign: s.callsign.clone(),
            model: s.model.clone(),
            fuel: s.fuel,
            ammo: s.ammo,
            condition: s.condition,
            state: s.state,
            squadron_id: s.squadron_id,
            pilot: s
                .pilot_id
                .and_then(|pid| state.pilot(pid))
                .map(|p| p.name.clone()),
            service: s.activity.service().map(|a| ServiceView {
                kind: a.kind,
                remaining_ms: a.end.saturating_sub(now),
            }),
            queued: s.activity.queued().map(|q| QueuedView {
                kind: q.kind,
                duration_mins: q.duration_mins,
                cost: q.cost,
            }),
        })
        .collect();

    let pilots = state
        .pilots
        .iter()
        .map(|p| PilotView {
            id: p.id,
            name: p.name.clone(),
            role: p.role,
            skill: p.skill,
            fatigue: p.fatigue,
            fatigue_band: p.fatigue_band().to_string(),
            alive: p.alive,
            missions: p.missions,
            kills: p.kills,
            resting: p.rest.is_active(),
            rest_remaining_ms: match p.rest {
                Rest::Active { end, .. } => Some(end.saturating_sub(now)),
                Rest::Idle => None,
            },
            aircraft: state.pilot_slot(p.id).map(|s| s.callsign.clone()),
        })
        .collect();

    let missions_view = state
        .missions
        .iter()
        .filter(|m| m.state != MissionState::Done)
        .map(|m| MissionView {
            id: m.id,
            mission_type: m.mission_type,
            name: m.name.clone(),
            state: m.state,
            required_planes: m.required_planes,
            assigned_squadron: m.assigned_squadron,
            remaining_ms: match m.state {
                MissionState::Active => m.end_at.map(|e| e.saturating_sub(now)),
                _ => None,
            },
            briefing: m.briefing.clone(),
            eligible_squads: if m.state == MissionState::Pending {
                missions::find_eligible_squads(state, m.required_planes)
            } else {
                Vec::new()
            },
        })
        .collect();

    BaseSnapshot {
        time: now,
        points: state.points,
        crew,
        slots,
        pilots,
        missions: missions_view,
        queue_depths: [
            state.queues.fuel.len() as u32,
            state.queues.maint.len() as u32,
            state.queues.ammo.len() as u32,
        ],
        log: state.log.clone(),
        report_count: state.mission_history.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortie_core::entities::{ActiveService, SlotActivity};
    use sortie_core::enums::SlotState;

    #[test]
    fn fresh_base_snapshot() {
        let state = BaseState::new(0);
        let snap = build(&state, 500);
        assert_eq!(snap.time, 500);
        assert_eq!(snap.points, 14);
        assert_eq!(snap.slots.len(), 6);
        assert_eq!(snap.pilots.len(), 6);
        assert_eq!(snap.queue_depths, [0, 0, 0]);
        assert_eq!(snap.crew.fuelers, 1);
        assert_eq!(snap.crew.fuelers_busy, 0);
        assert_eq!(snap.report_count, 0);
        // Every seat is filled at the start.
        assert!(snap.slots.iter().all(|s| s.pilot.is_some()));
        assert!(snap.pilots.iter().all(|p| p.aircraft.is_some()));
    }

    #[test]
    fn remaining_times_count_down() {
        let mut state = BaseState::new(0);
        state.slots[0].state = SlotState::Service;
        state.slots[0].activity = SlotActivity::Service(ActiveService {
            kind: ServiceKind::Fuel,
            start: 0,
            end: 180_000,
            cost: 4,
        });
        let snap = build(&state, 60_000);
        let sv = snap.slots[0].service.unwrap();
        assert_eq!(sv.remaining_ms, 120_000);
        assert_eq!(snap.crew.fuelers_busy, 1);

        // Past the deadline the view clamps to zero.
        let late = build(&state, 200_000);
        assert_eq!(late.slots[0].service.unwrap().remaining_ms, 0);
    }

    #[test]
    fn resting_pilot_view() {
        let mut state = BaseState::new(0);
        state.pilots[0].rest = Rest::Active {
            start: 0,
            end: 120_000,
            minutes: 2,
        };
        let snap = build(&state, 30_000);
        assert!(snap.pilots[0].resting);
        assert_eq!(snap.pilots[0].rest_remaining_ms, Some(90_000));
        assert!(!snap.pilots[1].resting);
        assert_eq!(snap.pilots[1].rest_remaining_ms, None);
    }
}
