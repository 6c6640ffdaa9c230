//! Pilot rest subsystem and the continuous fatigue recovery model.
//!
//! Fatigue only ever accrues inside mission resolution; this module is
//! recovery-only.

use sortie_core::constants::*;
use sortie_core::entities::{Pilot, PilotId, Rest};
use sortie_core::enums::SlotState;

use crate::base::BaseState;

/// Rest duration in simulated minutes, derived from current fatigue.
pub fn rest_mins_for_fatigue(fatigue: f64) -> u32 {
    let mins = 2 + (fatigue / 12.0).ceil() as u32;
    mins.clamp(REST_MIN_MINS, REST_MAX_MINS)
}

/// Is this pilot currently flying an active mission?
pub fn pilot_in_mission(state: &BaseState, pilot_id: PilotId) -> bool {
    state
        .pilot_slot(pilot_id)
        .is_some_and(|s| s.state == SlotState::Mission)
}

/// Send a pilot to rest. Rejected (logged no-op) for dead, already
/// resting, or airborne pilots.
pub fn start_rest(state: &mut BaseState, pilot_id: PilotId, now: u64) -> Result<(), String> {
    let pilot = state.pilot(pilot_id).ok_or("No such pilot")?;
    if !pilot.alive {
        return Err(format!("{} is no longer on the roster", pilot.name));
    }
    if pilot.rest.is_active() {
        let msg = format!("{} is already resting.", pilot.name);
        state.push_log(now, msg.clone());
        return Err(msg);
    }
    if pilot_in_mission(state, pilot_id) {
        let msg = format!("{} is on a mission and cannot rest.", pilot.name);
        state.push_log(now, msg.clone());
        return Err(msg);
    }

    let (name, minutes) = {
        let pilot = state.pilot_mut(pilot_id).ok_or("No such pilot")?;
        let minutes = rest_mins_for_fatigue(pilot.fatigue);
        pilot.rest = Rest::Active {
            start: now,
            end: now + minutes as u64 * MINUTE_MS,
            minutes,
        };
        (pilot.name.clone(), minutes)
    };
    state.push_log(now, format!("{name} begins rest ({minutes} min)."));
    Ok(())
}

/// Clear an elapsed rest. No-op for a pilot who is not resting.
pub fn finish_rest(state: &mut BaseState, pilot_id: PilotId, now: u64) {
    let name = {
        let pilot = match state.pilot_mut(pilot_id) {
            Some(p) => p,
            None => return,
        };
        if !pilot.rest.is_active() {
            return;
        }
        pilot.rest = Rest::Idle;
        pilot.name.clone()
    };
    state.push_log(now, format!("{name} finishes rest."));
}

/// Recovery rate in fatigue points per simulated minute. Resting
/// dominates; otherwise idle pilots recover faster than airborne ones.
fn recovery_rate(pilot: &Pilot, in_mission: bool) -> f64 {
    if pilot.rest.is_active() {
        FATIGUE_RECOVERY_RESTING
    } else if in_mission {
        FATIGUE_RECOVERY_MISSION
    } else {
        FATIGUE_RECOVERY_IDLE
    }
}

/// Apply continuous fatigue recovery to every living pilot, scaled by
/// elapsed wall time.
pub fn passive_fatigue_recovery(state: &mut BaseState, dt_ms: u64) {
    let dt_min = dt_ms as f64 / MINUTE_MS as f64;
    let in_mission: Vec<bool> = state
        .pilots
        .iter()
        .map(|p| pilot_in_mission(state, p.id))
        .collect();

    for (pilot, airborne) in state.pilots.iter_mut().zip(in_mission) {
        if !pilot.alive {
            continue;
        }
        let rate = recovery_rate(pilot, airborne);
        pilot.fatigue = (pilot.fatigue - rate * dt_min).clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_duration_curve() {
        assert_eq!(rest_mins_for_fatigue(0.0), 2);
        assert_eq!(rest_mins_for_fatigue(12.0), 3);
        assert_eq!(rest_mins_for_fatigue(50.0), 7);
        // Capped at 10 minutes.
        assert_eq!(rest_mins_for_fatigue(100.0), 10);
    }

    #[test]
    fn resting_recovers_fastest() {
        let mut state = BaseState::new(0);
        let id = state.pilots[0].id;
        state.pilots[0].fatigue = 50.0;
        start_rest(&mut state, id, 0).unwrap();

        // One simulated minute of recovery while resting.
        passive_fatigue_recovery(&mut state, MINUTE_MS);
        let resting = state.pilot(id).unwrap().fatigue;
        assert!((resting - (50.0 - FATIGUE_RECOVERY_RESTING)).abs() < 1e-9);
    }

    #[test]
    fn idle_recovery_rate() {
        let mut state = BaseState::new(0);
        state.pilots[1].fatigue = 30.0;
        passive_fatigue_recovery(&mut state, MINUTE_MS);
        let f = state.pilots[1].fatigue;
        assert!((f - (30.0 - FATIGUE_RECOVERY_IDLE)).abs() < 1e-9);
    }

    #[test]
    fn mission_recovery_rate_is_slowest() {
        let mut state = BaseState::new(0);
        state.pilots[0].fatigue = 30.0;
        state.slots[0].state = SlotState::Mission;
        passive_fatigue_recovery(&mut state, MINUTE_MS);
        let f = state.pilots[0].fatigue;
        assert!((f - (30.0 - FATIGUE_RECOVERY_MISSION)).abs() < 1e-9);
    }

    #[test]
    fn fatigue_never_goes_negative() {
        let mut state = BaseState::new(0);
        state.pilots[0].fatigue = 0.1;
        passive_fatigue_recovery(&mut state, 60 * MINUTE_MS);
        assert_eq!(state.pilots[0].fatigue, 0.0);
    }

    #[test]
    fn dead_pilot_cannot_rest() {
        let mut state = BaseState::new(0);
        let id = state.pilots[0].id;
        state.pilots[0].alive = false;
        assert!(start_rest(&mut state, id, 0).is_err());
        assert!(!state.pilot(id).unwrap().rest.is_active());
    }

    #[test]
    fn flying_pilot_cannot_rest() {
        let mut state = BaseState::new(0);
        let id = state.pilots[0].id;
        state.slots[0].state = SlotState::Mission;
        assert!(start_rest(&mut state, id, 0).is_err());
    }

    #[test]
    fn finish_rest_is_idempotent() {
        let mut state = BaseState::new(0);
        let id = state.pilots[0].id;
        start_rest(&mut state, id, 0).unwrap();
        finish_rest(&mut state, id, 120_000);
        let log_len = state.log.len();
        finish_rest(&mut state, id, 121_000);
        assert_eq!(state.log.len(), log_len, "second finish must be a no-op");
    }
}
