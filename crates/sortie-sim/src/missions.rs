//! Mission resolver: generation, launch eligibility, squadron drafting,
//! and probabilistic completion.
//!
//! All probability draws go through the engine's seeded RNG, so a mission
//! resolves identically for the same seed and draw order.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use sortie_core::commands::MissionContext;
use sortie_core::constants::*;
use sortie_core::entities::*;
use sortie_core::enums::*;
use sortie_core::profiles::{profile, MissionProfile};

use crate::base::BaseState;

const ZONES: [&str; 8] = [
    "Dover",
    "Canterbury",
    "Thames Estuary",
    "Folkestone",
    "Maidstone",
    "Ashford",
    "Manston",
    "Ramsgate",
];

const WEATHER: [&str; 7] = [
    "low haze",
    "broken sky",
    "layered cloud",
    "good visibility",
    "drizzle",
    "dense low cover",
    "moderate turbulence",
];

const THREATS: [&str; 7] = [
    "Bf 109s",
    "Bf 110s",
    "Ju 88s",
    "He 111s",
    "large formation",
    "isolated contacts",
    "low-level raid",
];

fn pick<'a>(rng: &mut ChaCha8Rng, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn rand_int(rng: &mut ChaCha8Rng, lo: u32, hi: u32) -> u32 {
    rng.gen_range(lo..=hi)
}

fn chance(rng: &mut ChaCha8Rng, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

fn build_briefing(zone: &str, order_line: &str, weather: &str, threat: &str) -> String {
    format!("Sector: {zone}.\nOrders: {order_line}\nWeather: {weather}.\nEstimated threat: {threat}.")
}

fn build_directed_briefing(
    locality: &str,
    objective: Option<(&str, &str)>,
    order_line: &str,
    defense: DefenseLevel,
) -> String {
    let mut lines = vec![format!("Locality: {locality}.")];
    if let Some((name, kind)) = objective {
        lines.push(format!("Objective: {name} ({kind})."));
    }
    lines.push(format!("Orders: {order_line}"));
    lines.push(format!("Estimated defenses: {}.", defense.as_str()));
    lines.join("\n")
}

/// Generate a new mission offer in PENDING state. With a campaign
/// context, the target locality's defense level adjusts risk and reward
/// and the briefing references the locality/objective.
pub fn generate_mission(
    state: &mut BaseState,
    rng: &mut ChaCha8Rng,
    now: u64,
    context: Option<&MissionContext>,
) -> Mission {
    let mission_type = MissionType::ALL[rng.gen_range(0..MissionType::ALL.len())];
    let p: MissionProfile = profile(mission_type);

    let duration_mins = rand_int(rng, p.duration_mins.0, p.duration_mins.1);
    let required_planes =
        REQUIRED_PLANES_CHOICES[rng.gen_range(0..REQUIRED_PLANES_CHOICES.len())];

    let locality = context.and_then(|c| state.campaign.locality(&c.locality_id));
    let objective = context.and_then(|c| {
        c.objective_id
            .as_deref()
            .and_then(|oid| state.campaign.objective(&c.locality_id, oid))
    });

    let defense_level = locality.map(|l| l.air_defense).unwrap_or_default();
    let reward_bonus = defense_level.reward_bonus();

    let (briefing, zone, weather, threat) = match locality {
        Some(l) => {
            let briefing = build_directed_briefing(
                &l.name,
                objective.map(|o| (o.name.as_str(), o.kind.as_str())),
                p.order_line,
                defense_level,
            );
            (briefing, None, None, None)
        }
        None => {
            let zone = pick(rng, &ZONES);
            let weather = pick(rng, &WEATHER);
            let threat = pick(rng, &THREATS);
            (
                build_briefing(zone, p.order_line, weather, threat),
                Some(zone.to_string()),
                Some(weather.to_string()),
                Some(threat.to_string()),
            )
        }
    };

    Mission {
        id: state.alloc_mission_id(),
        mission_type,
        name: p.display_name.to_string(),
        created_at: now,
        start_at: None,
        end_at: None,
        duration_ms: duration_mins as u64 * MINUTE_MS,
        reward_min: p.reward.0 + reward_bonus,
        reward_max: p.reward.1 + reward_bonus,
        fatigue_min: p.fatigue.0,
        fatigue_max: p.fatigue.1,
        required_planes,
        assigned_squadron: None,
        assigned_slot_ids: Vec::new(),
        state: MissionState::Pending,
        zone,
        weather,
        threat,
        briefing,
        locality_id: context.map(|c| c.locality_id.clone()),
        objective_id: context.and_then(|c| c.objective_id.clone()),
        defense_level,
        risk_bonus: defense_level.risk_bonus(),
    }
}

/// Launch eligibility check for one slot.
pub fn can_launch(state: &BaseState, slot: &AircraftSlot) -> Result<(), LaunchBlock> {
    if slot.state != SlotState::Ready {
        return Err(LaunchBlock::Unavailable);
    }
    let pilot = match slot.pilot_id.and_then(|id| state.pilot(id)) {
        Some(p) if p.alive => p,
        _ => return Err(LaunchBlock::NoPilot),
    };
    if pilot.rest.is_active() {
        return Err(LaunchBlock::Resting);
    }
    if pilot.fatigue >= FATIGUE_LAUNCH_LIMIT {
        return Err(LaunchBlock::Exhausted);
    }
    if slot.fuel < MIN_FUEL_TO_LAUNCH {
        return Err(LaunchBlock::NoFuel);
    }
    if slot.condition < MIN_COND_TO_LAUNCH {
        return Err(LaunchBlock::CriticalCondition);
    }
    if slot.ammo < MIN_AMMO_TO_LAUNCH {
        return Err(LaunchBlock::NoAmmo);
    }
    Ok(())
}

/// Launch-eligible slots of one squadron, in stable roster order.
pub fn ready_slots_in_squad(state: &BaseState, squad: SquadId) -> Vec<SlotId> {
    state
        .slots
        .iter()
        .filter(|s| s.squadron_id == squad && can_launch(state, s).is_ok())
        .map(|s| s.id)
        .collect()
}

/// Squadron ids whose eligible-slot count satisfies the requirement.
pub fn find_eligible_squads(state: &BaseState, required_planes: usize) -> Vec<SquadId> {
    SQUAD_IDS
        .iter()
        .copied()
        .filter(|&sq| ready_slots_in_squad(state, sq).len() >= required_planes)
        .collect()
}

/// Draft a squadron into a pending mission and launch it. The first
/// `required_planes` eligible slots are taken in roster order; extra
/// eligible aircraft are never drafted. Queued services on drafted slots
/// are preempted and refunded.
pub fn assign_to_squad(
    state: &mut BaseState,
    mission_id: MissionId,
    squad: SquadId,
    now: u64,
) -> Result<(), String> {
    let (required, name) = {
        let mission = state.mission(mission_id).ok_or("No such mission")?;
        if mission.state != MissionState::Pending {
            return Err("Mission is no longer pending".into());
        }
        (mission.required_planes, mission.name.clone())
    };

    let ready = ready_slots_in_squad(state, squad);
    if ready.len() < required {
        let msg = format!("Squadron {squad} cannot meet the minimum ({required}).");
        state.push_log(now, msg.clone());
        return Err(msg);
    }

    let drafted: Vec<SlotId> = ready[..required].to_vec();
    for &slot_id in &drafted {
        let (callsign, refund) = {
            let slot = match state.slot_mut(slot_id) {
                Some(s) => s,
                None => continue,
            };
            slot.state = SlotState::Mission;
            let refund = slot.activity.queued().map(|q| q.cost);
            slot.activity = SlotActivity::Idle;
            (slot.callsign.clone(), refund)
        };
        // Mission launch preempts a queued service; the reservation is
        // refunded in full.
        if let Some(cost) = refund {
            state.queues.remove(slot_id);
            state.points += cost;
            state.push_log(
                now,
                format!("{callsign}: queued service canceled by launch (+{cost} pts refund)."),
            );
        }
    }

    let duration_ms = {
        let mission = state.mission_mut(mission_id).ok_or("No such mission")?;
        mission.assigned_squadron = Some(squad);
        mission.assigned_slot_ids = drafted;
        mission.start_at = Some(now);
        mission.state = MissionState::Active;
        mission.duration_ms
    };
    if let Some(mission) = state.mission_mut(mission_id) {
        mission.end_at = Some(now + duration_ms);
    }

    state.push_log(now, format!("Squadron {squad} takes off ({required}): \"{name}\"."));
    Ok(())
}

/// Per-slot risk of damage and loss.
fn risk_for_slot(slot_condition: i32, pilot: Option<&Pilot>, mission: &Mission) -> f64 {
    let base = profile(mission.mission_type).risk_base;
    let base = (base + mission.risk_bonus).clamp(0.01, 0.95);
    let fatigue = pilot.map(|p| p.fatigue).unwrap_or(0.0);
    let skill = pilot.map(|p| p.skill).unwrap_or(1) as f64;

    let fatigue_term = (fatigue / 160.0).clamp(0.0, 0.55);
    let skill_term = (skill * 0.05).clamp(0.0, 0.18);
    let condition_penalty = ((60.0 - slot_condition as f64) / 200.0).clamp(0.0, 0.25);

    (base + fatigue_term + condition_penalty - skill_term).clamp(0.03, 0.90)
}

/// Kill probability for a fighter pilot on this mission type.
fn kill_chance(pilot: &Pilot, mission_type: MissionType) -> f64 {
    let base = profile(mission_type).kill_base;
    let skill_bonus = 0.06 * pilot.skill as f64;
    let fatigue_penalty = (pilot.fatigue / 220.0).clamp(0.0, 0.35);
    (base + skill_bonus - fatigue_penalty).clamp(0.02, 0.65)
}

struct SlotOutcome {
    damage: i32,
    lost: bool,
    pilot_down: bool,
    cause: Option<LossCause>,
}

/// Roll damage and loss for one slot. Loss causes are evaluated in fixed
/// order FUEL, COMBAT, ACCIDENT; the first success wins.
fn resolve_slot_outcome(
    rng: &mut ChaCha8Rng,
    slot_fuel: i32,
    slot_condition: i32,
    pilot: Option<&Pilot>,
    mission: &Mission,
) -> SlotOutcome {
    let risk = risk_for_slot(slot_condition, pilot, mission);

    let mut damage = 0;
    if chance(rng, risk) {
        damage = rand_int(rng, 6, 28) as i32;
        if risk > 0.45 {
            damage += rand_int(rng, 0, 14) as i32;
        }
    }

    let mut cause = None;
    if slot_fuel <= 10 && chance(rng, (0.04 + risk * 0.10).clamp(0.04, 0.18)) {
        cause = Some(LossCause::Fuel);
    }
    if cause.is_none() && chance(rng, (risk * 0.10).clamp(0.01, 0.14)) {
        cause = Some(LossCause::Combat);
    }
    if cause.is_none() && chance(rng, (risk * 0.06).clamp(0.005, 0.10)) {
        cause = Some(LossCause::Accident);
    }

    let mut pilot_down = false;
    if cause.is_some() {
        let skill = pilot.map(|p| p.skill).unwrap_or(1) as f64;
        let survival_bonus = (skill * 0.08).clamp(0.08, 0.24);
        let survived = chance(rng, (0.45 + survival_bonus).clamp(0.45, 0.75));
        pilot_down = !survived;
    }

    SlotOutcome {
        damage,
        lost: cause.is_some(),
        pilot_down,
        cause,
    }
}

fn build_debrief(outcome: MissionOutcome, stats: &MissionStats) -> String {
    let kills = if stats.kills > 0 {
        format!("Confirmed kills: {}.", stats.kills)
    } else {
        "No confirmed kills.".to_string()
    };
    let losses = if stats.losses > 0 {
        let causes: Vec<&str> = stats.loss_causes.iter().map(|c| c.as_str()).collect();
        format!("Losses: {} ({}).", stats.losses, causes.join(", "))
    } else {
        "No losses.".to_string()
    };
    let damage = if stats.damage_total > 0 {
        format!("Total recorded damage: {}%.", stats.damage_total)
    } else {
        "Minimal damage.".to_string()
    };
    format!(
        "{}\n{kills}\n{losses}\n{damage}\nFuel consumed: {}%.\nAmmunition consumed: {}%.\nPoints earned: +{}.",
        outcome.label(),
        stats.fuel_used,
        stats.ammo_used,
        stats.points_delta,
    )
}

/// Resolve an elapsed mission: consume resources, roll kills, damage and
/// losses per drafted slot, pay the (possibly penalized) reward, and
/// append a report to the bounded history. Guarded on mission state, so
/// a second call is a no-op.
pub fn complete_mission(state: &mut BaseState, rng: &mut ChaCha8Rng, mission_id: MissionId, now: u64) {
    let mission = match state.mission(mission_id) {
        Some(m) if m.state == MissionState::Active => m.clone(),
        _ => return,
    };
    let p = profile(mission.mission_type);

    let mut reward = rand_int(rng, mission.reward_min, mission.reward_max);
    let fuel_spent = rng.gen_range(p.fuel_use.0..=p.fuel_use.1);
    let ammo_spent = rng.gen_range(p.ammo_use.0..=p.ammo_use.1);

    let mut total_kills = 0u32;
    let mut lost_count = 0u32;
    let mut damaged_count = 0u32;
    let mut damage_total = 0i32;
    let mut loss_causes: Vec<LossCause> = Vec::new();
    let mut events: Vec<String> = Vec::new();

    events.push(format!(
        "Takeoff complete. Squadron {}.",
        mission.assigned_squadron.unwrap_or(0)
    ));
    events.push(format!(
        "Estimated consumption per aircraft: fuel -{fuel_spent}% / ammo -{ammo_spent}%."
    ));

    for &slot_id in &mission.assigned_slot_ids {
        // Stale ids (slot struck from the roster mid-flight) are skipped.
        let Some(slot_idx) = state.slots.iter().position(|s| s.id == slot_id) else {
            continue;
        };

        let pilot_idx = state.slots[slot_idx]
            .pilot_id
            .and_then(|pid| state.pilots.iter().position(|p| p.id == pid));

        {
            let slot = &mut state.slots[slot_idx];
            slot.fuel = (slot.fuel - fuel_spent).clamp(0, 100);
            slot.ammo = (slot.ammo - ammo_spent).clamp(0, 100);
        }

        // Fatigue accrual, reduced by skill, happens before the kill and
        // loss rolls so both see the post-mission fatigue.
        if let Some(pi) = pilot_idx {
            let pilot = &mut state.pilots[pi];
            if pilot.alive {
                pilot.missions += 1;
                let gain = rand_int(rng, mission.fatigue_min, mission.fatigue_max) as f64;
                let reduction = (pilot.skill as f64 * 2.0).clamp(0.0, 8.0);
                pilot.fatigue = (pilot.fatigue + (gain - reduction).max(0.0)).clamp(0.0, 100.0);
            }
        }

        if let Some(pi) = pilot_idx {
            let (alive, fighter) = {
                let pilot = &state.pilots[pi];
                (pilot.alive, pilot.role == PilotRole::Fighter)
            };
            if alive && fighter {
                let p_kill = kill_chance(&state.pilots[pi], mission.mission_type);
                if chance(rng, p_kill) {
                    state.pilots[pi].kills += 1;
                    total_kills += 1;
                    events.push(format!("Confirmed kill: {}.", state.pilots[pi].name));
                }
            }
        }

        let outcome = {
            let slot = &state.slots[slot_idx];
            let pilot = pilot_idx.map(|pi| &state.pilots[pi]);
            resolve_slot_outcome(rng, slot.fuel, slot.condition, pilot, &mission)
        };

        if outcome.damage > 0 {
            let slot = &mut state.slots[slot_idx];
            slot.condition = (slot.condition - outcome.damage).clamp(0, 100);
            damaged_count += 1;
            damage_total += outcome.damage;
            events.push(format!(
                "{} returns with damage ({}%).",
                slot.callsign, outcome.damage
            ));
        }

        if outcome.lost {
            lost_count += 1;
            let cause = outcome.cause.unwrap_or(LossCause::Accident);
            loss_causes.push(cause);

            let callsign = {
                let slot = &mut state.slots[slot_idx];
                slot.state = SlotState::Lost;
                slot.fuel = 0;
                slot.ammo = 0;
                slot.condition = 0;
                slot.activity = SlotActivity::Idle;
                slot.callsign.clone()
            };
            state.queues.remove(slot_id);

            if let Some(pi) = pilot_idx {
                let (name, down) = {
                    let pilot = &mut state.pilots[pi];
                    if outcome.pilot_down {
                        pilot.alive = false;
                    } else {
                        pilot.fatigue =
                            (pilot.fatigue + RESCUE_FATIGUE_PENALTY).clamp(0.0, 100.0);
                    }
                    (pilot.name.clone(), outcome.pilot_down)
                };
                // A rescued pilot returns to the pool; a dead one stays
                // tied to the wreck as a roster record.
                if !down {
                    state.slots[slot_idx].pilot_id = None;
                }
                if down {
                    state.push_log(
                        now,
                        format!("{callsign} fails to return: {}. {name} KIA/MIA.", cause.phrase()),
                    );
                    events.push(format!("{callsign} lost ({}). {name} KIA/MIA.", cause.phrase()));
                } else {
                    state.push_log(
                        now,
                        format!("{callsign} lost: {}. {name} recovered (rescue).", cause.phrase()),
                    );
                    events.push(format!("{callsign} lost ({}). {name} rescued.", cause.phrase()));
                }
            } else {
                state.push_log(now, format!("{callsign} lost: {}.", cause.phrase()));
                events.push(format!("{callsign} lost ({}).", cause.phrase()));
            }
            continue;
        }

        let slot = &mut state.slots[slot_idx];
        slot.state = SlotState::Ready;
        slot.activity = SlotActivity::Idle;
    }

    if lost_count > 0 {
        reward = ((reward as f64 * (1.0 - LOSS_REWARD_PENALTY * lost_count as f64)).floor()
            as u32)
            .max(1);
        events.push("Loss penalty applied. Reward adjusted.".to_string());
    }

    state.points += reward;
    if let Some(m) = state.mission_mut(mission_id) {
        m.state = MissionState::Done;
    }

    let mut extra = Vec::new();
    if total_kills > 0 {
        extra.push(format!("kills +{total_kills}"));
    }
    if damaged_count > 0 {
        extra.push(format!("damaged: {damaged_count}"));
    }
    if lost_count > 0 {
        extra.push(format!("losses: {lost_count}"));
    }
    let suffix = if extra.is_empty() {
        String::new()
    } else {
        format!(" ({})", extra.join(" / "))
    };
    state.push_log(
        now,
        format!("Mission complete: +{reward} pts. Fuel -{fuel_spent} / Ammo -{ammo_spent}.{suffix}"),
    );

    let outcome = MissionOutcome::Success;
    let stats = MissionStats {
        kills: total_kills,
        losses: lost_count,
        loss_causes,
        damage_total: damage_total.clamp(0, 999) as u32,
        fuel_used: fuel_spent,
        ammo_used: ammo_spent,
        points_delta: reward,
    };
    let debrief = build_debrief(outcome, &stats);
    let report = MissionReport {
        id: state.alloc_report_id(),
        mission_id,
        title: mission.name.clone(),
        squad: mission.assigned_squadron,
        outcome,
        created_at: now,
        started_at: mission.start_at.unwrap_or(mission.created_at),
        ended_at: now,
        briefing: mission.briefing.clone(),
        debrief,
        events,
        stats,
    };
    state.push_report(report);
}
