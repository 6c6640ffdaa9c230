//! Service scheduler: capacity-constrained fuel/ammo/maintenance work
//! with per-kind FIFO queuing and refundable cancellation.
//!
//! Payment happens on entry for both immediate starts and queued
//! reservations; a reservation is refunded in full on cancellation or
//! mission preemption, never partially.

use sortie_core::constants::MINUTE_MS;
use sortie_core::entities::{ActiveService, QueuedService, SlotActivity, SlotId};
use sortie_core::enums::{ServiceKind, SlotState};

use crate::base::BaseState;

/// Service duration in simulated minutes, monotonic in the resource
/// deficit.
pub fn duration_mins(kind: ServiceKind, value: i32) -> u32 {
    let need = (100 - value.clamp(0, 100)) as u32;
    match kind {
        ServiceKind::Fuel => need.div_ceil(20).max(1),
        ServiceKind::Ammo => need.div_ceil(25).max(1),
        ServiceKind::Maint => (2 + need.div_ceil(15)).clamp(2, 12),
    }
}

/// Service cost in points, monotonic in the resource deficit. Light
/// maintenance is discounted to a token charge.
pub fn cost(kind: ServiceKind, value: i32) -> u32 {
    let v = value.clamp(0, 100);
    let need = (100 - v) as u32;
    match kind {
        ServiceKind::Fuel => need.div_ceil(15).max(1),
        ServiceKind::Ammo => need.div_ceil(20).max(1),
        ServiceKind::Maint => {
            if v >= 90 {
                1
            } else if v >= 80 {
                2
            } else {
                (2 + need.div_ceil(18)).clamp(2, 8)
            }
        }
    }
}

/// Slots currently being serviced for this kind.
pub fn busy_count(state: &BaseState, kind: ServiceKind) -> u32 {
    state
        .slots
        .iter()
        .filter(|s| {
            s.state == SlotState::Service && s.activity.service().is_some_and(|a| a.kind == kind)
        })
        .count() as u32
}

/// Free crew units for this kind: capacity minus live servicing count.
pub fn free_crew(state: &BaseState, kind: ServiceKind) -> u32 {
    state.crew.for_kind(kind).saturating_sub(busy_count(state, kind))
}

fn start_now(state: &mut BaseState, slot_id: SlotId, kind: ServiceKind, mins: u32, cost: u32, now: u64) {
    if let Some(slot) = state.slot_mut(slot_id) {
        slot.state = SlotState::Service;
        slot.activity = SlotActivity::Service(ActiveService {
            kind,
            start: now,
            end: now + mins as u64 * MINUTE_MS,
            cost,
        });
    }
}

/// Request a service for a slot. Charges the cost immediately; starts the
/// work if a crew is free, otherwise queues a reservation.
pub fn start_or_queue(state: &mut BaseState, slot_id: SlotId, kind: ServiceKind, now: u64) -> Result<(), String> {
    let (callsign, resource) = {
        let slot = state.slot(slot_id).ok_or("No such aircraft")?;
        match slot.state {
            SlotState::Mission | SlotState::Lost => {
                return Err(format!("{} is not on the ground", slot.callsign));
            }
            SlotState::Service => {
                let msg = format!("{} is already being serviced.", slot.callsign);
                state.push_log(now, msg.clone());
                return Err(msg);
            }
            SlotState::Ready => {}
        }
        if let Some(q) = slot.activity.queued() {
            let msg = format!("{} is already queued for {}.", slot.callsign, q.kind.label());
            state.push_log(now, msg.clone());
            return Err(msg);
        }
        (slot.callsign.clone(), slot.resource(kind))
    };

    if resource >= 100 {
        let msg = format!("{callsign} needs no {}: already at 100/100.", kind.label());
        state.push_log(now, msg.clone());
        return Err(msg);
    }

    let mins = duration_mins(kind, resource);
    let price = cost(kind, resource);

    if state.points < price {
        let msg = format!(
            "Not enough points for {} of {callsign}: {price} pts required.",
            kind.label()
        );
        state.push_log(now, msg.clone());
        return Err(msg);
    }

    // Payment on entry, for immediate and queued starts alike.
    state.points -= price;

    if free_crew(state, kind) > 0 {
        start_now(state, slot_id, kind, mins, price, now);
        state.push_log(
            now,
            format!("{callsign} starts {} ({mins} min) for {price} pts.", kind.label()),
        );
    } else {
        if let Some(slot) = state.slot_mut(slot_id) {
            slot.activity = SlotActivity::Queued(QueuedService {
                kind,
                queued_at: now,
                duration_mins: mins,
                cost: price,
            });
        }
        state.queues.queue_mut(kind).push_back(slot_id);
        state.push_log(
            now,
            format!(
                "{callsign} queued for {} ({mins} min). {price} pts reserved.",
                kind.label()
            ),
        );
    }
    Ok(())
}

/// Promote the head of a kind's queue into freed capacity. Returns true
/// when a slot was started. The reservation's duration and cost are
/// reused; nothing is re-charged.
pub fn promote_next(state: &mut BaseState, kind: ServiceKind, now: u64) -> bool {
    if free_crew(state, kind) == 0 {
        return false;
    }

    loop {
        let head = match state.queues.queue(kind).front() {
            Some(id) => *id,
            None => return false,
        };
        let slot = match state.slot(head) {
            Some(s) => s,
            None => {
                // Stale id: the slot was struck from the roster.
                state.queues.queue_mut(kind).pop_front();
                continue;
            }
        };
        let reservation = match (slot.state, slot.activity.queued()) {
            (SlotState::Ready, Some(q)) if q.kind == kind => *q,
            _ => {
                // The reservation was cleared out from under the queue
                // (preempted by a mission, or the slot was lost).
                state.queues.queue_mut(kind).pop_front();
                continue;
            }
        };

        let callsign = slot.callsign.clone();
        state.queues.queue_mut(kind).pop_front();
        start_now(state, head, kind, reservation.duration_mins, reservation.cost, now);
        state.push_log(
            now,
            format!(
                "{callsign} leaves the queue and starts {} ({} min).",
                kind.label(),
                reservation.duration_mins
            ),
        );
        return true;
    }
}

/// Finish an elapsed service: the serviced resource snaps to exactly 100,
/// the slot returns to READY, and the next queued request of the same
/// kind starts in the same tick. No-op on a slot that is not servicing.
/// Returns true when a queued follow-up was promoted.
pub fn finish_service(state: &mut BaseState, slot_id: SlotId, now: u64) -> bool {
    let (callsign, kind) = {
        let slot = match state.slot_mut(slot_id) {
            Some(s) => s,
            None => return false,
        };
        let active = match slot.activity.service() {
            Some(a) => *a,
            None => return false,
        };
        slot.set_resource(active.kind, 100);
        slot.activity = SlotActivity::Idle;
        slot.state = SlotState::Ready;
        (slot.callsign.clone(), active.kind)
    };

    state.push_log(now, format!("{callsign} {} complete.", kind.label()));
    promote_next(state, kind, now)
}

/// Cancel a queued reservation and refund its full cost.
pub fn cancel_pending(state: &mut BaseState, slot_id: SlotId, now: u64) -> Result<(), String> {
    let (callsign, reservation) = {
        let slot = state.slot(slot_id).ok_or("No such aircraft")?;
        let q = slot
            .activity
            .queued()
            .copied()
            .ok_or_else(|| format!("{} has no queued service", slot.callsign))?;
        (slot.callsign.clone(), q)
    };

    if let Some(slot) = state.slot_mut(slot_id) {
        slot.activity = SlotActivity::Idle;
    }
    state.queues.remove(slot_id);
    state.points += reservation.cost;
    state.push_log(
        now,
        format!("{callsign} queue canceled. Refund +{} pts.", reservation.cost),
    );
    Ok(())
}
