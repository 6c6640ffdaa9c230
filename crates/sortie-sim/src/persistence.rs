//! Save-file persistence: JSON payloads on disk, one file per slot.
//!
//! Loading is defensive: missing fields fall back to serde defaults and
//! `sanitize` repairs anything a hand-edited or truncated payload could
//! break, so a restored base is always internally consistent. A payload
//! that fails to parse or carries the wrong version is rejected and the
//! caller starts fresh.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use sortie_core::constants::*;
use sortie_core::entities::SlotActivity;
use sortie_core::enums::ServiceKind;

use crate::base::BaseState;

/// Full save data written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: String,
    pub state: BaseState,
    pub seed: u64,
    pub timestamp: u64,
    pub slot_name: String,
}

/// Lightweight metadata for listing saves without loading full state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub points: u32,
    pub pilots_alive: usize,
    pub timestamp: u64,
}

pub fn make_save(state: &BaseState, seed: u64, timestamp: u64, slot_name: &str) -> SaveData {
    SaveData {
        version: SAVE_VERSION.to_string(),
        state: state.clone(),
        seed,
        timestamp,
        slot_name: slot_name.to_string(),
    }
}

/// Repair a restored state in place.
pub fn sanitize(state: &mut BaseState) {
    state.version = SAVE_VERSION.to_string();

    for slot in &mut state.slots {
        slot.fuel = slot.fuel.clamp(0, 100);
        slot.ammo = slot.ammo.clamp(0, 100);
        slot.condition = slot.condition.clamp(0, 100);
    }
    for pilot in &mut state.pilots {
        pilot.fatigue = pilot.fatigue.clamp(0.0, 100.0);
        if pilot.skill == 0 {
            pilot.skill = 1;
        }
    }

    // Drop seat references to pilots no longer in the roster.
    let pilot_ids: Vec<_> = state.pilots.iter().map(|p| p.id).collect();
    for slot in &mut state.slots {
        if let Some(pid) = slot.pilot_id {
            if !pilot_ids.contains(&pid) {
                slot.pilot_id = None;
            }
        }
    }

    // The FIFO queues are derived data: rebuild them from the slots'
    // queued reservations, ordered by enqueue time.
    for kind in ServiceKind::ALL {
        let mut waiting: Vec<_> = state
            .slots
            .iter()
            .filter_map(|s| match &s.activity {
                SlotActivity::Queued(q) if q.kind == kind => Some((q.queued_at, s.id)),
                _ => None,
            })
            .collect();
        waiting.sort_by_key(|(at, _)| *at);
        let queue = state.queues.queue_mut(kind);
        queue.clear();
        queue.extend(waiting.into_iter().map(|(_, id)| id));
    }

    state.log.truncate(LOG_CAP);
    state.mission_history.truncate(MISSION_HISTORY_CAP);

    // Id counters must stay ahead of every live id.
    let max_slot = state.slots.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
    state.next_slot_id = state.next_slot_id.max(max_slot);
    let max_pilot = state.pilots.iter().map(|p| p.id.0 + 1).max().unwrap_or(0);
    state.next_pilot_id = state.next_pilot_id.max(max_pilot);
    let max_mission = state.missions.iter().map(|m| m.id.0 + 1).max().unwrap_or(0);
    state.next_mission_id = state.next_mission_id.max(max_mission);
    let max_report = state
        .mission_history
        .iter()
        .map(|r| r.id + 1)
        .max()
        .unwrap_or(0);
    state.next_report_id = state.next_report_id.max(max_report);
}

fn save_path(dir: &Path, slot: &str) -> std::path::PathBuf {
    dir.join(format!("{}.json", slot))
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|e| format!("Failed to create save directory: {e}"))?;
    let path = save_path(dir, slot);
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("Failed to serialize save data: {e}"))?;
    fs::write(&path, json).map_err(|e| format!("Failed to write save file: {e}"))?;
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData, String> {
    let path = save_path(dir, slot);
    let json = fs::read_to_string(&path).map_err(|e| format!("Failed to read save file: {e}"))?;
    let mut data: SaveData =
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse save data: {e}"))?;
    if data.version != SAVE_VERSION {
        return Err(format!("Unsupported save version: {}", data.version));
    }
    sanitize(&mut data.state);
    Ok(data)
}

pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let json = match fs::read_to_string(&path) {
            Ok(j) => j,
            Err(_) => continue,
        };
        if let Ok(data) = serde_json::from_str::<SaveData>(&json) {
            saves.push(SaveMetadata {
                slot_name: data.slot_name,
                points: data.state.points,
                pilots_alive: data.state.pilots.iter().filter(|p| p.alive).count(),
                timestamp: data.timestamp,
            });
        }
    }
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    saves
}

pub fn delete_save(dir: &Path, slot: &str) -> Result<(), String> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path).map_err(|e| format!("Failed to delete save file: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortie_core::entities::{PilotId, QueuedService, SlotId};

    fn make_save_data(slot: &str, timestamp: u64) -> SaveData {
        let state = BaseState::new(0);
        make_save(&state, 42, timestamp, slot)
    }

    #[test]
    fn save_data_roundtrip() {
        let data = make_save_data("test", 5_000);
        let json = serde_json::to_string(&data).unwrap();
        let restored: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, 42);
        assert_eq!(restored.slot_name, "test");
        assert_eq!(restored.state.points, data.state.points);
        assert_eq!(restored.state.pilots.len(), data.state.pilots.len());
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join("sortie_test_save_load");
        let _ = fs::remove_dir_all(&dir);

        let data = make_save_data("slot1", 3_000);
        save_to_file(&dir, "slot1", &data).unwrap();
        let loaded = load_from_file(&dir, "slot1").unwrap();
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.state.points, data.state.points);
        assert_eq!(loaded.state.slots.len(), 6);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn wrong_version_is_rejected() {
        let dir = std::env::temp_dir().join("sortie_test_version");
        let _ = fs::remove_dir_all(&dir);

        let mut data = make_save_data("old", 1);
        data.version = "0.0".into();
        save_to_file(&dir, "old", &data).unwrap();
        assert!(load_from_file(&dir, "old").is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_payload_is_rejected() {
        let dir = std::env::temp_dir().join("sortie_test_corrupt");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bad.json"), "{ not json").unwrap();
        assert!(load_from_file(&dir, "bad").is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_optional_sections_default() {
        // A payload with no missionHistory/log/queues restores to empty
        // collections, not a parse error.
        let data = make_save_data("min", 1);
        let mut value: serde_json::Value = serde_json::to_value(&data).unwrap();
        let obj = value["state"].as_object_mut().unwrap();
        obj.remove("mission_history");
        obj.remove("log");
        obj.remove("queues");
        obj.remove("campaign");
        let restored: SaveData = serde_json::from_value(value).unwrap();
        assert!(restored.state.mission_history.is_empty());
        assert!(restored.state.log.is_empty());
        assert!(restored.state.queues.fuel.is_empty());
        assert_eq!(restored.state.campaign.localities.len(), 2);
    }

    #[test]
    fn sanitize_repairs_out_of_range_values() {
        let mut state = BaseState::new(0);
        state.slots[0].fuel = 150;
        state.slots[1].condition = -20;
        state.pilots[0].fatigue = 400.0;
        state.pilots[1].skill = 0;
        state.slots[2].pilot_id = Some(PilotId(999));
        sanitize(&mut state);
        assert_eq!(state.slots[0].fuel, 100);
        assert_eq!(state.slots[1].condition, 0);
        assert_eq!(state.pilots[0].fatigue, 100.0);
        assert_eq!(state.pilots[1].skill, 1);
        assert_eq!(state.slots[2].pilot_id, None);
    }

    #[test]
    fn sanitize_rebuilds_queues_in_enqueue_order() {
        let mut state = BaseState::new(0);
        state.slots[0].activity = SlotActivity::Queued(QueuedService {
            kind: ServiceKind::Fuel,
            queued_at: 2_000,
            duration_mins: 3,
            cost: 4,
        });
        state.slots[1].activity = SlotActivity::Queued(QueuedService {
            kind: ServiceKind::Fuel,
            queued_at: 1_000,
            duration_mins: 2,
            cost: 2,
        });
        // Stored queue disagrees with the slots; the slots win.
        state.queues.fuel.push_back(SlotId(0));
        sanitize(&mut state);
        assert_eq!(
            state.queues.fuel.iter().copied().collect::<Vec<_>>(),
            vec![SlotId(1), SlotId(0)]
        );
    }

    #[test]
    fn sanitize_advances_id_counters() {
        let mut state = BaseState::new(0);
        state.next_slot_id = 0;
        state.next_pilot_id = 0;
        sanitize(&mut state);
        assert_eq!(state.next_slot_id, 6);
        assert_eq!(state.next_pilot_id, 6);
    }

    #[test]
    fn list_saves_sorted_newest_first() {
        let dir = std::env::temp_dir().join("sortie_test_list_multi");
        let _ = fs::remove_dir_all(&dir);

        save_to_file(&dir, "early", &make_save_data("early", 1_000)).unwrap();
        save_to_file(&dir, "late", &make_save_data("late", 2_000)).unwrap();

        let saves = list_saves(&dir);
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].slot_name, "late");
        assert_eq!(saves[1].slot_name, "early");
        assert_eq!(saves[0].pilots_alive, 6);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_saves_empty_dir() {
        let dir = std::env::temp_dir().join("sortie_test_list_empty");
        let _ = fs::remove_dir_all(&dir);
        assert!(list_saves(&dir).is_empty());
    }

    #[test]
    fn delete_save_removes_file() {
        let dir = std::env::temp_dir().join("sortie_test_delete");
        let _ = fs::remove_dir_all(&dir);

        save_to_file(&dir, "todelete", &make_save_data("todelete", 1)).unwrap();
        assert!(save_path(&dir, "todelete").exists());
        delete_save(&dir, "todelete").unwrap();
        assert!(!save_path(&dir, "todelete").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn delete_nonexistent_save_ok() {
        let dir = std::env::temp_dir().join("sortie_test_delete_noop");
        delete_save(&dir, "nope").unwrap();
    }

    #[test]
    fn simulation_save_restore() {
        use crate::engine::{SimConfig, Simulation};

        let mut sim = Simulation::new(SimConfig { seed: 99 }, 1_000);
        sim.state.points = 77;
        let data = sim.to_save(5_000, "manual");
        assert_eq!(data.slot_name, "manual");
        assert_eq!(data.seed, 99);
        assert_eq!(data.timestamp, 5_000);

        let restored = Simulation::from_save(data);
        assert_eq!(restored.seed(), 99);
        assert_eq!(restored.state.points, 77);
        assert_eq!(restored.state.pilots.len(), 6);
    }
}
