#[cfg(test)]
mod tests {
    use crate::commands::{Command, MissionContext};
    use crate::entities::*;
    use crate::enums::*;
    use crate::profiles::profile;
    use crate::state::BaseSnapshot;

    /// Verify all state enums round-trip through serde_json.
    #[test]
    fn test_slot_state_serde() {
        let variants = vec![
            SlotState::Ready,
            SlotState::Mission,
            SlotState::Service,
            SlotState::Lost,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: SlotState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_mission_type_serde() {
        for v in MissionType::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: MissionType = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_slot_activity_serde() {
        let variants = vec![
            SlotActivity::Idle,
            SlotActivity::Service(ActiveService {
                kind: ServiceKind::Fuel,
                start: 1_000,
                end: 181_000,
                cost: 4,
            }),
            SlotActivity::Queued(QueuedService {
                kind: ServiceKind::Maint,
                queued_at: 2_000,
                duration_mins: 5,
                cost: 3,
            }),
        ];
        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: SlotActivity = serde_json::from_str(&json).unwrap();
            assert_eq!(*v, back);
        }
    }

    #[test]
    fn test_rest_serde() {
        let variants = vec![
            Rest::Idle,
            Rest::Active {
                start: 0,
                end: 120_000,
                minutes: 2,
            },
        ];
        for v in &variants {
            let json = serde_json::to_string(v).unwrap();
            let back: Rest = serde_json::from_str(&json).unwrap();
            assert_eq!(*v, back);
        }
    }

    /// Verify Command round-trips through serde (tagged union).
    #[test]
    fn test_command_serde() {
        let commands = vec![
            Command::GenerateMission { context: None },
            Command::GenerateMission {
                context: Some(MissionContext {
                    locality_id: "cap_griswold".into(),
                    objective_id: Some("aa_1".into()),
                }),
            },
            Command::AssignMission {
                mission_id: MissionId(3),
                squad: 1,
            },
            Command::RejectMission {
                mission_id: MissionId(3),
            },
            Command::RequestService {
                slot_id: SlotId(0),
                kind: ServiceKind::Ammo,
            },
            Command::CancelService { slot_id: SlotId(0) },
            Command::StartRest {
                pilot_id: PilotId(2),
            },
            Command::AssignPilot {
                pilot_id: PilotId(2),
                slot_id: SlotId(4),
            },
            Command::UnassignPilot {
                pilot_id: PilotId(2),
            },
            Command::SetSquadron {
                slot_id: SlotId(4),
                squad: 3,
            },
            Command::BuyAircraft,
            Command::RecruitPilot,
            Command::HireCrew {
                kind: ServiceKind::Maint,
            },
            Command::RemoveLostSlot { slot_id: SlotId(5) },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: Command = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since Command doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Missing optional pilot fields deserialize to their defaults.
    #[test]
    fn test_pilot_field_defaults() {
        let json = r#"{"id":7,"name":"Sgt. Miller","skill":1,"fatigue":0.0}"#;
        let p: Pilot = serde_json::from_str(json).unwrap();
        assert!(p.alive);
        assert_eq!(p.role, PilotRole::Fighter);
        assert_eq!(p.missions, 0);
        assert_eq!(p.kills, 0);
        assert_eq!(p.rest, Rest::Idle);
    }

    /// Missing optional slot fields deserialize to their defaults.
    #[test]
    fn test_slot_field_defaults() {
        let json = r#"{"id":1,"callsign":"Red-1","model":"Spitfire Mk.I",
                       "fuel":100,"ammo":100,"condition":100}"#;
        let s: AircraftSlot = serde_json::from_str(json).unwrap();
        assert_eq!(s.state, SlotState::Ready);
        assert_eq!(s.activity, SlotActivity::Idle);
        assert_eq!(s.pilot_id, None);
        assert_eq!(s.squadron_id, 0);
    }

    #[test]
    fn test_crew_counts_default() {
        let crew = CrewCounts::default();
        assert_eq!(crew.fuelers, 1);
        assert_eq!(crew.mechanics, 1);
        assert_eq!(crew.armorers, 1);
        assert_eq!(crew.for_kind(ServiceKind::Fuel), 1);
        assert_eq!(crew.for_kind(ServiceKind::Maint), 1);
        assert_eq!(crew.for_kind(ServiceKind::Ammo), 1);
    }

    #[test]
    fn test_crew_hire_increments_one_trade() {
        let mut crew = CrewCounts::default();
        crew.hire(ServiceKind::Maint);
        assert_eq!(crew.mechanics, 2);
        assert_eq!(crew.fuelers, 1);
        assert_eq!(crew.armorers, 1);
    }

    #[test]
    fn test_defense_level_adjustments() {
        assert_eq!(DefenseLevel::Low.risk_bonus(), -0.01);
        assert_eq!(DefenseLevel::Med.risk_bonus(), 0.0);
        assert_eq!(DefenseLevel::High.risk_bonus(), 0.03);
        assert_eq!(DefenseLevel::VeryHigh.risk_bonus(), 0.06);
        assert_eq!(DefenseLevel::Low.reward_bonus(), 0);
        assert_eq!(DefenseLevel::High.reward_bonus(), 1);
        assert_eq!(DefenseLevel::VeryHigh.reward_bonus(), 2);
    }

    #[test]
    fn test_fatigue_bands() {
        let mut p: Pilot = serde_json::from_str(
            r#"{"id":0,"name":"F/O Harris","skill":1,"fatigue":0.0}"#,
        )
        .unwrap();
        assert_eq!(p.fatigue_band(), "fresh");
        p.fatigue = 40.0;
        assert_eq!(p.fatigue_band(), "tired");
        p.fatigue = 60.0;
        assert_eq!(p.fatigue_band(), "very tired");
        p.fatigue = 90.0;
        assert_eq!(p.fatigue_band(), "exhausted");
    }

    /// Profile ranges are ordered and risk/kill bases match the balance
    /// table.
    #[test]
    fn test_profiles_sane() {
        for t in MissionType::ALL {
            let p = profile(t);
            assert!(p.duration_mins.0 <= p.duration_mins.1);
            assert!(p.reward.0 <= p.reward.1);
            assert!(p.fatigue.0 <= p.fatigue.1);
            assert!(p.fuel_use.0 <= p.fuel_use.1);
            assert!(p.ammo_use.0 <= p.ammo_use.1);
            assert!(p.risk_base > 0.0 && p.risk_base < 1.0);
        }
        assert_eq!(profile(MissionType::Intercept).risk_base, 0.20);
        assert_eq!(profile(MissionType::Patrol).risk_base, 0.08);
        assert_eq!(profile(MissionType::Intercept).kill_base, 0.30);
        assert_eq!(profile(MissionType::Escort).kill_base, 0.10);
    }

    #[test]
    fn test_resource_accessors_clamp() {
        let mut s: AircraftSlot = serde_json::from_str(
            r#"{"id":1,"callsign":"Red-1","model":"Spitfire Mk.I",
                "fuel":50,"ammo":50,"condition":50}"#,
        )
        .unwrap();
        s.set_resource(ServiceKind::Fuel, 140);
        assert_eq!(s.fuel, 100);
        s.set_resource(ServiceKind::Ammo, -5);
        assert_eq!(s.ammo, 0);
        assert_eq!(s.resource(ServiceKind::Maint), 50);
    }

    /// Verify BaseSnapshot serializes to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = BaseSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: BaseSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.points, back.points);
        assert!(json.len() < 1024, "Empty snapshot should be <1KB");
    }
}
