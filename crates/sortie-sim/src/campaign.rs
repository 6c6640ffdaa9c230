//! Campaign map: localities and objectives used as directed-mission
//! context. The map is read-mostly; missions reference it by id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sortie_core::enums::DefenseLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveKind {
    AntiAir,
    Logistics,
    Bridge,
}

impl ObjectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AntiAir => "AA",
            Self::Logistics => "LOGISTICS",
            Self::Bridge => "BRIDGE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub name: String,
    pub kind: ObjectiveKind,
    /// Key objectives gate route unlocks.
    pub key: bool,
}

/// Whether a locality is reachable for directed missions yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalityState {
    Active,
    Locked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locality {
    pub id: String,
    pub name: String,
    /// Distance from the home front, in map hops.
    pub depth: u32,
    pub state: LocalityState,
    pub air_defense: DefenseLevel,
    pub objectives: Vec<Objective>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default)]
    pub turn: u32,
    #[serde(default)]
    pub active_locality_ids: Vec<String>,
    /// BTreeMap keeps serialization order stable across saves.
    #[serde(default)]
    pub localities: BTreeMap<String, Locality>,
}

impl Default for Campaign {
    fn default() -> Self {
        let coast = Locality {
            id: "cap_griswold".into(),
            name: "Cap Griswold".into(),
            depth: 0,
            state: LocalityState::Active,
            air_defense: DefenseLevel::High,
            objectives: vec![
                Objective {
                    id: "aa_1".into(),
                    name: "Coastal AA position".into(),
                    kind: ObjectiveKind::AntiAir,
                    key: true,
                },
                Objective {
                    id: "log_1".into(),
                    name: "Supply park".into(),
                    kind: ObjectiveKind::Logistics,
                    key: false,
                },
                Objective {
                    id: "br_1".into(),
                    name: "Strategic bridge".into(),
                    kind: ObjectiveKind::Bridge,
                    key: false,
                },
            ],
        };
        let port = Locality {
            id: "port_avelin".into(),
            name: "Port Avelin".into(),
            depth: 1,
            state: LocalityState::Locked,
            air_defense: DefenseLevel::Med,
            objectives: Vec::new(),
        };

        let mut localities = BTreeMap::new();
        localities.insert(coast.id.clone(), coast);
        localities.insert(port.id.clone(), port);

        Self {
            turn: 0,
            active_locality_ids: vec!["cap_griswold".into()],
            localities,
        }
    }
}

impl Campaign {
    pub fn locality(&self, id: &str) -> Option<&Locality> {
        self.localities.get(id)
    }

    pub fn objective<'a>(&'a self, locality_id: &str, objective_id: &str) -> Option<&'a Objective> {
        self.locality(locality_id)?
            .objectives
            .iter()
            .find(|o| o.id == objective_id)
    }
}
