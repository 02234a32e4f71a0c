//! Static network and track configuration.
//!
//! Networks are loaded from JSON (camelCase keys). Block time is validated
//! once at load time so every converter built from a registry entry is sound.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::GovclockError;
use crate::types::{BlockNumber, NetworkTimeConfig, TrackPeriods};

const BUILTIN_NETWORKS: &str = include_str!("../config/networks.json");

/// One referenda track of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub id: u16,
    pub name: String,
    #[serde(flatten)]
    pub periods: TrackPeriods,
    /// Minimum delay between approval and enactment, in blocks.
    #[serde(default)]
    pub min_enactment_period: Option<BlockNumber>,
}

/// Everything the time and curve engines need to know about one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub name: String,
    pub block_time_ms: u64,
    /// Treasury spend cadence in blocks.
    #[serde(default)]
    pub spend_period_blocks: Option<BlockNumber>,
    /// Base vote-lock duration (1x conviction) in blocks.
    #[serde(default)]
    pub vote_locking_period_blocks: Option<BlockNumber>,
    #[serde(default)]
    pub tracks: Vec<TrackInfo>,
}

impl NetworkConfig {
    pub fn time_config(&self) -> NetworkTimeConfig {
        NetworkTimeConfig::new(self.name.clone(), self.block_time_ms)
    }

    /// Resolve a track by numeric id or by name.
    pub fn track(&self, key: &str) -> Result<&TrackInfo, GovclockError> {
        let by_id = key.parse::<u16>().ok();
        self.tracks
            .iter()
            .find(|t| Some(t.id) == by_id || t.name.eq_ignore_ascii_case(key))
            .ok_or_else(|| GovclockError::UnknownTrack {
                network: self.name.clone(),
                track: key.to_string(),
            })
    }

    pub fn spend_period(&self) -> Result<BlockNumber, GovclockError> {
        match self.spend_period_blocks {
            Some(blocks) if blocks > 0 => Ok(blocks),
            _ => Err(GovclockError::PeriodNotConfigured {
                network: self.name.clone(),
                period: "spend period",
            }),
        }
    }

    pub fn vote_locking_period(&self) -> Result<BlockNumber, GovclockError> {
        self.vote_locking_period_blocks
            .ok_or_else(|| GovclockError::PeriodNotConfigured {
                network: self.name.clone(),
                period: "vote locking period",
            })
    }
}

#[derive(Deserialize)]
struct RegistryFile {
    networks: Vec<NetworkConfig>,
}

/// Validated set of networks, keyed by lower-case name.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, NetworkConfig>,
}

impl NetworkRegistry {
    /// Registry bundled with the crate (Polkadot and Kusama).
    pub fn builtin() -> Result<Self, GovclockError> {
        Self::from_json_str(BUILTIN_NETWORKS)
    }

    pub fn from_json_str(json: &str) -> Result<Self, GovclockError> {
        let file: RegistryFile = serde_json::from_str(json)?;
        Self::from_networks(file.networks)
    }

    pub fn load(path: &Path) -> Result<Self, GovclockError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_networks(networks: Vec<NetworkConfig>) -> Result<Self, GovclockError> {
        let mut map = BTreeMap::new();
        for network in networks {
            if network.block_time_ms == 0 {
                return Err(GovclockError::InvalidBlockTime {
                    network: network.name,
                });
            }
            map.insert(network.name.to_ascii_lowercase(), network);
        }
        Ok(Self { networks: map })
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig, GovclockError> {
        self.networks
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| GovclockError::UnknownNetwork(name.to_string()))
    }

    pub fn track(&self, network: &str, track: &str) -> Result<&TrackInfo, GovclockError> {
        self.network(network)?.track(track)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.values().map(|n| n.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_loads() {
        let registry = NetworkRegistry::builtin().unwrap();
        let polkadot = registry.network("Polkadot").unwrap();
        assert_eq!(polkadot.block_time_ms, 6_000);
        assert_eq!(polkadot.track("root").unwrap().id, 0);
        assert!(registry.names().any(|n| n == "kusama"));
    }

    #[test]
    fn track_resolves_by_id() {
        let registry = NetworkRegistry::builtin().unwrap();
        let by_id = registry.track("polkadot", "0").unwrap();
        let by_name = registry.track("polkadot", "Root").unwrap();
        assert_eq!(by_id, by_name);
    }

    #[test]
    fn zero_block_time_rejected_at_load() {
        let json = r#"{"networks":[{"name":"broken","blockTimeMs":0}]}"#;
        let err = NetworkRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, GovclockError::InvalidBlockTime { .. }));
    }

    #[test]
    fn missing_block_time_is_a_serialization_error() {
        let json = r#"{"networks":[{"name":"broken"}]}"#;
        let err = NetworkRegistry::from_json_str(json).unwrap_err();
        assert!(matches!(err, GovclockError::Serialization(_)));
    }

    #[test]
    fn unknown_network_and_track() {
        let registry = NetworkRegistry::builtin().unwrap();
        assert!(matches!(
            registry.network("nowhere"),
            Err(GovclockError::UnknownNetwork(_))
        ));
        assert!(matches!(
            registry.track("polkadot", "no_such_track"),
            Err(GovclockError::UnknownTrack { .. })
        ));
    }

    #[test]
    fn missing_spend_period_is_reported() {
        let json = r#"{"networks":[{"name":"devnet","blockTimeMs":3000}]}"#;
        let registry = NetworkRegistry::from_json_str(json).unwrap();
        let net = registry.network("devnet").unwrap();
        assert!(matches!(
            net.spend_period(),
            Err(GovclockError::PeriodNotConfigured { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join("govclock_registry_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("networks.json");
        std::fs::write(&path, r#"{"networks":[{"name":"local","blockTimeMs":2000}]}"#).unwrap();

        let registry = NetworkRegistry::load(&path).unwrap();
        assert_eq!(registry.network("local").unwrap().block_time_ms, 2_000);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
