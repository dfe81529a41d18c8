use serde::Deserialize;

use crate::{
    active_space::ActiveSpacePartition,
    error::HamiltonianError,
    integrals::Verbosity,
};

/// Construction parameters for a molecular observable.
///
/// Field names mirror the host framework's configuration keys
/// (`frozen-spin-orbitals`, `reduce-hamiltonian`, ...), so a configuration
/// mapping deserializes directly into this struct and is validated once at
/// entry instead of being probed key-by-key.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObservableConfig {
    /// Atomic coordinates specification, handed verbatim to the engine.
    pub geometry: String,
    /// Basis-set name, handed verbatim to the engine.
    pub basis: String,
    /// Upstream engine verbosity; has no effect on Hamiltonian content.
    #[serde(default)]
    pub verbose: bool,
    /// Frozen spin-orbital indices, in authoritative order.
    #[serde(default)]
    pub frozen_spin_orbitals: Option<Vec<usize>>,
    /// Active spin-orbital indices, in authoritative order.
    #[serde(default)]
    pub active_spin_orbitals: Option<Vec<usize>>,
    /// Selects the closed-form two-qubit reduction; requires exactly 4
    /// active spin orbitals.
    #[serde(default)]
    pub reduce_hamiltonian: bool,
}

impl ObservableConfig {
    pub fn verbosity(&self) -> Verbosity {
        if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }

    /// Resolves the active-space partition for a system of
    /// `n_spin_orbitals`. Both index lists must be given for a custom
    /// partition to take effect; otherwise nothing is frozen and every spin
    /// orbital is active.
    pub fn partition(
        &self,
        n_spin_orbitals: usize,
    ) -> Result<ActiveSpacePartition, HamiltonianError> {
        match (&self.frozen_spin_orbitals, &self.active_spin_orbitals) {
            (Some(frozen), Some(active)) => {
                ActiveSpacePartition::new(frozen.clone(), active.clone(), n_spin_orbitals)
            }
            _ => Ok(ActiveSpacePartition::full(n_spin_orbitals)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObservableConfig;

    #[test]
    fn deserializes_the_host_configuration_keys() {
        let config: ObservableConfig = serde_json::from_str(
            r#"{
                "geometry": "H 0 0 0\nH 0 0 0.7414",
                "basis": "sto-3g",
                "frozen-spin-orbitals": [0, 2],
                "active-spin-orbitals": [1, 3],
                "reduce-hamiltonian": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.basis, "sto-3g");
        assert!(!config.verbose);
        assert_eq!(config.frozen_spin_orbitals.as_deref(), Some(&[0, 2][..]));
        assert!(config.reduce_hamiltonian);
    }

    #[test]
    fn missing_lists_default_to_all_active() {
        let config: ObservableConfig = serde_json::from_str(
            r#"{"geometry": "H 0 0 0", "basis": "sto-3g", "frozen-spin-orbitals": [0]}"#,
        )
        .unwrap();

        let partition = config.partition(4).unwrap();
        assert!(partition.frozen().is_empty());
        assert_eq!(partition.active(), &[0, 1, 2, 3]);
    }
}
