//! The public observable surface: one construction call takes integral data
//! to a serialized second-quantized Hamiltonian.

use std::fmt;

use crate::{
    active_space, config::ObservableConfig, error::HamiltonianError,
    integrals::{IntegralEngine, MolecularIntegrals}, operators::{FermionSum, PauliSum, PauliTerm, QubitMapper},
    reduce, serialize, transform,
};

enum Hamiltonian {
    /// General path: the fermionic operator plus its externally-mapped qubit
    /// representation.
    Fermionic { fermion: FermionSum, pauli: PauliSum },
    /// Two-qubit reduced path: already a qubit operator, no mapping needed.
    TwoQubit { pauli: PauliSum },
}

/// A molecular Hamiltonian observable over a chosen active space.
///
/// Derived deterministically and immutably from one set of
/// [`MolecularIntegrals`]; two constructions from identical inputs are
/// term-for-term identical.
pub struct MolecularObservable {
    hamiltonian: Hamiltonian,
    n_bits: usize,
}

impl MolecularObservable {
    /// Runs the external engine for the configured geometry/basis, then
    /// builds the observable from the resulting integrals.
    pub fn from_engine(
        engine: &dyn IntegralEngine,
        mapper: &dyn QubitMapper,
        config: &ObservableConfig,
    ) -> Result<Self, HamiltonianError> {
        let integrals = engine.compute(&config.geometry, &config.basis, config.verbosity())?;
        log::debug!(
            "engine returned {} basis functions, E_nuc = {}",
            integrals.n_basis(),
            integrals.nuclear_repulsion
        );
        log::trace!("orbital energies: {:?}", integrals.orbital_energies);

        Self::from_integrals(&integrals, mapper, config)
    }

    /// Builds the observable from precomputed integral data: spin-blocking,
    /// antisymmetrized MO transform, frozen-core folding, then either the
    /// general fermionic serialization (mapped to qubits by `mapper`) or the
    /// closed-form two-qubit reduction.
    pub fn from_integrals(
        integrals: &MolecularIntegrals,
        mapper: &dyn QubitMapper,
        config: &ObservableConfig,
    ) -> Result<Self, HamiltonianError> {
        let molecular = transform::transform(integrals);
        let partition = config.partition(integrals.n_spin_orbitals())?;
        let reduced = active_space::fold_frozen_core(&molecular, &partition);

        if config.reduce_hamiltonian {
            let pauli = reduce::reduce_two_qubit(&reduced)?;
            let n_bits = pauli.n_qubits();
            Ok(Self {
                hamiltonian: Hamiltonian::TwoQubit { pauli },
                n_bits,
            })
        } else {
            let fermion = serialize::serialize_fermionic(&reduced);
            let pauli = mapper.map(&fermion);
            Ok(Self {
                hamiltonian: Hamiltonian::Fermionic { fermion, pauli },
                n_bits: partition.n_active(),
            })
        }
    }

    /// Width of the register this observable acts on: the active-space size
    /// in the general path, 2 in the reduced path.
    pub fn n_bits(&self) -> usize {
        self.n_bits
    }

    /// The fermionic operator, absent in the reduced path.
    pub fn fermion(&self) -> Option<&FermionSum> {
        match &self.hamiltonian {
            Hamiltonian::Fermionic { fermion, .. } => Some(fermion),
            Hamiltonian::TwoQubit { .. } => None,
        }
    }

    /// The qubit-space operator: externally mapped in the general path,
    /// solved directly in the reduced path.
    pub fn pauli(&self) -> &PauliSum {
        match &self.hamiltonian {
            Hamiltonian::Fermionic { pauli, .. } => pauli,
            Hamiltonian::TwoQubit { pauli } => pauli,
        }
    }

    /// Iterates the qubit-space terms.
    pub fn pauli_terms(&self) -> impl Iterator<Item = &PauliTerm> {
        self.pauli().iter()
    }

    /// Diagonal expectation value in the computational basis. Estimation in
    /// arbitrary measurement bases stays with the host framework.
    pub fn expectation_z_basis(&self, state: usize) -> f64 {
        self.pauli().expectation_z_basis(state)
    }
}

impl fmt::Display for MolecularObservable {
    /// The boundary string: fermionic grammar in the general path, Pauli
    /// grammar in the reduced path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hamiltonian {
            Hamiltonian::Fermionic { fermion, .. } => write!(f, "{fermion}"),
            Hamiltonian::TwoQubit { pauli } => write!(f, "{pauli}"),
        }
    }
}
