pub mod tensor;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

pub use tensor::Tensor4;

use crate::error::HamiltonianError;

/// Molecular-orbital integral data for a closed-shell reference, produced
/// once by an external ab initio engine and read-only afterwards.
///
/// All matrices are over the spatial atomic-orbital basis (`n_basis` wide);
/// the two-electron tensor is in chemist's notation, `(pq|rs)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MolecularIntegrals {
    /// Nuclear repulsion energy of the fixed geometry.
    pub nuclear_repulsion: f64,
    /// Kinetic plus nuclear-attraction integrals, AO basis.
    pub core_hamiltonian: DMatrix<f64>,
    /// Two-electron repulsion integrals, AO basis, chemist's notation.
    pub two_electron: Tensor4,
    /// Converged molecular-orbital coefficients (restricted reference, so a
    /// single spatial matrix shared by both spin channels).
    pub coefficients: DMatrix<f64>,
    /// Per-spatial-orbital occupation numbers (0, 1 or 2).
    pub occupations: Vec<f64>,
    /// Per-spatial-orbital energies.
    pub orbital_energies: Vec<f64>,
}

impl MolecularIntegrals {
    /// Number of spatial basis functions.
    pub fn n_basis(&self) -> usize {
        self.core_hamiltonian.nrows()
    }

    /// Number of spin orbitals, twice the spatial count.
    pub fn n_spin_orbitals(&self) -> usize {
        2 * self.n_basis()
    }

    /// Total electron count, from the occupation numbers.
    pub fn n_electrons(&self) -> usize {
        self.occupations.iter().sum::<f64>().round() as usize
    }

    /// Number of occupied spin orbitals.
    pub fn n_occupied(&self) -> usize {
        self.n_electrons()
    }

    /// Number of virtual (unoccupied) spin orbitals.
    pub fn n_virtual(&self) -> usize {
        self.n_spin_orbitals() - self.n_occupied()
    }
}

/// How talkative the external engine is allowed to be.
///
/// Passed explicitly at the boundary; the engine must not be silenced
/// through any process-global state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
}

/// Boundary to the external ab initio integral engine.
///
/// The engine owns geometry parsing, basis-set lookup and the
/// self-consistent-field solve; this crate only consumes the resulting
/// integral data.
pub trait IntegralEngine {
    fn compute(
        &self,
        geometry: &str,
        basis: &str,
        verbosity: Verbosity,
    ) -> Result<MolecularIntegrals, HamiltonianError>;
}
