pub mod active_space;
pub mod config;
pub mod error;
pub mod integrals;
pub mod observable;
pub mod operators;
pub mod reduce;
pub mod serialize;
pub mod spin;
pub mod transform;

pub use config::ObservableConfig;
pub use error::HamiltonianError;
pub use observable::MolecularObservable;

pub mod testing {
    use std::{error::Error, fs::File, path::Path};

    use nalgebra::DMatrix;
    use serde::{Deserialize, Serialize};

    use crate::integrals::{MolecularIntegrals, Tensor4};

    /// A named integral set that can be written to disk and reloaded, so
    /// test inputs and bench fixtures stay out of source files.
    #[derive(Serialize, Deserialize)]
    pub struct TestSystem {
        pub name: String,
        integrals: MolecularIntegrals,
    }

    impl TestSystem {
        pub fn new(name: String, integrals: MolecularIntegrals) -> Self {
            Self { name, integrals }
        }

        pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
            Ok(serde_json::to_writer(
                File::options()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?,
                self,
            )?)
        }

        pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
            Ok(serde_json::from_reader(File::open(path)?)?)
        }

        pub fn integrals(&self) -> &MolecularIntegrals {
            &self.integrals
        }
    }

    /// H2 in the STO-3G basis at the equilibrium separation of 1.4 bohr,
    /// from the standard tabulated values: the smallest closed-shell system
    /// whose active space supports the two-qubit reduction.
    pub fn h2_sto3g() -> MolecularIntegrals {
        let core_hamiltonian =
            DMatrix::from_row_slice(2, 2, &[-1.1204, -0.9584, -0.9584, -1.1204]);
        // symmetric-orthogonalized bonding/antibonding combinations
        let coefficients =
            DMatrix::from_row_slice(2, 2, &[0.54893, 1.21146, 0.54893, -1.21146]);

        // the four unique chemist's-notation values of a homonuclear
        // two-function basis: (11|11), (11|22), (21|21) and (21|11)
        let two_electron = Tensor4::from_fn(2, |p, q, r, s| {
            if p == q && r == s {
                if p == r {
                    0.7746
                } else {
                    0.5697
                }
            } else if p != q && r != s {
                0.2970
            } else {
                0.4441
            }
        });

        MolecularIntegrals {
            nuclear_repulsion: 1.0 / 1.4,
            core_hamiltonian,
            two_electron,
            coefficients,
            occupations: vec![2.0, 0.0],
            orbital_energies: vec![-0.5782, 0.6703],
        }
    }
}
