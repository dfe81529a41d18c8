//! Partitioning of spin orbitals into frozen and active sets, and the
//! frozen-core folding of the full Hamiltonian onto the active space.

use nalgebra::DMatrix;

use crate::{
    error::HamiltonianError,
    integrals::Tensor4,
    transform::MolecularHamiltonian,
};

/// Disjoint ordered lists of frozen and active spin-orbital indices.
///
/// List order is preserved and authoritative: active-space index `p` always
/// refers to `active()[p]`, and the frozen-core 0-body pairing runs over the
/// strict upper triangle *by list position* (see [`fold_frozen_core`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveSpacePartition {
    frozen: Vec<usize>,
    active: Vec<usize>,
}

impl ActiveSpacePartition {
    /// Builds a partition, validating that every index lies in
    /// `0..n_spin_orbitals` and that no index appears twice (within a list
    /// or across the two lists).
    pub fn new(
        frozen: Vec<usize>,
        active: Vec<usize>,
        n_spin_orbitals: usize,
    ) -> Result<Self, HamiltonianError> {
        let mut seen = vec![false; n_spin_orbitals];
        for &index in frozen.iter().chain(active.iter()) {
            if index >= n_spin_orbitals {
                return Err(HamiltonianError::InvalidPartition(format!(
                    "spin-orbital index {index} out of range for {n_spin_orbitals} spin orbitals"
                )));
            }
            if seen[index] {
                return Err(HamiltonianError::InvalidPartition(format!(
                    "spin-orbital index {index} listed more than once"
                )));
            }
            seen[index] = true;
        }

        Ok(Self { frozen, active })
    }

    /// The trivial partition: nothing frozen, every spin orbital active.
    pub fn full(n_spin_orbitals: usize) -> Self {
        Self {
            frozen: Vec::new(),
            active: (0..n_spin_orbitals).collect(),
        }
    }

    pub fn frozen(&self) -> &[usize] {
        &self.frozen
    }

    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn n_active(&self) -> usize {
        self.active.len()
    }
}

/// Hamiltonian data restricted to the active space, with frozen-orbital
/// contributions folded into the lower-rank terms.
///
/// The 2-body tensor inherits the antisymmetry relations of its source.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedHamiltonian {
    /// Frozen-core-corrected nuclear + core energy.
    pub constant: f64,
    /// 1-body term over active indices.
    pub one_body: DMatrix<f64>,
    /// Antisymmetrized 2-body tensor over active indices.
    pub two_body: Tensor4,
}

/// Folds frozen-orbital contributions into renormalized 0- and 1-body terms
/// and reindexes the 2-body tensor onto the active space.
///
/// The 0-body frozen pair sum runs over the strict upper triangle by *list
/// position*, not by index value: an unsorted frozen list pairs differently
/// from the sorted convention. Callers who care should pass the list sorted.
pub fn fold_frozen_core(
    hamiltonian: &MolecularHamiltonian,
    partition: &ActiveSpacePartition,
) -> ReducedHamiltonian {
    let frozen = partition.frozen();
    let active = partition.active();
    let h = &hamiltonian.one_body;
    let g = &hamiltonian.two_body;

    let mut constant = hamiltonian.nuclear_repulsion;
    for (a, &ia) in frozen.iter().enumerate() {
        constant += h[(ia, ia)];
        for &ib in &frozen[..a] {
            constant += g[(ia, ib, ia, ib)];
        }
    }

    let n_active = active.len();
    let one_body = DMatrix::from_fn(n_active, n_active, |p, q| {
        let (ip, iq) = (active[p], active[q]);
        h[(ip, iq)]
            + frozen
                .iter()
                .map(|&ia| g[(ia, ip, ia, iq)])
                .sum::<f64>()
    });

    // the algebra already accounts for frozen contributions through the 0-
    // and 1-body terms; the 2-body part is a plain reindexing
    let two_body = Tensor4::from_fn(n_active, |p, q, r, s| {
        g[(active[p], active[q], active[r], active[s])]
    });

    log::debug!(
        "frozen-core fold: {} frozen, {} active, constant {}",
        frozen.len(),
        n_active,
        constant
    );

    ReducedHamiltonian {
        constant,
        one_body,
        two_body,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{fold_frozen_core, ActiveSpacePartition};
    use crate::{error::HamiltonianError, transform};

    #[test]
    fn empty_frozen_set_is_the_identity_reduction() {
        let integrals = transform::tests::random_integrals(2, 11);
        let hamiltonian = transform::transform(&integrals);

        let partition = ActiveSpacePartition::full(integrals.n_spin_orbitals());
        let reduced = fold_frozen_core(&hamiltonian, &partition);

        assert_eq!(reduced.constant, hamiltonian.nuclear_repulsion);
        assert_eq!(reduced.one_body, hamiltonian.one_body);
        assert_eq!(reduced.two_body, hamiltonian.two_body);
    }

    #[test]
    fn frozen_orbitals_fold_into_lower_terms() {
        let integrals = transform::tests::random_integrals(2, 23);
        let hamiltonian = transform::transform(&integrals);

        let partition = ActiveSpacePartition::new(vec![0, 2], vec![1, 3], 4).unwrap();
        let reduced = fold_frozen_core(&hamiltonian, &partition);

        let h = &hamiltonian.one_body;
        let g = &hamiltonian.two_body;

        let expected_constant = integrals.nuclear_repulsion
            + h[(0, 0)]
            + h[(2, 2)]
            + g[(2, 0, 2, 0)];
        assert_abs_diff_eq!(reduced.constant, expected_constant, epsilon = 1e-12);

        // h_active(0, 1) = h(1, 3) + Σ_a <a 1||a 3>
        let expected_one_body = h[(1, 3)] + g[(0, 1, 0, 3)] + g[(2, 1, 2, 3)];
        assert_abs_diff_eq!(reduced.one_body[(0, 1)], expected_one_body, epsilon = 1e-12);

        // the 2-body block is a plain reindexing
        assert_eq!(reduced.two_body[(0, 1, 0, 1)], g[(1, 3, 1, 3)]);
    }

    #[test]
    fn frozen_pairing_follows_list_position() {
        let integrals = transform::tests::random_integrals(2, 29);
        let hamiltonian = transform::transform(&integrals);

        let sorted = fold_frozen_core(
            &hamiltonian,
            &ActiveSpacePartition::new(vec![0, 1], vec![], 4).unwrap(),
        );
        let reversed = fold_frozen_core(
            &hamiltonian,
            &ActiveSpacePartition::new(vec![1, 0], vec![], 4).unwrap(),
        );

        let g = &hamiltonian.two_body;
        let base = integrals.nuclear_repulsion
            + hamiltonian.one_body[(0, 0)]
            + hamiltonian.one_body[(1, 1)];
        assert_abs_diff_eq!(sorted.constant, base + g[(1, 0, 1, 0)], epsilon = 1e-12);
        assert_abs_diff_eq!(reversed.constant, base + g[(0, 1, 0, 1)], epsilon = 1e-12);
    }

    #[test]
    fn partition_validation_rejects_bad_indices() {
        assert!(matches!(
            ActiveSpacePartition::new(vec![0, 4], vec![1], 4),
            Err(HamiltonianError::InvalidPartition(_))
        ));
        assert!(matches!(
            ActiveSpacePartition::new(vec![0], vec![0, 1], 4),
            Err(HamiltonianError::InvalidPartition(_))
        ));
        assert!(matches!(
            ActiveSpacePartition::new(vec![], vec![1, 1], 4),
            Err(HamiltonianError::InvalidPartition(_))
        ));
        assert!(ActiveSpacePartition::new(vec![0, 1], vec![2, 3], 4).is_ok());
    }
}
