//! Rotation of spin-blocked integrals into the molecular-orbital basis, in
//! antisymmetrized physicist's notation.

use nalgebra::DMatrix;

use crate::{
    integrals::{MolecularIntegrals, Tensor4},
    spin,
};

/// The full second-quantized Hamiltonian data over all spin orbitals:
/// `H = E_0 + Σ h_pq p†q + ¼ Σ ⟨pq‖rs⟩ p†q†sr` after serialization.
#[derive(Clone, Debug, PartialEq)]
pub struct MolecularHamiltonian {
    /// 0-body term, the nuclear repulsion energy passed through unchanged.
    pub nuclear_repulsion: f64,
    /// 1-body term over spin orbitals, MO basis.
    pub one_body: DMatrix<f64>,
    /// Antisymmetrized 2-body tensor ⟨pq‖rs⟩ over spin orbitals, MO basis.
    pub two_body: Tensor4,
}

/// Expands the AO integrals into the spin-orbital basis and rotates them
/// into the molecular-orbital basis.
///
/// The two-electron steps run in this order: chemist's `(pq|rs)` to
/// physicist's `⟨pr|qs⟩` by axis permutation, antisymmetrization
/// `⟨pr‖qs⟩ = ⟨pr|qs⟩ − ⟨pr|sq⟩`, then one O(n⁵) contraction against the
/// spin-blocked coefficient matrix per index, innermost first.
pub fn transform(integrals: &MolecularIntegrals) -> MolecularHamiltonian {
    // restricted reference: both spin channels share the spatial coefficients
    let coefficients =
        spin::spin_block_coefficients(&integrals.coefficients, &integrals.coefficients);

    let blocked = spin::spin_block_two_electron(&integrals.two_electron);
    let physicist = blocked.transposed([0, 2, 1, 3]);

    let n_spin = physicist.size();
    let antisymmetrized = Tensor4::from_fn(n_spin, |p, q, r, s| {
        physicist[(p, q, r, s)] - physicist[(p, q, s, r)]
    });

    log::debug!("rotating the two-body tensor over {n_spin} spin orbitals");
    let two_body = antisymmetrized
        .contract_axis(3, &coefficients)
        .contract_axis(2, &coefficients)
        .contract_axis(1, &coefficients)
        .contract_axis(0, &coefficients);

    let one_body_ao = spin::spin_block_one_body(&integrals.core_hamiltonian);
    let one_body = coefficients.transpose() * one_body_ao * &coefficients;

    MolecularHamiltonian {
        nuclear_repulsion: integrals.nuclear_repulsion,
        one_body,
        two_body,
    }
}
