//! Closed-form reduction of a 4-spin-orbital active space onto two qubits.
//!
//! For two spatial orbitals with a closed-shell reference, the Hamiltonian
//! restricted to the computational basis {|00⟩, |10⟩, |01⟩, |11⟩} is fully
//! determined by a handful of one- and two-electron integrals, so instead of
//! serializing the general fermionic string and mapping it, the qubit
//! operator can be solved for directly.

use nalgebra::{Matrix4, Vector4};

use crate::{
    active_space::ReducedHamiltonian,
    error::HamiltonianError,
    operators::{PauliOp, PauliSum},
};

/// Solves the two-qubit ansatz
/// `H = g0·I + g1·Z0 + g2·Z1 + g3·Z0Z1 + g4·X0X1`
/// against the four computational-basis energies.
///
/// The Y0Y1 term is dropped: it only enters once the integrals turn complex
/// (spin-orbit coupling), which the supported closed-shell reference never
/// produces. Requires exactly 4 active spin orbitals; anything else fails
/// with [`HamiltonianError::UnsupportedReduction`] before any computation.
pub fn reduce_two_qubit(reduced: &ReducedHamiltonian) -> Result<PauliSum, HamiltonianError> {
    let n_active = reduced.one_body.nrows();
    if n_active != 4 {
        return Err(HamiltonianError::UnsupportedReduction { n_active });
    }

    let h = &reduced.one_body;
    let g = &reduced.two_body;

    let h11 = h[(0, 0)];
    let h22 = h[(1, 1)];
    let j11 = g[(0, 2, 0, 2)];
    let j12 = g[(1, 2, 1, 2)];
    let j22 = g[(1, 3, 1, 3)];
    let k12 = g[(0, 2, 1, 3)];

    let e1 = h11 + j11;
    let e2 = h22 + 2.0 * j12 - k12;
    let e0 = reduced.constant;

    // computational-basis energies:
    //   <00|H|00> = g0 + g1 + g2 + g3 = 2·e1 − J11 + E0
    //   <10|H|10> = g0 − g1 + g2 − g3 = e1 + e2 − J11 − J12 + K12 + E0
    //   <01|H|01> = g0 + g1 − g2 − g3 = <10|H|10>
    //   <11|H|11> = g0 − g1 − g2 + g3 = 2·e2 − 4·J12 + J22 + 2·K12 + E0
    //   <10|H|01> = g4 = K12
    #[rustfmt::skip]
    let parity = Matrix4::new(
        1.0,  1.0,  1.0,  1.0,
        1.0, -1.0,  1.0, -1.0,
        1.0,  1.0, -1.0, -1.0,
        1.0, -1.0, -1.0,  1.0,
    );

    let diagonal = 2.0 * e1 - j11 + e0;
    let cross = e1 + e2 - j11 - j12 + k12 + e0;
    let doubly = 2.0 * e2 - 4.0 * j12 + j22 + 2.0 * k12 + e0;
    let energies = Vector4::new(diagonal, cross, cross, doubly);

    // the fixed ±1 parity matrix is invertible by construction
    let coefficients = parity
        .lu()
        .solve(&energies)
        .expect("parity matrix is invertible");

    let mut sum = PauliSum::new(2);
    sum.push_constant(coefficients[0]);
    sum.push(coefficients[1], [PauliOp::z(0)]);
    sum.push(coefficients[2], [PauliOp::z(1)]);
    sum.push(coefficients[3], [PauliOp::z(0), PauliOp::z(1)]);
    sum.push(k12, [PauliOp::x(0), PauliOp::x(1)]);

    Ok(sum)
}
