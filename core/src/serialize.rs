//! Rendering of active-space tensors into an ordered fermionic term sum.

use crate::{active_space::ReducedHamiltonian, operators::{FermionSum, LadderOp}};

/// Walks the 0/1/2-body active-space data into a [`FermionSum`]: the
/// constant, then `h(p,q) p^ q` row-major, then the two-body terms
/// `g'(p,q,r,s) p^ q^ r s`.
///
/// The two-body tensor is scaled by 0.25 and has its last two axes swapped
/// first, converting the antisymmetrized physicist's-notation values into
/// the normal-ordered coefficients the downstream fermion-to-qubit mapper
/// expects. Sub-cutoff terms are never inserted.
pub fn serialize_fermionic(reduced: &ReducedHamiltonian) -> FermionSum {
    let n_active = reduced.one_body.nrows();
    let mut sum = FermionSum::new();

    sum.push_constant(reduced.constant);

    for (p, q) in itertools::iproduct!(0..n_active, 0..n_active) {
        sum.push(
            reduced.one_body[(p, q)],
            [LadderOp::create(p), LadderOp::annihilate(q)],
        );
    }

    let normal_ordered = reduced.two_body.transposed([0, 1, 3, 2]).scaled(0.25);
    for (p, q, r, s) in itertools::iproduct!(0..n_active, 0..n_active, 0..n_active, 0..n_active) {
        sum.push(
            normal_ordered[(p, q, r, s)],
            [
                LadderOp::create(p),
                LadderOp::create(q),
                LadderOp::annihilate(r),
                LadderOp::annihilate(s),
            ],
        );
    }

    log::trace!("serialized {} fermionic terms", sum.terms().len());
    sum
}
