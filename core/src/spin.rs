//! Expansion of spatial integral data into the spin-orbital basis.
//!
//! Every routine here goes through [`spin_orbital`] for its index layout.
//! The coefficient matrix and the two-electron tensor must agree on that
//! layout or the downstream Hamiltonian is silently wrong, so the convention
//! deliberately exists in exactly one place.

use nalgebra::DMatrix;

use crate::integrals::Tensor4;

/// Spin channel of a spin orbital.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spin {
    Alpha,
    Beta,
}

/// Maps a (spin, spatial orbital) pair to its spin-orbital index: the alpha
/// block occupies `0..n_spatial`, the beta block `n_spatial..2 * n_spatial`.
pub fn spin_orbital(spin: Spin, spatial: usize, n_spatial: usize) -> usize {
    match spin {
        Spin::Alpha => spatial,
        Spin::Beta => n_spatial + spatial,
    }
}

/// Inverse of [`spin_orbital`].
pub fn split_spin_orbital(index: usize, n_spatial: usize) -> (Spin, usize) {
    if index < n_spatial {
        (Spin::Alpha, index)
    } else {
        (Spin::Beta, index - n_spatial)
    }
}

/// Builds the block-diagonal spin-orbital coefficient matrix: alpha
/// coefficients top-left, beta coefficients bottom-right, zero elsewhere.
pub fn spin_block_coefficients(alpha: &DMatrix<f64>, beta: &DMatrix<f64>) -> DMatrix<f64> {
    let n = alpha.nrows();
    assert_eq!(beta.nrows(), n, "alpha/beta coefficient shape mismatch");

    DMatrix::from_fn(2 * n, 2 * n, |i, j| {
        match (split_spin_orbital(i, n), split_spin_orbital(j, n)) {
            ((Spin::Alpha, p), (Spin::Alpha, q)) => alpha[(p, q)],
            ((Spin::Beta, p), (Spin::Beta, q)) => beta[(p, q)],
            _ => 0.0,
        }
    })
}

/// Doubles a one-body AO matrix block-diagonally into the spin-orbital basis.
pub fn spin_block_one_body(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    spin_block_coefficients(matrix, matrix)
}

/// Expands a spatial two-electron tensor in chemist's notation into the
/// spin-orbital basis (the Kronecker-doubling of the spatial tensor against
/// the 2×2 identity).
///
/// In chemist's notation `(pq|rs)` the first pair and the second pair each
/// share one electron, so an entry survives exactly when `p, q` carry the
/// same spin and `r, s` carry the same spin.
pub fn spin_block_two_electron(spatial: &Tensor4) -> Tensor4 {
    let n = spatial.size();

    Tensor4::from_fn(2 * n, |p, q, r, s| {
        let (sp, p) = split_spin_orbital(p, n);
        let (sq, q) = split_spin_orbital(q, n);
        let (sr, r) = split_spin_orbital(r, n);
        let (ss, s) = split_spin_orbital(s, n);

        if sp == sq && sr == ss {
            spatial[(p, q, r, s)]
        } else {
            0.0
        }
    })
}
