use std::ops::{Index, IndexMut};

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// A dense rank-4 tensor with one shared axis length, stored row-major in a
/// flat buffer.
///
/// Two-electron integral data is indexed by four orbital indices throughout
/// the pipeline; keeping it in a single `Vec<f64>` keeps the O(n⁴) walks
/// cache-friendly and the indexing arithmetic in one place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tensor4 {
    data: Vec<f64>,
    /// side length
    size: usize,
}

impl Tensor4 {
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![0.0; size.pow(4)],
            size,
        }
    }

    /// Builds a tensor by evaluating `f` at every index quadruple.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize, usize, usize) -> f64) -> Self {
        let mut tensor = Self::zeros(size);
        for (p, q, r, s) in itertools::iproduct!(0..size, 0..size, 0..size, 0..size) {
            tensor[(p, q, r, s)] = f(p, q, r, s);
        }
        tensor
    }

    /// Side length of every axis.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn linear(&self, (p, q, r, s): (usize, usize, usize, usize)) -> usize {
        ((p * self.size + q) * self.size + r) * self.size + s
    }

    /// Permutes the axes, numpy-`transpose` style: axis `k` of the result is
    /// axis `axes[k]` of `self`.
    pub fn transposed(&self, axes: [usize; 4]) -> Self {
        let n = self.size;
        let mut out = Self::zeros(n);
        for (p, q, r, s) in itertools::iproduct!(0..n, 0..n, 0..n, 0..n) {
            let source = [p, q, r, s];
            out[(
                source[axes[0]],
                source[axes[1]],
                source[axes[2]],
                source[axes[3]],
            )] = self[(p, q, r, s)];
        }
        out
    }

    /// Multiplies every entry by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            data: self.data.iter().map(|value| value * factor).collect(),
            size: self.size,
        }
    }

    /// Contracts one axis against a matrix: the entry of the result at index
    /// `a` along `axis` is `Σ_i self[.., i, ..] * matrix[(i, a)]`.
    ///
    /// This is the einsum step `pqrs, sS -> pqrS` (for `axis = 3`) and its
    /// siblings. Each call is O(n⁵), which makes the four-fold basis rotation
    /// the hot spot of the whole pipeline; the outermost index parallelizes
    /// with rayon when the `rayon` feature is enabled.
    pub fn contract_axis(&self, axis: usize, matrix: &DMatrix<f64>) -> Self {
        assert!(axis < 4, "axis {axis} out of range for a rank-4 tensor");
        assert_eq!(matrix.nrows(), self.size, "contraction matrix shape mismatch");
        assert_eq!(matrix.ncols(), self.size, "contraction matrix shape mismatch");

        let n = self.size;

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;

            let mut data = vec![0.0; n.pow(4)];
            data.par_chunks_mut(n.pow(3))
                .enumerate()
                .for_each(|(p, block)| {
                    for (q, r, s) in itertools::iproduct!(0..n, 0..n, 0..n) {
                        let target = [p, q, r, s];
                        let mut source = target;
                        let mut sum = 0.0;
                        for i in 0..n {
                            source[axis] = i;
                            sum += self[(source[0], source[1], source[2], source[3])]
                                * matrix[(i, target[axis])];
                        }
                        block[(q * n + r) * n + s] = sum;
                    }
                });

            Self { data, size: n }
        }

        #[cfg(not(feature = "rayon"))]
        {
            let mut out = Self::zeros(n);
            for (p, q, r, s) in itertools::iproduct!(0..n, 0..n, 0..n, 0..n) {
                let target = [p, q, r, s];
                let mut source = target;
                let mut sum = 0.0;
                for i in 0..n {
                    source[axis] = i;
                    sum += self[(source[0], source[1], source[2], source[3])]
                        * matrix[(i, target[axis])];
                }
                out[(p, q, r, s)] = sum;
            }
            out
        }
    }
}

impl Index<(usize, usize, usize, usize)> for Tensor4 {
    type Output = f64;

    fn index(&self, index: (usize, usize, usize, usize)) -> &Self::Output {
        let linear = self.linear(index);
        &self.data[linear]
    }
}

impl IndexMut<(usize, usize, usize, usize)> for Tensor4 {
    fn index_mut(&mut self, index: (usize, usize, usize, usize)) -> &mut Self::Output {
        let linear = self.linear(index);
        &mut self.data[linear]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::DMatrix;

    use super::Tensor4;

    fn counting_tensor(n: usize) -> Tensor4 {
        Tensor4::from_fn(n, |p, q, r, s| (((p * n + q) * n + r) * n + s) as f64)
    }

    #[test]
    fn transpose_permutes_axes() {
        let tensor = counting_tensor(3);

        let chemist_to_physicist = tensor.transposed([0, 2, 1, 3]);
        for (p, q, r, s) in itertools::iproduct!(0..3, 0..3, 0..3, 0..3) {
            assert_eq!(chemist_to_physicist[(p, q, r, s)], tensor[(p, r, q, s)]);
        }

        let exchange = tensor.transposed([0, 1, 3, 2]);
        for (p, q, r, s) in itertools::iproduct!(0..3, 0..3, 0..3, 0..3) {
            assert_eq!(exchange[(p, q, r, s)], tensor[(p, q, s, r)]);
        }
    }

    #[test]
    fn contraction_matches_hand_computation() {
        let tensor = counting_tensor(2);
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);

        let contracted = tensor.contract_axis(3, &matrix);
        for (p, q, r, s) in itertools::iproduct!(0..2, 0..2, 0..2, 0..2) {
            let expected: f64 = (0..2)
                .map(|i| tensor[(p, q, r, i)] * matrix[(i, s)])
                .sum();
            assert_abs_diff_eq!(contracted[(p, q, r, s)], expected, epsilon = 1e-14);
        }

        let contracted = tensor.contract_axis(0, &matrix);
        for (p, q, r, s) in itertools::iproduct!(0..2, 0..2, 0..2, 0..2) {
            let expected: f64 = (0..2)
                .map(|i| tensor[(i, q, r, s)] * matrix[(i, p)])
                .sum();
            assert_abs_diff_eq!(contracted[(p, q, r, s)], expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn scaling_is_entrywise() {
        let tensor = counting_tensor(2);
        let scaled = tensor.scaled(0.25);
        for (p, q, r, s) in itertools::iproduct!(0..2, 0..2, 0..2, 0..2) {
            assert_abs_diff_eq!(scaled[(p, q, r, s)], 0.25 * tensor[(p, q, r, s)]);
        }
    }
}
