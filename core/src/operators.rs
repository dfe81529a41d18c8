//! Typed second-quantized operator sums and their external text grammar.
//!
//! Terms are built as `(coefficient, operator-string)` records and only
//! rendered to the boundary grammar in the `Display` impls; no strings are
//! assembled inside the tensor walks.

use std::fmt;

use smallvec::SmallVec;

/// Terms with |coefficient| at or below this magnitude are dropped at
/// insertion. The threshold defines observable equality: two Hamiltonians
/// serialize identically exactly when their surviving term lists match.
pub const COEFFICIENT_CUTOFF: f64 = 1e-12;

/// A single creation or annihilation operator on a spin orbital.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LadderOp {
    pub orbital: usize,
    pub creation: bool,
}

impl LadderOp {
    pub fn create(orbital: usize) -> Self {
        Self {
            orbital,
            creation: true,
        }
    }

    pub fn annihilate(orbital: usize) -> Self {
        Self {
            orbital,
            creation: false,
        }
    }
}

impl fmt::Display for LadderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.orbital, if self.creation { "^" } else { "" })
    }
}

/// One weighted product of ladder operators.
#[derive(Clone, Debug, PartialEq)]
pub struct FermionTerm {
    pub coefficient: f64,
    pub operators: SmallVec<[LadderOp; 4]>,
}

/// An ordered sum of fermionic terms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FermionSum {
    terms: Vec<FermionTerm>,
}

impl FermionSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a term unless its coefficient falls under the pruning cutoff.
    pub fn push(&mut self, coefficient: f64, operators: impl IntoIterator<Item = LadderOp>) {
        if coefficient.abs() > COEFFICIENT_CUTOFF {
            self.terms.push(FermionTerm {
                coefficient,
                operators: operators.into_iter().collect(),
            });
        }
    }

    /// Appends an identity (operator-free) term, with the same pruning.
    pub fn push_constant(&mut self, coefficient: f64) {
        self.push(coefficient, std::iter::empty());
    }

    pub fn terms(&self) -> &[FermionTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FermionTerm> {
        self.terms.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for FermionSum {
    /// Renders the grammar the external fermionic-operator parser consumes:
    /// `0.5 - 1.0 0^ 0 + 0.25 0^ 1^ 0 1`. Coefficients print in shortest
    /// round-trip decimal form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            if i == 0 {
                write!(f, "{:?}", term.coefficient)?;
            } else if term.coefficient > 0.0 {
                write!(f, " + {:?}", term.coefficient)?;
            } else {
                write!(f, " - {:?}", -term.coefficient)?;
            }
            for op in &term.operators {
                write!(f, " {op}")?;
            }
        }
        Ok(())
    }
}

/// Pauli axis letter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pauli {
    X,
    Y,
    Z,
}

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PauliOp {
    pub qubit: usize,
    pub axis: Pauli,
}

impl PauliOp {
    pub fn x(qubit: usize) -> Self {
        Self {
            qubit,
            axis: Pauli::X,
        }
    }

    pub fn y(qubit: usize) -> Self {
        Self {
            qubit,
            axis: Pauli::Y,
        }
    }

    pub fn z(qubit: usize) -> Self {
        Self {
            qubit,
            axis: Pauli::Z,
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.axis {
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        };
        write!(f, "{letter}{}", self.qubit)
    }
}

/// One weighted Pauli product; an empty operator list is the identity term.
#[derive(Clone, Debug, PartialEq)]
pub struct PauliTerm {
    pub coefficient: f64,
    pub operators: SmallVec<[PauliOp; 2]>,
}

/// An ordered sum of Pauli terms over a fixed qubit register.
#[derive(Clone, Debug, PartialEq)]
pub struct PauliSum {
    terms: Vec<PauliTerm>,
    n_qubits: usize,
}

impl PauliSum {
    pub fn new(n_qubits: usize) -> Self {
        Self {
            terms: Vec::new(),
            n_qubits,
        }
    }

    /// Appends a term unless its coefficient falls under the pruning cutoff.
    pub fn push(&mut self, coefficient: f64, operators: impl IntoIterator<Item = PauliOp>) {
        if coefficient.abs() > COEFFICIENT_CUTOFF {
            self.terms.push(PauliTerm {
                coefficient,
                operators: operators.into_iter().collect(),
            });
        }
    }

    pub fn push_constant(&mut self, coefficient: f64) {
        self.push(coefficient, std::iter::empty());
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PauliTerm> {
        self.terms.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Diagonal (computational-basis) expectation value ⟨state|H|state⟩.
    ///
    /// Bit `i` of `state` is the occupation of qubit `i`. Z factors
    /// contribute ±1 by parity; any X or Y factor makes a term purely
    /// off-diagonal, contributing nothing.
    pub fn expectation_z_basis(&self, state: usize) -> f64 {
        self.terms
            .iter()
            .map(|term| {
                let mut value = term.coefficient;
                for op in &term.operators {
                    value *= match op.axis {
                        Pauli::Z => {
                            if (state >> op.qubit) & 1 == 1 {
                                -1.0
                            } else {
                                1.0
                            }
                        }
                        Pauli::X | Pauli::Y => 0.0,
                    };
                }
                value
            })
            .sum()
    }
}

impl fmt::Display for PauliSum {
    /// Renders the qubit-operator grammar: `0.25 - 0.5 Z0 + 0.125 Z0Z1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (i, term) in self.terms.iter().enumerate() {
            if i == 0 {
                write!(f, "{:?}", term.coefficient)?;
            } else if term.coefficient > 0.0 {
                write!(f, " + {:?}", term.coefficient)?;
            } else {
                write!(f, " - {:?}", -term.coefficient)?;
            }
            if !term.operators.is_empty() {
                write!(f, " ")?;
                for op in &term.operators {
                    write!(f, "{op}")?;
                }
            }
        }
        Ok(())
    }
}

/// Boundary to the external fermion-to-qubit mapping (Jordan-Wigner in the
/// host framework). Only the general fermionic path needs it; the two-qubit
/// reduction already produces qubit operators.
pub trait QubitMapper {
    fn map(&self, hamiltonian: &FermionSum) -> PauliSum;
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn pruning_threshold_is_exclusive_above() {
        let mut sum = FermionSum::new();
        sum.push(1.0001e-12, [LadderOp::create(0), LadderOp::annihilate(0)]);
        assert_eq!(sum.terms().len(), 1);

        let mut sum = FermionSum::new();
        sum.push(0.9999e-12, [LadderOp::create(0), LadderOp::annihilate(0)]);
        assert!(sum.is_empty());

        let mut sum = FermionSum::new();
        sum.push(1e-12, [LadderOp::create(0), LadderOp::annihilate(0)]);
        assert!(sum.is_empty());

        let mut sum = FermionSum::new();
        sum.push(-1.0001e-12, [LadderOp::create(0)]);
        assert_eq!(sum.terms().len(), 1);
    }

    #[test]
    fn rescaled_sum_prunes_to_empty() {
        let mut sum = FermionSum::new();
        sum.push_constant(0.5);
        sum.push(-1.0, [LadderOp::create(0), LadderOp::annihilate(0)]);
        sum.push(0.25, [
            LadderOp::create(0),
            LadderOp::create(1),
            LadderOp::annihilate(0),
            LadderOp::annihilate(1),
        ]);

        let mut rescaled = FermionSum::new();
        for term in sum.iter() {
            rescaled.push(term.coefficient * 1e-13, term.operators.iter().copied());
        }
        assert!(rescaled.is_empty());
        assert_eq!(rescaled.to_string(), "0");
    }

    #[test]
    fn fermion_grammar_matches_the_external_parser() {
        let mut sum = FermionSum::new();
        sum.push_constant(0.5);
        sum.push(-1.0, [LadderOp::create(0), LadderOp::annihilate(0)]);
        sum.push(0.25, [
            LadderOp::create(0),
            LadderOp::create(1),
            LadderOp::annihilate(0),
            LadderOp::annihilate(1),
        ]);

        assert_eq!(sum.to_string(), "0.5 - 1.0 0^ 0 + 0.25 0^ 1^ 0 1");
    }

    #[test]
    fn pauli_grammar_matches_the_external_parser() {
        let mut sum = PauliSum::new(2);
        sum.push_constant(-0.25);
        sum.push(0.5, [PauliOp::z(0)]);
        sum.push(-0.125, [PauliOp::z(0), PauliOp::z(1)]);
        sum.push(0.1, [PauliOp::x(0), PauliOp::x(1)]);

        assert_eq!(sum.to_string(), "-0.25 + 0.5 Z0 - 0.125 Z0Z1 + 0.1 X0X1");
    }

    #[test]
    fn z_basis_expectation_tracks_parity() {
        let mut sum = PauliSum::new(2);
        sum.push_constant(1.0);
        sum.push(0.5, [PauliOp::z(0)]);
        sum.push(0.25, [PauliOp::z(0), PauliOp::z(1)]);
        sum.push(10.0, [PauliOp::x(0), PauliOp::x(1)]);

        assert_abs_diff_eq!(sum.expectation_z_basis(0b00), 1.0 + 0.5 + 0.25);
        assert_abs_diff_eq!(sum.expectation_z_basis(0b01), 1.0 - 0.5 - 0.25);
        assert_abs_diff_eq!(sum.expectation_z_basis(0b10), 1.0 + 0.5 - 0.25);
        assert_abs_diff_eq!(sum.expectation_z_basis(0b11), 1.0 - 0.5 + 0.25);
    }
}
