use thiserror::Error;

/// Everything that can go wrong while building a molecular Hamiltonian.
///
/// All failures are synchronous and local to a single construction call;
/// there is no transient-failure concept and nothing is retried.
#[derive(Debug, Error)]
pub enum HamiltonianError {
    /// The two-qubit reduction was requested for an active space it does not
    /// exist for. No partial computation is attempted.
    #[error(
        "hamiltonian reduction is only implemented for 4 active spin orbitals \
         (2 spatial orbitals), got an active space of {n_active}"
    )]
    UnsupportedReduction { n_active: usize },

    /// Frozen/active index lists are out of range, overlap, or repeat an
    /// index.
    #[error("invalid active-space partition: {0}")]
    InvalidPartition(String),

    /// The external integral engine failed to produce integrals.
    #[error("integral engine failed")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),
}
