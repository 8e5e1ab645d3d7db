use derive_more::{Display, Error, From, IsVariant};
use hintgrid_core::GridError;

/// Errors that can occur while solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, IsVariant)]
pub enum SolverError {
    /// Applying a hint or a guess violated a grid contract.
    #[display("grid rejected an update: {_0}")]
    Grid(#[error(source)] GridError),
    /// The starting grid already contains duplicate values.
    #[display("grid contains conflicting values")]
    #[from(ignore)]
    Inconsistent,
}
