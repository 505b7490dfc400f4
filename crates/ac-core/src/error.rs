/// Precondition violations reported by the engines.
///
/// An operation that returns one of these has not touched the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutocompleteError {
    #[error("weight must be positive and finite")]
    NonPositiveWeight,

    #[error("weight total would overflow the weight type")]
    WeightOverflow,

    #[error("limit must be positive")]
    InvalidLimit,

    #[error("value already stored under a different path")]
    ConflictingPath,

    #[error("invalid weight policy: {0} (expected \"sum\" or \"average\")")]
    InvalidPolicy(String),

    #[error("invalid engine kind: {0} (expected \"simple\" or \"compressed\")")]
    InvalidEngine(String),
}

pub type Result<T> = std::result::Result<T, AutocompleteError>;
