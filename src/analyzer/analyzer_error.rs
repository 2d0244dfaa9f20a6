use thiserror::Error;

use crate::catalog::ColumnType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyzerError {
    /// Internal invariant violation. Never caused by the query text itself;
    /// it means an earlier compiler stage produced inconsistent state.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("function not found: {0}")]
    FunctionNotFound(String),

    #[error("no matching signature for {name}: expected {expected}, got {got:?}")]
    FunctionArgMismatch { name: String, expected: String, got: Vec<ColumnType> },
}

/// Fail with `InvalidState` when `cond` does not hold.
pub fn check_state(cond: bool, msg: impl FnOnce() -> String) -> Result<(), AnalyzerError> {
    if cond { Ok(()) } else { Err(AnalyzerError::InvalidState(msg())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_state_only_builds_message_on_failure() {
        assert!(check_state(true, || unreachable!()).is_ok());
        assert_eq!(
            check_state(1 + 1 == 3, || "math".to_string()),
            Err(AnalyzerError::InvalidState("math".into()))
        );
    }

    #[test]
    fn messages() {
        assert_eq!(AnalyzerError::InvalidState("x".into()).to_string(), "invalid state: x");
        let e = AnalyzerError::FunctionArgMismatch { name: "sum".into(), expected: "SUM(numeric)".into(), got: vec![ColumnType::String] };
        assert_eq!(e.to_string(), "no matching signature for sum: expected SUM(numeric), got [String]");
    }
}
