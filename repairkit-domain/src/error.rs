//! Error types for repair operations.

use thiserror::Error;

/// Errors surfaced by repair operations.
///
/// Cooldowns, exclusions and non-repairable items are not errors: they are answered by the
/// query operations and simply skipped by the mutating ones.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Economy integration is on but the host supplied no currency port.
    #[error("economy integration is enabled but no {port} port is configured")]
    MissingCollaborator {
        /// Which port is missing.
        port: &'static str,
    },

    /// The currency port refused or failed the withdrawal.
    #[error("currency withdrawal failed: {0}")]
    Withdrawal(#[from] anyhow::Error),
}

impl RepairError {
    /// True when the host wired the engine incorrectly, as opposed to a runtime failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RepairError::MissingCollaborator { .. })
    }
}

/// Result type alias using RepairError.
pub type RepairResult<T> = Result<T, RepairError>;

#[cfg(test)]
mod tests {
    use super::RepairError;

    #[test]
    fn missing_collaborator_is_contract_violation() {
        let err = RepairError::MissingCollaborator { port: "currency" };
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("no currency port"));
    }

    #[test]
    fn withdrawal_error_wraps_source() {
        let err = RepairError::from(anyhow::anyhow!("insufficient funds"));
        assert!(!err.is_contract_violation());
        assert!(err.to_string().contains("insufficient funds"));
    }
}
