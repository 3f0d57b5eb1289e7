use ream_api_types_common::error::ApiError;
use thiserror::Error;

/// Every way an attester duty request can fail. Any of these aborts the whole request.
#[derive(Error, Debug)]
pub enum DutyError {
    #[error("Request epoch {requested} cannot be greater than the next epoch {next}")]
    OutOfRangeEpoch { requested: u64, next: u64 },

    #[error("Beacon node is currently syncing and not serving requests on this endpoint")]
    UnderSyncing,

    #[error("Could not get start slot from epoch {epoch}")]
    SlotComputationFailed { epoch: u64 },

    #[error("No state available at slot {slot}")]
    StateUnavailable { slot: u64 },

    #[error("Could not get state at slot {slot}: {reason}")]
    StateFetchFailed { slot: u64, reason: String },

    #[error("Could not check optimistic status: {0}")]
    OptimisticStatusUnavailable(String),

    #[error("Invalid validator index {validator_index} for epoch {epoch}")]
    InvalidValidatorIndex { validator_index: u64, epoch: u64 },

    #[error("Could not compute committee assignments for epoch {epoch}: {reason}")]
    AssignmentComputationFailed { epoch: u64, reason: String },

    #[error("Could not get active validator count for epoch {epoch}: {reason}")]
    ActiveValidatorCountFailed { epoch: u64, reason: String },

    #[error(
        "Validator {validator_index} is missing from its assigned committee {committee_index} at slot {slot}"
    )]
    ValidatorNotInCommittee {
        validator_index: u64,
        committee_index: u64,
        slot: u64,
    },

    #[error("Could not get dependent root for epoch {epoch}: {reason}")]
    DependentRootUnavailable { epoch: u64, reason: String },
}

impl From<DutyError> for ApiError {
    fn from(err: DutyError) -> Self {
        match err {
            DutyError::OutOfRangeEpoch { .. } => ApiError::BadRequest(err.to_string()),
            DutyError::UnderSyncing => ApiError::UnderSyncing,
            DutyError::InvalidValidatorIndex { .. } => {
                ApiError::ValidatorNotFound(err.to_string())
            }
            DutyError::StateUnavailable { .. } => ApiError::NotFound(err.to_string()),
            DutyError::SlotComputationFailed { .. }
            | DutyError::StateFetchFailed { .. }
            | DutyError::OptimisticStatusUnavailable(_)
            | DutyError::AssignmentComputationFailed { .. }
            | DutyError::ActiveValidatorCountFailed { .. }
            | DutyError::ValidatorNotInCommittee { .. }
            | DutyError::DependentRootUnavailable { .. } => ApiError::InternalError(err.to_string()),
        }
    }
}
