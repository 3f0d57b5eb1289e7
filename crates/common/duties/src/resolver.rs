use std::sync::Arc;

use ream_api_types_beacon::{duties::AttesterDuty, responses::DutiesResponse};
use ream_consensus_misc::misc::compute_epoch_at_slot;
use tracing::{debug, warn};

use crate::{
    assembler::assemble_attester_duties,
    error::DutyError,
    traits::{DutiesState, OptimisticModeFetcher, StateProvider, SyncChecker},
    window::{ensure_epoch_in_window, state_slot_for_epoch},
};

/// Validators asking for their attester duties in one epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyRequest {
    pub epoch: u64,
    pub validator_indices: Vec<u64>,
}

impl DutyRequest {
    pub fn new(epoch: u64, validator_indices: Vec<u64>) -> Self {
        Self {
            epoch,
            validator_indices,
        }
    }
}

/// Answers attester duty requests from state snapshots served by a [`StateProvider`].
pub struct AttesterDutiesResolver<S> {
    sync_checker: Arc<dyn SyncChecker>,
    optimistic_mode_fetcher: Arc<dyn OptimisticModeFetcher>,
    state_provider: Arc<dyn StateProvider<S>>,
}

impl<S: DutiesState + 'static> AttesterDutiesResolver<S> {
    pub fn new(
        sync_checker: Arc<dyn SyncChecker>,
        optimistic_mode_fetcher: Arc<dyn OptimisticModeFetcher>,
        state_provider: Arc<dyn StateProvider<S>>,
    ) -> Self {
        Self {
            sync_checker,
            optimistic_mode_fetcher,
            state_provider,
        }
    }

    /// Resolve the attester duties of ``request`` as seen at ``current_slot``.
    ///
    /// All duties and the dependent root are read from one state snapshot. Any failure aborts the
    /// whole request.
    pub async fn resolve(
        &self,
        request: &DutyRequest,
        current_slot: u64,
    ) -> Result<DutiesResponse<AttesterDuty>, DutyError> {
        if self.sync_checker.is_syncing() {
            warn!(epoch = request.epoch, "Rejecting attester duties request while syncing");
            return Err(DutyError::UnderSyncing);
        }

        let current_epoch = compute_epoch_at_slot(current_slot);
        ensure_epoch_in_window(request.epoch, current_epoch)?;
        let state_slot = state_slot_for_epoch(request.epoch, current_epoch)?;

        let state = self
            .state_provider
            .state_by_slot(state_slot)
            .await
            .map_err(|err| DutyError::StateFetchFailed {
                slot: state_slot,
                reason: err.to_string(),
            })?
            .ok_or(DutyError::StateUnavailable { slot: state_slot })?;

        let execution_optimistic = self
            .optimistic_mode_fetcher
            .is_optimistic()
            .await
            .map_err(|err| DutyError::OptimisticStatusUnavailable(err.to_string()))?;

        let duties =
            assemble_attester_duties(state.as_ref(), request.epoch, &request.validator_indices)?;

        let dependent_root = state
            .attestation_dependent_root(request.epoch)
            .map_err(|err| DutyError::DependentRootUnavailable {
                epoch: request.epoch,
                reason: err.to_string(),
            })?;

        debug!(
            epoch = request.epoch,
            state_slot,
            requested = request.validator_indices.len(),
            duties = duties.len(),
            ?dependent_root,
            "Resolved attester duties"
        );

        Ok(DutiesResponse::new(
            dependent_root,
            execution_optimistic,
            duties,
        ))
    }
}
