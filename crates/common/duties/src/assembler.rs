use ream_api_types_beacon::duties::AttesterDuty;
use ream_consensus_misc::misc::compute_committee_count_per_slot;
use tracing::error;

use crate::{error::DutyError, traits::DutiesState};

/// Build the attester duties of ``validator_indices`` for ``epoch`` from one state snapshot.
///
/// Duties come back in request order. Validators without a committee in ``epoch`` are skipped,
/// an index the state does not know fails the whole batch.
pub fn assemble_attester_duties<S: DutiesState + ?Sized>(
    state: &S,
    epoch: u64,
    validator_indices: &[u64],
) -> Result<Vec<AttesterDuty>, DutyError> {
    let assignments = state
        .committee_assignments(epoch, validator_indices)
        .map_err(|err| DutyError::AssignmentComputationFailed {
            epoch,
            reason: err.to_string(),
        })?;
    let active_validator_count =
        state
            .active_validator_count(epoch)
            .map_err(|err| DutyError::ActiveValidatorCountFailed {
                epoch,
                reason: err.to_string(),
            })?;
    let committees_at_slot = compute_committee_count_per_slot(active_validator_count);

    let mut duties = Vec::with_capacity(validator_indices.len());
    for &validator_index in validator_indices {
        let pubkey = match state.pubkey_at_index(validator_index) {
            Some(pubkey) if !pubkey.is_zero() => pubkey,
            _ => {
                return Err(DutyError::InvalidValidatorIndex {
                    validator_index,
                    epoch,
                });
            }
        };

        let Some(assignment) = assignments.get(&validator_index) else {
            continue;
        };

        let validator_committee_index = assignment
            .committee
            .iter()
            .position(|&index| index == validator_index)
            .ok_or_else(|| {
                error!(
                    validator_index,
                    committee_index = assignment.committee_index,
                    slot = assignment.attester_slot,
                    "Committee assignment does not contain its validator"
                );
                DutyError::ValidatorNotInCommittee {
                    validator_index,
                    committee_index: assignment.committee_index,
                    slot: assignment.attester_slot,
                }
            })?;

        duties.push(AttesterDuty {
            pubkey,
            validator_index,
            committee_index: assignment.committee_index,
            committee_length: assignment.committee.len() as u64,
            committees_at_slot,
            validator_committee_index: validator_committee_index as u64,
            slot: assignment.attester_slot,
        });
    }

    Ok(duties)
}
