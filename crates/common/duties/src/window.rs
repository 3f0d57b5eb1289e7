use ream_consensus_misc::misc::{try_compute_end_slot_at_epoch, try_compute_start_slot_at_epoch};

use crate::error::DutyError;

/// Reject epochs whose attester shuffling can not be known yet.
///
/// Committees of the next epoch are already fixed by the current epoch's state, anything further
/// out is not.
pub fn ensure_epoch_in_window(requested_epoch: u64, current_epoch: u64) -> Result<(), DutyError> {
    let next_epoch = current_epoch
        .checked_add(1)
        .ok_or(DutyError::SlotComputationFailed {
            epoch: current_epoch,
        })?;
    if requested_epoch > next_epoch {
        return Err(DutyError::OutOfRangeEpoch {
            requested: requested_epoch,
            next: next_epoch,
        });
    }
    Ok(())
}

/// Return the slot of the state that duties for ``requested_epoch`` are read from.
///
/// Next epoch requests read the state at the start of the current epoch, every other request
/// reads the state at the start of the requested epoch. Every slot of ``requested_epoch`` must
/// fit in a `u64`, since duties are placed on them.
pub fn state_slot_for_epoch(requested_epoch: u64, current_epoch: u64) -> Result<u64, DutyError> {
    try_compute_end_slot_at_epoch(requested_epoch).ok_or(DutyError::SlotComputationFailed {
        epoch: requested_epoch,
    })?;
    let state_epoch = if current_epoch.checked_add(1) == Some(requested_epoch) {
        current_epoch
    } else {
        requested_epoch
    };
    try_compute_start_slot_at_epoch(state_epoch).ok_or(DutyError::SlotComputationFailed {
        epoch: requested_epoch,
    })
}
