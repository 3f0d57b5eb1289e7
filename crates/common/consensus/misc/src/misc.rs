use std::cmp::max;

use alloy_primitives::B256;
use anyhow::ensure;
use ethereum_hashing::hash;

use crate::constants::beacon::{
    MAX_COMMITTEES_PER_SLOT, SHUFFLE_ROUND_COUNT, SLOTS_PER_EPOCH, TARGET_COMMITTEE_SIZE,
};

const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_VIEW_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const TOTAL_SIZE: usize = PIVOT_VIEW_SIZE + POSITION_WINDOW_SIZE;

/// Lists longer than this can not be shuffled with a 4 byte position window.
pub const MAX_SHUFFLE_LIST_SIZE: usize = 1 << 24;

/// Return the epoch number at ``slot``.
pub fn compute_epoch_at_slot(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH
}

/// Return the start slot of ``epoch``.
pub fn compute_start_slot_at_epoch(epoch: u64) -> u64 {
    epoch * SLOTS_PER_EPOCH
}

/// Return the start slot of ``epoch``, or `None` if it does not fit in a `u64`.
pub fn try_compute_start_slot_at_epoch(epoch: u64) -> Option<u64> {
    epoch.checked_mul(SLOTS_PER_EPOCH)
}

/// Return the last slot of ``epoch``, or `None` if any slot of it does not fit in a `u64`.
pub fn try_compute_end_slot_at_epoch(epoch: u64) -> Option<u64> {
    try_compute_start_slot_at_epoch(epoch)?.checked_add(SLOTS_PER_EPOCH - 1)
}

/// Return the number of committees in each slot for an epoch with ``active_validator_count``
/// active validators.
pub fn compute_committee_count_per_slot(active_validator_count: u64) -> u64 {
    (active_validator_count / SLOTS_PER_EPOCH / TARGET_COMMITTEE_SIZE)
        .clamp(1, MAX_COMMITTEES_PER_SLOT)
}

// Return the integer deserialization of ``data`` interpreted as ``ENDIANNESS``-endian.
pub fn bytes_to_int64(slice: &[u8]) -> u64 {
    let mut bytes = [0u8; 8];
    let len = slice.len().min(8);
    bytes[..len].copy_from_slice(&slice[..len]);
    u64::from_le_bytes(bytes)
}

/// Return the shuffled index corresponding to ``seed`` (and ``index_count``).
pub fn compute_shuffled_index(
    mut index: usize,
    index_count: usize,
    seed: B256,
) -> anyhow::Result<usize> {
    ensure!(index < index_count, "Index must be less than index_count");
    for round in 0..SHUFFLE_ROUND_COUNT {
        let seed_with_round = [seed.as_slice(), &round.to_le_bytes()].concat();
        let pivot = bytes_to_int64(&hash(&seed_with_round)[..]) % index_count as u64;

        let flip = (pivot as usize + (index_count - index)) % index_count;
        let position = max(index, flip);
        let seed_with_position = [
            seed_with_round.as_slice(),
            &(position / 256).to_le_bytes()[0..4],
        ]
        .concat();
        let source = hash(&seed_with_position);
        let byte = source[(position % 256) / 8];
        let bit = (byte >> (position % 8)) % 2;

        index = if bit == 1 { flip } else { index };
    }
    Ok(index)
}

/// Return the committee corresponding to ``indices``, ``seed``, ``index``, and committee ``count``.
pub fn compute_committee(
    indices: &[u64],
    seed: B256,
    index: u64,
    count: u64,
) -> anyhow::Result<Vec<u64>> {
    ensure!(index < count, "Committee index {index} must be less than count {count}");
    let start = (indices.len() as u64 * index) / count;
    let end = (indices.len() as u64 * (index + 1)) / count;
    (start..end)
        .map(|i| {
            let shuffled_index = compute_shuffled_index(i as usize, indices.len(), seed)?;
            indices
                .get(shuffled_index)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("Index out of bounds: {}", shuffled_index))
        })
        .collect::<anyhow::Result<Vec<u64>>>()
}

/// Seed, round and position window hashed by every swap-or-not round.
struct ShuffleBuffer([u8; TOTAL_SIZE]);

impl ShuffleBuffer {
    fn new(seed: B256) -> Self {
        let mut buffer = [0u8; TOTAL_SIZE];
        buffer[..SEED_SIZE].copy_from_slice(seed.as_slice());
        Self(buffer)
    }

    fn set_round(&mut self, round: u8) {
        self.0[SEED_SIZE] = round;
    }

    fn pivot(&self, list_size: usize) -> usize {
        bytes_to_int64(&hash(&self.0[..PIVOT_VIEW_SIZE])[..8]) as usize % list_size
    }

    /// Hash of the 256 position chunk that contains ``position``.
    fn source(&mut self, position: usize) -> Vec<u8> {
        self.0[PIVOT_VIEW_SIZE..].copy_from_slice(&((position >> 8) as u32).to_le_bytes());
        hash(&self.0)
    }
}

/// Shuffle a whole list with the swap-or-not network in one pass per round.
///
/// Equivalent to calling [compute_shuffled_index] for every position, but hashes each
/// position chunk once per round instead of once per element. With `forwards == false` the
/// result satisfies `output[i] == input[compute_shuffled_index(i, len, seed)]`, which is the
/// ordering committees are sliced from.
pub fn shuffle_list(
    mut input: Vec<u64>,
    rounds: u8,
    seed: B256,
    forwards: bool,
) -> anyhow::Result<Vec<u64>> {
    let list_size = input.len();
    ensure!(list_size > 0, "Cannot shuffle an empty list");
    ensure!(
        list_size <= MAX_SHUFFLE_LIST_SIZE,
        "List of {list_size} elements exceeds the shuffle limit of {MAX_SHUFFLE_LIST_SIZE}"
    );
    if rounds == 0 {
        return Ok(input);
    }

    let mut buffer = ShuffleBuffer::new(seed);
    let mut round = if forwards { 0 } else { rounds - 1 };

    loop {
        buffer.set_round(round);
        let pivot = buffer.pivot(list_size);

        let mirror = (pivot + 1) >> 1;
        let mut source = buffer.source(pivot);
        let mut byte = source[(pivot & 0xff) >> 3];
        for i in 0..mirror {
            let j = pivot - i;
            if j & 0xff == 0xff {
                source = buffer.source(j);
            }
            if j & 0x07 == 0x07 {
                byte = source[(j & 0xff) >> 3];
            }
            if (byte >> (j & 0x07)) & 0x01 == 1 {
                input.swap(i, j);
            }
        }

        let mirror = (pivot + list_size + 1) >> 1;
        let end = list_size - 1;
        let mut source = buffer.source(end);
        let mut byte = source[(end & 0xff) >> 3];
        for (offset, i) in ((pivot + 1)..mirror).enumerate() {
            let j = end - offset;
            if j & 0xff == 0xff {
                source = buffer.source(j);
            }
            if j & 0x07 == 0x07 {
                byte = source[(j & 0xff) >> 3];
            }
            if (byte >> (j & 0x07)) & 0x01 == 1 {
                input.swap(i, j);
            }
        }

        if forwards {
            round += 1;
            if round == rounds {
                break;
            }
        } else {
            if round == 0 {
                break;
            }
            round -= 1;
        }
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;
    use rstest::rstest;

    use super::*;

    const SEED: B256 = b256!("0x4fe91d85d46b5ebb8d2e1e8eb2f8fbf2e9b3a8b5d4b0c3e1f2a7a9e0c8d1b2a3");

    #[rstest]
    #[case(0, 1)]
    #[case(4_095, 1)]
    #[case(4_096, 1)]
    #[case(8_192, 2)]
    #[case(500_000, 64)]
    #[case(u64::MAX, 64)]
    fn test_committee_count_per_slot(#[case] active_validators: u64, #[case] expected: u64) {
        assert_eq!(compute_committee_count_per_slot(active_validators), expected);
    }

    #[test]
    fn test_start_slot_overflow_is_detected() {
        assert_eq!(try_compute_start_slot_at_epoch(3), Some(96));
        assert_eq!(try_compute_start_slot_at_epoch(u64::MAX), None);
        assert_eq!(compute_epoch_at_slot(compute_start_slot_at_epoch(7) + 31), 7);
    }

    #[rstest]
    #[case(0, Some(31))]
    #[case(u64::MAX / SLOTS_PER_EPOCH, Some(u64::MAX))]
    #[case(u64::MAX / SLOTS_PER_EPOCH + 1, None)]
    fn test_end_slot_at_epoch(#[case] epoch: u64, #[case] expected: Option<u64>) {
        assert_eq!(try_compute_end_slot_at_epoch(epoch), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(33)]
    #[case(300)]
    fn test_shuffle_list_matches_shuffled_index(#[case] list_size: u64) {
        let indices: Vec<u64> = (0..list_size).map(|i| i * 3 + 1).collect();
        let shuffled = shuffle_list(indices.clone(), SHUFFLE_ROUND_COUNT, SEED, false)
            .expect("non-empty list shuffles");

        for (i, validator_index) in shuffled.iter().enumerate() {
            let source = compute_shuffled_index(i, indices.len(), SEED)
                .expect("index is within the list");
            assert_eq!(*validator_index, indices[source]);
        }
    }

    #[test]
    fn test_shuffle_list_round_trips() {
        let indices: Vec<u64> = (0..257).collect();
        let shuffled = shuffle_list(indices.clone(), SHUFFLE_ROUND_COUNT, SEED, true)
            .expect("non-empty list shuffles");
        assert_ne!(shuffled, indices);

        let unshuffled = shuffle_list(shuffled, SHUFFLE_ROUND_COUNT, SEED, false)
            .expect("non-empty list shuffles");
        assert_eq!(unshuffled, indices);
    }

    #[test]
    fn test_shuffle_rejects_bad_input() {
        assert!(shuffle_list(vec![], SHUFFLE_ROUND_COUNT, SEED, false).is_err());
        assert!(compute_shuffled_index(5, 5, SEED).is_err());
        assert!(compute_committee(&[1, 2, 3], SEED, 4, 4).is_err());
    }

    #[test]
    fn test_committees_partition_indices() {
        let indices: Vec<u64> = (0..100).collect();
        let mut members = (0..7)
            .map(|index| compute_committee(&indices, SEED, index, 7))
            .collect::<anyhow::Result<Vec<_>>>()
            .expect("committees compute")
            .concat();
        members.sort_unstable();
        assert_eq!(members, indices);
    }
}
