use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use ssz::{Decode, Encode};
use ssz_derive::{Decode, Encode};

/// A DutiesResponse data struct that can be used to wrap duty data
/// used for json rpc responses
///
/// # Example
/// {
///     "dependent_root": "0xcf8e0d4e9587369b2301d0790347320302cc0943d5a1884560367e8208d920f2",
///     "execution_optimistic": false,
///     "data": [T]
/// }
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Encode, Decode)]
pub struct DutiesResponse<T: Encode + Decode> {
    pub dependent_root: B256,
    pub execution_optimistic: bool,
    pub data: Vec<T>,
}

impl<T: Serialize + Encode + Decode> DutiesResponse<T> {
    pub fn new(dependent_root: B256, execution_optimistic: bool, data: Vec<T>) -> Self {
        Self {
            dependent_root,
            execution_optimistic,
            data,
        }
    }
}
