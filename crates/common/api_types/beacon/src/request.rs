use serde::{Deserialize, Serialize};

/// Body of a duties request: validator indices as decimal strings, plain numbers are accepted
/// too.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorIndices(#[serde(with = "serde_utils::quoted_u64_vec")] pub Vec<u64>);

impl ValidatorIndices {
    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl From<Vec<u64>> for ValidatorIndices {
    fn from(indices: Vec<u64>) -> Self {
        Self(indices)
    }
}
