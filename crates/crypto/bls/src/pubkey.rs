use std::{fmt, str::FromStr};

use alloy_primitives::{FixedBytes, hex};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

use crate::errors::BLSError;

pub const PUBLIC_KEY_BYTES_LEN: usize = 48;

/// Compressed BLS12-381 public key bytes as they appear in the validator registry.
///
/// The all-zero key is what a state hands back for an index it does not know, so
/// [PubKey::is_zero] doubles as an "unset" check.
#[derive(
    Debug, PartialEq, Clone, Encode, Decode, Serialize, Deserialize, Default, Eq, Hash,
)]
#[serde(transparent)]
#[ssz(struct_behaviour = "transparent")]
pub struct PubKey {
    pub inner: FixedBytes<PUBLIC_KEY_BYTES_LEN>,
}

impl PubKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BLSError> {
        if bytes.len() != PUBLIC_KEY_BYTES_LEN {
            return Err(BLSError::InvalidByteLength {
                expected: PUBLIC_KEY_BYTES_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            inner: FixedBytes::from_slice(bytes),
        })
    }

    pub fn to_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }
}

impl From<[u8; PUBLIC_KEY_BYTES_LEN]> for PubKey {
    fn from(bytes: [u8; PUBLIC_KEY_BYTES_LEN]) -> Self {
        Self {
            inner: FixedBytes::from(bytes),
        }
    }
}

impl FromStr for PubKey {
    type Err = BLSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(clean_str).map_err(|_| BLSError::InvalidHexString)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pubkey_is_zero() {
        assert!(PubKey::default().is_zero());
        assert!(!PubKey::from([7u8; PUBLIC_KEY_BYTES_LEN]).is_zero());
    }

    #[test]
    fn test_from_str_rejects_wrong_length() {
        assert_eq!(
            PubKey::from_str("0xdeadbeef"),
            Err(BLSError::InvalidByteLength {
                expected: PUBLIC_KEY_BYTES_LEN,
                actual: 4,
            })
        );
        assert_eq!(PubKey::from_str("0xzz"), Err(BLSError::InvalidHexString));
    }

    #[test]
    fn test_json_is_prefixed_hex() {
        let pubkey = PubKey::from([0xab; PUBLIC_KEY_BYTES_LEN]);
        let json = serde_json::to_string(&pubkey).expect("pubkey serializes");
        assert_eq!(json, format!("\"{pubkey}\""));
        assert!(json.starts_with("\"0xabab"));

        let decoded: PubKey = serde_json::from_str(&json).expect("pubkey deserializes");
        assert_eq!(decoded, pubkey);
    }
}
