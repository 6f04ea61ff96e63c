//! Fixed-width 32-byte identifier types
//!
//! OnyxLedger identifies contracts, assets, and account owners by 32-byte
//! values. `Bytes32` is the plain container; `ContractId`, `AssetId`, and
//! `Address` are distinct newtypes so the compiler keeps them apart.

use std::fmt;

use crate::error::PrimitiveError;

macro_rules! fixed_bytes_type {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            /// Size in bytes
            pub const LEN: usize = 32;

            /// All-zero value
            pub const ZERO: $name = $name([0u8; 32]);

            /// Create from a byte array
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }

            /// Create from a byte slice
            pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
                if slice.len() != 32 {
                    return Err(PrimitiveError::InvalidLength {
                        expected: 32,
                        got: slice.len(),
                    });
                }
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(slice);
                Ok($name(bytes))
            }

            /// Parse from a hex string (with or without 0x prefix)
            pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes =
                    hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }

            /// Get as a byte array reference
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Check if all bytes are zero
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Convert to a hex string with 0x prefix
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes_type! {
    /// Plain 32-byte value (hashes, raw words)
    Bytes32
}

fixed_bytes_type! {
    /// Contract identifier (32 bytes)
    ContractId
}

fixed_bytes_type! {
    /// Asset identifier (32 bytes)
    AssetId
}

fixed_bytes_type! {
    /// Account owner address (32 bytes)
    Address
}

impl AssetId {
    /// The chain's base asset, used for fees
    pub const BASE: AssetId = AssetId::ZERO;
}

impl From<Bytes32> for ContractId {
    fn from(b: Bytes32) -> Self {
        ContractId(b.0)
    }
}

impl From<Bytes32> for AssetId {
    fn from(b: Bytes32) -> Self {
        AssetId(b.0)
    }
}

impl From<Bytes32> for Address {
    fn from(b: Bytes32) -> Self {
        Address(b.0)
    }
}
