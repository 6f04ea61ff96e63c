//! # onyx-primitives
//!
//! Primitive types for the OnyxLedger blockchain.
//!
//! This crate provides the fixed-width identifier types used throughout the
//! system: 32-byte contract, asset, and account identifiers, plus the
//! arbitrary-precision `U256` used for monetary amounts.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;

pub use error::PrimitiveError;
pub use ids::{Address, AssetId, Bytes32, ContractId};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// VM word type (8 bytes, big-endian on the wire)
pub type Word = u64;

/// Gas type
pub type Gas = u64;

/// Size of one VM word in bytes
pub const WORD_SIZE: usize = 8;
