//! # onyx-types
//!
//! Core transaction types for OnyxLedger.
//!
//! This crate models the script transaction a client assembles before
//! submission: spendable inputs, outputs, the script with its call-data
//! blob, and the receipts a node produces when the script runs.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod coin;
mod input;
mod output;
mod receipt;
mod transaction;

pub use coin::{Coin, CoinQuantity, MessageCoin, Resource, UtxoId};
pub use input::Input;
pub use output::Output;
pub use receipt::{Receipt, ScriptExecutionResult};
pub use transaction::ScriptTransactionRequest;

// Re-export the word size so downstream crates agree on alignment.
pub use onyx_primitives::WORD_SIZE;

/// Default (and maximum) gas limit for a single transaction
pub const MAX_GAS_PER_TX: u64 = 100_000_000;

/// Divisor applied when converting gas into a base-asset fee
pub const GAS_PRICE_FACTOR: u64 = 1_000_000_000;

/// Byte size of the serialized script-transaction header that precedes the
/// script bytes: type word, gas price, gas limit, maturity, script length,
/// script-data length, and the input/output/witness count words.
pub const TX_SCRIPT_BASE_OFFSET: usize = 112;

/// Round `len` up to the next word boundary.
pub const fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 8);
        assert_eq!(padded_len(8), 8);
        assert_eq!(padded_len(9), 16);
        assert_eq!(padded_len(32), 32);
    }
}
