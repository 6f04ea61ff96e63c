//! Execution receipts
//!
//! A node emits one receipt stream per executed script. The client only
//! needs the variants that carry call results and gas usage back out.

use onyx_primitives::{AssetId, ContractId, Gas, U256};

/// Outcome of running a script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptExecutionResult {
    /// Script ran to completion
    Success,
    /// Script reverted
    Revert,
    /// Script panicked
    Panic,
}

/// A single execution receipt
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Receipt {
    /// A contract call was made
    Call {
        /// Calling context (zero for the script itself)
        id: ContractId,
        /// Callee contract
        to: ContractId,
        /// Forwarded amount
        amount: U256,
        /// Forwarded asset
        asset_id: AssetId,
        /// Gas available to the callee
        gas: Gas,
    },
    /// A call returned a single word
    Return {
        /// Returning contract
        id: ContractId,
        /// Returned word
        val: u64,
    },
    /// A call returned a memory region
    ReturnData {
        /// Returning contract
        id: ContractId,
        /// Returned bytes
        data: Vec<u8>,
    },
    /// A call reverted
    Revert {
        /// Reverting contract
        id: ContractId,
        /// Revert code
        ra: u64,
    },
    /// Execution panicked
    Panic {
        /// Panicking contract
        id: ContractId,
        /// Panic reason code
        reason: u64,
    },
    /// Final script status
    ScriptResult {
        /// Execution outcome
        result: ScriptExecutionResult,
        /// Total gas consumed
        gas_used: Gas,
    },
}

impl Receipt {
    /// True for receipts that carry a call's return value
    pub fn is_return(&self) -> bool {
        matches!(self, Receipt::Return { .. } | Receipt::ReturnData { .. })
    }

    /// Gas consumed, for script-result receipts
    pub fn gas_used(&self) -> Option<Gas> {
        match self {
            Receipt::ScriptResult { gas_used, .. } => Some(*gas_used),
            _ => None,
        }
    }
}
