//! Contract call construction
//!
//! A [`CallHandle`] is one pending invocation: the target contract, the
//! function fragment, argument values, and per-call parameters. The scope
//! turns handles into [`ContractCall`] records, assigning each call's byte
//! offset inside the shared script-data region.

use onyx_primitives::{AssetId, ContractId, U256};
use onyx_types::CoinQuantity;

use crate::abi::{FunctionFragment, Interface, Token};
use crate::script::{script_data_offset, CALL_SLOTS_SIZE};
use crate::SdkError;

/// Per-call execution parameters
#[derive(Debug, Clone, Default)]
pub struct CallParameters {
    /// Coins forwarded into the call
    pub forward: Option<CoinQuantity>,
    /// Gas forwarded to the call, taken out of the transaction's budget
    pub gas_forwarded: Option<u64>,
}

impl CallParameters {
    /// Parameters that forward the given coins
    pub fn with_forward(forward: CoinQuantity) -> Self {
        Self {
            forward: Some(forward),
            ..Self::default()
        }
    }
}

/// A deployed contract: its id plus parsed ABI
#[derive(Debug, Clone)]
pub struct Contract {
    id: ContractId,
    interface: Interface,
}

impl Contract {
    /// Bind an interface to a deployed contract id
    pub fn new(id: ContractId, interface: Interface) -> Self {
        Self { id, interface }
    }

    /// Contract id
    pub fn id(&self) -> ContractId {
        self.id
    }

    /// Parsed ABI
    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Create a pending invocation of one of this contract's functions
    pub fn call_handle(&self, function: &str, args: Vec<Token>) -> Result<CallHandle, SdkError> {
        let fragment = self.interface.function(function)?.clone();
        Ok(CallHandle {
            contract_id: self.id,
            fragment,
            args,
            call_parameters: CallParameters::default(),
        })
    }
}

/// One pending invocation, owned by the scope that aggregates it
#[derive(Debug, Clone)]
pub struct CallHandle {
    /// Target contract
    pub contract_id: ContractId,
    /// Function being called
    pub fragment: FunctionFragment,
    /// Argument values in declaration order
    pub args: Vec<Token>,
    /// Forwarded coins and gas
    pub call_parameters: CallParameters,
}

impl CallHandle {
    /// Replace the call parameters
    pub fn call_params(mut self, params: CallParameters) -> Self {
        self.call_parameters = params;
        self
    }

    /// Forward coins into the call
    pub fn forward(mut self, quantity: CoinQuantity) -> Self {
        self.call_parameters.forward = Some(quantity);
        self
    }

    /// Forward part of the transaction's gas budget to the call
    pub fn gas_forwarded(mut self, gas: u64) -> Self {
        self.call_parameters.gas_forwarded = Some(gas);
        self
    }
}

/// One encoded call record, consumed into the shared script
#[derive(Debug, Clone)]
pub struct ContractCall {
    /// Target contract
    pub contract_id: ContractId,
    /// Function selector word
    pub fn_selector: [u8; 8],
    /// Encoded argument bytes
    pub data: Vec<u8>,
    /// True when the call's argument slot holds a pointer to `data`
    pub is_data_pointer: bool,
    /// Forwarded asset, if any
    pub asset_id: Option<AssetId>,
    /// Forwarded amount, if any
    pub amount: Option<U256>,
    /// Gas forwarded to the call, if capped
    pub gas: Option<u64>,
}

/// Build the call record for a handle whose region starts `bytes_offset`
/// bytes into the script-data blob.
///
/// Pure function: offsets are assigned sequentially by the scope, and each
/// call encodes independently once its offset accounts for all prior calls.
pub fn build_contract_call(
    handle: &CallHandle,
    bytes_offset: usize,
) -> Result<ContractCall, SdkError> {
    // Out-of-line arguments land right after the call's fixed slots, so any
    // pointers inside the encoded data must be anchored there.
    let mut encode_offset = script_data_offset() + bytes_offset;
    if handle.fragment.is_input_data_pointer() {
        encode_offset += CALL_SLOTS_SIZE;
    }

    let encoded = handle.fragment.encode_arguments(&handle.args, encode_offset)?;
    let forward = handle.call_parameters.forward.as_ref();

    Ok(ContractCall {
        contract_id: handle.contract_id,
        fn_selector: handle.fragment.selector(),
        data: encoded.bytes,
        is_data_pointer: encoded.is_data_pointer,
        asset_id: forward.map(|f| f.asset_id),
        amount: forward.map(|f| f.amount),
        gas: handle.call_parameters.gas_forwarded,
    })
}
