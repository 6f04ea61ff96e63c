//! Script transaction request

use onyx_primitives::{AssetId, ContractId, Gas, U256};

use crate::coin::{CoinQuantity, Resource};
use crate::input::Input;
use crate::output::Output;
use crate::{padded_len, GAS_PRICE_FACTOR, MAX_GAS_PER_TX, TX_SCRIPT_BASE_OFFSET};

/// A script transaction under construction.
///
/// The request is mutated by the invocation scope while calls are added and
/// funded; its wire serialization is owned by the ledger client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScriptTransactionRequest {
    /// Price per gas unit
    pub gas_price: u64,
    /// Gas budget for the whole transaction
    pub gas_limit: Gas,
    /// Earliest block height at which the transaction is valid
    pub maturity: u32,
    /// Script bytecode
    pub script: Vec<u8>,
    /// Call-data blob consumed by the script
    pub script_data: Vec<u8>,
    /// Transaction inputs
    pub inputs: Vec<Input>,
    /// Transaction outputs
    pub outputs: Vec<Output>,
}

impl Default for ScriptTransactionRequest {
    fn default() -> Self {
        Self {
            gas_price: 0,
            gas_limit: MAX_GAS_PER_TX,
            maturity: 0,
            script: Vec::new(),
            script_data: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
}

impl ScriptTransactionRequest {
    /// Create an empty request with the default gas limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the script-data blob inside the serialized transaction
    pub fn script_data_offset(&self) -> usize {
        TX_SCRIPT_BASE_OFFSET + padded_len(self.script.len())
    }

    /// Register one contract input/output pair.
    ///
    /// Repeated registrations of the same contract collapse to one pair.
    pub fn add_contract_input_and_output(&mut self, contract_id: ContractId) {
        let already_present = self
            .inputs
            .iter()
            .any(|input| input.contract_id() == Some(&contract_id));
        if already_present {
            return;
        }

        let input_index = self.inputs.len() as u8;
        self.inputs.push(Input::Contract { contract_id });
        self.outputs.push(Output::Contract { input_index });
    }

    /// Attach spendable resources as inputs, plus one change output per
    /// unique asset so unspent value returns to the resource owner.
    pub fn add_resource_inputs_and_outputs(&mut self, resources: &[Resource]) {
        for resource in resources {
            let owner = resource.owner();
            let asset_id = resource.asset_id();

            match resource {
                Resource::Coin(coin) => self.inputs.push(Input::Coin {
                    utxo_id: coin.utxo_id,
                    owner: coin.owner,
                    amount: coin.amount,
                    asset_id: coin.asset_id,
                }),
                Resource::Message(message) => self.inputs.push(Input::Message {
                    sender: message.sender,
                    recipient: message.recipient,
                    amount: message.amount,
                    nonce: message.nonce,
                }),
            }

            let has_change = self
                .outputs
                .iter()
                .any(|output| output.change_asset_id() == Some(&asset_id));
            if !has_change {
                self.outputs.push(Output::Change { to: owner, asset_id });
            }
        }
    }

    /// Append `count` variable outputs
    pub fn add_variable_outputs(&mut self, count: usize) {
        for _ in 0..count {
            self.outputs.push(Output::Variable);
        }
    }

    /// Deterministic client-side fee estimate in the base asset.
    ///
    /// Mirrors the node's formula: `ceil(gas_limit * gas_price / GAS_PRICE_FACTOR)`.
    pub fn calculate_fee(&self) -> CoinQuantity {
        let gas = u128::from(self.gas_limit) * u128::from(self.gas_price);
        let factor = u128::from(GAS_PRICE_FACTOR);
        let fee = gas.div_ceil(factor);
        CoinQuantity::base(U256::from(fee))
    }

    /// Contract ids currently registered as inputs
    pub fn contract_inputs(&self) -> impl Iterator<Item = &ContractId> {
        self.inputs.iter().filter_map(|input| input.contract_id())
    }
}
