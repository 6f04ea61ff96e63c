//! Transaction inputs

use onyx_primitives::{Address, AssetId, ContractId, U256};

use crate::coin::UtxoId;

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// A spendable coin
    Coin {
        /// UTXO being spent
        utxo_id: UtxoId,
        /// Coin owner
        owner: Address,
        /// Coin amount
        amount: U256,
        /// Asset the coin holds
        asset_id: AssetId,
    },
    /// A spendable inter-chain message
    Message {
        /// Message sender
        sender: Address,
        /// Message recipient
        recipient: Address,
        /// Message amount (base asset)
        amount: U256,
        /// Message nonce
        nonce: u64,
    },
    /// A contract the script may call into
    Contract {
        /// Contract being referenced
        contract_id: ContractId,
    },
}

impl Input {
    /// True for spendable coin inputs
    pub fn is_coin(&self) -> bool {
        matches!(self, Input::Coin { .. })
    }

    /// True for spendable message inputs
    pub fn is_message(&self) -> bool {
        matches!(self, Input::Message { .. })
    }

    /// True for inputs attached by funding (coins and messages)
    pub fn is_spendable(&self) -> bool {
        self.is_coin() || self.is_message()
    }

    /// Contract id for contract inputs
    pub fn contract_id(&self) -> Option<&ContractId> {
        match self {
            Input::Contract { contract_id } => Some(contract_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onyx_primitives::Bytes32;

    #[test]
    fn test_input_kinds() {
        let coin = Input::Coin {
            utxo_id: UtxoId::new(Bytes32::ZERO, 0),
            owner: Address::ZERO,
            amount: U256::from(1u64),
            asset_id: AssetId::BASE,
        };
        let contract = Input::Contract {
            contract_id: ContractId::ZERO,
        };

        assert!(coin.is_coin());
        assert!(coin.is_spendable());
        assert!(!contract.is_spendable());
        assert_eq!(contract.contract_id(), Some(&ContractId::ZERO));
        assert_eq!(coin.contract_id(), None);
    }
}
