//! Transaction outputs

use onyx_primitives::{Address, AssetId, U256};

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Output {
    /// A coin sent to an address
    Coin {
        /// Recipient
        to: Address,
        /// Amount
        amount: U256,
        /// Asset
        asset_id: AssetId,
    },
    /// State commitment for a contract referenced by an input
    Contract {
        /// Index of the matching contract input
        input_index: u8,
    },
    /// Remaining balance of one asset returned to an address
    Change {
        /// Recipient of the change
        to: Address,
        /// Asset the change is in
        asset_id: AssetId,
    },
    /// Slot the script may fill with a coin at runtime
    Variable,
}

impl Output {
    /// True for contract outputs
    pub fn is_contract(&self) -> bool {
        matches!(self, Output::Contract { .. })
    }

    /// True for change outputs
    pub fn is_change(&self) -> bool {
        matches!(self, Output::Change { .. })
    }

    /// Asset id for change outputs
    pub fn change_asset_id(&self) -> Option<&AssetId> {
        match self {
            Output::Change { asset_id, .. } => Some(asset_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kinds() {
        let change = Output::Change {
            to: Address::ZERO,
            asset_id: AssetId::BASE,
        };
        assert!(change.is_change());
        assert_eq!(change.change_asset_id(), Some(&AssetId::BASE));
        assert!(!Output::Variable.is_change());
    }
}
