//! Spendable resources and asset quantities

use onyx_primitives::{Address, AssetId, Bytes32, U256};

/// An amount of one asset.
///
/// Amounts are arbitrary-precision integers; they are aggregated with
/// integer addition only and are never represented as floats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CoinQuantity {
    /// Asset identifier
    pub asset_id: AssetId,
    /// Amount of the asset
    pub amount: U256,
}

impl CoinQuantity {
    /// Create a new quantity
    pub fn new(asset_id: AssetId, amount: U256) -> Self {
        Self { asset_id, amount }
    }

    /// Quantity of the base asset
    pub fn base(amount: U256) -> Self {
        Self {
            asset_id: AssetId::BASE,
            amount,
        }
    }
}

/// Reference to an unspent transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UtxoId {
    /// Id of the transaction that created the output
    pub tx_id: Bytes32,
    /// Index of the output within that transaction
    pub output_index: u8,
}

impl UtxoId {
    /// Create a new UTXO reference
    pub fn new(tx_id: Bytes32, output_index: u8) -> Self {
        Self {
            tx_id,
            output_index,
        }
    }
}

/// An unspent coin an account can contribute to a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Coin {
    /// UTXO being spent
    pub utxo_id: UtxoId,
    /// Owner of the coin
    pub owner: Address,
    /// Coin amount
    pub amount: U256,
    /// Asset the coin holds
    pub asset_id: AssetId,
}

/// A spendable inter-chain message carrying base-asset value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MessageCoin {
    /// Message sender
    pub sender: Address,
    /// Message recipient (the spending account)
    pub recipient: Address,
    /// Message amount, always in the base asset
    pub amount: U256,
    /// Message nonce
    pub nonce: u64,
}

/// A spendable input an account can contribute to a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    /// A coin UTXO
    Coin(Coin),
    /// A spendable message
    Message(MessageCoin),
}

impl Resource {
    /// Amount carried by the resource
    pub fn amount(&self) -> U256 {
        match self {
            Resource::Coin(coin) => coin.amount,
            Resource::Message(message) => message.amount,
        }
    }

    /// Asset carried by the resource (messages always carry the base asset)
    pub fn asset_id(&self) -> AssetId {
        match self {
            Resource::Coin(coin) => coin.asset_id,
            Resource::Message(_) => AssetId::BASE,
        }
    }

    /// Owner able to spend the resource
    pub fn owner(&self) -> Address {
        match self {
            Resource::Coin(coin) => coin.owner,
            Resource::Message(message) => message.recipient,
        }
    }
}
