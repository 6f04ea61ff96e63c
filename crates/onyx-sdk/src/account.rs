//! Account and resource-provider contract
//!
//! An account contributes spendable resources to a transaction. The SDK only
//! depends on the selection contract below; key management and signing live
//! outside this crate.

use async_trait::async_trait;

use onyx_primitives::{Address, AssetId, Bytes32, U256};
use onyx_types::{Coin, CoinQuantity, Resource, UtxoId};

use crate::SdkError;

/// Spendable-resource cap per account and resource kind.
///
/// Coins and messages are capped independently; holding exactly this many is
/// still spendable, one more is not.
pub const MAX_SPENDABLE_RESOURCES: usize = 9_999;

/// A funding source for script transactions
#[async_trait]
pub trait Account: Send + Sync {
    /// Address owning the account's resources
    fn address(&self) -> Address;

    /// Select resources covering every requested quantity.
    ///
    /// Fails with [`SdkError::InsufficientFunds`] when the account cannot
    /// cover a requested asset, and [`SdkError::TooManyResources`] when the
    /// account holds more spendable resources of one kind than the supported
    /// cap. Error messages are surfaced to callers verbatim.
    async fn get_resources_to_spend(
        &self,
        required: &[CoinQuantity],
    ) -> Result<Vec<Resource>, SdkError>;
}

/// Deterministic in-memory account used by tests and examples.
///
/// Selection is greedy largest-first per asset, so repeated selection over
/// the same holdings returns the same resource set.
pub struct TestAccount {
    address: Address,
    resources: Vec<Resource>,
}

impl TestAccount {
    /// Account holding the given resources
    pub fn new(address: Address, resources: Vec<Resource>) -> Self {
        Self { address, resources }
    }

    /// Account holding one coin per entry of `amounts`, all of one asset
    pub fn with_coins(address: Address, asset_id: AssetId, amounts: &[u64]) -> Self {
        let resources = amounts
            .iter()
            .map(|amount| {
                Resource::Coin(Coin {
                    utxo_id: UtxoId::new(Bytes32::from_bytes(rand::random()), 0),
                    owner: address,
                    amount: U256::from(*amount),
                    asset_id,
                })
            })
            .collect();
        Self { address, resources }
    }

    /// Resources currently held
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    fn check_resource_caps(&self) -> Result<(), SdkError> {
        let coins = self.resources.iter().filter(|r| matches!(r, Resource::Coin(_))).count();
        if coins > MAX_SPENDABLE_RESOURCES {
            return Err(SdkError::TooManyResources(format!(
                "Wallets containing more than {MAX_SPENDABLE_RESOURCES} coins exceed the current supported limit."
            )));
        }

        let messages = self
            .resources
            .iter()
            .filter(|r| matches!(r, Resource::Message(_)))
            .count();
        if messages > MAX_SPENDABLE_RESOURCES {
            return Err(SdkError::TooManyResources(format!(
                "Wallets containing more than {MAX_SPENDABLE_RESOURCES} messages exceed the current supported limit."
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Account for TestAccount {
    fn address(&self) -> Address {
        self.address
    }

    async fn get_resources_to_spend(
        &self,
        required: &[CoinQuantity],
    ) -> Result<Vec<Resource>, SdkError> {
        self.check_resource_caps()?;

        let mut taken = vec![false; self.resources.len()];
        let mut selected = Vec::new();

        for quantity in required {
            if quantity.amount.is_zero() {
                continue;
            }

            let mut candidates: Vec<usize> = self
                .resources
                .iter()
                .enumerate()
                .filter(|(i, r)| !taken[*i] && r.asset_id() == quantity.asset_id)
                .map(|(i, _)| i)
                .collect();
            candidates.sort_by(|a, b| {
                self.resources[*b]
                    .amount()
                    .cmp(&self.resources[*a].amount())
            });

            let mut covered = U256::zero();
            for index in candidates {
                if covered >= quantity.amount {
                    break;
                }
                taken[index] = true;
                covered += self.resources[index].amount();
                selected.push(self.resources[index].clone());
            }

            if covered < quantity.amount {
                return Err(SdkError::InsufficientFunds(
                    "not enough coins to fit the target".to_string(),
                ));
            }
        }

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_quantity(amount: u64) -> CoinQuantity {
        CoinQuantity::base(U256::from(amount))
    }

    #[tokio::test]
    async fn test_largest_first_selection() {
        let account =
            TestAccount::with_coins(Address::ZERO, AssetId::BASE, &[10, 500, 50]);
        let resources = account
            .get_resources_to_spend(&[base_quantity(400)])
            .await
            .unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].amount(), U256::from(500u64));
    }

    #[tokio::test]
    async fn test_selection_spans_multiple_coins() {
        let account = TestAccount::with_coins(Address::ZERO, AssetId::BASE, &[100, 100, 100]);
        let resources = account
            .get_resources_to_spend(&[base_quantity(250)])
            .await
            .unwrap();
        assert_eq!(resources.len(), 3);
    }

    #[tokio::test]
    async fn test_insufficient_funds_message_verbatim() {
        let account = TestAccount::with_coins(Address::ZERO, AssetId::BASE, &[10]);
        let err = account
            .get_resources_to_spend(&[base_quantity(100)])
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "not enough coins to fit the target");
    }

    #[tokio::test]
    async fn test_distinct_assets_selected_independently() {
        let other = AssetId::from_bytes([5; 32]);
        let mut resources = TestAccount::with_coins(Address::ZERO, AssetId::BASE, &[100])
            .resources()
            .to_vec();
        resources.extend(
            TestAccount::with_coins(Address::ZERO, other, &[200])
                .resources()
                .to_vec(),
        );
        let account = TestAccount::new(Address::ZERO, resources);

        let selected = account
            .get_resources_to_spend(&[
                base_quantity(100),
                CoinQuantity::new(other, U256::from(200u64)),
            ])
            .await
            .unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_amount_requests_are_skipped() {
        let account = TestAccount::new(Address::ZERO, Vec::new());
        let selected = account
            .get_resources_to_spend(&[base_quantity(0)])
            .await
            .unwrap();
        assert!(selected.is_empty());
    }
}
