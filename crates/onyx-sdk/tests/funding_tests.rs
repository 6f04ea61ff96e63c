//! Funding integration tests for onyx-sdk
//!
//! Covers funding idempotence, the spendable-resource cap boundary, and
//! verbatim propagation of provider errors through the scope.

use std::sync::Arc;

use onyx_sdk::abi::{Interface, Token};
use onyx_sdk::{
    Account, Address, AssetId, CallScope, CoinQuantity, Contract, ContractId, OnyxClient,
    SdkError, TestAccount, U256,
};

const TRANSFER_ABI: &str = r#"{
    "functions": [
        {
            "name": "deposit",
            "inputs": [{ "name": "amount", "type": "u64" }],
            "output": { "name": "", "type": "u64" }
        }
    ]
}"#;

fn vault() -> Contract {
    Contract::new(
        ContractId::from_bytes([7; 32]),
        Interface::from_json(TRANSFER_ABI).unwrap(),
    )
}

fn deposit_scope(account: Arc<TestAccount>, forward: u64) -> CallScope {
    let client = Arc::new(OnyxClient::new_mock());
    let mut scope = CallScope::new(client).with_account(account);
    scope
        .add_call(
            vault()
                .call_handle("deposit", vec![Token::U64(forward)])
                .unwrap()
                .forward(CoinQuantity::base(U256::from(forward))),
        )
        .unwrap();
    scope
}

// ==================== Funding Idempotence ====================

#[tokio::test]
async fn refunding_attaches_one_resource_set() {
    let account = Arc::new(TestAccount::with_coins(
        Address::ZERO,
        AssetId::BASE,
        &[500, 300, 200],
    ));
    let mut scope = deposit_scope(account, 600);

    scope.prepare_transaction().await.unwrap();
    let first: Vec<_> = scope
        .transaction_request()
        .inputs
        .iter()
        .filter(|i| i.is_spendable())
        .cloned()
        .collect();
    assert!(!first.is_empty());

    scope.prepare_transaction().await.unwrap();
    let second: Vec<_> = scope
        .transaction_request()
        .inputs
        .iter()
        .filter(|i| i.is_spendable())
        .cloned()
        .collect();

    assert_eq!(first, second);
    // one change output per funded asset, not one per funding round
    let change_outputs = scope
        .transaction_request()
        .outputs
        .iter()
        .filter(|o| o.is_change())
        .count();
    assert_eq!(change_outputs, 1);
}

#[tokio::test]
async fn funding_failure_leaves_scope_retryable() {
    let poor = Arc::new(TestAccount::with_coins(Address::ZERO, AssetId::BASE, &[10]));
    let mut scope = deposit_scope(poor, 600);

    let err = scope.prepare_transaction().await.unwrap_err();
    assert_eq!(err.to_string(), "not enough coins to fit the target");
    assert!(scope
        .transaction_request()
        .inputs
        .iter()
        .all(|i| !i.is_spendable()));

    // the same scope can be prepared again once funds are irrelevant:
    // dropping the forward by rebuilding the call set is the caller's move;
    // here we only assert that preparation itself is re-runnable
    let err = scope.prepare_transaction().await.unwrap_err();
    assert!(matches!(err, SdkError::InsufficientFunds(_)));
}

// ==================== Resource Cap Boundary ====================

#[tokio::test]
async fn spending_from_nine_thousand_nine_hundred_ninety_nine_coins_succeeds() {
    let amounts = vec![1u64; 9_999];
    let account = TestAccount::with_coins(Address::ZERO, AssetId::BASE, &amounts);

    let selected = account
        .get_resources_to_spend(&[CoinQuantity::base(U256::from(5_000u64))])
        .await
        .unwrap();
    assert_eq!(selected.len(), 5_000);
}

#[tokio::test]
async fn ten_thousand_coins_exceed_the_cap() {
    let amounts = vec![1u64; 10_000];
    let account = TestAccount::with_coins(Address::ZERO, AssetId::BASE, &amounts);

    let err = account
        .get_resources_to_spend(&[CoinQuantity::base(U256::from(1u64))])
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::TooManyResources(_)));
    assert_eq!(
        err.to_string(),
        "Wallets containing more than 9999 coins exceed the current supported limit."
    );
}

// ==================== Error Propagation Through Dispatch ====================

#[tokio::test]
async fn insufficient_funds_surface_through_call() {
    let poor = Arc::new(TestAccount::with_coins(Address::ZERO, AssetId::BASE, &[1]));
    let mut scope = deposit_scope(poor, 1_000);

    let err = scope.call().await.unwrap_err();
    assert!(matches!(err, SdkError::InsufficientFunds(_)));
    assert_eq!(err.to_string(), "not enough coins to fit the target");
}
