//! # onyx-sdk
//!
//! Rust SDK for building and submitting OnyxLedger contract calls.
//!
//! ## Features
//!
//! - **ABI codec**: resolve ABI type signatures and encode/decode values
//!   against the node's word-aligned binary layout
//! - **Contract**: bind a parsed ABI to a deployed contract id and create
//!   call handles
//! - **CallScope**: aggregate one or more calls into a single funded,
//!   gas-bounded script transaction, then submit, simulate, or dry-run it
//! - **OnyxClient**: JSON-RPC client over a pluggable transport
//! - **TestAccount / MockTransport**: deterministic collaborators for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use onyx_sdk::abi::{Interface, Token};
//! use onyx_sdk::{Address, AssetId, CallScope, Contract, ContractId, OnyxClient, TestAccount};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let abi = r#"{
//!         "functions": [
//!             {
//!                 "name": "increment",
//!                 "inputs": [{ "name": "by", "type": "u64" }],
//!                 "output": { "name": "", "type": "u64" }
//!             }
//!         ]
//!     }"#;
//!     let contract = Contract::new(ContractId::ZERO, Interface::from_json(abi)?);
//!
//!     let client = Arc::new(OnyxClient::connect("http://127.0.0.1:4000"));
//!     let account = Arc::new(TestAccount::with_coins(
//!         Address::ZERO,
//!         AssetId::BASE,
//!         &[1_000_000],
//!     ));
//!
//!     let mut scope = CallScope::new(client).with_account(account);
//!     scope.add_call(contract.call_handle("increment", vec![Token::U64(1)])?)?;
//!
//!     let result = scope.call().await?;
//!     println!("returned {:?}", result.value());
//!     Ok(())
//! }
//! ```
//!
//! ## Multi-call
//!
//! Several calls can share one transaction, one script, and one funded coin
//! set. Results come back in call insertion order:
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use onyx_sdk::abi::{Interface, Token};
//! # use onyx_sdk::{CallScope, Contract, ContractId, OnyxClient};
//! # async fn demo(contract: Contract, other: Contract, client: Arc<OnyxClient>) -> Result<(), onyx_sdk::SdkError> {
//! let mut scope = CallScope::multi_call(client);
//! scope
//!     .add_call(contract.call_handle("increment", vec![Token::U64(1)])?)?
//!     .add_call(other.call_handle("increment", vec![Token::U64(2)])?)?;
//!
//! let results = scope.dry_run().await?;
//! assert_eq!(results.values.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod account;
mod call;
mod client;
mod error;
mod response;
mod scope;
pub mod script;
mod transport;

pub use account::{Account, TestAccount, MAX_SPENDABLE_RESOURCES};
pub use call::{build_contract_call, CallHandle, CallParameters, Contract, ContractCall};
pub use client::{CallResult, LedgerClient, OnyxClient, TransactionResponse};
pub use error::SdkError;
pub use response::{InvocationResult, TransactionCost};
pub use scope::{CallScope, TxParams};
pub use transport::{MockTransport, Transport};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export foundation types for convenience
pub use onyx_primitives::{Address, AssetId, Bytes32, ContractId, U256};
pub use onyx_types::{
    CoinQuantity, Input, Output, Receipt, Resource, ScriptTransactionRequest,
};
