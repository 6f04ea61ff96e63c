//! Ledger client
//!
//! The client owns the wire conversation with an OnyxLedger node. The SDK
//! depends only on the [`LedgerClient`] contract; [`OnyxClient`] is the
//! JSON-RPC implementation over a pluggable [`Transport`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use onyx_primitives::{Bytes32, ContractId};
use onyx_types::{CoinQuantity, Receipt, ScriptTransactionRequest};

use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Receipts produced by a dry run or simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallResult {
    /// Execution receipts, in emission order
    pub receipts: Vec<Receipt>,
}

/// Result of a submitted transaction, after inclusion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Id of the included transaction
    pub tx_id: Bytes32,
    /// Execution receipts, in emission order
    pub receipts: Vec<Receipt>,
}

/// Contract with the remote ledger node
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a transaction and await its inclusion
    async fn send_transaction(
        &self,
        request: &ScriptTransactionRequest,
    ) -> Result<TransactionResponse, SdkError>;

    /// Execute without mutating state
    async fn simulate(&self, request: &ScriptTransactionRequest) -> Result<CallResult, SdkError>;

    /// Ask the node for an execution estimate; `utxo_validation` disabled
    /// lets unfunded transactions run
    async fn call(
        &self,
        request: &ScriptTransactionRequest,
        utxo_validation: bool,
    ) -> Result<CallResult, SdkError>;

    /// Node-side fee estimate for the request
    async fn calculate_fee(
        &self,
        request: &ScriptTransactionRequest,
    ) -> Result<CoinQuantity, SdkError>;

    /// Add contract dependencies the node discovers to the request, in place
    async fn estimate_tx_dependencies(
        &self,
        request: &mut ScriptTransactionRequest,
    ) -> Result<(), SdkError>;
}

/// JSON-RPC client for OnyxLedger nodes
pub struct OnyxClient {
    transport: Box<dyn Transport>,
}

impl OnyxClient {
    /// Create a client talking to a node over HTTP
    #[cfg(feature = "http")]
    pub fn connect(url: &str) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(url)),
        }
    }

    /// Create a client backed by a fresh mock transport
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        debug!(method, "rpc request");
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }
}

#[async_trait]
impl LedgerClient for OnyxClient {
    async fn send_transaction(
        &self,
        request: &ScriptTransactionRequest,
    ) -> Result<TransactionResponse, SdkError> {
        self.request("onyx_sendTransaction", vec![serde_json::to_value(request)?])
            .await
    }

    async fn simulate(&self, request: &ScriptTransactionRequest) -> Result<CallResult, SdkError> {
        self.request("onyx_simulate", vec![serde_json::to_value(request)?])
            .await
    }

    async fn call(
        &self,
        request: &ScriptTransactionRequest,
        utxo_validation: bool,
    ) -> Result<CallResult, SdkError> {
        self.request(
            "onyx_dryRun",
            vec![
                serde_json::to_value(request)?,
                json!({ "utxoValidation": utxo_validation }),
            ],
        )
        .await
    }

    async fn calculate_fee(
        &self,
        request: &ScriptTransactionRequest,
    ) -> Result<CoinQuantity, SdkError> {
        self.request("onyx_estimateFee", vec![serde_json::to_value(request)?])
            .await
    }

    async fn estimate_tx_dependencies(
        &self,
        request: &mut ScriptTransactionRequest,
    ) -> Result<(), SdkError> {
        let missing: Vec<ContractId> = self
            .request(
                "onyx_estimateTxDependencies",
                vec![serde_json::to_value(&*request)?],
            )
            .await?;

        for contract_id in missing {
            request.add_contract_input_and_output(contract_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_send_transaction() {
        let client = OnyxClient::new_mock();
        let response = client
            .send_transaction(&ScriptTransactionRequest::new())
            .await
            .unwrap();

        assert!(response.tx_id.is_zero());
        assert_eq!(response.receipts.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_dry_run() {
        let client = OnyxClient::new_mock();
        let result = client
            .call(&ScriptTransactionRequest::new(), false)
            .await
            .unwrap();
        assert_eq!(result.receipts.iter().find_map(Receipt::gas_used), Some(0));
    }

    #[tokio::test]
    async fn test_estimate_tx_dependencies_adds_contracts() {
        let transport = MockTransport::new();
        let dependency = ContractId::from_bytes([0xaa; 32]);
        transport.set_response(
            "onyx_estimateTxDependencies",
            json!([dependency.to_hex()]),
        );

        let client = OnyxClient::with_transport(transport);
        let mut request = ScriptTransactionRequest::new();
        client.estimate_tx_dependencies(&mut request).await.unwrap();

        assert_eq!(request.contract_inputs().collect::<Vec<_>>(), vec![&dependency]);
    }

    #[tokio::test]
    async fn test_calculate_fee_deserializes_quantity() {
        let transport = MockTransport::new();
        transport.set_response(
            "onyx_estimateFee",
            json!({
                "assetId": onyx_primitives::AssetId::BASE.to_hex(),
                "amount": "0x64"
            }),
        );

        let client = OnyxClient::with_transport(transport);
        let fee = client
            .calculate_fee(&ScriptTransactionRequest::new())
            .await
            .unwrap();
        assert_eq!(fee.asset_id, onyx_primitives::AssetId::BASE);
        assert_eq!(fee.amount, onyx_primitives::U256::from(100u64));
    }

    #[tokio::test]
    async fn test_rpc_error_surfaces() {
        let client = OnyxClient::with_transport(MockTransport::new());
        let result: Result<Value, _> = client.request("unknown_method", vec![]).await;
        assert!(matches!(result, Err(SdkError::Rpc { code: -32601, .. })));
    }
}
