//! Invocation scope and execution dispatch
//!
//! A scope aggregates pending calls into one script transaction. Every
//! structural mutation re-runs script assembly and coin accounting in full,
//! so the gas check and funding always see the current call set; nothing is
//! cached across mutations.
//!
//! Preparation is strictly ordered: rebuild script, rebuild required coins,
//! check the gas budget, then fund. Funding must see the final coin totals,
//! and the gas check must reject a doomed transaction before any resources
//! are committed to it.

use std::sync::Arc;

use tracing::debug;

use onyx_primitives::ContractId;
use onyx_types::{CoinQuantity, Receipt, ScriptTransactionRequest};

use crate::account::Account;
use crate::call::{build_contract_call, CallHandle, ContractCall};
use crate::client::LedgerClient;
use crate::response::{InvocationResult, TransactionCost};
use crate::script::{assemble_script_data, call_region_size, CALL_SCRIPT};
use crate::SdkError;

/// Transaction-level parameters
#[derive(Debug, Clone, Default)]
pub struct TxParams {
    /// Price per gas unit; unchanged when absent
    pub gas_price: Option<u64>,
    /// Gas budget for the whole transaction; unchanged when absent
    pub gas_limit: Option<u64>,
    /// Variable outputs to append for coins minted at runtime
    pub variable_outputs: usize,
}

/// Aggregates calls into one funded, gas-bounded script transaction.
///
/// A scope without a bound account is read-only: it can be dry-run but not
/// submitted, and funding is skipped entirely.
pub struct CallScope {
    client: Arc<dyn LedgerClient>,
    account: Option<Arc<dyn Account>>,
    handles: Vec<CallHandle>,
    extra_contracts: Vec<ContractId>,
    request: ScriptTransactionRequest,
    required_coins: Vec<CoinQuantity>,
    is_multi_call: bool,
}

impl CallScope {
    /// Scope for a single call
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        Self {
            client,
            account: None,
            handles: Vec::new(),
            extra_contracts: Vec::new(),
            request: ScriptTransactionRequest::new(),
            required_coins: Vec::new(),
            is_multi_call: false,
        }
    }

    /// Scope bundling several calls into one atomic transaction
    pub fn multi_call(client: Arc<dyn LedgerClient>) -> Self {
        Self {
            is_multi_call: true,
            ..Self::new(client)
        }
    }

    /// Bind the funding and submitting account
    pub fn with_account(mut self, account: Arc<dyn Account>) -> Self {
        self.account = Some(account);
        self
    }

    /// True when the scope bundles several calls
    pub fn is_multi_call(&self) -> bool {
        self.is_multi_call
    }

    /// The transaction request in its current state
    pub fn transaction_request(&self) -> &ScriptTransactionRequest {
        &self.request
    }

    /// Required coins as of the last recomputation
    pub fn required_coins(&self) -> &[CoinQuantity] {
        &self.required_coins
    }

    /// Append one call
    pub fn add_call(&mut self, handle: CallHandle) -> Result<&mut Self, SdkError> {
        self.add_calls([handle])
    }

    /// Append several calls in order
    pub fn add_calls(
        &mut self,
        handles: impl IntoIterator<Item = CallHandle>,
    ) -> Result<&mut Self, SdkError> {
        self.handles.extend(handles);
        self.update_script_request()?;
        self.update_required_coins()?;
        Ok(self)
    }

    /// Apply transaction-level parameters
    pub fn tx_params(&mut self, params: TxParams) -> Result<&mut Self, SdkError> {
        if let Some(gas_limit) = params.gas_limit {
            self.request.gas_limit = gas_limit;
        }
        if let Some(gas_price) = params.gas_price {
            self.request.gas_price = gas_price;
        }
        self.request.add_variable_outputs(params.variable_outputs);

        self.update_script_request()?;
        self.update_required_coins()?;
        Ok(self)
    }

    /// Register extra contracts the script may reach transitively
    pub fn add_contracts(&mut self, contracts: &[ContractId]) -> Result<&mut Self, SdkError> {
        self.extra_contracts.extend_from_slice(contracts);
        self.update_script_request()?;
        self.update_required_coins()?;
        Ok(self)
    }

    /// Build the call records, assigning byte offsets sequentially
    fn contract_calls(&self) -> Result<Vec<ContractCall>, SdkError> {
        let mut calls = Vec::with_capacity(self.handles.len());
        let mut bytes_offset = 0;
        for handle in &self.handles {
            let call = build_contract_call(handle, bytes_offset)?;
            bytes_offset += call_region_size(&call);
            calls.push(call);
        }
        Ok(calls)
    }

    /// Install the shared script and register one contract input/output per
    /// unique contract.
    ///
    /// Spendable inputs attached by an earlier funding round are stripped
    /// first, so contract inputs always precede coin inputs and their
    /// indices stay stable across re-preparation.
    fn update_script_request(&mut self) -> Result<(), SdkError> {
        self.request.inputs.retain(|input| !input.is_spendable());

        let calls = self.contract_calls()?;
        for call in &calls {
            self.request.add_contract_input_and_output(call.contract_id);
        }
        for contract_id in &self.extra_contracts {
            self.request.add_contract_input_and_output(*contract_id);
        }

        self.request.script = CALL_SCRIPT.to_vec();
        self.request.script_data = assemble_script_data(&calls)?;
        Ok(())
    }

    /// Coins the transaction needs: forwarded amounts per asset plus the
    /// request's own fee estimate, aggregated by integer addition in
    /// first-seen asset order. Zero-amount entries are dropped.
    pub fn get_required_coins(&self) -> Result<Vec<CoinQuantity>, SdkError> {
        let calls = self.contract_calls()?;
        let forwarded = calls.iter().filter_map(|call| match (call.asset_id, call.amount) {
            (Some(asset_id), Some(amount)) => Some(CoinQuantity::new(asset_id, amount)),
            _ => None,
        });

        let mut required: Vec<CoinQuantity> = Vec::new();
        for quantity in forwarded.chain(std::iter::once(self.request.calculate_fee())) {
            if quantity.amount.is_zero() {
                continue;
            }
            match required
                .iter_mut()
                .find(|existing| existing.asset_id == quantity.asset_id)
            {
                Some(existing) => existing.amount += quantity.amount,
                None => required.push(quantity),
            }
        }
        Ok(required)
    }

    fn update_required_coins(&mut self) -> Result<(), SdkError> {
        self.required_coins = self.get_required_coins()?;
        Ok(())
    }

    /// Reject the transaction locally when the calls' summed forwarded gas
    /// exceeds the transaction gas limit. Never deferred to the node.
    pub fn check_gas_limit_total(&self) -> Result<(), SdkError> {
        let forwarded: u128 = self
            .handles
            .iter()
            .filter_map(|handle| handle.call_parameters.gas_forwarded)
            .map(u128::from)
            .sum();
        if forwarded > u128::from(self.request.gas_limit) {
            return Err(SdkError::GasLimitExceeded);
        }
        Ok(())
    }

    /// Ask the bound account for resources covering the required coins and
    /// attach them.
    ///
    /// Previously attached spendable inputs are stripped first, so funding
    /// twice in a row attaches one resource set, not two.
    pub async fn fund_with_required_coins(&mut self) -> Result<(), SdkError> {
        self.request.inputs.retain(|input| !input.is_spendable());

        if let Some(account) = &self.account {
            let resources = account.get_resources_to_spend(&self.required_coins).await?;
            debug!(resources = resources.len(), "funding transaction");
            self.request.add_resource_inputs_and_outputs(&resources);
        }
        Ok(())
    }

    /// Rebuild script, rebuild required coins, check the gas budget, then
    /// fund (only when an account is bound).
    pub async fn prepare_transaction(&mut self) -> Result<(), SdkError> {
        self.update_script_request()?;
        self.update_required_coins()?;
        self.check_gas_limit_total()?;
        debug!(
            calls = self.handles.len(),
            assets = self.required_coins.len(),
            "transaction prepared"
        );

        if self.account.is_some() {
            self.fund_with_required_coins().await?;
        }
        Ok(())
    }

    /// Prepare and expose the transaction request
    pub async fn get_transaction_request(
        &mut self,
    ) -> Result<ScriptTransactionRequest, SdkError> {
        self.prepare_transaction().await?;
        Ok(self.request.clone())
    }

    /// Submit the transaction and decode each call's return value.
    ///
    /// Requires a bound account. Each invocation prepares from scratch, so a
    /// built scope can be dispatched repeatedly and every submission is
    /// independent.
    pub async fn call(&mut self) -> Result<InvocationResult, SdkError> {
        if self.account.is_none() {
            return Err(SdkError::MissingAccount);
        }

        let mut request = self.get_transaction_request().await?;
        self.client.estimate_tx_dependencies(&mut request).await?;
        debug!(calls = self.handles.len(), "submitting script transaction");
        let response = self.client.send_transaction(&request).await?;

        InvocationResult::build(&self.handles, response.receipts)
    }

    /// Execute without mutating chain state; requires a bound account
    pub async fn simulate(&mut self) -> Result<InvocationResult, SdkError> {
        if self.account.is_none() {
            return Err(SdkError::MissingAccount);
        }

        let request = self.get_transaction_request().await?;
        let result = self.client.simulate(&request).await?;
        InvocationResult::build(&self.handles, result.receipts)
    }

    /// Ask the node for an execution estimate with UTXO validation disabled.
    ///
    /// Works on read-only scopes; funding is skipped when no account is
    /// bound.
    pub async fn dry_run(&mut self) -> Result<InvocationResult, SdkError> {
        let request = self.get_transaction_request().await?;
        let result = self.client.call(&request, false).await?;
        InvocationResult::build(&self.handles, result.receipts)
    }

    /// Alias for [`CallScope::dry_run`], for read-style call sites
    pub async fn get(&mut self) -> Result<InvocationResult, SdkError> {
        self.dry_run().await
    }

    /// Dry-run the prepared request and report its cost
    pub async fn transaction_cost(&mut self) -> Result<TransactionCost, SdkError> {
        let request = self.get_transaction_request().await?;
        let result = self.client.call(&request, false).await?;
        let gas_used = result.receipts.iter().find_map(Receipt::gas_used).unwrap_or(0);

        Ok(TransactionCost {
            gas_used,
            fee: request.calculate_fee(),
        })
    }
}
