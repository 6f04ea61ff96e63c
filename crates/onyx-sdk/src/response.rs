//! Invocation results
//!
//! A node answers one script execution with one receipt stream. Receipts
//! that carry return values are matched back to calls strictly by insertion
//! order, regardless of the order contracts executed on chain.

use onyx_types::{CoinQuantity, Receipt};

use crate::abi::Token;
use crate::call::CallHandle;
use crate::SdkError;

/// Decoded outcome of one dispatched scope
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// One decoded return value per call, in call insertion order
    pub values: Vec<Token>,
    /// Raw receipts, in emission order
    pub receipts: Vec<Receipt>,
    /// Gas consumed by the whole script
    pub gas_used: u64,
}

impl InvocationResult {
    pub(crate) fn build(
        handles: &[CallHandle],
        receipts: Vec<Receipt>,
    ) -> Result<Self, SdkError> {
        let values = decode_return_values(handles, &receipts)?;
        let gas_used = receipts.iter().find_map(Receipt::gas_used).unwrap_or(0);
        Ok(Self {
            values,
            receipts,
            gas_used,
        })
    }

    /// The first call's decoded value
    pub fn value(&self) -> Option<&Token> {
        self.values.first()
    }
}

/// Cost of running a prepared transaction
#[derive(Debug, Clone)]
pub struct TransactionCost {
    /// Gas the execution consumed
    pub gas_used: u64,
    /// Fee in the base asset
    pub fee: CoinQuantity,
}

fn decode_return_values(
    handles: &[CallHandle],
    receipts: &[Receipt],
) -> Result<Vec<Token>, SdkError> {
    let mut returns = receipts.iter().filter(|r| r.is_return());

    handles
        .iter()
        .map(|handle| {
            let receipt = returns.next().ok_or_else(|| {
                SdkError::Decode(format!(
                    "missing return receipt for call to {}",
                    handle.fragment.name()
                ))
            })?;
            match receipt {
                Receipt::Return { val, .. } => handle.fragment.decode_output(&val.to_be_bytes()),
                Receipt::ReturnData { data, .. } => handle.fragment.decode_output(data),
                _ => Err(SdkError::Decode(
                    "non-return receipt in return stream".to_string(),
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use onyx_primitives::ContractId;
    use onyx_types::ScriptExecutionResult;

    use crate::abi::{FunctionFragment, ParamType};
    use crate::call::CallParameters;

    use super::*;

    fn handle(name: &str, output: ParamType) -> CallHandle {
        CallHandle {
            contract_id: ContractId::ZERO,
            fragment: FunctionFragment::new(name, vec![], output),
            args: vec![],
            call_parameters: CallParameters::default(),
        }
    }

    #[test]
    fn test_word_receipt_decodes_primitive() {
        let receipts = vec![
            Receipt::Return {
                id: ContractId::ZERO,
                val: 42,
            },
            Receipt::ScriptResult {
                result: ScriptExecutionResult::Success,
                gas_used: 17,
            },
        ];

        let result =
            InvocationResult::build(&[handle("answer", ParamType::U64)], receipts).unwrap();
        assert_eq!(result.values, vec![Token::U64(42)]);
        assert_eq!(result.gas_used, 17);
        assert_eq!(result.value(), Some(&Token::U64(42)));
    }

    #[test]
    fn test_data_receipt_decodes_composite() {
        let output = ParamType::Struct {
            name: "Pair".to_string(),
            fields: vec![ParamType::Bool, ParamType::U64],
        };
        let mut data = Vec::new();
        data.extend_from_slice(&1u64.to_be_bytes());
        data.extend_from_slice(&1337u64.to_be_bytes());

        let receipts = vec![Receipt::ReturnData {
            id: ContractId::ZERO,
            data,
        }];

        let result = InvocationResult::build(&[handle("pair", output)], receipts).unwrap();
        assert_eq!(
            result.values,
            vec![Token::Struct(vec![Token::Bool(true), Token::U64(1337)])]
        );
    }

    #[test]
    fn test_returns_matched_by_insertion_order() {
        let handles = vec![handle("first", ParamType::U64), handle("second", ParamType::Bool)];
        // receipts interleave non-return noise between the two returns
        let receipts = vec![
            Receipt::Call {
                id: ContractId::ZERO,
                to: ContractId::from_bytes([2; 32]),
                amount: Default::default(),
                asset_id: Default::default(),
                gas: 0,
            },
            Receipt::Return {
                id: ContractId::from_bytes([2; 32]),
                val: 7,
            },
            Receipt::Return {
                id: ContractId::from_bytes([1; 32]),
                val: 1,
            },
        ];

        let result = InvocationResult::build(&handles, receipts).unwrap();
        assert_eq!(result.values, vec![Token::U64(7), Token::Bool(true)]);
    }

    #[test]
    fn test_missing_return_receipt_fails() {
        let handles = vec![handle("only", ParamType::U64)];
        let receipts = vec![Receipt::ScriptResult {
            result: ScriptExecutionResult::Success,
            gas_used: 0,
        }];

        assert!(matches!(
            InvocationResult::build(&handles, receipts),
            Err(SdkError::Decode(_))
        ));
    }
}
