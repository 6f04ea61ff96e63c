//! Function fragments
//!
//! A fragment pairs a function selector with the resolved argument and
//! return type descriptors. Fragments are immutable once constructed and
//! live as long as the interface that owns them.

use sha2::{Digest, Sha256};

use onyx_types::WORD_SIZE;

use super::decode::decode_token;
use super::encode::{encode_arguments, EncodedValue};
use super::types::{ParamType, Token};
use crate::SdkError;

/// Compute a function selector: the first four bytes of the SHA-256 hash of
/// the canonical signature, right-aligned in one zeroed word.
pub fn function_selector(signature: &str) -> [u8; 8] {
    let hash = Sha256::digest(signature.as_bytes());
    let mut selector = [0u8; 8];
    selector[4..].copy_from_slice(&hash[..4]);
    selector
}

/// A callable function described by the ABI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionFragment {
    name: String,
    signature: String,
    selector: [u8; 8],
    inputs: Vec<ParamType>,
    output: ParamType,
    is_input_data_pointer: bool,
}

impl FunctionFragment {
    /// Build a fragment from a function name and its resolved types.
    ///
    /// The inline-vs-pointer decision is made here, once, from the static
    /// type shape: arguments ride inline only when they fit a single word
    /// and carry no out-of-line data.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>, output: ParamType) -> Self {
        let name = name.into();
        let signature = format!(
            "{}({})",
            name,
            inputs
                .iter()
                .map(ParamType::signature)
                .collect::<Vec<_>>()
                .join(",")
        );
        let selector = function_selector(&signature);
        let is_input_data_pointer = compute_input_data_pointer(&inputs);

        Self {
            name,
            signature,
            selector,
            inputs,
            output,
            is_input_data_pointer,
        }
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical signature, e.g. `transfer(b256,u64)`
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Function selector word
    pub fn selector(&self) -> [u8; 8] {
        self.selector
    }

    /// Argument type descriptors in declaration order
    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    /// Return type descriptor
    pub fn output(&self) -> &ParamType {
        &self.output
    }

    /// True when the call slot carries a pointer to the encoded arguments
    /// rather than the argument word itself
    pub fn is_input_data_pointer(&self) -> bool {
        self.is_input_data_pointer
    }

    /// Encode argument values destined for `byte_offset` in the script-data
    /// region.
    ///
    /// Fails with [`SdkError::UnresolvedGeneric`] when any input still has
    /// an unbound generic, and [`SdkError::Encode`] on shape mismatches.
    pub fn encode_arguments(
        &self,
        tokens: &[Token],
        byte_offset: usize,
    ) -> Result<EncodedValue, SdkError> {
        if let Some(generic) = self.inputs.iter().find_map(ParamType::first_generic) {
            return Err(SdkError::UnresolvedGeneric(generic.to_string()));
        }

        let bytes = encode_arguments(&self.inputs, tokens, byte_offset)?;
        Ok(EncodedValue {
            bytes,
            is_data_pointer: self.is_input_data_pointer,
        })
    }

    /// Decode a return buffer against the output descriptor
    pub fn decode_output(&self, data: &[u8]) -> Result<Token, SdkError> {
        let (token, _) = decode_token(&self.output, data, 0)?;
        Ok(token)
    }
}

fn compute_input_data_pointer(inputs: &[ParamType]) -> bool {
    if inputs.iter().any(ParamType::is_dynamic) {
        return true;
    }
    let total: usize = match inputs.iter().map(ParamType::size_in_bytes).sum() {
        Ok(total) => total,
        // unbound generic: the worst case is assumed
        Err(_) => return true,
    };
    total > WORD_SIZE
}
