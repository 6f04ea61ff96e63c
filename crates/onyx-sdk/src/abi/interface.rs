//! ABI interface
//!
//! An interface is the parsed form of a contract's ABI document. Every
//! function is resolved into a [`FunctionFragment`] at construction, so ABI
//! shape problems surface immediately rather than at the first call.

use serde::Deserialize;

use super::fragment::FunctionFragment;
use super::resolver::{resolve, TypeApplication};
use super::types::ParamType;
use crate::SdkError;

/// Top-level ABI document
#[derive(Debug, Clone, Deserialize)]
pub struct JsonAbi {
    /// Callable functions declared by the contract
    pub functions: Vec<JsonAbiFunction>,
}

/// One function declaration in an ABI document
#[derive(Debug, Clone, Deserialize)]
pub struct JsonAbiFunction {
    /// Function name
    pub name: String,
    /// Argument types in declaration order
    #[serde(default)]
    pub inputs: Vec<TypeApplication>,
    /// Return type; functions without one return unit
    #[serde(default)]
    pub output: Option<TypeApplication>,
}

/// A contract's callable surface, with every function fully resolved
#[derive(Debug, Clone)]
pub struct Interface {
    functions: Vec<FunctionFragment>,
}

impl Interface {
    /// Parse an ABI JSON document and resolve all of its functions
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let abi: JsonAbi = serde_json::from_str(json)?;
        Self::from_abi(&abi)
    }

    /// Resolve an already-deserialized ABI document
    pub fn from_abi(abi: &JsonAbi) -> Result<Self, SdkError> {
        let functions = abi
            .functions
            .iter()
            .map(|function| {
                let inputs = function
                    .inputs
                    .iter()
                    .map(resolve)
                    .collect::<Result<Vec<_>, _>>()?;
                let output = match &function.output {
                    Some(output) => resolve(output)?,
                    None => ParamType::Unit,
                };
                Ok(FunctionFragment::new(function.name.as_str(), inputs, output))
            })
            .collect::<Result<Vec<_>, SdkError>>()?;

        Ok(Self { functions })
    }

    /// Look up a function by name
    pub fn function(&self, name: &str) -> Result<&FunctionFragment, SdkError> {
        self.functions
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| SdkError::UnknownFunction(name.to_string()))
    }

    /// All functions, in ABI declaration order
    pub fn functions(&self) -> &[FunctionFragment] {
        &self.functions
    }
}
