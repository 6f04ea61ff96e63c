//! ABI type resolution, encoding, and decoding
//!
//! This module provides functionality for:
//! - Resolving raw ABI type signatures into type descriptors
//! - Encoding function arguments into the word-aligned wire layout
//! - Decoding return buffers back into values
//! - Computing function selectors
//!
//! # Example
//!
//! ```rust
//! use onyx_sdk::abi::{decode, encode, ParamType, Token};
//!
//! let params = [ParamType::Bool, ParamType::U64];
//! let args = [Token::Bool(true), Token::U64(1337)];
//!
//! let data = encode(&params, &args).unwrap();
//! assert_eq!(data.len(), 16);
//!
//! let decoded = decode(&params, &data).unwrap();
//! assert_eq!(decoded, args);
//! ```

mod decode;
mod encode;
mod fragment;
mod interface;
mod resolver;
mod types;

pub use decode::{decode, decode_token};
pub use encode::{encode, encode_arguments, EncodedValue};
pub use fragment::{function_selector, FunctionFragment};
pub use interface::{Interface, JsonAbi, JsonAbiFunction};
pub use resolver::{resolve, substitute, GenericBindings, TypeApplication};
pub use types::{ParamType, Token, VEC_DESCRIPTOR_SIZE};
