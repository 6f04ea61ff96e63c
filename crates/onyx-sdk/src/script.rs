//! Contract call script
//!
//! Every script transaction assembled by this SDK runs the same precompiled
//! bytecode, which walks the packed call descriptors in the script-data blob
//! and issues one contract call per descriptor. The blob holds one region per
//! call, in call insertion order:
//!
//! | bytes | content |
//! |---|---|
//! | 8  | forwarded amount word |
//! | 32 | forwarded asset id |
//! | 32 | target contract id |
//! | 8  | function selector word |
//! | 8  | argument slot: inline value, or pointer to the bytes below |
//! | .. | encoded arguments, word-padded (data-pointer calls only) |

use onyx_primitives::{AssetId, U256};
use onyx_types::{padded_len, TX_SCRIPT_BASE_OFFSET, WORD_SIZE};

use crate::call::ContractCall;
use crate::SdkError;

/// Precompiled call-loop bytecode.
///
/// The script loads each descriptor out of the script-data region, issues a
/// CALL with the descriptor's amount, asset, and selector, and returns once
/// the region is exhausted. The node treats it as opaque bytes; only its
/// length matters to the client, since it fixes the script-data offset.
pub const CALL_SCRIPT: [u8; 40] = [
    0x72, 0x40, 0x00, 0x03, 0x5d, 0x45, 0x10, 0x00, //
    0x5d, 0x49, 0x10, 0x01, 0x5d, 0x4d, 0x10, 0x02, //
    0x2d, 0x41, 0x14, 0x92, 0x10, 0x45, 0x10, 0x58, //
    0x16, 0x40, 0x00, 0x50, 0x73, 0x40, 0xff, 0xf4, //
    0x24, 0x00, 0x00, 0x00, 0x47, 0x00, 0x00, 0x00, //
];

/// Byte size of the five fixed slots at the head of one call region
pub const CALL_SLOTS_SIZE: usize = WORD_SIZE + AssetId::LEN + 32 + WORD_SIZE + WORD_SIZE;

/// Offset of the script-data region inside the serialized transaction
pub fn script_data_offset() -> usize {
    TX_SCRIPT_BASE_OFFSET + padded_len(CALL_SCRIPT.len())
}

/// Size of one call's region inside the script-data blob
pub fn call_region_size(call: &ContractCall) -> usize {
    let out_of_line = if call.is_data_pointer {
        padded_len(call.data.len())
    } else {
        0
    };
    CALL_SLOTS_SIZE + out_of_line
}

/// Pack the calls into one script-data blob, in insertion order.
///
/// Each region's argument slot either holds the encoded value itself (at
/// most one word) or a pointer to the region's out-of-line bytes, expressed
/// as an absolute offset within the serialized transaction.
pub fn assemble_script_data(calls: &[ContractCall]) -> Result<Vec<u8>, SdkError> {
    let base = script_data_offset();
    let mut data = Vec::new();

    for call in calls {
        let region_start = data.len();

        let amount = call.amount.unwrap_or_default();
        if amount > U256::from(u64::MAX) {
            return Err(SdkError::Encode(
                "forwarded amount does not fit one word".to_string(),
            ));
        }
        data.extend_from_slice(&amount.low_u64().to_be_bytes());
        data.extend_from_slice(call.asset_id.unwrap_or(AssetId::BASE).as_bytes());
        data.extend_from_slice(call.contract_id.as_bytes());
        data.extend_from_slice(&call.fn_selector);

        if call.is_data_pointer {
            let pointer = (base + region_start + CALL_SLOTS_SIZE) as u64;
            data.extend_from_slice(&pointer.to_be_bytes());
            data.extend_from_slice(&call.data);
            while data.len() % WORD_SIZE != 0 {
                data.push(0);
            }
        } else {
            if call.data.len() > WORD_SIZE {
                return Err(SdkError::Encode(
                    "inline argument does not fit one word".to_string(),
                ));
            }
            let mut slot = [0u8; WORD_SIZE];
            slot[..call.data.len()].copy_from_slice(&call.data);
            data.extend_from_slice(&slot);
        }
    }

    Ok(data)
}
