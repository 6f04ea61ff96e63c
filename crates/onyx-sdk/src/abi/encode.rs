//! ABI encoding
//!
//! Values encode into word-aligned, big-endian buffers. Fixed-size data is
//! written in declaration order; vector payloads are placed out-of-line
//! after the fixed region, with their inline descriptor pointing at the
//! payload's absolute position (`byte_offset` + fixed size + prior
//! out-of-line bytes).

use onyx_primitives::Word;
use onyx_types::WORD_SIZE;

use super::types::{ParamType, Token};
use crate::SdkError;

/// An encoded value plus the fragment's static inline-vs-pointer decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedValue {
    /// Encoded bytes
    pub bytes: Vec<u8>,
    /// True when the call slot holds a pointer to these bytes instead of
    /// the value itself
    pub is_data_pointer: bool,
}

/// Encode a list of values at byte offset 0
pub fn encode(params: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, SdkError> {
    encode_arguments(params, tokens, 0)
}

/// Encode a list of argument values destined for `byte_offset` within the
/// script-data region.
pub fn encode_arguments(
    params: &[ParamType],
    tokens: &[Token],
    byte_offset: usize,
) -> Result<Vec<u8>, SdkError> {
    if params.len() != tokens.len() {
        return Err(SdkError::Encode(format!(
            "expected {} arguments, got {}",
            params.len(),
            tokens.len()
        )));
    }

    let mut encoder = Encoder::new(byte_offset);
    for (param, token) in params.iter().zip(tokens) {
        encoder.encode_token(param, token)?;
    }
    Ok(encoder.finish())
}

struct Encoder {
    byte_offset: usize,
    head: Vec<u8>,
    // (position of the pointer word in `head`, payload bytes)
    pending: Vec<(usize, Vec<u8>)>,
}

impl Encoder {
    fn new(byte_offset: usize) -> Self {
        Self {
            byte_offset,
            head: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn push_word(&mut self, value: Word) {
        self.head.extend_from_slice(&value.to_be_bytes());
    }

    fn encode_token(&mut self, param: &ParamType, token: &Token) -> Result<(), SdkError> {
        match (param, token) {
            (ParamType::U8, Token::U8(v)) => self.push_word(u64::from(*v)),
            (ParamType::U16, Token::U16(v)) => self.push_word(u64::from(*v)),
            (ParamType::U32, Token::U32(v)) => self.push_word(u64::from(*v)),
            (ParamType::U64, Token::U64(v)) => self.push_word(*v),
            (ParamType::Bool, Token::Bool(v)) => self.push_word(u64::from(*v)),
            (ParamType::B256, Token::B256(v)) => self.head.extend_from_slice(v.as_bytes()),
            (ParamType::Unit, Token::Unit) => {}
            (ParamType::StrArray(len), Token::StrArray(s)) => {
                if s.len() != *len {
                    return Err(SdkError::Encode(format!(
                        "str[{}] value has {} bytes",
                        len,
                        s.len()
                    )));
                }
                self.head.extend_from_slice(s.as_bytes());
                self.pad_head();
            }
            (ParamType::Array(elem, len), Token::Array(items)) => {
                if items.len() != *len {
                    return Err(SdkError::Encode(format!(
                        "array of length {} given {} elements",
                        len,
                        items.len()
                    )));
                }
                for item in items {
                    self.encode_token(elem, item)?;
                }
            }
            (ParamType::Struct { fields, name }, Token::Struct(values)) => {
                if values.len() != fields.len() {
                    return Err(SdkError::Encode(format!(
                        "struct {} has {} fields, got {} values",
                        name,
                        fields.len(),
                        values.len()
                    )));
                }
                for (field, value) in fields.iter().zip(values) {
                    self.encode_token(field, value)?;
                }
            }
            (ParamType::Tuple(elems), Token::Tuple(values)) => {
                if values.len() != elems.len() {
                    return Err(SdkError::Encode(format!(
                        "tuple of arity {} given {} values",
                        elems.len(),
                        values.len()
                    )));
                }
                for (elem, value) in elems.iter().zip(values) {
                    self.encode_token(elem, value)?;
                }
            }
            (ParamType::Enum { variants, name }, Token::Enum(discriminant, value)) => {
                let selected = variants.get(*discriminant as usize).ok_or_else(|| {
                    SdkError::Encode(format!(
                        "enum {} has {} variants, discriminant is {}",
                        name,
                        variants.len(),
                        discriminant
                    ))
                })?;
                self.push_word(*discriminant);
                self.encode_token(selected, value)?;
            }
            (ParamType::Vector(elem), Token::Vector(items)) => {
                if elem.is_dynamic() {
                    return Err(SdkError::Encode(
                        "vectors of dynamically sized elements are not supported".to_string(),
                    ));
                }
                let mut payload = Encoder::new(0);
                for item in items {
                    payload.encode_token(elem, item)?;
                }

                let pointer_pos = self.head.len();
                self.push_word(0); // patched in finish()
                self.push_word(items.len() as u64); // capacity
                self.push_word(items.len() as u64); // length
                self.pending.push((pointer_pos, payload.head));
            }
            (ParamType::Generic(generic_name), _) => {
                return Err(SdkError::UnresolvedGeneric(generic_name.clone()));
            }
            (param, token) => {
                return Err(SdkError::Encode(format!(
                    "value {:?} does not match type {}",
                    token,
                    param.signature()
                )));
            }
        }
        Ok(())
    }

    fn pad_head(&mut self) {
        while self.head.len() % WORD_SIZE != 0 {
            self.head.push(0);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        let fixed_len = self.head.len();
        let mut tail: Vec<u8> = Vec::new();
        for (pointer_pos, payload) in &self.pending {
            let pointer = (self.byte_offset + fixed_len + tail.len()) as u64;
            self.head[*pointer_pos..pointer_pos + WORD_SIZE]
                .copy_from_slice(&pointer.to_be_bytes());
            tail.extend_from_slice(payload);
        }
        self.head.extend_from_slice(&tail);
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_u8_word() {
        let encoded = encode(&[ParamType::U8], &[Token::U8(7)]).unwrap();
        assert_eq!(encoded, vec![0, 0, 0, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn test_encode_u64_preserves_precision() {
        let value = u64::MAX - 1;
        let encoded = encode(&[ParamType::U64], &[Token::U64(value)]).unwrap();
        assert_eq!(encoded, value.to_be_bytes().to_vec());
    }

    #[test]
    fn test_encode_bool_struct_as_two_words() {
        let param = ParamType::Struct {
            name: "Pair".to_string(),
            fields: vec![ParamType::Bool, ParamType::U64],
        };
        let token = Token::Struct(vec![Token::Bool(true), Token::U64(1337)]);

        let encoded = encode(&[param], &[token]).unwrap();
        assert_eq!(encoded.len(), 16);
        assert_eq!(encoded[7], 1);
        assert_eq!(&encoded[8..], &1337u64.to_be_bytes());
    }

    #[test]
    fn test_encode_str_pads_to_word() {
        let encoded = encode(
            &[ParamType::StrArray(4)],
            &[Token::StrArray("onyx".to_string())],
        )
        .unwrap();
        assert_eq!(encoded, b"onyx\0\0\0\0".to_vec());
    }

    #[test]
    fn test_encode_str_wrong_length() {
        let result = encode(
            &[ParamType::StrArray(4)],
            &[Token::StrArray("toolong".to_string())],
        );
        assert!(matches!(result, Err(SdkError::Encode(_))));
    }

    #[test]
    fn test_encode_enum_discriminant_plus_payload() {
        let param = ParamType::Enum {
            name: "E".to_string(),
            variants: vec![ParamType::Bool, ParamType::U64],
        };
        let token = Token::Enum(1, Box::new(Token::U64(99)));

        let encoded = encode(&[param], &[token]).unwrap();
        assert_eq!(encoded.len(), 16);
        assert_eq!(&encoded[..8], &1u64.to_be_bytes());
        assert_eq!(&encoded[8..], &99u64.to_be_bytes());
    }

    #[test]
    fn test_encode_enum_bad_discriminant() {
        let param = ParamType::Enum {
            name: "E".to_string(),
            variants: vec![ParamType::Bool],
        };
        let token = Token::Enum(5, Box::new(Token::Bool(false)));
        assert!(matches!(
            encode(&[param], &[token]),
            Err(SdkError::Encode(_))
        ));
    }

    #[test]
    fn test_encode_vector_pointer_layout() {
        let param = ParamType::Vector(Box::new(ParamType::U64));
        let token = Token::Vector(vec![Token::U64(10), Token::U64(20)]);

        let encoded = encode_arguments(&[param], &[token], 0).unwrap();
        // ptr + cap + len + two element words
        assert_eq!(encoded.len(), 40);
        assert_eq!(&encoded[..8], &24u64.to_be_bytes()); // payload right after descriptor
        assert_eq!(&encoded[8..16], &2u64.to_be_bytes());
        assert_eq!(&encoded[16..24], &2u64.to_be_bytes());
        assert_eq!(&encoded[24..32], &10u64.to_be_bytes());
        assert_eq!(&encoded[32..40], &20u64.to_be_bytes());
    }

    #[test]
    fn test_encode_vector_respects_byte_offset() {
        let param = ParamType::Vector(Box::new(ParamType::U8));
        let token = Token::Vector(vec![Token::U8(1)]);

        let encoded = encode_arguments(&[param], &[token], 1000).unwrap();
        assert_eq!(&encoded[..8], &1024u64.to_be_bytes());
    }

    #[test]
    fn test_encode_nested_vector_rejected() {
        let param = ParamType::Vector(Box::new(ParamType::Vector(Box::new(ParamType::U8))));
        let token = Token::Vector(vec![Token::Vector(vec![])]);
        assert!(matches!(
            encode(&[param], &[token]),
            Err(SdkError::Encode(_))
        ));
    }

    #[test]
    fn test_encode_wrong_arity() {
        let result = encode(&[ParamType::U8, ParamType::U8], &[Token::U8(1)]);
        assert!(matches!(result, Err(SdkError::Encode(_))));
    }

    #[test]
    fn test_encode_mismatched_token() {
        let result = encode(&[ParamType::U8], &[Token::Bool(true)]);
        assert!(matches!(result, Err(SdkError::Encode(_))));
    }

    #[test]
    fn test_encode_unbound_generic_fails() {
        let result = encode(
            &[ParamType::Generic("T".to_string())],
            &[Token::U64(1)],
        );
        assert!(matches!(result, Err(SdkError::UnresolvedGeneric(_))));
    }
}
