//! ABI decoding
//!
//! Decoding mirrors encoding exactly: same field order, same word
//! alignment, same pointer rule. Vector descriptors are dereferenced
//! against the same buffer, which holds for any buffer encoded at byte
//! offset 0.

use onyx_primitives::Word;
use onyx_types::{padded_len, WORD_SIZE};

use super::types::{ParamType, Token};
use crate::SdkError;

/// Decode a list of values laid out sequentially at the start of `data`
pub fn decode(params: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let mut offset = 0;
    let mut tokens = Vec::with_capacity(params.len());

    for param in params {
        let (token, consumed) = decode_token(param, data, offset)?;
        tokens.push(token);
        offset += consumed;
    }

    Ok(tokens)
}

/// Decode a single value at `offset`, returning it with the bytes consumed
/// from the inline region.
pub fn decode_token(
    param: &ParamType,
    data: &[u8],
    offset: usize,
) -> Result<(Token, usize), SdkError> {
    match param {
        ParamType::U8 => {
            let word = read_word(data, offset)?;
            let value = u8::try_from(word)
                .map_err(|_| SdkError::Decode(format!("u8 slot holds {word}")))?;
            Ok((Token::U8(value), WORD_SIZE))
        }
        ParamType::U16 => {
            let word = read_word(data, offset)?;
            let value = u16::try_from(word)
                .map_err(|_| SdkError::Decode(format!("u16 slot holds {word}")))?;
            Ok((Token::U16(value), WORD_SIZE))
        }
        ParamType::U32 => {
            let word = read_word(data, offset)?;
            let value = u32::try_from(word)
                .map_err(|_| SdkError::Decode(format!("u32 slot holds {word}")))?;
            Ok((Token::U32(value), WORD_SIZE))
        }
        ParamType::U64 => {
            let word = read_word(data, offset)?;
            Ok((Token::U64(word), WORD_SIZE))
        }
        ParamType::Bool => {
            let word = read_word(data, offset)?;
            Ok((Token::Bool(word != 0), WORD_SIZE))
        }
        ParamType::B256 => {
            check_length(data, offset + 32)?;
            let bytes = onyx_primitives::Bytes32::from_slice(&data[offset..offset + 32])?;
            Ok((Token::B256(bytes), 32))
        }
        ParamType::Unit => Ok((Token::Unit, 0)),
        ParamType::StrArray(len) => {
            let consumed = padded_len(*len);
            check_length(data, offset + consumed)?;
            let s = std::str::from_utf8(&data[offset..offset + len])
                .map_err(|e| SdkError::Decode(format!("invalid UTF-8 in str[{len}]: {e}")))?;
            Ok((Token::StrArray(s.to_string()), consumed))
        }
        ParamType::Array(elem, len) => {
            let mut items = Vec::with_capacity(*len);
            let mut inner_offset = offset;
            for _ in 0..*len {
                let (item, consumed) = decode_token(elem, data, inner_offset)?;
                items.push(item);
                inner_offset += consumed;
            }
            Ok((Token::Array(items), inner_offset - offset))
        }
        ParamType::Struct { fields, .. } => {
            let mut values = Vec::with_capacity(fields.len());
            let mut inner_offset = offset;
            for field in fields {
                let (value, consumed) = decode_token(field, data, inner_offset)?;
                values.push(value);
                inner_offset += consumed;
            }
            Ok((Token::Struct(values), inner_offset - offset))
        }
        ParamType::Tuple(elems) => {
            let mut values = Vec::with_capacity(elems.len());
            let mut inner_offset = offset;
            for elem in elems {
                let (value, consumed) = decode_token(elem, data, inner_offset)?;
                values.push(value);
                inner_offset += consumed;
            }
            Ok((Token::Tuple(values), inner_offset - offset))
        }
        ParamType::Enum { name, variants } => {
            let discriminant = read_word(data, offset)?;
            let selected = variants.get(discriminant as usize).ok_or_else(|| {
                SdkError::InvalidEnumDiscriminant {
                    enum_name: name.clone(),
                    discriminant,
                }
            })?;
            let (value, consumed) = decode_token(selected, data, offset + WORD_SIZE)?;
            Ok((
                Token::Enum(discriminant, Box::new(value)),
                WORD_SIZE + consumed,
            ))
        }
        ParamType::Vector(elem) => {
            let pointer = read_word(data, offset)? as usize;
            let _capacity = read_word(data, offset + WORD_SIZE)?;
            let len = read_word(data, offset + 2 * WORD_SIZE)? as usize;

            let mut items = Vec::with_capacity(len);
            let mut inner_offset = pointer;
            for _ in 0..len {
                let (item, consumed) = decode_token(elem, data, inner_offset)?;
                items.push(item);
                inner_offset += consumed;
            }
            Ok((Token::Vector(items), 3 * WORD_SIZE))
        }
        ParamType::Generic(name) => Err(SdkError::UnresolvedGeneric(name.clone())),
    }
}

fn read_word(data: &[u8], offset: usize) -> Result<Word, SdkError> {
    check_length(data, offset + WORD_SIZE)?;
    let mut word = [0u8; WORD_SIZE];
    word.copy_from_slice(&data[offset..offset + WORD_SIZE]);
    Ok(u64::from_be_bytes(word))
}

fn check_length(data: &[u8], required: usize) -> Result<(), SdkError> {
    if data.len() < required {
        return Err(SdkError::Decode(format!(
            "insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode::encode;

    #[test]
    fn test_decode_u8_word() {
        let data = [0u8, 0, 0, 0, 0, 0, 0, 7];
        let tokens = decode(&[ParamType::U8], &data).unwrap();
        assert_eq!(tokens, vec![Token::U8(7)]);
    }

    #[test]
    fn test_decode_u8_out_of_range() {
        let data = 300u64.to_be_bytes();
        assert!(matches!(
            decode(&[ParamType::U8], &data),
            Err(SdkError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_struct_roundtrip() {
        let param = ParamType::Struct {
            name: "Pair".to_string(),
            fields: vec![ParamType::Bool, ParamType::U64],
        };
        let token = Token::Struct(vec![Token::Bool(true), Token::U64(1337)]);

        let encoded = encode(std::slice::from_ref(&param), std::slice::from_ref(&token)).unwrap();
        let decoded = decode(&[param], &encoded).unwrap();
        assert_eq!(decoded, vec![token]);
    }

    #[test]
    fn test_decode_enum_roundtrip() {
        let param = ParamType::Enum {
            name: "E".to_string(),
            variants: vec![ParamType::Unit, ParamType::U64],
        };
        let token = Token::Enum(1, Box::new(Token::U64(42)));

        let encoded = encode(std::slice::from_ref(&param), std::slice::from_ref(&token)).unwrap();
        let decoded = decode(&[param], &encoded).unwrap();
        assert_eq!(decoded, vec![token]);
    }

    #[test]
    fn test_decode_unknown_discriminant() {
        let param = ParamType::Enum {
            name: "E".to_string(),
            variants: vec![ParamType::Unit],
        };
        let mut data = Vec::new();
        data.extend_from_slice(&9u64.to_be_bytes());

        assert!(matches!(
            decode(&[param], &data),
            Err(SdkError::InvalidEnumDiscriminant {
                discriminant: 9,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_vector_roundtrip() {
        let param = ParamType::Vector(Box::new(ParamType::U32));
        let token = Token::Vector(vec![Token::U32(1), Token::U32(2), Token::U32(3)]);

        let encoded = encode(std::slice::from_ref(&param), std::slice::from_ref(&token)).unwrap();
        let decoded = decode(&[param], &encoded).unwrap();
        assert_eq!(decoded, vec![token]);
    }

    #[test]
    fn test_decode_str_roundtrip() {
        let param = ParamType::StrArray(5);
        let token = Token::StrArray("hello".to_string());

        let encoded = encode(std::slice::from_ref(&param), std::slice::from_ref(&token)).unwrap();
        let decoded = decode(&[param], &encoded).unwrap();
        assert_eq!(decoded, vec![token]);
    }

    #[test]
    fn test_decode_insufficient_data() {
        let data = [0u8; 4];
        assert!(matches!(
            decode(&[ParamType::U64], &data),
            Err(SdkError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_mixed_argument_list() {
        let params = vec![ParamType::U64, ParamType::Bool, ParamType::StrArray(3)];
        let tokens = vec![
            Token::U64(10),
            Token::Bool(false),
            Token::StrArray("abc".to_string()),
        ];

        let encoded = encode(&params, &tokens).unwrap();
        let decoded = decode(&params, &encoded).unwrap();
        assert_eq!(decoded, tokens);
    }
}
