//! Base-62 short code codec.
//!
//! Converts record identifiers to short alphanumeric codes and back. The
//! alphabet is `0-9`, then `a-z`, then `A-Z`; a character's position in it is
//! its digit value.
//!
//! The mapping is a bijection between non-negative `i64` values and strings
//! over the alphabet without leading zero digits, so a code never needs to be
//! persisted: it is recomputed from the id whenever it is shown.

use thiserror::Error;

/// The 62 digit characters in value order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: i64 = ALPHABET.len() as i64;

/// Errors produced when codec input violates its precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Encodes a non-negative id as a base-62 string, most significant digit first.
///
/// `0` encodes to `"0"`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidArgument`] if `id` is negative.
///
/// # Examples
///
/// ```
/// use shorturl::utils::base62::encode;
///
/// assert_eq!(encode(0).unwrap(), "0");
/// assert_eq!(encode(4538735).unwrap(), "j2Jp");
/// assert!(encode(-1).is_err());
/// ```
pub fn encode(id: i64) -> Result<String, CodecError> {
    if id < 0 {
        return Err(CodecError::InvalidArgument(format!(
            "id must be non-negative, got {id}"
        )));
    }

    if id == 0 {
        return Ok((ALPHABET[0] as char).to_string());
    }

    let mut digits = Vec::with_capacity(11);
    let mut rest = id;
    while rest > 0 {
        digits.push(ALPHABET[(rest % BASE) as usize]);
        rest /= BASE;
    }
    digits.reverse();

    Ok(digits.into_iter().map(char::from).collect())
}

/// Decodes a base-62 string back into its id.
///
/// Uses checked integer arithmetic only, so long codes either decode exactly
/// or fail; they never lose precision.
///
/// # Errors
///
/// Returns [`CodecError::InvalidArgument`] if `code` is empty, contains any
/// character outside [`ALPHABET`] (including non-ASCII), or denotes a value
/// larger than `i64::MAX`.
///
/// # Examples
///
/// ```
/// use shorturl::utils::base62::decode;
///
/// assert_eq!(decode("b").unwrap(), 11);
/// assert_eq!(decode("fdDf12").unwrap(), 13943437364);
/// assert!(decode("a!b").is_err());
/// ```
pub fn decode(code: &str) -> Result<i64, CodecError> {
    if code.is_empty() {
        return Err(CodecError::InvalidArgument(
            "code must not be empty".to_string(),
        ));
    }

    code.chars().try_fold(0i64, |acc, c| {
        let digit = digit_value(c).ok_or_else(|| {
            CodecError::InvalidArgument(format!("invalid character {c:?} in code {code:?}"))
        })?;

        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                CodecError::InvalidArgument(format!("code {code:?} is out of range"))
            })
    })
}

/// Position of `c` in [`ALPHABET`], or `None` if it is not a digit.
fn digit_value(c: char) -> Option<i64> {
    let value = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'a'..='z' => c as u32 - 'a' as u32 + 10,
        'A'..='Z' => c as u32 - 'A' as u32 + 36,
        _ => return None,
    };
    Some(value as i64)
}
