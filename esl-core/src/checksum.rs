//! Barcode check characters
//!
//! Tags render barcodes from the raw payload plus a check character that the
//! sender must compute:
//! 1. Code 128 Set B: weighted sum of symbol values modulo 103
//! 2. EAN-13: alternating 1/3 weights over twelve digits modulo 10

use tracing::trace;

use crate::constants::barcode::{CODE128_MODULUS, CODE128_START_B_VALUE, EAN13_DATA_DIGITS};
use crate::error::{Error, Result};

/// First character of the Code 128 Set B alphabet
const SET_B_FIRST: char = ' ';

/// Last character of the Code 128 Set B alphabet
const SET_B_LAST: char = '~';

/// Check if `c` belongs to the 95 printable characters of Code 128 Set B
pub fn is_code128b_char(c: char) -> bool {
    (SET_B_FIRST..=SET_B_LAST).contains(&c)
}

/// Position of `c` in the Set B alphabet
fn code128b_value(c: char) -> Result<u32> {
    if is_code128b_char(c) {
        Ok(c as u32 - SET_B_FIRST as u32)
    } else {
        Err(Error::UnsupportedCharacter(c))
    }
}

/// Validate that every character of `text` is in Code 128 Set B
pub fn validate_code128b(text: &str) -> Result<()> {
    text.chars().try_for_each(|c| code128b_value(c).map(|_| ()))
}

/// Calculate the Code 128 Set B check character
///
/// # Algorithm
///
/// ```text
/// 1. sum = 104 (Start Code B)
/// 2. sum += value(char_i) * i, for 1-based position i
/// 3. check = chr(32 + sum % 103)
/// ```
///
/// Check values above 94 map past `~` into the C1 control range, which the
/// tags accept as-is.
///
/// # Examples
///
/// ```
/// use esl_core::checksum;
///
/// assert_eq!(checksum::code128b_check_char("9").unwrap(), ':');
/// assert_eq!(checksum::code128b_check_char("10").unwrap(), 'R');
/// ```
pub fn code128b_check_char(text: &str) -> Result<char> {
    let mut sum = CODE128_START_B_VALUE;
    for (position, c) in text.chars().enumerate() {
        sum += code128b_value(c)? * (position as u32 + 1);
    }

    let value = sum % CODE128_MODULUS;
    let check = char::from_u32(SET_B_FIRST as u32 + value).unwrap_or(SET_B_FIRST);

    trace!(
        text_len = text.len(),
        check = format!("0x{:02X}", check as u32),
        "Calculated Code 128 B check character"
    );

    Ok(check)
}

/// Validate that `digits` is exactly twelve ASCII digits
pub fn validate_ean13(digits: &str) -> Result<()> {
    if digits.len() != EAN13_DATA_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "EAN-13 needs exactly {} digits, the 13th is the computed check digit; got {:?}",
            EAN13_DATA_DIGITS, digits
        )));
    }
    Ok(())
}

/// Calculate the EAN-13 check digit for twelve data digits
///
/// Digits at even 0-based positions weigh 1, odd positions weigh 3. The
/// check digit brings the weighted sum up to the next multiple of ten.
///
/// # Examples
///
/// ```
/// use esl_core::checksum;
///
/// assert_eq!(checksum::ean13_check_digit("731125000941").unwrap(), '9');
/// ```
pub fn ean13_check_digit(digits: &str) -> Result<char> {
    validate_ean13(digits)?;

    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(position, b)| {
            let weight = if position % 2 == 0 { 1 } else { 3 };
            weight * u32::from(b - b'0')
        })
        .sum();

    let check = (10 - sum % 10) % 10;

    trace!(digits = digits, check = check, "Calculated EAN-13 check digit");

    Ok(char::from(b'0' + check as u8))
}
