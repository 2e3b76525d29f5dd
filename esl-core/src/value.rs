//! Primitive value codec
//!
//! Every packet field travels as ASCII hex digits. Numbers are written with a
//! fixed digit count in either byte order, text is written as UTF-16 code
//! units of four hex digits each.

use crate::error::{Error, Result};

/// Byte order of a hex encoded number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    Big,
    /// Digit pairs are reversed, counted from the right
    Little,
}

/// Widest number handled by the codec, in hex digits
pub const MAX_DIGITS: usize = 8;

/// Render `value` as exactly `digits` upper-case hex characters
///
/// Little endian output reverses the zero padded string two characters at a
/// time starting from the right, so an odd digit count keeps a lone high
/// nibble at the end: 256 in three digits is `001`.
///
/// # Examples
///
/// ```
/// use esl_core::value::{int_to_hex, Endian};
///
/// assert_eq!(int_to_hex(0x0C0D, Endian::Big, 4).unwrap(), "0C0D");
/// assert_eq!(int_to_hex(0x0C0D, Endian::Little, 4).unwrap(), "0D0C");
/// assert_eq!(int_to_hex(255, Endian::Little, 3).unwrap(), "FF0");
/// ```
pub fn int_to_hex(value: u32, endian: Endian, digits: usize) -> Result<String> {
    let hex = format!("{:0width$X}", value, width = digits);
    if hex.len() > digits {
        return Err(Error::EncodingOverflow {
            value: u64::from(value),
            digits,
        });
    }

    match endian {
        Endian::Big => Ok(hex),
        Endian::Little => {
            let mut out = String::with_capacity(hex.len());
            let mut end = hex.len();
            while end > 0 {
                let start = end.saturating_sub(2);
                out.push_str(&hex[start..end]);
                end = start;
            }
            Ok(out)
        }
    }
}

/// Parse a hex string written by [`int_to_hex`]
///
/// Little endian input is split into pairs from the left and the pairs are
/// joined in reverse order before parsing.
pub fn hex_to_int(input: &str, endian: Endian) -> Result<u32> {
    if input.is_empty() {
        return Err(Error::malformed_hex(input, "empty field"));
    }
    if input.len() > MAX_DIGITS {
        return Err(Error::malformed_hex(input, "more than 8 hex digits"));
    }
    if !input.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::malformed_hex(input, "non-hex character"));
    }

    let value = match endian {
        Endian::Big => u32::from_str_radix(input, 16),
        Endian::Little => {
            let chars: Vec<char> = input.chars().collect();
            let digits: String = chars.chunks(2).rev().flatten().collect();
            u32::from_str_radix(&digits, 16)
        }
    };

    value.map_err(|_| Error::malformed_hex(input, "not a hex number"))
}

/// Encode text as big endian UTF-16 code units, four hex digits per unit
///
/// Characters outside the Basic Multilingual Plane become a surrogate pair.
///
/// ```
/// use esl_core::value::utf8_to_utf16_hex;
///
/// assert_eq!(utf8_to_utf16_hex("A åäö B"), "0041002000E500E400F600200042");
/// ```
pub fn utf8_to_utf16_hex(text: &str) -> String {
    text.encode_utf16().map(|unit| format!("{:04X}", unit)).collect()
}

/// Decode the output of [`utf8_to_utf16_hex`]
pub fn utf16_hex_to_utf8(input: &str) -> Result<String> {
    if !input.is_ascii() {
        return Err(Error::malformed_hex(input, "non-hex character"));
    }
    if input.len() % 4 != 0 {
        return Err(Error::malformed_hex(input, "length is not a multiple of 4"));
    }

    let units = input
        .as_bytes()
        .chunks(4)
        .map(|chunk| {
            let group = std::str::from_utf8(chunk)
                .map_err(|_| Error::malformed_hex(input, "non-hex character"))?;
            let unit = hex_to_int(group, Endian::Big)?;
            Ok(unit as u16)
        })
        .collect::<Result<Vec<u16>>>()?;

    String::from_utf16(&units).map_err(|_| Error::malformed_hex(input, "unpaired UTF-16 surrogate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_int_to_hex_big() {
        assert_eq!(int_to_hex(1, Endian::Big, 4).unwrap(), "0001");
        assert_eq!(int_to_hex(1, Endian::Big, 3).unwrap(), "001");
        assert_eq!(int_to_hex(255, Endian::Big, 3).unwrap(), "0FF");
        assert_eq!(int_to_hex(256, Endian::Big, 3).unwrap(), "100");
        assert_eq!(int_to_hex(511, Endian::Big, 3).unwrap(), "1FF");
        assert_eq!(int_to_hex(20017, Endian::Big, 4).unwrap(), "4E31");
        assert_eq!(int_to_hex(4, Endian::Big, 8).unwrap(), "00000004");
        assert_eq!(int_to_hex(0x0A0B0C0D, Endian::Big, 8).unwrap(), "0A0B0C0D");
    }

    #[test]
    fn test_int_to_hex_little() {
        assert_eq!(int_to_hex(1, Endian::Little, 4).unwrap(), "0100");
        assert_eq!(int_to_hex(1, Endian::Little, 3).unwrap(), "010");
        assert_eq!(int_to_hex(255, Endian::Little, 3).unwrap(), "FF0");
        assert_eq!(int_to_hex(256, Endian::Little, 3).unwrap(), "001");
        assert_eq!(int_to_hex(511, Endian::Little, 3).unwrap(), "FF1");
        assert_eq!(int_to_hex(512, Endian::Little, 3).unwrap(), "002");
        assert_eq!(int_to_hex(20017, Endian::Little, 4).unwrap(), "314E");
        assert_eq!(int_to_hex(4, Endian::Little, 8).unwrap(), "04000000");
        assert_eq!(int_to_hex(0x0A0B0C0D, Endian::Little, 8).unwrap(), "0D0C0B0A");
    }

    #[test]
    fn test_int_to_hex_overflow() {
        let result = int_to_hex(0x1000, Endian::Big, 3);
        assert_eq!(
            result,
            Err(Error::EncodingOverflow {
                value: 0x1000,
                digits: 3
            })
        );
        assert!(int_to_hex(256, Endian::Little, 2).is_err());
    }

    #[test]
    fn test_hex_to_int_big() {
        assert_eq!(hex_to_int("001", Endian::Big).unwrap(), 1);
        assert_eq!(hex_to_int("F1", Endian::Big).unwrap(), 241);
        assert_eq!(hex_to_int("100", Endian::Big).unwrap(), 256);
        assert_eq!(hex_to_int("4E31", Endian::Big).unwrap(), 20017);
        assert_eq!(hex_to_int("0A0B0C0D", Endian::Big).unwrap(), 0x0A0B0C0D);
    }

    #[test]
    fn test_hex_to_int_little() {
        assert_eq!(hex_to_int("010", Endian::Little).unwrap(), 1);
        assert_eq!(hex_to_int("F1", Endian::Little).unwrap(), 241);
        assert_eq!(hex_to_int("001", Endian::Little).unwrap(), 256);
        assert_eq!(hex_to_int("314E", Endian::Little).unwrap(), 20017);
        assert_eq!(hex_to_int("0D0C", Endian::Little).unwrap(), 0x0C0D);
        assert_eq!(hex_to_int("0D0C0B0A", Endian::Little).unwrap(), 0x0A0B0C0D);
    }

    #[test]
    fn test_hex_to_int_malformed() {
        assert!(matches!(hex_to_int("0G", Endian::Big), Err(Error::MalformedHex { .. })));
        assert!(matches!(hex_to_int("", Endian::Big), Err(Error::MalformedHex { .. })));
        assert!(matches!(hex_to_int("+1", Endian::Big), Err(Error::MalformedHex { .. })));
        assert!(matches!(
            hex_to_int("123456789", Endian::Little),
            Err(Error::MalformedHex { .. })
        ));
    }

    #[test]
    fn test_utf8_to_utf16_hex() {
        assert_eq!(utf8_to_utf16_hex("A"), "0041");
        assert_eq!(utf8_to_utf16_hex("Yo mamma!"), "0059006F0020006D0061006D006D00610021");
        assert_eq!(utf8_to_utf16_hex("A ÅÄÖ B"), "0041002000C500C400D600200042");
        assert_eq!(utf8_to_utf16_hex("={}[]%&"), "003D007B007D005B005D00250026");
        assert_eq!(utf8_to_utf16_hex("😀"), "D83DDE00");
    }

    #[test]
    fn test_utf16_hex_to_utf8() {
        assert_eq!(utf16_hex_to_utf8("00410061").unwrap(), "Aa");
        assert_eq!(utf16_hex_to_utf8("003100320033003400350036003700380039").unwrap(), "123456789");
        assert_eq!(utf16_hex_to_utf8("0041002000E500E400F600200042").unwrap(), "A åäö B");
        assert_eq!(utf16_hex_to_utf8("D83DDE00").unwrap(), "😀");
        assert_eq!(utf16_hex_to_utf8("").unwrap(), "");
    }

    #[test]
    fn test_utf16_hex_to_utf8_malformed() {
        assert!(utf16_hex_to_utf8("004").is_err());
        assert!(utf16_hex_to_utf8("00410").is_err());
        assert!(utf16_hex_to_utf8("00Z1").is_err());
        assert!(utf16_hex_to_utf8("D83D").is_err());
    }

    proptest! {
        #[test]
        fn prop_int_hex_inverse(
            (digits, value) in (1usize..=MAX_DIGITS)
                .prop_flat_map(|d| (Just(d), 0u64..(1u64 << (4 * d)))),
            little in any::<bool>(),
        ) {
            let endian = if little { Endian::Little } else { Endian::Big };
            let value = value as u32;
            let hex = int_to_hex(value, endian, digits).unwrap();
            prop_assert_eq!(hex.len(), digits);
            prop_assert_eq!(hex_to_int(&hex, endian).unwrap(), value);
        }

        #[test]
        fn prop_int_hex_overflow(
            (digits, value) in (1usize..MAX_DIGITS)
                .prop_flat_map(|d| (Just(d), (1u64 << (4 * d))..=u64::from(u32::MAX))),
            little in any::<bool>(),
        ) {
            let endian = if little { Endian::Little } else { Endian::Big };
            let overflow = matches!(
                int_to_hex(value as u32, endian, digits),
                Err(Error::EncodingOverflow { .. })
            );
            prop_assert!(overflow);
        }

        #[test]
        fn prop_utf16_inverse(text in "\\PC*") {
            let hex = utf8_to_utf16_hex(&text);
            prop_assert_eq!(utf16_hex_to_utf8(&hex).unwrap(), text);
        }
    }
}
