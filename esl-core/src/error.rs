//! Error types for esl-core

use crate::style::FontStyle;

/// Result type alias for esl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Numeric value does not fit in its fixed hex-digit width
    #[error("Number {value} (0x{value:X}) can't fit in {digits} hexadecimal digits")]
    EncodingOverflow {
        value: u64,
        digits: usize,
    },

    /// Hex string contains non-hex characters or has the wrong length
    #[error("Malformed hex string {input:?}: {reason}")]
    MalformedHex {
        input: String,
        reason: &'static str,
    },

    /// Declared length field disagrees with the actual packet size
    #[error("Length mismatch: length field declares {declared} hex characters, packet carries {actual}")]
    LengthMismatch {
        declared: usize,
        actual: usize,
    },

    /// Packet is shorter than its fixed header
    #[error("Packet too short: expected at least {expected} hex characters, got {actual}")]
    PacketTooShort {
        expected: usize,
        actual: usize,
    },

    /// Character outside the Code 128 Set B alphabet
    #[error("Unsupported character {0:?}: only Code 128 Set B characters are valid")]
    UnsupportedCharacter(char),

    /// Field value violates its documented constraint
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Font style tag not accepted by this entity kind
    #[error("Unsupported font style {style} for {entity} entity")]
    UnsupportedFontStyle {
        entity: &'static str,
        style: FontStyle,
    },

    /// Decoded barcode carries the wrong check character
    #[error("Checksum mismatch: expected {expected:?}, received {received:?}")]
    ChecksumMismatch {
        expected: char,
        received: char,
    },

    /// Compressed pixel plane does not expand to the declared size
    #[error("Malformed RLE data at byte {offset}: {reason}")]
    MalformedRle {
        offset: usize,
        reason: &'static str,
    },

    /// Shape error reported by the shared types
    #[error("{0}")]
    Types(#[from] esl_types::Error),
}

impl Error {
    pub(crate) fn malformed_hex(input: &str, reason: &'static str) -> Self {
        Self::MalformedHex {
            input: input.to_string(),
            reason,
        }
    }
}
