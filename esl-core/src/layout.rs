//! Field layout descriptors and the cursor that reads and writes them
//!
//! Packets are hex strings made of fixed-width numeric fields followed by an
//! optional variable payload. Each entity lists its fields as [`Field`]
//! descriptors and walks them with a [`Reader`] or [`Writer`] instead of
//! slicing offsets by hand.

use crate::error::{Error, Result};
use crate::value::{self, Endian};

/// One fixed-width numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Part name used in human readable dumps
    pub name: &'static str,

    /// Width in hex digits
    pub digits: usize,

    pub endian: Endian,
}

impl Field {
    pub const fn big(name: &'static str, digits: usize) -> Self {
        Self {
            name,
            digits,
            endian: Endian::Big,
        }
    }

    pub const fn little(name: &'static str, digits: usize) -> Self {
        Self {
            name,
            digits,
            endian: Endian::Little,
        }
    }

    /// Render `value` in this field's width and byte order
    pub fn render(&self, value: impl Into<u32>) -> Result<String> {
        value::int_to_hex(value.into(), self.endian, self.digits)
    }
}

/// Fields shared by the display entities
pub mod fields {
    use super::Field;

    /// Byte count of everything after the length field itself
    pub const DATA_LENGTH: Field = Field::big("DataLengthSegment", 2);

    /// Row of the top-left corner
    pub const VERTICAL: Field = Field::little("Vertical", 3);

    /// Column of the top-left corner
    pub const HORIZONTAL: Field = Field::big("Horizontal", 3);

    pub const DRAW_STYLE: Field = Field::big("DrawStyle", 2);
    pub const FONT_STYLE: Field = Field::big("FontStyle", 2);
}

/// Cursor over a received hex packet
#[derive(Debug)]
pub struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading `input` from the first character
    pub fn new(input: &'a str) -> Result<Self> {
        if !input.is_ascii() {
            return Err(Error::malformed_hex(input, "non-ASCII character"));
        }
        Ok(Self { input, pos: 0 })
    }

    /// Read the leading data length field and check it against the rest
    ///
    /// The length counts bytes, i.e. pairs of hex characters.
    pub fn framed(input: &'a str) -> Result<Self> {
        let mut reader = Self::new(input)?;
        let declared = reader.read(fields::DATA_LENGTH)? as usize * 2;
        let actual = reader.remaining();
        if declared != actual {
            return Err(Error::LengthMismatch { declared, actual });
        }
        Ok(reader)
    }

    /// Read the next fixed-width field
    pub fn read(&mut self, field: Field) -> Result<u32> {
        let raw = self.take(field.digits)?;
        value::hex_to_int(raw, field.endian)
    }

    pub fn read_u8(&mut self, field: Field) -> Result<u8> {
        debug_assert!(field.digits <= 2);
        Ok(self.read(field)? as u8)
    }

    pub fn read_u16(&mut self, field: Field) -> Result<u16> {
        debug_assert!(field.digits <= 4);
        Ok(self.read(field)? as u16)
    }

    /// Take the next `len` characters verbatim
    pub fn take(&mut self, len: usize) -> Result<&'a str> {
        if self.remaining() < len {
            return Err(Error::PacketTooShort {
                expected: self.pos + len,
                actual: self.input.len(),
            });
        }
        let raw = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(raw)
    }

    /// Take everything that is left
    pub fn rest(&mut self) -> &'a str {
        let raw = &self.input[self.pos..];
        self.pos = self.input.len();
        raw
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Fail if characters are left over
    pub fn finish(self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(Error::LengthMismatch {
                declared: self.pos,
                actual: self.input.len(),
            });
        }
        Ok(())
    }
}

/// Builder for an outgoing hex packet
#[derive(Debug, Default)]
pub struct Writer {
    body: String,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fixed-width field
    pub fn put(&mut self, field: Field, value: impl Into<u32>) -> Result<&mut Self> {
        let hex = field.render(value)?;
        self.body.push_str(&hex);
        Ok(self)
    }

    /// Append already encoded hex characters
    pub fn put_hex(&mut self, hex: &str) -> &mut Self {
        self.body.push_str(hex);
        self
    }

    /// Characters written so far
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Return the body unchanged
    pub fn finish(self) -> String {
        self.body
    }

    /// Prefix the body with its byte count
    pub fn finish_framed(self) -> Result<String> {
        let length = fields::DATA_LENGTH.render((self.body.len() / 2) as u32)?;
        Ok(length + &self.body)
    }
}
