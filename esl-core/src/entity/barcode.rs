//! Barcode entity
//!
//! Same layout as a text entity, but the payload is decorated before it is
//! sent and the tag draws bars instead of glyphs:
//!
//! ```text
//! Code 128:  0088 | text | check char | 008A
//! EAN-13:    0088 | 12 digits | check digit | 003D | 008A
//! ```
//!
//! Only Code 128 Set B and EAN-13, in normal and double size, are supported.

use std::fmt;

use tracing::debug;

use super::{check_position, Dump, EntityCodec};
use crate::checksum;
use crate::constants::barcode::{EAN13_DATA_DIGITS, EAN13_GUARD, START_CODE, STOP_CODE};
use crate::error::{Error, Result};
use crate::layout::{fields, Field, Reader, Writer};
use crate::style::{DrawStyle, FontStyle};
use crate::value;

/// One UTF-16 code unit of decoration
const CODE_UNIT: Field = Field::big("CodeUnit", 4);

/// A Code 128 or EAN-13 barcode
///
/// `text` holds only the payload: the start code, check character and stop
/// code are added by [`encode`](EntityCodec::encode) and removed by
/// [`decode`](EntityCodec::decode).
///
/// # Examples
///
/// ```
/// use esl_core::entity::{BarcodeEntity, EntityCodec};
/// use esl_core::style::FontStyle;
///
/// let barcode = BarcodeEntity::new(1, 1, FontStyle::Barcode128, "9").unwrap();
/// assert_eq!(barcode.encode().unwrap(), "0D010001004200880039003A008A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeEntity {
    vertical: u16,
    horizontal: u16,
    draw_style: DrawStyle,
    font_style: FontStyle,
    text: String,
}

impl BarcodeEntity {
    /// Fixed fields after the data length, in bytes
    const HEADER_BYTES: usize = 5;

    /// Largest body the one byte data length can describe
    const MAX_BODY_BYTES: usize = 0xFF;

    /// Create a barcode drawn in [`DrawStyle::Normal`]
    ///
    /// # Errors
    ///
    /// - `UnsupportedFontStyle` unless the style is Code 128 or EAN-13
    /// - `UnsupportedCharacter` for Code 128 text outside Set B
    /// - `InvalidInput` for empty Code 128 text or EAN-13 text that is not
    ///   exactly twelve digits
    /// - `EncodingOverflow` if the decorated payload is too long for the one
    ///   byte length field
    pub fn new(
        vertical: u16,
        horizontal: u16,
        font_style: FontStyle,
        text: impl Into<String>,
    ) -> Result<Self> {
        let entity = Self {
            vertical,
            horizontal,
            draw_style: DrawStyle::Normal,
            font_style: font_style.normalize(),
            text: text.into(),
        };
        entity.validate()?;
        Ok(entity)
    }

    pub fn with_draw_style(mut self, draw_style: DrawStyle) -> Self {
        self.draw_style = draw_style.normalize();
        self
    }

    pub fn vertical(&self) -> u16 {
        self.vertical
    }

    pub fn horizontal(&self) -> u16 {
        self.horizontal
    }

    pub fn draw_style(&self) -> DrawStyle {
        self.draw_style
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    /// Undecorated payload
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if a font style is a barcode this entity can build
    pub fn supports(font_style: FontStyle) -> bool {
        font_style.is_code128() || font_style.is_ean13()
    }

    /// Check character appended after the payload
    pub fn check_char(&self) -> Result<char> {
        if self.font_style.is_ean13() {
            checksum::ean13_check_digit(&self.text)
        } else {
            checksum::code128b_check_char(&self.text)
        }
    }

    fn validate(&self) -> Result<()> {
        check_position(self.vertical, self.horizontal)?;

        if self.font_style.is_code128() {
            if self.text.is_empty() {
                return Err(Error::InvalidInput(
                    "Code 128 barcode needs at least one character".to_string(),
                ));
            }
            checksum::validate_code128b(&self.text)?;
        } else if self.font_style.is_ean13() {
            checksum::validate_ean13(&self.text)?;
        } else {
            return Err(Error::UnsupportedFontStyle {
                entity: Self::KIND,
                style: self.font_style,
            });
        }

        // start code, payload, check char, stop code(s)
        let trailer = if self.font_style.is_ean13() { 2 } else { 1 };
        let units = 1 + self.text.encode_utf16().count() + 1 + trailer;
        let body = Self::HEADER_BYTES + 2 * units;
        if body > Self::MAX_BODY_BYTES {
            return Err(Error::EncodingOverflow {
                value: body as u64,
                digits: fields::DATA_LENGTH.digits,
            });
        }
        Ok(())
    }

    /// Start code as hex
    fn prefix() -> Result<String> {
        CODE_UNIT.render(START_CODE)
    }

    /// Check character and stop code(s) as hex
    fn suffix(&self) -> Result<String> {
        let mut suffix = value::utf8_to_utf16_hex(self.check_char()?.encode_utf8(&mut [0; 4]));
        if self.font_style.is_ean13() {
            suffix.push_str(&CODE_UNIT.render(EAN13_GUARD)?);
        }
        suffix.push_str(&CODE_UNIT.render(STOP_CODE)?);
        Ok(suffix)
    }

    /// Split the decorated payload into text and received check character
    fn strip(font_style: FontStyle, payload: &str) -> Result<(String, char)> {
        let mut units: Vec<char> = value::utf16_hex_to_utf8(payload)?.chars().collect();

        let trailer: &[u16] = if font_style.is_ean13() {
            &[EAN13_GUARD, STOP_CODE]
        } else {
            &[STOP_CODE]
        };

        // start code, at least the check char, trailer
        if units.len() < trailer.len() + 2 {
            return Err(Error::InvalidInput(format!(
                "barcode payload {:?} is too short for its decorations",
                payload
            )));
        }
        if font_style.is_ean13() && units.len() != EAN13_DATA_DIGITS + 2 + trailer.len() {
            return Err(Error::InvalidInput(format!(
                "EAN-13 payload must be start code, 13 digits and 2 stop codes, got {:?}",
                payload
            )));
        }

        let start = units.remove(0);
        if start as u32 != u32::from(START_CODE) {
            return Err(Error::InvalidInput(format!(
                "barcode payload starts with U+{:04X} instead of the start code",
                start as u32
            )));
        }
        for &expected in trailer.iter().rev() {
            match units.pop() {
                Some(unit) if unit as u32 == u32::from(expected) => {}
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "barcode payload {:?} is missing stop code {:04X}",
                        payload, expected
                    )));
                }
            }
        }

        let received = units.pop().ok_or_else(|| {
            Error::InvalidInput("barcode payload is missing its check character".to_string())
        })?;
        Ok((units.into_iter().collect(), received))
    }
}

impl EntityCodec for BarcodeEntity {
    const KIND: &'static str = "barcode";

    fn decode(raw: &str) -> Result<Self> {
        let mut reader = Reader::framed(raw)?;
        let vertical = reader.read_u16(fields::VERTICAL)?;
        let horizontal = reader.read_u16(fields::HORIZONTAL)?;
        let draw_style = DrawStyle::from(reader.read_u8(fields::DRAW_STYLE)?);
        let font_style = FontStyle::from(reader.read_u8(fields::FONT_STYLE)?);

        if !Self::supports(font_style) {
            return Err(Error::UnsupportedFontStyle {
                entity: Self::KIND,
                style: font_style,
            });
        }

        let (text, received) = Self::strip(font_style, reader.rest())?;
        let entity = Self {
            vertical,
            horizontal,
            draw_style,
            font_style,
            text,
        };
        entity.validate()?;

        let expected = entity.check_char()?;
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        debug!(vertical, horizontal, %font_style, text = %entity.text, "Decoded barcode entity");

        Ok(entity)
    }

    fn encode(&self) -> Result<String> {
        self.validate()?;
        let mut writer = Writer::new();
        writer
            .put(fields::VERTICAL, self.vertical)?
            .put(fields::HORIZONTAL, self.horizontal)?
            .put(fields::DRAW_STYLE, self.draw_style)?
            .put(fields::FONT_STYLE, self.font_style)?
            .put_hex(&Self::prefix()?)
            .put_hex(&value::utf8_to_utf16_hex(&self.text))
            .put_hex(&self.suffix()?);
        writer.finish_framed()
    }
}

impl fmt::Display for BarcodeEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let packet = self.encode().map_err(|_| fmt::Error)?;
        let prefix = Self::prefix().map_err(|_| fmt::Error)?;
        let suffix = self.suffix().map_err(|_| fmt::Error)?;

        let mut dump = Dump::start(f, "Entity Barcode package")?;
        dump.data_length(packet.len())?;
        dump.field(fields::VERTICAL, self.vertical, self.vertical)?;
        dump.field(fields::HORIZONTAL, self.horizontal, self.horizontal)?;
        dump.field(fields::DRAW_STYLE, self.draw_style, self.draw_style.name())?;
        dump.field(fields::FONT_STYLE, self.font_style, self.font_style.name())?;
        dump.part("Prefix", &prefix, "Start code")?;
        dump.part("Text", &value::utf8_to_utf16_hex(&self.text), &self.text)?;
        dump.part("Suffix", &suffix, "Check digit and stop code")
    }
}
