//! Text entity

use std::fmt;

use tracing::debug;

use super::{check_position, Dump, EntityCodec};
use crate::error::{Error, Result};
use crate::layout::{fields, Reader, Writer};
use crate::style::{DrawStyle, FontStyle};
use crate::value;

/// A line of text drawn in one of the tag fonts
///
/// # Packet Structure
///
/// ```text
/// DataLength  Vertical  Horizontal  DrawStyle  FontStyle  Text
/// 07          010       001         00         02         0041 (UTF-16 "A")
/// ```
///
/// # Examples
///
/// ```
/// use esl_core::entity::{EntityCodec, TextEntity};
/// use esl_core::style::FontStyle;
///
/// let text = TextEntity::new(1, 1, FontStyle::Px12, "Aa").unwrap();
/// assert_eq!(text.encode().unwrap(), "09010001000200410061");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntity {
    vertical: u16,
    horizontal: u16,
    draw_style: DrawStyle,
    font_style: FontStyle,
    text: String,
}

impl TextEntity {
    /// Fixed fields after the data length, in bytes
    const HEADER_BYTES: usize = 5;

    /// Largest body the one byte data length can describe
    const MAX_BODY_BYTES: usize = 0xFF;

    /// Create a text entity drawn in [`DrawStyle::Normal`]
    ///
    /// # Errors
    ///
    /// - `EncodingOverflow` if a coordinate exceeds three hex digits or the
    ///   text is too long for the one byte length field
    /// - `UnsupportedFontStyle` for barcode, shape and image styles
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

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if a font style draws glyphs
    ///
    /// Values missing from the style table are let through so packets from
    /// newer firmware still round-trip.
    pub fn supports(font_style: FontStyle) -> bool {
        let font_style = font_style.normalize();
        !font_style.is_known() || u8::from(font_style) < u8::from(FontStyle::BarcodeEan8)
    }

    fn validate(&self) -> Result<()> {
        check_position(self.vertical, self.horizontal)?;

        if !Self::supports(self.font_style) {
            return Err(Error::UnsupportedFontStyle {
                entity: Self::KIND,
                style: self.font_style,
            });
        }

        let body = Self::HEADER_BYTES + 2 * self.text.encode_utf16().count();
        if body > Self::MAX_BODY_BYTES {
            return Err(Error::EncodingOverflow {
                value: body as u64,
                digits: fields::DATA_LENGTH.digits,
            });
        }
        Ok(())
    }
}

impl EntityCodec for TextEntity {
    const KIND: &'static str = "text";

    fn decode(raw: &str) -> Result<Self> {
        let mut reader = Reader::framed(raw)?;
        let vertical = reader.read_u16(fields::VERTICAL)?;
        let horizontal = reader.read_u16(fields::HORIZONTAL)?;
        let draw_style = DrawStyle::from(reader.read_u8(fields::DRAW_STYLE)?);
        let font_style = FontStyle::from(reader.read_u8(fields::FONT_STYLE)?);
        let text = value::utf16_hex_to_utf8(reader.rest())?;

        debug!(vertical, horizontal, %font_style, chars = text.chars().count(), "Decoded text entity");

        let entity = Self {
            vertical,
            horizontal,
            draw_style,
            font_style,
            text,
        };
        entity.validate()?;
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
            .put_hex(&value::utf8_to_utf16_hex(&self.text));
        writer.finish_framed()
    }
}

impl fmt::Display for TextEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let packet = self.encode().map_err(|_| fmt::Error)?;
        let mut dump = Dump::start(f, "Entity Text package")?;
        dump.data_length(packet.len())?;
        dump.field(fields::VERTICAL, self.vertical, self.vertical)?;
        dump.field(fields::HORIZONTAL, self.horizontal, self.horizontal)?;
        dump.field(fields::DRAW_STYLE, self.draw_style, self.draw_style.name())?;
        dump.field(fields::FONT_STYLE, self.font_style, self.font_style.name())?;
        dump.part("Text", &value::utf8_to_utf16_hex(&self.text), &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_encode() {
        let a = TextEntity::new(1, 1, FontStyle::Px12, "A").unwrap();
        assert_eq!(a.encode().unwrap(), "0701000100020041");

        let yo = TextEntity::new(1, 1, FontStyle::Px12, "Yo mamma!").unwrap();
        assert_eq!(
            yo.encode().unwrap(),
            "1701000100020059006F0020006D0061006D006D00610021"
        );
    }

    #[test]
    fn test_text_decode() {
        let entity = TextEntity::decode("09010001000200410061").unwrap();
        assert_eq!(entity, TextEntity::new(1, 1, FontStyle::Px12, "Aa").unwrap());
    }

    #[test]
    fn test_text_raw_round_trip() {
        for raw in [
            "09010001000200410061",
            "0701000100020041",
            "1701000100020059006F0020006D0061006D006D00610021",
        ] {
            assert_eq!(TextEntity::decode(raw).unwrap().encode().unwrap(), raw);
        }
    }

    #[test]
    fn test_text_accented_round_trip() {
        let entity = TextEntity::new(300, 511, FontStyle::Px24x12, "A åäö B")
            .unwrap()
            .with_draw_style(DrawStyle::Red);
        let raw = entity.encode().unwrap();
        assert_eq!(raw, "132C11FF55200041002000E500E400F600200042");
        assert_eq!(TextEntity::decode(&raw).unwrap(), entity);
    }

    #[test]
    fn test_text_unknown_styles_preserved() {
        let raw = "0701000113990041";
        let entity = TextEntity::decode(raw).unwrap();
        assert_eq!(entity.draw_style(), DrawStyle::Unknown(0x13));
        assert_eq!(entity.font_style(), FontStyle::Unknown(0x99));
        assert_eq!(entity.encode().unwrap(), raw);
        assert!(entity.to_string().contains("13 (Unknown)"));
    }

    #[test]
    fn test_text_length_mismatch() {
        assert!(matches!(
            TextEntity::decode("0801000100020041"),
            Err(Error::LengthMismatch { declared: 16, actual: 14 })
        ));
    }

    #[test]
    fn test_text_rejects_barcode_style() {
        assert!(matches!(
            TextEntity::new(1, 1, FontStyle::Barcode128, "9"),
            Err(Error::UnsupportedFontStyle { .. })
        ));
    }

    #[test]
    fn test_text_rejects_barcode_style_behind_unknown() {
        assert!(!TextEntity::supports(FontStyle::Unknown(0x42)));
        assert!(matches!(
            TextEntity::new(1, 1, FontStyle::Unknown(0x42), "9"),
            Err(Error::UnsupportedFontStyle { style: FontStyle::Barcode128, .. })
        ));
    }

    #[test]
    fn test_text_unknown_wrapping_known_styles_round_trip() {
        let entity = TextEntity::new(1, 1, FontStyle::Unknown(0x02), "A")
            .unwrap()
            .with_draw_style(DrawStyle::Unknown(0x55));
        assert_eq!(entity.font_style(), FontStyle::Px12);
        assert_eq!(entity.draw_style(), DrawStyle::Red);
        assert_eq!(TextEntity::decode(&entity.encode().unwrap()).unwrap(), entity);
    }

    #[test]
    fn test_text_too_long() {
        let long = "x".repeat(126);
        assert!(matches!(
            TextEntity::new(1, 1, FontStyle::Px12, long),
            Err(Error::EncodingOverflow { .. })
        ));
        assert!(TextEntity::new(1, 1, FontStyle::Px12, "x".repeat(125)).is_ok());
    }

    #[test]
    fn test_text_position_overflow() {
        assert!(TextEntity::new(0x1000, 0, FontStyle::Px12, "A").is_err());
    }

    #[test]
    fn test_text_display() {
        let entity = TextEntity::new(1, 1, FontStyle::Px12, "A").unwrap();
        let dump = entity.to_string();
        assert!(dump.starts_with("Entity Text package\n"));
        assert!(dump.contains(&format!("{:<24}{:<8}{}", "Vertical", 3, "010 (1)")));
        assert!(dump.contains(&format!("{:<24}{:<8}{}", "FontStyle", 2, "02 (12px)")));
        assert!(dump.contains("0041 (A)"));
    }
}
