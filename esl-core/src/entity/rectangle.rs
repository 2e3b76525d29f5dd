//! Rectangle entity

use std::fmt;

use tracing::debug;

use super::{check_position, Dump, EntityCodec};
use crate::error::{Error, Result};
use crate::layout::{fields, Field, Reader, Writer};
use crate::style::{DrawStyle, FontStyle};

const HEIGHT: Field = Field::big("Height", 4);
const WIDTH: Field = Field::big("Width", 4);
const RESERVED: Field = Field::big("Reserved", 4);

/// A filled rectangle
///
/// # Packet Structure
///
/// ```text
/// DataLength  Vertical  Horizontal  FontStyle  DrawStyle  Height  Width  Reserved
/// 0B          010       001         64         00         0032    0032   0001
/// ```
///
/// The font style always reads `64` and comes before the draw style. The
/// meaning of the trailing word is undocumented; it is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectangleEntity {
    vertical: u16,
    horizontal: u16,
    draw_style: DrawStyle,
    height: u16,
    width: u16,
    reserved: u16,
}

impl RectangleEntity {
    /// Characters after the data length field
    const BODY_LEN: usize = 22;

    pub fn new(vertical: u16, horizontal: u16, height: u16, width: u16) -> Result<Self> {
        check_position(vertical, horizontal)?;
        Ok(Self {
            vertical,
            horizontal,
            draw_style: DrawStyle::Normal,
            height,
            width,
            reserved: 0,
        })
    }

    pub fn with_draw_style(mut self, draw_style: DrawStyle) -> Self {
        self.draw_style = draw_style.normalize();
        self
    }

    pub fn with_reserved(mut self, reserved: u16) -> Self {
        self.reserved = reserved;
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
        FontStyle::Rectangle
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Trailing word, carried verbatim
    pub fn reserved(&self) -> u16 {
        self.reserved
    }
}

impl EntityCodec for RectangleEntity {
    const KIND: &'static str = "rectangle";

    fn decode(raw: &str) -> Result<Self> {
        let mut reader = Reader::framed(raw)?;
        if reader.remaining() != Self::BODY_LEN {
            return Err(Error::LengthMismatch {
                declared: Self::BODY_LEN,
                actual: reader.remaining(),
            });
        }

        let vertical = reader.read_u16(fields::VERTICAL)?;
        let horizontal = reader.read_u16(fields::HORIZONTAL)?;
        let font_style = FontStyle::from(reader.read_u8(fields::FONT_STYLE)?);
        if font_style != FontStyle::Rectangle {
            return Err(Error::UnsupportedFontStyle {
                entity: Self::KIND,
                style: font_style,
            });
        }

        let entity = Self {
            vertical,
            horizontal,
            draw_style: DrawStyle::from(reader.read_u8(fields::DRAW_STYLE)?),
            height: reader.read_u16(HEIGHT)?,
            width: reader.read_u16(WIDTH)?,
            reserved: reader.read_u16(RESERVED)?,
        };
        reader.finish()?;

        debug!(vertical, horizontal, height = entity.height, width = entity.width, "Decoded rectangle entity");

        Ok(entity)
    }

    fn encode(&self) -> Result<String> {
        check_position(self.vertical, self.horizontal)?;
        let mut writer = Writer::new();
        writer
            .put(fields::VERTICAL, self.vertical)?
            .put(fields::HORIZONTAL, self.horizontal)?
            .put(fields::FONT_STYLE, FontStyle::Rectangle)?
            .put(fields::DRAW_STYLE, self.draw_style)?
            .put(HEIGHT, self.height)?
            .put(WIDTH, self.width)?
            .put(RESERVED, self.reserved)?;
        writer.finish_framed()
    }
}

impl fmt::Display for RectangleEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dump = Dump::start(f, "Entity Rectangle package")?;
        dump.data_length(fields::DATA_LENGTH.digits + Self::BODY_LEN)?;
        dump.field(fields::VERTICAL, self.vertical, self.vertical)?;
        dump.field(fields::HORIZONTAL, self.horizontal, self.horizontal)?;
        dump.field(fields::FONT_STYLE, FontStyle::Rectangle, FontStyle::Rectangle.name())?;
        dump.field(fields::DRAW_STYLE, self.draw_style, self.draw_style.name())?;
        dump.field(HEIGHT, self.height, format!("{} px", self.height))?;
        dump.field(WIDTH, self.width, format!("{} px", self.width))?;
        dump.field(RESERVED, self.reserved, "meaning unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RAW: &str = "0B0100016400003200320001";

    #[test]
    fn test_rectangle_encode() {
        let entity = RectangleEntity::new(1, 1, 50, 50).unwrap().with_reserved(1);
        assert_eq!(entity.encode().unwrap(), RAW);
    }

    #[test]
    fn test_rectangle_decode() {
        let entity = RectangleEntity::decode(RAW).unwrap();
        assert_eq!(entity.height(), 50);
        assert_eq!(entity.width(), 50);
        assert_eq!(entity.reserved(), 1);
        assert_eq!(entity.encode().unwrap(), RAW);
    }

    #[test]
    fn test_rectangle_value_round_trip() {
        let entity = RectangleEntity::new(511, 2, 0x1234, 0xFFFF)
            .unwrap()
            .with_draw_style(DrawStyle::RedInverted)
            .with_reserved(0xBEEF);
        assert_eq!(RectangleEntity::decode(&entity.encode().unwrap()).unwrap(), entity);
    }

    #[test]
    fn test_rectangle_unknown_wrapping_known_draw_style() {
        let entity = RectangleEntity::new(1, 1, 50, 50)
            .unwrap()
            .with_draw_style(DrawStyle::Unknown(0xAA));
        assert_eq!(entity.draw_style(), DrawStyle::RedInverted);
        assert_eq!(RectangleEntity::decode(&entity.encode().unwrap()).unwrap(), entity);
    }

    #[test]
    fn test_rectangle_wrong_font_style() {
        assert!(matches!(
            RectangleEntity::decode("0B0100016300003200320001"),
            Err(Error::UnsupportedFontStyle { .. })
        ));
    }

    #[test]
    fn test_rectangle_wrong_length() {
        assert!(matches!(
            RectangleEntity::decode("0A01000164000032003200"),
            Err(Error::LengthMismatch { .. })
        ));
        assert!(matches!(
            RectangleEntity::decode("0B01000164000032003200"),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_rectangle_display() {
        let dump = RectangleEntity::decode(RAW).unwrap().to_string();
        assert!(dump.contains("0032 (50 px)"));
        assert!(dump.contains("64 (Rectangle)"));
    }
}
