//! Line entity

use std::fmt;

use super::{check_position, Dump, EntityCodec};
use crate::error::{Error, Result};
use crate::layout::{fields, Field, Reader, Writer};
use crate::style::{DrawStyle, FontStyle};

const THICKNESS: Field = Field::big("Thickness", 4);

/// A horizontal or vertical line
///
/// # Packet Structure
///
/// ```text
/// DataLength  Vertical  Horizontal  DrawStyle  FontStyle  Thickness
/// 07          010       001         00         62         0001
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEntity {
    vertical: u16,
    horizontal: u16,
    draw_style: DrawStyle,
    font_style: FontStyle,
    thickness: u16,
}

impl LineEntity {
    /// Characters after the data length field
    const BODY_LEN: usize = 14;

    /// Create a line, `font_style` picks the direction
    pub fn new(vertical: u16, horizontal: u16, font_style: FontStyle, thickness: u16) -> Result<Self> {
        check_position(vertical, horizontal)?;
        let font_style = font_style.normalize();
        if !font_style.is_line() {
            return Err(Error::UnsupportedFontStyle {
                entity: Self::KIND,
                style: font_style,
            });
        }
        Ok(Self {
            vertical,
            horizontal,
            draw_style: DrawStyle::Normal,
            font_style,
            thickness,
        })
    }

    pub fn horizontal_line(vertical: u16, horizontal: u16, thickness: u16) -> Result<Self> {
        Self::new(vertical, horizontal, FontStyle::HorizontalLine, thickness)
    }

    pub fn vertical_line(vertical: u16, horizontal: u16, thickness: u16) -> Result<Self> {
        Self::new(vertical, horizontal, FontStyle::VerticalLine, thickness)
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

    pub fn thickness(&self) -> u16 {
        self.thickness
    }
}

impl EntityCodec for LineEntity {
    const KIND: &'static str = "line";

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
        let draw_style = DrawStyle::from(reader.read_u8(fields::DRAW_STYLE)?);
        let font_style = FontStyle::from(reader.read_u8(fields::FONT_STYLE)?);
        let thickness = reader.read_u16(THICKNESS)?;
        reader.finish()?;

        Ok(Self::new(vertical, horizontal, font_style, thickness)?.with_draw_style(draw_style))
    }

    fn encode(&self) -> Result<String> {
        let mut writer = Writer::new();
        writer
            .put(fields::VERTICAL, self.vertical)?
            .put(fields::HORIZONTAL, self.horizontal)?
            .put(fields::DRAW_STYLE, self.draw_style)?
            .put(fields::FONT_STYLE, self.font_style)?
            .put(THICKNESS, self.thickness)?;
        writer.finish_framed()
    }
}

impl fmt::Display for LineEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dump = Dump::start(f, "Entity Line package")?;
        dump.data_length(fields::DATA_LENGTH.digits + Self::BODY_LEN)?;
        dump.field(fields::VERTICAL, self.vertical, self.vertical)?;
        dump.field(fields::HORIZONTAL, self.horizontal, self.horizontal)?;
        dump.field(fields::DRAW_STYLE, self.draw_style, self.draw_style.name())?;
        dump.field(fields::FONT_STYLE, self.font_style, self.font_style.name())?;
        dump.field(THICKNESS, self.thickness, format!("{} px", self.thickness))
    }
}
