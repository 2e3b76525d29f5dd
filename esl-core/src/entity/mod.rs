//! Display entities
//!
//! An entity is one self-contained drawing instruction. Every kind encodes to
//! a hex packet and decodes back from one:
//!
//! ```text
//! ┌────────────┬──────────┬────────────┬───────────┬───────────┬─────────┐
//! │ DataLength │ Vertical │ Horizontal │ DrawStyle │ FontStyle │ Payload │
//! │  2 digits  │ 3 (LE)   │ 3 (BE)     │ 2         │ 2         │ N       │
//! └────────────┴──────────┴────────────┴───────────┴───────────┴─────────┘
//! ```
//!
//! Rectangles swap the two style fields, LED commands and images use their own
//! layouts; see each module.

use std::fmt;

use crate::error::{Error, Result};
use crate::layout::{fields, Field};

pub mod barcode;
pub mod image;
pub mod led;
pub mod line;
pub mod rectangle;
pub mod text;

pub use barcode::BarcodeEntity;
pub use image::{ImageEntity, ImagePlane};
pub use led::{LedColor, LedEntity};
pub use line::LineEntity;
pub use rectangle::RectangleEntity;
pub use text::TextEntity;

/// Hex packet encoding shared by every entity kind
///
/// For every valid entity `decode(&e.encode()?)? == e`, and for every well
/// formed packet `decode(raw)?.encode()? == raw`.
pub trait EntityCodec: Sized {
    /// Entity name used in errors and dumps
    const KIND: &'static str;

    /// Parse a hex packet
    fn decode(raw: &str) -> Result<Self>;

    /// Build the hex packet
    fn encode(&self) -> Result<String>;
}

/// Largest value of a three digit coordinate
const MAX_POSITION: u16 = 0xFFF;

/// Check that a corner position fits its three digit fields
///
/// Current tags are at most 512 pixels wide, but any value the fields can
/// carry (0..=0xFFF) is accepted so larger panels still encode.
pub(crate) fn check_position(vertical: u16, horizontal: u16) -> Result<()> {
    for value in [vertical, horizontal] {
        if value > MAX_POSITION {
            return Err(Error::EncodingOverflow {
                value: u64::from(value),
                digits: fields::VERTICAL.digits,
            });
        }
    }
    Ok(())
}

/// Part/length/data table used by the `Display` impls
pub(crate) struct Dump<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> Dump<'a, 'b> {
    pub(crate) fn start(f: &'a mut fmt::Formatter<'b>, title: &str) -> std::result::Result<Self, fmt::Error> {
        writeln!(f, "{}", title)?;
        writeln!(f, "{:<24}{:<8}Data", "Part", "Length")?;
        Ok(Self { f })
    }

    /// Row for a numeric field, rendered in its wire form
    pub(crate) fn field(
        &mut self,
        field: Field,
        value: impl Into<u32>,
        note: impl fmt::Display,
    ) -> fmt::Result {
        let hex = field.render(value).map_err(|_| fmt::Error)?;
        writeln!(
            self.f,
            "{:<24}{:<8}{} ({})",
            field.name, field.digits, hex, note
        )
    }

    /// Row for a variable length part
    pub(crate) fn part(&mut self, name: &str, hex: &str, note: impl fmt::Display) -> fmt::Result {
        writeln!(self.f, "{:<24}{:<8}{} ({})", name, "", hex, note)
    }

    /// Data length row derived from an encoded packet
    pub(crate) fn data_length(&mut self, packet_len: usize) -> fmt::Result {
        let bytes = packet_len.saturating_sub(fields::DATA_LENGTH.digits) / 2;
        self.field(
            fields::DATA_LENGTH,
            bytes as u32,
            format!("{}*2={} characters", bytes, bytes * 2),
        )
    }
}
